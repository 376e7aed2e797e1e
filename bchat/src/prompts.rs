//! Prompt text for tool-enabled turns and structured-output operations.

use bprovider::UrlCitation;

pub const DEFAULT_SEARCH_SYSTEM_PROMPT: &str = "You are a helpful assistant that can search the web and provide accurate, up-to-date information based on search results.";

pub const SEARCH_FORMAT_SYSTEM_PROMPT: &str = "You are formatting web search results into the requested JSON structure. Use the search results and any additional context to create accurate, structured data according to the schema provided.";

const JSON_PROMPT_PREFIX: &str = "Please provide the following information as JSON: ";

/// Preamble describing tool-use rules, followed by the caller's own system prompt.
pub fn tools_system_prompt(toolkits: &[String], user_system_prompt: Option<&str>) -> String {
    let preamble = format!(
        "You can call external tools via Arcade toolkits [{}].
You will be given OpenAI-formatted function tools with strict JSON schemas. When a tool is needed:
- Select the correct tool and provide arguments matching the schema exactly (correct field names and types).
- Wait for tool results before answering; incorporate outputs into the final response.
- If authorization is required, it will be handled automatically; retry after auth completes.
- Do not fabricate tool outputs; execute the tool to retrieve real data or perform actions.
- Prefer safe, non-destructive actions unless explicitly requested.",
        toolkits.join(", ")
    );

    match user_system_prompt.filter(|prompt| !prompt.is_empty()) {
        Some(prompt) => format!("{preamble}\n\n{prompt}"),
        None => preamble,
    }
}

pub fn json_instructions(system_prompt: &str, schema_example: &str) -> String {
    format!(
        "\n    {system_prompt}\n\n    You must respond with a valid JSON object similar to this example structure:\n    {schema_example}\n\n    Your response must be only valid JSON, without any additional text.\n  "
    )
}

/// The completion service requires the word "json" somewhere in a JSON-mode prompt.
pub fn json_prompt(prompt: &str) -> String {
    if prompt.to_lowercase().contains("json") {
        prompt.to_string()
    } else {
        format!("{JSON_PROMPT_PREFIX}{prompt}")
    }
}

pub fn image_prompt(prompt: &str, schema_example: &str) -> String {
    format!("{prompt} Please format your response according to this JSON schema: {schema_example}")
}

pub fn search_prompt(query: &str, prompt: Option<&str>) -> String {
    match prompt.filter(|prompt| !prompt.is_empty()) {
        Some(prompt) => format!("Search for: {query}\n\nAdditional instructions: {prompt}"),
        None => format!("Search for: {query}"),
    }
}

pub fn search_format_prompt(citations: &[UrlCitation], search_text: &str) -> String {
    let results = citations
        .iter()
        .map(|citation| {
            format!(
                "- {}: {}",
                citation.title.as_deref().unwrap_or_default(),
                citation.url.as_deref().unwrap_or_default()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Format these web search results according to the requested schema:\n\nSearch Results:\n{results}\n\nAdditional context from search: {search_text}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tools_prompt_lists_toolkits_and_appends_user_prompt() {
        let toolkits = vec!["Gmail".to_string(), "Math".to_string()];
        let prompt = tools_system_prompt(&toolkits, Some("Answer in French."));

        assert!(prompt.starts_with("You can call external tools via Arcade toolkits [Gmail, Math]."));
        assert!(prompt.ends_with("unless explicitly requested.\n\nAnswer in French."));

        let bare = tools_system_prompt(&toolkits, Some(""));
        assert!(bare.ends_with("unless explicitly requested."));
        assert_eq!(bare, tools_system_prompt(&toolkits, None));
    }

    #[test]
    fn json_prompt_prefix_is_case_insensitive() {
        assert_eq!(json_prompt("Return JSON with a name"), "Return JSON with a name");
        assert_eq!(
            json_prompt("List three colors"),
            "Please provide the following information as JSON: List three colors"
        );
    }

    #[test]
    fn json_instructions_embed_schema_example() {
        let instructions = json_instructions("Be precise.", r#"{"name":"x"}"#);
        assert!(instructions.contains("\n    Be precise.\n"));
        assert!(instructions.contains("similar to this example structure:\n    {\"name\":\"x\"}\n"));
        assert!(instructions.contains("Your response must be only valid JSON"));
    }

    #[test]
    fn search_prompts_render_optional_parts() {
        assert_eq!(search_prompt("rust 2024", None), "Search for: rust 2024");
        assert_eq!(
            search_prompt("rust 2024", Some("focus on editions")),
            "Search for: rust 2024\n\nAdditional instructions: focus on editions"
        );

        let citations = vec![UrlCitation {
            title: Some("Rust Blog".to_string()),
            url: Some("https://blog.rust-lang.org".to_string()),
            start_index: Some(0),
            end_index: Some(9),
        }];
        let formatted = search_format_prompt(&citations, "Editions ship every three years.");
        assert!(formatted.contains("Search Results:\n- Rust Blog: https://blog.rust-lang.org\n\n"));
        assert!(formatted.ends_with("Additional context from search: Editions ship every three years."));
    }
}
