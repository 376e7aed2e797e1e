//! Turns responses-API results into text, JSON, or typed failures.

use serde_json::Value;

use crate::{Annotation, ContentBlock, OutputItem, ProviderError, ResponseStatus, ResponsesObject, UrlCitation};

/// Classifies a raw result. Success passes the response through unchanged.
pub fn handle_error(response: Option<ResponsesObject>) -> Result<ResponsesObject, ProviderError> {
    let Some(response) = response else {
        return Err(ProviderError::empty_response("No data in proxy response"));
    };

    if let Some(message) = &response.error {
        return Err(ProviderError::api(
            message.clone().unwrap_or_else(|| "Unknown API error".to_string()),
        ));
    }

    if matches!(
        response.status,
        Some(ResponseStatus::Failed | ResponseStatus::Incomplete)
    ) {
        let message = response
            .incomplete_reason
            .clone()
            .unwrap_or_else(|| "Request failed".to_string());
        return Err(ProviderError::request_failed(message));
    }

    Ok(response)
}

/// First `output_text` block across every message item, in output order.
fn first_output_text(response: &ResponsesObject) -> Option<&str> {
    response
        .output
        .iter()
        .filter_map(|item| match item {
            OutputItem::Message(blocks) => Some(blocks),
            OutputItem::Other(_) => None,
        })
        .flatten()
        .find_map(|block| match block {
            ContentBlock::OutputText { text, .. } => Some(text.as_str()),
            ContentBlock::Other(_) => None,
        })
}

pub fn extract_text(response: &ResponsesObject) -> String {
    first_output_text(response).unwrap_or_default().to_string()
}

pub fn extract_json(response: &ResponsesObject) -> Result<Value, ProviderError> {
    let text = first_output_text(response)
        .ok_or_else(|| ProviderError::no_json_found("No valid JSON found in response"))?;

    serde_json::from_str(text)
        .map_err(|_| ProviderError::json_parse("Failed to parse JSON response"))
}

pub fn extract_citations(response: &ResponsesObject) -> Vec<UrlCitation> {
    response
        .output
        .iter()
        .filter_map(|item| match item {
            OutputItem::Message(blocks) => Some(blocks),
            OutputItem::Other(_) => None,
        })
        .flatten()
        .filter_map(|block| match block {
            ContentBlock::OutputText { annotations, .. } => Some(annotations),
            ContentBlock::Other(_) => None,
        })
        .flatten()
        .filter_map(|annotation| match annotation {
            Annotation::UrlCitation(citation) => Some(citation.clone()),
            Annotation::Other(_) => None,
        })
        .collect()
}
