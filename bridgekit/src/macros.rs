/// Creates a single [`ChatMessage`](crate::ChatMessage) from a role shorthand.
///
/// ```rust
/// use bridgekit::{Role, bk_msg};
///
/// let message = bk_msg!(assistant => "Done.");
/// assert_eq!(message.role, Role::Assistant);
/// assert_eq!(message.content, "Done.");
/// ```
#[macro_export]
macro_rules! bk_msg {
    (system => $content:expr $(,)?) => {
        $crate::ChatMessage::new($crate::Role::System, $content)
    };
    (user => $content:expr $(,)?) => {
        $crate::ChatMessage::new($crate::Role::User, $content)
    };
    (assistant => $content:expr $(,)?) => {
        $crate::ChatMessage::new($crate::Role::Assistant, $content)
    };
    ($role:ident => $content:expr $(,)?) => {
        compile_error!("unsupported role: use system, user, or assistant");
    };
}

/// Creates a `Vec<ChatMessage>` from role/content pairs.
///
/// ```rust
/// use bridgekit::{Role, bk_messages};
///
/// let messages = bk_messages![
///     system => "You are concise.",
///     user => "Summarize this repository.",
/// ];
///
/// assert_eq!(messages.len(), 2);
/// assert_eq!(messages[0].role, Role::System);
/// assert_eq!(messages[1].role, Role::User);
/// ```
#[macro_export]
macro_rules! bk_messages {
    () => {
        Vec::<$crate::ChatMessage>::new()
    };
    ($($role:ident => $content:expr),+ $(,)?) => {
        vec![$($crate::bk_msg!($role => $content)),+]
    };
}

/// Creates a [`ChatTurnRequest`](crate::ChatTurnRequest), optionally with toolkits.
///
/// ```rust
/// use bridgekit::bk_turn;
///
/// let plain = bk_turn!("session-1", "hello");
/// assert!(plain.toolkits.is_empty());
///
/// let with_tools = bk_turn!("session-1", "email Ada", ["Gmail"]);
/// assert_eq!(with_tools.toolkits, vec!["Gmail".to_string()]);
/// ```
#[macro_export]
macro_rules! bk_turn {
    ($session_id:expr, $message:expr $(,)?) => {
        $crate::ChatTurnRequest::new($message).with_session_id($session_id)
    };
    ($session_id:expr, $message:expr, [$($toolkit:expr),+ $(,)?] $(,)?) => {
        $crate::ChatTurnRequest::new($message)
            .with_session_id($session_id)
            .with_toolkits([$($toolkit),+])
    };
}
