//! Session storage contracts and the in-memory implementation.
//!
//! The in-memory store lives as long as the object that owns it. It has no
//! eviction, and two turns racing on one session id may interleave appends.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use bcommon::{BoxFuture, SessionId};
use bprovider::ChatMessage;

use crate::{ChatError, ChatSession};

pub type ChatFuture<'a, T> = BoxFuture<'a, T>;

pub trait SessionStore: Send + Sync {
    /// Returns a snapshot, creating an empty session for unknown ids.
    fn get_or_create<'a>(
        &'a self,
        session_id: &'a SessionId,
    ) -> ChatFuture<'a, Result<ChatSession, ChatError>>;

    /// Returns a copy of the history without creating a session.
    fn history<'a>(
        &'a self,
        session_id: &'a SessionId,
    ) -> ChatFuture<'a, Result<Option<Vec<ChatMessage>>, ChatError>>;

    /// Appends a completed turn and, when given, replaces the last response id.
    fn commit_turn<'a>(
        &'a self,
        session_id: &'a SessionId,
        messages: Vec<ChatMessage>,
        last_response_id: Option<String>,
    ) -> ChatFuture<'a, Result<(), ChatError>>;

    fn clear<'a>(&'a self, session_id: &'a SessionId) -> ChatFuture<'a, Result<bool, ChatError>>;
}

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<SessionId, ChatSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<SessionId, ChatSession>>, ChatError> {
        self.sessions
            .lock()
            .map_err(|_| ChatError::store("session store lock poisoned"))
    }
}

impl SessionStore for InMemorySessionStore {
    fn get_or_create<'a>(
        &'a self,
        session_id: &'a SessionId,
    ) -> ChatFuture<'a, Result<ChatSession, ChatError>> {
        Box::pin(async move {
            let mut sessions = self.lock()?;
            Ok(sessions.entry(session_id.clone()).or_default().clone())
        })
    }

    fn history<'a>(
        &'a self,
        session_id: &'a SessionId,
    ) -> ChatFuture<'a, Result<Option<Vec<ChatMessage>>, ChatError>> {
        Box::pin(async move {
            let sessions = self.lock()?;
            Ok(sessions
                .get(session_id)
                .map(|session| session.messages.clone()))
        })
    }

    fn commit_turn<'a>(
        &'a self,
        session_id: &'a SessionId,
        messages: Vec<ChatMessage>,
        last_response_id: Option<String>,
    ) -> ChatFuture<'a, Result<(), ChatError>> {
        Box::pin(async move {
            let mut sessions = self.lock()?;
            let session = sessions.entry(session_id.clone()).or_default();
            session.messages.extend(messages);
            if last_response_id.is_some() {
                session.last_response_id = last_response_id;
            }

            Ok(())
        })
    }

    fn clear<'a>(&'a self, session_id: &'a SessionId) -> ChatFuture<'a, Result<bool, ChatError>> {
        Box::pin(async move {
            let mut sessions = self.lock()?;
            Ok(sessions.remove(session_id).is_some())
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::ChatErrorKind;

    #[tokio::test]
    async fn get_or_create_initializes_once() {
        let store = InMemorySessionStore::new();
        let id = SessionId::from("s1");

        assert_eq!(store.history(&id).await.expect("history"), None);
        let session = store.get_or_create(&id).await.expect("session");
        assert!(session.is_empty());
        assert_eq!(store.history(&id).await.expect("history"), Some(Vec::new()));
    }

    #[tokio::test]
    async fn commit_turn_appends_in_order_and_keeps_response_id() {
        let store = InMemorySessionStore::new();
        let id = SessionId::from("s2");

        store
            .commit_turn(
                &id,
                vec![ChatMessage::user("one"), ChatMessage::assistant("1")],
                Some("resp_1".to_string()),
            )
            .await
            .expect("first commit");
        store
            .commit_turn(
                &id,
                vec![ChatMessage::user("two"), ChatMessage::assistant("2")],
                None,
            )
            .await
            .expect("second commit");

        let session = store.get_or_create(&id).await.expect("session");
        assert_eq!(session.messages.len(), 4);
        assert_eq!(session.messages[2], ChatMessage::user("two"));
        assert_eq!(session.last_response_id.as_deref(), Some("resp_1"));
    }

    #[tokio::test]
    async fn history_is_a_copy() {
        let store = InMemorySessionStore::new();
        let id = SessionId::from("s3");
        store
            .commit_turn(&id, vec![ChatMessage::user("hi")], None)
            .await
            .expect("commit");

        let mut copy = store.history(&id).await.expect("history").expect("exists");
        copy.push(ChatMessage::assistant("injected"));

        let fresh = store.history(&id).await.expect("history").expect("exists");
        assert_eq!(fresh.len(), 1);
    }

    #[tokio::test]
    async fn clear_reports_whether_a_session_existed() {
        let store = InMemorySessionStore::new();
        let id = SessionId::from("s4");

        assert!(!store.clear(&id).await.expect("clear"));
        store.get_or_create(&id).await.expect("session");
        assert!(store.clear(&id).await.expect("clear"));
        assert_eq!(store.history(&id).await.expect("history"), None);
    }

    #[tokio::test]
    async fn poisoned_lock_surfaces_as_store_error() {
        let store = Arc::new(InMemorySessionStore::new());
        let poisoner = Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.sessions.lock().expect("lock");
            panic!("poison the store");
        })
        .join();

        let error = store
            .get_or_create(&SessionId::from("s5"))
            .await
            .expect_err("poisoned lock");
        assert_eq!(error.kind, ChatErrorKind::Store);
    }
}
