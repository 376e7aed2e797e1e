//! Shared utilities and strongly-typed common values for workspace crates.
//!
//! ```rust
//! use bcommon::SessionId;
//!
//! let session = SessionId::from("session-1");
//! let generated = SessionId::generate();
//!
//! assert_eq!(session.as_str(), "session-1");
//! assert!(generated.as_str().starts_with("session_"));
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use bcommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod context {
    //! Session identifier newtype shared by the chat and tooling crates.
    //!
    //! ```rust
    //! use bcommon::SessionId;
    //!
    //! let session = SessionId::new("session-42");
    //! assert_eq!(session.to_string(), "session-42");
    //! ```

    use std::fmt::{Display, Formatter};
    use std::time::{SystemTime, UNIX_EPOCH};

    use rand::Rng;

    const SUFFIX_LEN: usize = 7;

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct SessionId(String);

    impl SessionId {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        /// Generates `session_<unix millis>_<7 base36 chars>`.
        pub fn generate() -> Self {
            let millis = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_millis())
                .unwrap_or_default();

            let mut rng = rand::thread_rng();
            let suffix = (0..SUFFIX_LEN)
                .map(|_| std::char::from_digit(rng.gen_range(0..36), 36).unwrap_or('0'))
                .collect::<String>();

            Self(format!("session_{millis}_{suffix}"))
        }

        pub fn as_str(&self) -> &str {
            self.0.as_str()
        }

        pub fn into_string(self) -> String {
            self.0
        }
    }

    impl Display for SessionId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<String> for SessionId {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for SessionId {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }

    impl AsRef<str> for SessionId {
        fn as_ref(&self) -> &str {
            self.as_str()
        }
    }
}

pub use context::SessionId;
pub use future::BoxFuture;
