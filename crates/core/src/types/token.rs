//! Newtype tokens for session and line-item identity.
//!
//! Use the `define_token!` macro to create type-safe wrappers around the
//! opaque string identifiers the cart protocol exchanges. Tokens are
//! generated as `<prefix>_<unix millis>_<9 base36 chars>` and never parsed
//! back apart; the format only has to be unique and stable.

/// Alphabet for the random token suffix.
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the random token suffix.
const SUFFIX_LEN: usize = 9;

/// Generate a token of the form `<prefix>_<unix millis>_<base36 suffix>`.
#[must_use]
pub(crate) fn generate_token(prefix: &str) -> String {
    use rand::Rng;

    let millis = chrono::Utc::now().timestamp_millis();
    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| {
            let idx = rng.random_range(0..BASE36.len());
            char::from(BASE36[idx])
        })
        .collect();
    format!("{prefix}_{millis}_{suffix}")
}

/// Macro to define a type-safe token wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `new()` for adopting an existing token, `generate()` for minting one
/// - `Display`, `From<String>`, `From<&str>`, and `AsRef<str>` implementations
///
/// # Example
///
/// ```rust
/// # use goal_tickets_core::types::token::{ItemId, SessionId};
/// let session = SessionId::generate();
/// assert!(session.as_str().starts_with("session_"));
///
/// // Tokens from the wire are adopted as-is, never validated.
/// let item = ItemId::new("item_1700000000000_a1b2c3d4e");
/// ```
macro_rules! define_token {
    ($name:ident, $prefix:literal) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Adopt an existing token value.
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Mint a fresh token.
            #[must_use]
            pub fn generate() -> Self {
                Self(generate_token($prefix))
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self(raw.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_token!(SessionId, "session");
define_token!(ItemId, "item");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_session_id_format() {
        let id = SessionId::generate();
        let parts: Vec<&str> = id.as_str().splitn(3, '_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts.first().copied(), Some("session"));
        assert!(parts.get(1).is_some_and(|ts| ts.parse::<i64>().is_ok()));
        assert!(parts.get(2).is_some_and(|s| s.len() == SUFFIX_LEN));
        assert!(
            parts
                .get(2)
                .is_some_and(|s| s.bytes().all(|b| BASE36.contains(&b)))
        );
    }

    #[test]
    fn test_generated_item_ids_are_unique() {
        let a = ItemId::generate();
        let b = ItemId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_token_serde_is_transparent() {
        let id = SessionId::new("session_1700000000000_abcdefghi");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"session_1700000000000_abcdefghi\"");

        let back: SessionId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }

    #[test]
    fn test_adopted_token_is_kept_verbatim() {
        // Tokens arriving from the wire are opaque; even odd-looking ones
        // are adopted unchanged.
        let id = SessionId::new("S2");
        assert_eq!(id.as_str(), "S2");
    }
}
