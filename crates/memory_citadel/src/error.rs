//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! malformed generator input, invalid layout configuration, entitlement limits, lookups
//! of unknown citadel entities, and generic errors.
use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("premium entitlement required: {0}")]
    EntitlementRequired(String),

    #[error("unknown palace '{id}'")]
    UnknownPalace { id: Uuid },

    #[error("unknown wing '{id}'")]
    UnknownWing { id: Uuid },

    #[error("unknown room '{id}'")]
    UnknownRoom { id: Uuid },

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_string_uses_other_variant() {
        let err: Error = String::from("boom").into();
        assert!(matches!(err, Error::Other(_)));
    }

    #[test]
    fn from_str_allocates_owned_message() {
        let err: Error = "issue".into();
        assert!(matches!(err, Error::Other(ref msg) if msg == "issue"));
    }

    #[test]
    fn unknown_entity_messages_name_the_id() {
        let id = Uuid::nil();
        let err = Error::UnknownWing { id };
        assert_eq!(
            err.to_string(),
            "unknown wing '00000000-0000-0000-0000-000000000000'"
        );
    }
}
