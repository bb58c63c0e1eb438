//! Error types for game catalogue handlers

use thiserror::Error;

/// Errors that can occur while handling a catalogue request.
///
/// The `Display` output of every variant is the bare message, because it is
/// shown to the user verbatim on the error page.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("{0}")]
    Validation(String),

    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    Storage(String),

    #[error("{0}")]
    Template(String),

    #[error("{0}")]
    Internal(String),
}

impl HandlerError {
    /// Convert the error to an HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::NotFound => 404,
            _ => 500,
        }
    }

    /// Shorthand for a validation failure listing the fields that must be present.
    pub fn missing_fields(fields: &[&str]) -> Self {
        HandlerError::Validation(format!("Missing required fields: {}", fields.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(HandlerError::NotFound.status_code(), 404);
        assert_eq!(HandlerError::Validation("x".into()).status_code(), 500);
        assert_eq!(HandlerError::Storage("x".into()).status_code(), 500);
        assert_eq!(HandlerError::Template("x".into()).status_code(), 500);
        assert_eq!(HandlerError::Internal("x".into()).status_code(), 500);
    }

    #[test]
    fn test_messages_are_unprefixed() {
        let err = HandlerError::missing_fields(&["platform", "game_name"]);
        assert_eq!(err.to_string(), "Missing required fields: platform, game_name");
        assert_eq!(HandlerError::NotFound.to_string(), "Not found");
        assert_eq!(
            HandlerError::Storage("Requested resource not found".into()).to_string(),
            "Requested resource not found"
        );
    }
}
