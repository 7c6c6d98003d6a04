//! Error types for the board engine

use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Precondition failures detected before any mutation or network call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// Dragged item has no usable identifier
    #[error("missing item identifier")]
    MissingItemId,

    /// Board is scoped to a parent but the parent id is blank
    #[error("missing parent identifier")]
    MissingParentId,

    /// A status update for this item has not settled yet
    #[error("This item is still being updated")]
    MutationInFlight { id: String },
}

/// Failures reported by the remote status-update call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The server answered and refused the update
    #[error("rejected by server: {message}")]
    Rejected {
        status: Option<u16>,
        message: String,
    },

    /// The request never got a usable answer
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with something that is not the API
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl RemoteError {
    /// Server-reported message, if the server gave one
    pub fn user_message(&self) -> Option<&str> {
        match self {
            RemoteError::Rejected { message, .. } if !message.trim().is_empty() => Some(message),
            RemoteError::InvalidResponse(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_flight_message_hides_item_id() {
        let err = BoardError::MutationInFlight {
            id: "64f1c2a9e1".to_string(),
        };
        assert_eq!(err.to_string(), "This item is still being updated");
    }

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = RemoteError::Rejected {
            status: Some(409),
            message: "Task is locked".to_string(),
        };
        assert_eq!(err.user_message(), Some("Task is locked"));
    }

    #[test]
    fn test_user_message_absent_for_network_and_blank() {
        assert_eq!(RemoteError::Network("offline".into()).user_message(), None);

        let blank = RemoteError::Rejected {
            status: Some(500),
            message: "  ".to_string(),
        };
        assert_eq!(blank.user_message(), None);
    }
}
