use crate::action::ActionIdError;
use crate::dom::DomError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Connection error: {0}")]
    Connection(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Server error {status}: {body}")]
    Server { status: u16, body: String },

    #[error("Invalid action: {0}")]
    InvalidAction(#[from] ActionIdError),

    #[error("Trigger element has no \"{0}\" attribute")]
    MissingTargetAttribute(String),

    #[error("Target element \"{0}\" not found")]
    TargetNotFound(String),

    #[error("Unknown swap method \"{0}\"")]
    UnknownSwap(String),

    #[error("DOM error: {0}")]
    Dom(#[from] DomError),
}

impl FlowError {
    pub fn server(status: u16, body: impl Into<String>) -> Self {
        Self::Server {
            status,
            body: body.into(),
        }
    }

    /// Failures the end user is told about. A missing or unmatched target
    /// and an unknown swap keyword only reach the log.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            FlowError::Connection(_)
                | FlowError::Serialize(_)
                | FlowError::Server { .. }
                | FlowError::Dom(_)
        )
    }
}
