//! Error types for the asytic core.

/// Top-level error type for the chat companion core.
#[derive(Debug, thiserror::Error)]
pub enum AsyticError {
    /// Emotion model download or loading error.
    #[error("model error: {0}")]
    Model(String),

    /// Classification error (tokenization or inference).
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Conversation export error.
    #[error("export error: {0}")]
    Export(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AsyticError>;
