//! Error types for the AutoFAQ engine

/// Result type alias using the engine's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for AutoFAQ operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Corpus storage errors
    #[error("store error: {0}")]
    Store(String),

    /// Chat platform errors
    #[error("platform error: {0}")]
    Platform(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// The corpus cannot support a fitted model
    #[error("not trainable: {0}")]
    NotTrainable(String),

    /// A topic the store does not know
    #[error("unknown topic: {0}")]
    UnknownTopic(String),

    /// An entry id the topic does not contain
    #[error("unknown entry: {0}")]
    UnknownEntry(u32),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Create a new platform error
    pub fn platform(msg: impl Into<String>) -> Self {
        Self::Platform(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new not-trainable error
    pub fn not_trainable(msg: impl Into<String>) -> Self {
        Self::NotTrainable(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
