use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuarryError {
    #[error("No backend given")]
    Usage,

    #[error("Unknown backend {name}")]
    UnknownBackend { name: String },

    #[error("Duplicate backend registered: {name}")]
    DuplicateBackend { name: &'static str },

    #[error("System command '{command}' failed: {reason}")]
    SystemCommandFailed { command: String, reason: String },

    #[error("System dependency missing: {0}")]
    DependencyMissing(String),

    #[error("Failed to fetch remote resource: {0}")]
    RemoteFetchError(String),

    #[error("Fetch interrupted by user")]
    Interrupted,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl QuarryError {
    /// Process exit status for this outcome. Interruption is the one
    /// graceful nonstandard exit; every failure maps to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Interrupted => 0,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, QuarryError>;
