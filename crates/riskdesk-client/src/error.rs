use thiserror::Error;

/// Failure of a single request at the network boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("{path}: server returned HTTP {status}")]
    Status { path: String, status: u16 },
    #[error("{path}: request timed out")]
    Timeout { path: String },
    #[error("{path}: {message}")]
    Network { path: String, message: String },
    #[error("{path}: malformed response: {message}")]
    Decode { path: String, message: String },
}

impl TransportError {
    pub fn path(&self) -> &str {
        match self {
            TransportError::Status { path, .. }
            | TransportError::Timeout { path }
            | TransportError::Network { path, .. }
            | TransportError::Decode { path, .. } => path,
        }
    }

    pub fn decode<E: std::fmt::Display>(path: &str, e: E) -> Self {
        Self::Decode {
            path: path.to_string(),
            message: e.to_string(),
        }
    }
}

/// Aggregate failure of a refresh cycle. No partial data accompanies it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{reason}")]
pub struct CycleFailure {
    pub reason: String,
}

impl CycleFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Used when no transport message is available.
    pub fn unreachable(base_url: &str) -> Self {
        Self::new(format!(
            "Failed to connect to backend. Make sure the backend is running on {base_url}"
        ))
    }
}

impl From<TransportError> for CycleFailure {
    fn from(e: TransportError) -> Self {
        Self::new(e.to_string())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowTriggerError {
    #[error("risk threshold {0} is outside 0..=100")]
    InvalidThreshold(u32),
    #[error("workflow engine rejected the run: {message}")]
    Rejected { message: String },
    #[error("failed to trigger workflow: {0}")]
    Transport(#[from] TransportError),
}
