use std::path::PathBuf;
use thiserror::Error;

/// Failure while classifying one image.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The service answered with a non-2xx status.
    #[error("classification service responded with HTTP {status}")]
    Status { status: u16 },
    /// The request never produced a response.
    #[error("could not reach classification service: {0}")]
    Transport(String),
    /// A 2xx response whose body was not the expected JSON.
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// How a failure is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The server answered but reported a failure.
    Server,
    /// No usable answer came back.
    Connectivity,
}

impl ClassifyError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ClassifyError::Status { .. } => FailureKind::Server,
            ClassifyError::Transport(_)
            | ClassifyError::Decode(_)
            | ClassifyError::Read { .. } => FailureKind::Connectivity,
        }
    }
}
