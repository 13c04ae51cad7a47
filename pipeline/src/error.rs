use thiserror::Error;

/// Failure of a pipeline run or of the input checks that precede it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("No file was provided.")]
    NoFile,
    #[error("Please upload an image first.")]
    MissingImage,
    #[error("Invalid service endpoint {0}")]
    Endpoint(String),
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Server error: {status} - {message}")]
    Service { status: u16, message: String },
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

/// Coarse error class used by presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    Transport,
    Service,
    /// The scoring service answered but rejected the request.
    Domain,
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::NoFile | PipelineError::MissingImage | PipelineError::Endpoint(_) => ErrorKind::Input,
            PipelineError::Transport(_) => ErrorKind::Transport,
            PipelineError::Service { .. } | PipelineError::Decode(_) => ErrorKind::Service,
        }
    }
}

impl From<reqwest::Error> for PipelineError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => PipelineError::Service {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None if err.is_decode() => PipelineError::Decode(err.to_string()),
            None => PipelineError::Transport(err.to_string()),
        }
    }
}
