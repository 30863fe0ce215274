use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no middleware registered for token '{token}'")]
    UnknownMiddleware { token: String },
}

impl PipelineError {
    pub fn unknown_middleware<S: ToString>(token: S) -> Self {
        Self::UnknownMiddleware { token: token.to_string() }
    }
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("headers already sent")]
    HeadersAlreadySent,

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}
