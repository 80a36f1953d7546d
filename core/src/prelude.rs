pub use crate::report::{Report, ReportMetrics, ReportStatus, ViewerUrls};
pub use crate::session::{Effect, SessionEvent, SessionState, UploadState, ViewSelection};

/// Failure raised while talking to the analysis service.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("analysis service rejected the request ({status}): {detail}")]
    Backend { status: u16, detail: String },
    #[error("malformed response: {0}")]
    Decode(String),
}

pub type ClientResult<T> = Result<T, ClientError>;
