use reqwest::StatusCode;

pub type Result<T> = std::result::Result<T, DownloadError>;

/// Why a single fetch was aborted.
#[derive(thiserror::Error, Debug)]
pub enum DownloadError {
    /// Response status other than 200; displays the standard reason phrase.
    #[error("{}", reason_phrase(.0))]
    Status(StatusCode),
    /// The GET itself failed; carries the underlying message untouched.
    #[error("{0}")]
    Transport(String),
    #[error("invalid JSON payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unexpected payload: {0}")]
    UnexpectedPayload(String),
    #[error("compatibility entry '{0}' has no documentation link")]
    MissingReference(String),
    #[error("unknown item type code {0}")]
    UnknownItemType(u64),
    #[error("item refers to unknown parent '{0}'")]
    UnknownParent(String),
    #[error("token cannot be sent as a header value")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

fn reason_phrase(status: &StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}

impl From<reqwest::Error> for DownloadError {
    fn from(err: reqwest::Error) -> Self {
        DownloadError::Transport(err.to_string())
    }
}
