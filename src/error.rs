use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectorError {
    /// The array refused the login handshake (non-zero response code).
    /// Does not abort a poll cycle: the orchestrator continues without
    /// a session cookie.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Network, timeout, or HTTP-level failure. Aborts the remainder of
    /// the current poll cycle.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The array returned a body that is not the expected XML shape.
    #[error("malformed API response: {0}")]
    MalformedResponse(String),

    /// A field that must be numeric (enclosure additional-data) is not.
    #[error("property '{property}' is not numeric: {text:?}")]
    ValueParse { property: String, text: String },
}

pub type Result<T> = std::result::Result<T, CollectorError>;
