//! Errors raised while fetching and interpreting homework statuses.
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure of one poll cycle. The poller turns every variant into a
/// user-visible message; none of them stop the process.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("failed to reach the status API: {0}")]
    Transport(#[source] BoxError),
    #[error("status API answered {actual}, expected {expected}")]
    ApiStatus { actual: u16, expected: u16 },
    #[error("status API body is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("malformed status API response: {0}")]
    Shape(#[from] ShapeError),
    #[error("homework record has no usable `{0}` field")]
    MissingField(&'static str),
    #[error("unexpected homework status `{0}`")]
    UnknownStatus(String),
}

impl PollError {
    pub fn transport(err: impl Into<BoxError>) -> Self {
        PollError::Transport(err.into())
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("not a mapping")]
    NotAMapping,
    #[error("missing items field")]
    MissingItems,
    #[error("items field not a list")]
    ItemsNotAList,
}
