//! Error types.

use thiserror::Error;

use crate::request::BodyMode;

/// An error produced while formatting a request.
#[derive(Debug, Error)]
pub enum Error {
    /// The request URL could not be parsed.
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The body shape does not fit the effective body mode: raw bytes under
    /// a non-raw mode, anything but raw bytes under raw mode, or a JSON
    /// document under a key/value mode.
    #[error("request body does not fit the {mode} body mode")]
    InvalidBody {
        /// The effective body mode of the request.
        mode: BodyMode,
    },

    /// A JSON body failed to serialize.
    #[error("JSON body serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
