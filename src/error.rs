//! Error types
//!
//! Every failure an analysis can run into, from an empty token list to a
//! server that never answers.

use thiserror::Error;

/// Errors produced while fetching models, analyzing text or aggregating scores
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// Aggregation was requested over zero tokens
    #[error("cannot aggregate sentiment over an empty token list")]
    EmptyInput,

    /// The text to analyze is blank
    #[error("nothing to analyze: the text is empty")]
    EmptyText,

    /// The HTTP client itself could not be set up
    #[error("failed to set up the HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The server could not be reached at all
    #[error("could not reach {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server did not answer within the configured timeout
    #[error("request to {url} timed out after {secs}s")]
    Timeout { url: String, secs: u64 },

    /// The server answered with something other than 200 OK
    #[error("{url} responded with {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// The response body was not the JSON we expected
    #[error("malformed response from {url}: {source}")]
    MalformedResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// No model with the requested name exists on the server
    #[error("unknown model: {0}")]
    UnknownModel(String),

    /// The server lists no models
    #[error("the server does not offer any models")]
    NoModels,
}

pub type Result<T> = std::result::Result<T, AnalyzeError>;
