use thiserror::Error;

/// Failures surfaced through the pipeline state. Clonable so the current
/// `Failed` state can be inspected and re-rendered without consuming it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Search keyword must not be empty")]
    EmptyKeyword,

    #[error("Search request timed out after {0} ms")]
    Timeout(u64),

    #[error("Network error: {0}")]
    Network(String),
}

/// Setup failures that prevent the pipeline from running at all.
#[derive(Error, Debug)]
pub enum MinneError {
    #[error("Invalid base URL '{url}': {source}")]
    BaseUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
