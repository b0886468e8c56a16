use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Input required and not supplied: {0}")]
    MissingInput(&'static str),

    #[error("This action can only be run on pull request events")]
    NotPullRequestEvent,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Jira issue {0} not found")]
    IssueNotFound(String),

    #[error("{0}")]
    Jira(String),

    #[error("{0}")]
    GitHub(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        match err {
            octocrab::Error::GitHub { source, .. } => Error::GitHub(source.message),
            other => Error::GitHub(without_backtrace(&other.to_string())),
        }
    }
}

/// Octocrab appends `\n\nFound at <backtrace>` to non-API errors; keep only the
/// message itself, on one line.
fn without_backtrace(rendered: &str) -> String {
    rendered
        .split("\n\nFound at")
        .next()
        .unwrap_or(rendered)
        .trim()
        .replace(['\r', '\n'], " ")
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Jira(format!("Jira request failed: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
