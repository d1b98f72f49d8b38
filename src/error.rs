use thiserror::Error;

#[derive(Error, Debug)]
pub enum MigrateError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to {url} failed with status {status}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("Could not find project number {number} in {owner}/{repository}")]
    ProjectNotFound {
        number: u64,
        owner: String,
        repository: String,
    },

    #[error("Github project {project} must have at least one column")]
    NoProjectColumns { project: String },

    #[error("Unknown Forecast person: {0}")]
    UnknownPerson(i64),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, MigrateError>;
