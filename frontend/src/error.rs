use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("contact form has no `{0}` field")]
    MissingField(String),
    #[error("no submission is in progress")]
    NotBusy,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("site config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
