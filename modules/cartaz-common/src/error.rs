use thiserror::Error;

/// Plumbing errors. Resolution itself never surfaces these — missing or
/// malformed data degrades to empty values; only repository and
/// configuration failures are typed.
#[derive(Error, Debug)]
pub enum CartazError {
    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Geocoding error: {0}")]
    Geocoding(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
