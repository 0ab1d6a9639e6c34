use thiserror::Error;

#[derive(Error, Debug)]
pub enum KinError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("No element with id '{0}' in the page")]
    UnknownElement(String),

    #[error("No screen with id '{0}' in the page")]
    ScreenNotFound(String),

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, KinError>;
