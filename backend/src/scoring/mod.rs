pub mod config;
pub mod rules;

#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("Failed to read points table: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid points table: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
