use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read directory file {path}: {source}")]
    DirectoryFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse directory file: {0}")]
    DirectoryFileParse(#[from] serde_yaml::Error),

    #[error("directory validation failed: {0}")]
    Validation(String),
}
