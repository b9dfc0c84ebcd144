use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown job type: {0}")]
    UnknownJobType(String),

    #[error("unknown experience level: {0}")]
    UnknownExperience(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read seed file {path}: {source}")]
    SeedFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seed file: {0}")]
    SeedFileParse(#[from] serde_yaml::Error),

    #[error("seed validation failed: {0}")]
    Validation(String),
}
