use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("No API key configured. Set one with `weekdigest config set-key <KEY>`.")]
    MissingApiKey,

    #[error("No daily notes found in the last {days} days.")]
    NoNotes { days: i64 },

    #[error("Weekly note already exists: {path} (use --force to overwrite)")]
    DestinationExists { path: String },

    #[error("Another run is already in progress (lock file {})", .path.display())]
    RunInProgress { path: PathBuf },

    #[error("Invalid date \"{input}\" (expected YYYYMMDD or YYYY-MM-DD)")]
    InvalidDate { input: String },

    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("Invalid ignore pattern \"{pattern}\": {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("Summarization failed: {0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Config(#[from] ConfigError),
}

/// Failures of the document store
#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("Document not found: {path}")]
    NotFound { path: String },

    #[error("Already exists: {path}")]
    AlreadyExists { path: String },

    #[error("Path leaves the vault: {path}")]
    OutsideVault { path: String },

    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn from_io(path: &str, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => StoreError::NotFound {
                path: path.to_string(),
            },
            std::io::ErrorKind::AlreadyExists => StoreError::AlreadyExists {
                path: path.to_string(),
            },
            _ => StoreError::Io {
                path: path.to_string(),
                source,
            },
        }
    }
}

/// Failures of the remote summarization service
#[derive(Debug, Error)]
pub(crate) enum ServiceError {
    #[error("authentication rejected by the completion service (check your API key)")]
    AuthFailed,

    #[error("request failed: {0}")]
    Request(String),

    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to write config {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine a config directory; pass --config")]
    NoConfigDir,
}
