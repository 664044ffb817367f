use std::path::PathBuf;

use thiserror::Error;

/// Reasons a submission is refused before it leaves the form.
///
/// The `Display` text is exactly what the alert shows to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select an operation")]
    MissingOperation,
    #[error("Please select a file for this operation")]
    MissingFile,
    #[error("Password is required for this operation")]
    MissingPassword,
    #[error("Snapshot hash is required for revert")]
    MissingHash,
    /// A raw operation value outside the five known ones.
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
}

/// Failures while handing an accepted submission to the backend.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server answered {status}: {body}")]
    Rejected { status: u16, body: String },
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read settings file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
