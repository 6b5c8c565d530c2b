//! Error types for Sitepush

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for a deployment run
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Env must be either 'staging' or 'production'")]
    UnknownEnvironment(String),

    #[error("The upload key was rejected, get a new one from your account settings")]
    CredentialInvalid,

    #[error("The upload key is not authorized for this site, check the site id in your configuration")]
    SiteUnauthorized,

    #[error("Public folder not found: {0}")]
    SourceMissing(PathBuf),

    #[error("Public folder is not a directory: {0}")]
    SourceNotADirectory(PathBuf),

    #[error("Failed to read site files: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to build archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Upload rejected with status {status}")]
    UploadRejected { status: u16, body: String },
}

impl DeployError {
    /// Process exit code for this failure, one per taxonomy entry.
    ///
    /// The archive building errors (`Walk`, `Zip`, `Io`) share a code since
    /// they all mean the same thing to the user: the site files could not be
    /// packed.
    pub fn exit_code(&self) -> i32 {
        match self {
            DeployError::Config(_) => 2,
            DeployError::UnknownEnvironment(_) => 3,
            DeployError::CredentialInvalid => 4,
            DeployError::SiteUnauthorized => 5,
            DeployError::SourceMissing(_) => 6,
            DeployError::SourceNotADirectory(_) => 7,
            DeployError::Walk(_) | DeployError::Zip(_) | DeployError::Io(_) => 8,
            DeployError::Transport(_) => 9,
            DeployError::UploadRejected { .. } => 10,
        }
    }
}

pub type Result<T> = std::result::Result<T, DeployError>;
