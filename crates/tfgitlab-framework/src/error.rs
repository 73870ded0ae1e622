//! Framework error types

use crate::diag::Diagnostic;
use thiserror::Error;

/// Errors raised by the host driver
#[derive(Error, Debug)]
pub enum FrameworkError {
    #[error("Provider is already configured")]
    AlreadyConfigured,

    #[error("Provider is not configured")]
    NotConfigured,

    #[error("Provider configuration failed earlier in this session")]
    ConfigurationFailed,

    #[error("Unknown resource type: {0}")]
    UnknownResourceType(String),

    #[error("Unknown data source type: {0}")]
    UnknownDataSourceType(String),

    #[error("Expected provider data of type {expected}, got: {actual}")]
    UnexpectedProviderData {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Logging initialization failed: {0}")]
    Logging(String),
}

impl From<FrameworkError> for Diagnostic {
    fn from(err: FrameworkError) -> Self {
        let summary = match &err {
            FrameworkError::AlreadyConfigured => "Provider Already Configured",
            FrameworkError::NotConfigured | FrameworkError::ConfigurationFailed => {
                "Unconfigured Provider"
            }
            FrameworkError::UnknownResourceType(_) => "Unknown Resource Type",
            FrameworkError::UnknownDataSourceType(_) => "Unknown Data Source Type",
            FrameworkError::UnexpectedProviderData { .. } => "Unexpected Configure Type",
            FrameworkError::Logging(_) => "Internal Error",
        };
        Diagnostic::error(summary, err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FrameworkError>;
