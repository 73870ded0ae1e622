//! GitLab provider error types

use tfgitlab_client::GitlabError;
use tfgitlab_framework::Diagnostic;
use thiserror::Error;

/// Provider configuration errors; all of them are fatal for the session
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "The provider cannot create the GitLab API client as there is an unknown configuration value for the token. \
         Either target apply the source of the value first, set the value statically in the configuration, \
         or use the GITLAB_TOKEN environment variable."
    )]
    UnknownToken,

    #[error(
        "The provider cannot create the GitLab API client as there is a missing or empty value for the API token. \
         Set the token value in the configuration or use the GITLAB_TOKEN environment variable. \
         If either is already set, ensure the value is not empty."
    )]
    MissingToken,

    #[error(
        "The provider cannot create the GitLab API client as there is an unknown configuration value for the base URL. \
         Set the value statically in the configuration or use the GITLAB_BASE_URL environment variable."
    )]
    UnknownBaseUrl,

    #[error("Invalid value for {attribute}: {message}")]
    InvalidValue {
        attribute: &'static str,
        message: String,
    },

    #[error("An unexpected error occurred when creating the GitLab client: {0}")]
    Client(#[from] GitlabError),
}

impl ConfigError {
    /// Configuration attribute the error is about
    pub fn attribute(&self) -> Option<&'static str> {
        match self {
            ConfigError::UnknownToken | ConfigError::MissingToken => Some("token"),
            ConfigError::UnknownBaseUrl => Some("base_url"),
            ConfigError::InvalidValue { attribute, .. } => Some(*attribute),
            ConfigError::Client(GitlabError::InvalidBaseUrl { .. }) => Some("base_url"),
            ConfigError::Client(_) => None,
        }
    }
}

impl From<ConfigError> for Diagnostic {
    fn from(err: ConfigError) -> Self {
        let summary = match &err {
            ConfigError::UnknownToken => "Unknown GitLab API Token",
            ConfigError::MissingToken => "Missing GitLab API Token",
            ConfigError::UnknownBaseUrl => "Unknown GitLab Base URL",
            ConfigError::InvalidValue { .. } => "Invalid Provider Configuration",
            ConfigError::Client(_) => "Unable to Create GitLab Client",
        };
        let attribute = err.attribute();
        let diagnostic = Diagnostic::error(summary, err.to_string());
        match attribute {
            Some(attribute) => diagnostic.with_attribute(attribute),
            None => diagnostic,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
