//! Provider configuration resolution
//!
//! Explicit configuration wins over the environment; the environment wins
//! over built-in defaults. Resolution happens once per session.

use crate::error::{ConfigError, Result};
use std::fmt;
use tfgitlab_client::DEFAULT_BASE_URL;
use tfgitlab_framework::{Attr, Object};

/// Environment variable holding the API token
pub const TOKEN_ENV: &str = "GITLAB_TOKEN";

/// Environment variable holding the instance URL
pub const BASE_URL_ENV: &str = "GITLAB_BASE_URL";

/// API token; never printed
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(<redacted>)")
    }
}

/// Resolved provider configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub token: Token,
    pub base_url: String,
}

impl ProviderConfig {
    /// Resolve from the provider configuration block and the environment
    pub fn resolve(config: &Object) -> Result<Self> {
        Ok(Self {
            token: resolve_token(config)?,
            base_url: resolve_base_url(config)?,
        })
    }
}

fn string_attr(config: &Object, attribute: &'static str) -> Result<Attr<String>> {
    config
        .attr::<String>(attribute)
        .map_err(|diag| ConfigError::InvalidValue {
            attribute,
            message: diag.detail,
        })
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Known non-empty `token`, else `GITLAB_TOKEN`
pub fn resolve_token(config: &Object) -> Result<Token> {
    let explicit = match string_attr(config, "token")? {
        Attr::Unknown => return Err(ConfigError::UnknownToken),
        Attr::Known(token) if !token.is_empty() => Some(token),
        _ => None,
    };

    if explicit.is_some() {
        tracing::debug!("using API token from provider configuration");
    }
    explicit
        .or_else(|| env_var(TOKEN_ENV))
        .map(Token)
        .ok_or(ConfigError::MissingToken)
}

/// Known non-empty `base_url`, else `GITLAB_BASE_URL`, else gitlab.com
pub fn resolve_base_url(config: &Object) -> Result<String> {
    let explicit = match string_attr(config, "base_url")? {
        Attr::Unknown => return Err(ConfigError::UnknownBaseUrl),
        Attr::Known(url) if !url.is_empty() => Some(url),
        _ => None,
    };

    Ok(explicit
        .or_else(|| env_var(BASE_URL_ENV))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()))
}
