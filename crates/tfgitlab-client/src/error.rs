//! GitLab client error types

use reqwest::StatusCode;
use thiserror::Error;

/// Maximum length of a raw (non-JSON) error body kept in a message
const MAX_BODY_LENGTH: usize = 200;

#[derive(Error, Debug)]
pub enum GitlabError {
    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Authentication failed ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("GitLab API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GitlabError {
    /// Classify a non-success status and its body
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = error_message(body);
        match status {
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthorized {
                status: status.as_u16(),
                message,
            },
            _ => Self::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// The remote system reported the object as absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}

/// Pull the human-readable message out of a GitLab error body
///
/// GitLab answers with `{"message": "..."}`, `{"message": {field: [...]}}`
/// for validation failures, or `{"error": "...", "error_description": "..."}`
/// for OAuth-style errors.
fn error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        return truncate(body);
    };

    if let Some(message) = json.get("message") {
        return match message {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Object(fields) => fields
                .iter()
                .map(|(field, problems)| match problems {
                    serde_json::Value::Array(items) => format!(
                        "{} {}",
                        field,
                        items
                            .iter()
                            .filter_map(|p| p.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                    other => format!("{} {}", field, other),
                })
                .collect::<Vec<_>>()
                .join("; "),
            other => other.to_string(),
        };
    }

    match (
        json.get("error").and_then(|v| v.as_str()),
        json.get("error_description").and_then(|v| v.as_str()),
    ) {
        (Some(error), Some(description)) => format!("{}: {}", error, description),
        (Some(error), None) => error.to_string(),
        _ => truncate(body),
    }
}

fn truncate(body: &str) -> String {
    let cleaned: String = body
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .collect();
    if cleaned.len() > MAX_BODY_LENGTH {
        format!("{}...", &cleaned[..MAX_BODY_LENGTH])
    } else {
        cleaned
    }
}

pub type Result<T> = std::result::Result<T, GitlabError>;
