//! GitLab REST API client
//!
//! Direct GitLab API v4 implementation over reqwest with bearer token
//! authentication.

use crate::api::{GitlabApi, RequestOptions};
use crate::error::{GitlabError, Result};
use crate::types::{CreateProject, Project, ProjectRef, UpdateProject, User};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::fmt;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://gitlab.com";

const API_PATH: &str = "api/v4";

const USER_AGENT: &str = concat!("terraform-provider-gitlab/", env!("CARGO_PKG_VERSION"));

/// GitLab API client
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct GitlabClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

impl fmt::Debug for GitlabClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitlabClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Normalize a GitLab instance URL to its API root (`.../api/v4/`)
pub fn normalize_base_url(raw: &str) -> Result<Url> {
    let invalid = |reason: &str| GitlabError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("not a base URL"));
    }
    url.set_query(None);
    url.set_fragment(None);

    let path = url.path().trim_end_matches('/').to_string();
    let has_api_root = path
        .strip_suffix(API_PATH)
        .is_some_and(|parent| parent.ends_with('/'));
    let path = if has_api_root {
        format!("{}/", path)
    } else {
        format!("{}/{}/", path, API_PATH)
    };
    url.set_path(&path);
    Ok(url)
}

impl GitlabClient {
    /// Client for gitlab.com
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, token)
    }

    /// Client for a self-managed instance (e.g. "https://gitlab.example.com")
    pub fn with_base_url(base_url: &str, token: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
            token: token.into(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| GitlabError::InvalidBaseUrl {
                url: format!("{}{}", self.base_url, path),
                reason: e.to_string(),
            })
    }

    fn request(&self, method: Method, path: &str, opts: &RequestOptions) -> Result<RequestBuilder> {
        let url = self.endpoint(path)?;
        tracing::debug!("{} {}", method, url);

        let mut request = self.http.request(method, url).bearer_auth(&self.token);
        if let Some(timeout) = opts.timeout {
            request = request.timeout(timeout);
        }
        Ok(request)
    }

    /// Send a request and return the raw body of a successful response
    async fn execute(&self, request: RequestBuilder) -> Result<String> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let err = GitlabError::from_status(status, &body);
            tracing::debug!(status = status.as_u16(), "GitLab API error: {}", err);
            return Err(err);
        }
        Ok(body)
    }

    async fn execute_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let body = self.execute(request).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl GitlabApi for GitlabClient {
    async fn create_project(
        &self,
        opts: &RequestOptions,
        project: &CreateProject,
    ) -> Result<Project> {
        let request = self.request(Method::POST, "projects", opts)?.json(project);
        self.execute_json(request).await
    }

    async fn get_project(&self, opts: &RequestOptions, project: &ProjectRef) -> Result<Project> {
        let path = format!("projects/{}", project.to_path_segment());
        let request = self.request(Method::GET, &path, opts)?;
        self.execute_json(request).await
    }

    async fn update_project(
        &self,
        opts: &RequestOptions,
        id: u64,
        changes: &UpdateProject,
    ) -> Result<Project> {
        let path = format!("projects/{}", id);
        let request = self.request(Method::PUT, &path, opts)?.json(changes);
        self.execute_json(request).await
    }

    async fn delete_project(&self, opts: &RequestOptions, id: u64) -> Result<()> {
        let path = format!("projects/{}", id);
        let request = self.request(Method::DELETE, &path, opts)?;
        self.execute(request).await?;
        Ok(())
    }

    async fn current_user(&self, opts: &RequestOptions) -> Result<User> {
        let request = self.request(Method::GET, "user", opts)?;
        self.execute_json(request).await
    }
}
