//! Narrow interface the provider's adapters consume

use crate::error::Result;
use crate::types::{CreateProject, Project, ProjectRef, UpdateProject, User};
use async_trait::async_trait;
use std::time::Duration;

/// Per-request options forwarded from the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Applied to the HTTP request as-is; `None` means no client-side limit
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

/// GitLab operations used by the provider
///
/// Implementations must be safe to share between concurrent callers.
#[async_trait]
pub trait GitlabApi: Send + Sync {
    async fn create_project(&self, opts: &RequestOptions, project: &CreateProject)
    -> Result<Project>;

    async fn get_project(&self, opts: &RequestOptions, project: &ProjectRef) -> Result<Project>;

    async fn update_project(
        &self,
        opts: &RequestOptions,
        id: u64,
        changes: &UpdateProject,
    ) -> Result<Project>;

    /// Fails with [`GitlabError::NotFound`](crate::GitlabError::NotFound)
    /// when the project does not exist
    async fn delete_project(&self, opts: &RequestOptions, id: u64) -> Result<()>;

    async fn current_user(&self, opts: &RequestOptions) -> Result<User>;
}
