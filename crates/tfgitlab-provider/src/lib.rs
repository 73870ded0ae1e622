//! GitLab provider
//!
//! Exposes GitLab projects and the authenticated user to a declarative-state
//! host engine.
//!
//! # Resources and data sources
//!
//! - `gitlab_project` resource: create, read, update, delete and import by
//!   numeric ID
//! - `gitlab_project` data source: look up a project by full path
//! - `gitlab_current_user` data source: the user the token belongs to
//!
//! # Configuration
//!
//! - `token`: API token; falls back to `GITLAB_TOKEN`
//! - `base_url`: instance URL; falls back to `GITLAB_BASE_URL`, then
//!   `https://gitlab.com`
//!
//! # Example
//!
//! ```ignore
//! use tfgitlab_framework::{CallContext, Object, ProviderServer};
//!
//! tfgitlab_framework::init_logging();
//!
//! let mut server = ProviderServer::new(tfgitlab_provider::new(env!("CARGO_PKG_VERSION")));
//! let diags = server
//!     .configure(&CallContext::background(), &Object::new().with("token", token))
//!     .await;
//! assert!(!diags.has_error());
//! ```

pub mod config;
pub mod convert;
pub mod data_sources;
pub mod error;
pub mod model;
pub mod provider;
pub mod resources;

#[cfg(test)]
mod test_support;

pub use config::{BASE_URL_ENV, ProviderConfig, TOKEN_ENV, Token};
pub use data_sources::{CurrentUserDataSource, ProjectDataSource};
pub use error::{ConfigError, Result};
pub use provider::{GitlabProvider, SharedClient, TYPE_NAME};
pub use resources::ProjectResource;

/// Provider instance for the given release version
pub fn new(version: impl Into<String>) -> GitlabProvider {
    GitlabProvider::new(version)
}
