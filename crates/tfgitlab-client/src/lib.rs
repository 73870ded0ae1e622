//! GitLab REST API client
//!
//! Typed access to the subset of the GitLab v4 API the provider manages:
//! projects and the authenticated user.
//!
//! # Example
//!
//! ```ignore
//! use tfgitlab_client::{CreateProject, GitlabApi, GitlabClient, RequestOptions};
//!
//! let client = GitlabClient::with_base_url("https://gitlab.example.com", token)?;
//! let opts = RequestOptions::default();
//!
//! let user = client.current_user(&opts).await?;
//! let project = client
//!     .create_project(&opts, &CreateProject { name: "demo".into(), ..Default::default() })
//!     .await?;
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod types;

pub use api::{GitlabApi, RequestOptions};
pub use client::{DEFAULT_BASE_URL, GitlabClient, normalize_base_url};
pub use error::{GitlabError, Result};
pub use types::{
    CreateProject, Namespace, Project, ProjectRef, UpdateProject, User, Visibility,
};
