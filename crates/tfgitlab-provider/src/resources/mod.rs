//! Resource adapters

pub mod project;

pub use project::{ProjectResource, new_project_resource};
