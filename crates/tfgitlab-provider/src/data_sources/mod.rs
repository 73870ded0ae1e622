//! Data source adapters

pub mod current_user;
pub mod project;

pub use current_user::{CurrentUserDataSource, new_current_user_data_source};
pub use project::{ProjectDataSource, new_project_data_source};
