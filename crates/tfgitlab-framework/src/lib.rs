//! Host-engine contract for declarative-state providers
//!
//! This crate describes what a provider exposes to a declarative-state
//! engine and what it receives back: typed attribute values, schemas,
//! plans, diagnostics, and the lifecycle traits resource and data source
//! adapters implement.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │            host engine (plan / apply)            │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │              tfgitlab-framework                  │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  ProviderServer (configure once, route)   │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────┐ ┌──────────┐ ┌────────────────┐   │
//! │  │  Schema  │ │   Plan   │ │  Diagnostics   │   │
//! │  └──────────┘ └──────────┘ └────────────────┘   │
//! └───────┬─────────────────┬───────────────────────┘
//!         │                 │
//! ┌───────▼───────┐ ┌───────▼───────┐
//! │   Resource    │ │  DataSource   │
//! │   adapters    │ │   adapters    │
//! └───────────────┘ └───────────────┘
//! ```

pub mod context;
pub mod diag;
pub mod error;
pub mod logging;
pub mod plan;
pub mod provider;
pub mod resource;
pub mod schema;
pub mod server;
pub mod value;

// Re-exports
pub use context::CallContext;
pub use diag::{Diagnostic, Diagnostics, Outcome, Severity};
pub use error::{FrameworkError, Result};
pub use logging::{init_logging, init_logging_with_default, try_init_logging};
pub use plan::{ChangeAction, PlannedChange, plan_resource_change};
pub use provider::{Provider, ProviderData, ProviderMetadata};
pub use resource::{
    CreateRequest, DataSource, DataSourceFactory, DataSourceReadRequest, DeleteRequest,
    ImportRequest, ReadRequest, ReadResult, Resource, ResourceFactory, UpdateRequest,
};
pub use schema::{Attribute, AttributeMode, PlanModifier, Schema};
pub use server::ProviderServer;
pub use value::{Attr, AttributeType, Object, Primitive, Value};

pub use async_trait::async_trait;
