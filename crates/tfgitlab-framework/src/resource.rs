//! Lifecycle contracts for resources and data sources

use crate::context::CallContext;
use crate::diag::{Diagnostic, Diagnostics, Outcome};
use crate::provider::ProviderData;
use crate::schema::Schema;
use crate::value::Object;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct CreateRequest {
    pub config: Object,
    pub planned_state: Object,
}

#[derive(Debug, Clone)]
pub struct ReadRequest {
    pub state: Object,
}

/// Result of refreshing a resource against the remote system
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadResult {
    Found(Object),
    /// The remote object is gone; the host drops it from state
    NotFound,
}

#[derive(Debug, Clone)]
pub struct UpdateRequest {
    pub config: Object,
    pub prior_state: Object,
    pub planned_state: Object,
}

#[derive(Debug, Clone)]
pub struct DeleteRequest {
    pub prior_state: Object,
}

#[derive(Debug, Clone)]
pub struct ImportRequest {
    /// Identifier as typed by the user
    pub id: String,
}

#[derive(Debug, Clone)]
pub struct DataSourceReadRequest {
    pub config: Object,
}

/// Resource adapter for one remote resource kind
///
/// Implementations must not mutate any state before the remote call has
/// succeeded; a failed operation returns error diagnostics and no payload.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Type name without the provider prefix (e.g. "project")
    fn type_suffix(&self) -> &'static str;

    fn schema(&self) -> Schema;

    /// Receive the data produced by provider configuration
    fn configure(&mut self, _data: &ProviderData) -> Diagnostics {
        Diagnostics::new()
    }

    /// Resource-specific checks run at plan time, before any remote call
    fn validate_config(&self, _config: &Object) -> Diagnostics {
        Diagnostics::new()
    }

    async fn create(&self, ctx: &CallContext, req: CreateRequest) -> Outcome<Object>;

    async fn read(&self, ctx: &CallContext, req: ReadRequest) -> Outcome<ReadResult>;

    async fn update(&self, ctx: &CallContext, req: UpdateRequest) -> Outcome<Object>;

    async fn delete(&self, ctx: &CallContext, req: DeleteRequest) -> Diagnostics;

    /// Turn an external identifier into a partial state that a subsequent
    /// read completes
    async fn import_state(&self, _ctx: &CallContext, _req: ImportRequest) -> Outcome<Object> {
        Outcome::failed(Diagnostic::error(
            "Resource Import Not Implemented",
            format!(
                "This resource does not support import: {}",
                self.type_suffix()
            ),
        ))
    }
}

/// Read-only adapter
#[async_trait]
pub trait DataSource: Send + Sync {
    fn type_suffix(&self) -> &'static str;

    fn schema(&self) -> Schema;

    fn configure(&mut self, _data: &ProviderData) -> Diagnostics {
        Diagnostics::new()
    }

    async fn read(&self, ctx: &CallContext, req: DataSourceReadRequest) -> Outcome<Object>;
}

pub type ResourceFactory = fn() -> Box<dyn Resource>;

pub type DataSourceFactory = fn() -> Box<dyn DataSource>;
