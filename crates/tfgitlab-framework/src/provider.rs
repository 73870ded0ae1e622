//! Provider trait definition

use crate::context::CallContext;
use crate::diag::Outcome;
use crate::error::{FrameworkError, Result};
use crate::resource::{DataSourceFactory, ResourceFactory};
use crate::schema::Schema;
use crate::value::Object;
use async_trait::async_trait;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Provider abstraction trait
///
/// A provider resolves its configuration once, builds whatever shared
/// handle its adapters need, and publishes the adapters it supports.
#[async_trait]
pub trait Provider: Send + Sync {
    fn metadata(&self) -> ProviderMetadata;

    fn schema(&self) -> Schema;

    /// Resolve configuration and build the data handed to every adapter
    async fn configure(&self, ctx: &CallContext, config: &Object) -> Outcome<ProviderData>;

    fn resources(&self) -> Vec<ResourceFactory>;

    fn data_sources(&self) -> Vec<DataSourceFactory>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderMetadata {
    /// Prefix of every resource and data source type name (e.g. "gitlab")
    pub type_name: String,

    /// "dev" for local builds, the release version otherwise
    pub version: String,
}

/// Type-erased data produced by provider configuration
///
/// Adapters recover the concrete type with [`ProviderData::downcast`]; a
/// mismatch is an integration error, not a panic.
#[derive(Clone)]
pub struct ProviderData {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl ProviderData {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn downcast<T: Any + Clone>(&self) -> Result<T> {
        self.inner
            .downcast_ref::<T>()
            .cloned()
            .ok_or(FrameworkError::UnexpectedProviderData {
                expected: std::any::type_name::<T>(),
                actual: self.type_name,
            })
    }
}

impl fmt::Debug for ProviderData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderData")
            .field("type_name", &self.type_name)
            .finish()
    }
}
