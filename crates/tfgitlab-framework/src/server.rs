//! In-process host driver
//!
//! `ProviderServer` plays the host engine's side of the contract: it
//! configures the provider exactly once, instantiates the adapters, routes
//! calls by type name and enforces the invariants the host relies on
//! (validated config, no unknown values after apply, drift on read).

use crate::context::CallContext;
use crate::diag::{Diagnostic, Diagnostics, Outcome};
use crate::error::FrameworkError;
use crate::plan::{ChangeAction, PlannedChange, plan_resource_change};
use crate::provider::{Provider, ProviderMetadata};
use crate::resource::{
    CreateRequest, DataSource, DataSourceReadRequest, DeleteRequest, ImportRequest, ReadRequest,
    ReadResult, Resource, UpdateRequest,
};
use crate::schema::Schema;
use crate::value::Object;
use std::collections::BTreeMap;

enum SessionState {
    Unconfigured,
    Failed,
    Configured {
        resources: BTreeMap<String, Box<dyn Resource>>,
        data_sources: BTreeMap<String, Box<dyn DataSource>>,
    },
}

pub struct ProviderServer<P: Provider> {
    provider: P,
    metadata: ProviderMetadata,
    session: SessionState,
}

impl<P: Provider> ProviderServer<P> {
    pub fn new(provider: P) -> Self {
        let metadata = provider.metadata();
        Self {
            provider,
            metadata,
            session: SessionState::Unconfigured,
        }
    }

    pub fn metadata(&self) -> &ProviderMetadata {
        &self.metadata
    }

    pub fn provider_schema(&self) -> Schema {
        self.provider.schema()
    }

    fn full_type_name(&self, suffix: &str) -> String {
        format!("{}_{}", self.metadata.type_name, suffix)
    }

    /// Resource schemas keyed by full type name; available before configure
    pub fn resource_schemas(&self) -> BTreeMap<String, Schema> {
        self.provider
            .resources()
            .into_iter()
            .map(|factory| {
                let resource = factory();
                (self.full_type_name(resource.type_suffix()), resource.schema())
            })
            .collect()
    }

    /// Data source schemas keyed by full type name
    pub fn data_source_schemas(&self) -> BTreeMap<String, Schema> {
        self.provider
            .data_sources()
            .into_iter()
            .map(|factory| {
                let data_source = factory();
                (
                    self.full_type_name(data_source.type_suffix()),
                    data_source.schema(),
                )
            })
            .collect()
    }

    pub fn is_configured(&self) -> bool {
        matches!(self.session, SessionState::Configured { .. })
    }

    /// Configure the provider; allowed once per server instance
    pub async fn configure(&mut self, ctx: &CallContext, config: &Object) -> Diagnostics {
        if !matches!(self.session, SessionState::Unconfigured) {
            return Diagnostic::from(FrameworkError::AlreadyConfigured).into();
        }

        let mut diags = self.provider.schema().validate_config(config);
        if diags.has_error() {
            self.session = SessionState::Failed;
            return diags;
        }

        let (data, configure_diags) = self.provider.configure(ctx, config).await.into_parts();
        diags.append(configure_diags);
        let Some(data) = data else {
            tracing::warn!(provider = %self.metadata.type_name, "provider configuration failed");
            self.session = SessionState::Failed;
            return diags;
        };

        let mut resources = BTreeMap::new();
        for factory in self.provider.resources() {
            let mut resource = factory();
            diags.append(resource.configure(&data));
            resources.insert(self.full_type_name(resource.type_suffix()), resource);
        }

        let mut data_sources = BTreeMap::new();
        for factory in self.provider.data_sources() {
            let mut data_source = factory();
            diags.append(data_source.configure(&data));
            data_sources.insert(self.full_type_name(data_source.type_suffix()), data_source);
        }

        if diags.has_error() {
            self.session = SessionState::Failed;
            return diags;
        }

        tracing::info!(
            provider = %self.metadata.type_name,
            version = %self.metadata.version,
            resources = resources.len(),
            data_sources = data_sources.len(),
            "provider configured"
        );
        self.session = SessionState::Configured {
            resources,
            data_sources,
        };
        diags
    }

    fn resource(&self, type_name: &str) -> Result<&dyn Resource, Diagnostic> {
        match &self.session {
            SessionState::Configured { resources, .. } => resources
                .get(type_name)
                .map(|r| r.as_ref())
                .ok_or_else(|| FrameworkError::UnknownResourceType(type_name.to_string()).into()),
            SessionState::Failed => Err(FrameworkError::ConfigurationFailed.into()),
            SessionState::Unconfigured => Err(FrameworkError::NotConfigured.into()),
        }
    }

    fn data_source(&self, type_name: &str) -> Result<&dyn DataSource, Diagnostic> {
        match &self.session {
            SessionState::Configured { data_sources, .. } => data_sources
                .get(type_name)
                .map(|d| d.as_ref())
                .ok_or_else(|| FrameworkError::UnknownDataSourceType(type_name.to_string()).into()),
            SessionState::Failed => Err(FrameworkError::ConfigurationFailed.into()),
            SessionState::Unconfigured => Err(FrameworkError::NotConfigured.into()),
        }
    }

    /// Plan the change for one resource instance
    pub fn plan_resource(
        &self,
        type_name: &str,
        prior: Option<&Object>,
        config: Option<&Object>,
    ) -> Outcome<PlannedChange> {
        let resource = match self.resource(type_name) {
            Ok(resource) => resource,
            Err(diag) => return Outcome::failed(diag),
        };
        let schema = resource.schema();

        if let Some(config) = config {
            let mut diags = schema.validate_config(config);
            diags.append(resource.validate_config(config));
            if diags.has_error() {
                return Outcome::failed(diags);
            }
        }

        let change = plan_resource_change(&schema, prior, config);
        tracing::debug!(resource = type_name, action = %change.action, "planned resource change");
        Outcome::ok(change)
    }

    /// Apply a planned change; returns the new state (`None` once deleted)
    pub async fn apply_resource(
        &self,
        ctx: &CallContext,
        type_name: &str,
        prior: Option<&Object>,
        change: &PlannedChange,
        config: Option<&Object>,
    ) -> Outcome<Option<Object>> {
        let resource = match self.resource(type_name) {
            Ok(resource) => resource,
            Err(diag) => return Outcome::failed(diag),
        };

        match change.action {
            ChangeAction::NoOp => Outcome::ok(change.planned_state.clone()),
            ChangeAction::Delete => match prior {
                Some(prior) => delete(resource, ctx, prior).await.map(|()| None),
                None => Outcome::ok(None),
            },
            ChangeAction::Create => {
                let (Some(planned), Some(config)) = (&change.planned_state, config) else {
                    return Outcome::error("Invalid Plan", "A create plan needs a planned state.");
                };
                create(resource, ctx, config, planned).await.map(Some)
            }
            ChangeAction::Replace => {
                let (Some(prior), Some(planned), Some(config)) =
                    (prior, &change.planned_state, config)
                else {
                    return Outcome::error(
                        "Invalid Plan",
                        "A replace plan needs prior and planned state.",
                    );
                };
                let deleted = delete(resource, ctx, prior).await;
                if deleted.has_error() {
                    return Outcome::failed(deleted.diagnostics().clone());
                }
                let created = create(resource, ctx, config, planned)
                    .await
                    .with_diagnostics(deleted.diagnostics().clone());
                if created.has_error() {
                    tracing::warn!(resource = type_name, "replacement failed after delete");
                    let mut diags = created.diagnostics().clone();
                    diags.add_error(
                        "Replacement Incomplete",
                        "The prior object was deleted but its replacement could not be \
                         created. The resource no longer exists and should be removed from state.",
                    );
                    return Outcome::failed(diags);
                }
                created.map(Some)
            }
            ChangeAction::Update => {
                let (Some(prior), Some(planned), Some(config)) =
                    (prior, &change.planned_state, config)
                else {
                    return Outcome::error(
                        "Invalid Plan",
                        "An update plan needs prior and planned state.",
                    );
                };
                let outcome = resource
                    .update(
                        ctx,
                        UpdateRequest {
                            config: config.clone(),
                            prior_state: prior.clone(),
                            planned_state: planned.clone(),
                        },
                    )
                    .await;
                check_applied(outcome, planned).map(Some)
            }
        }
    }

    /// Refresh state; `None` means the remote object no longer exists
    pub async fn read_resource(
        &self,
        ctx: &CallContext,
        type_name: &str,
        state: &Object,
    ) -> Outcome<Option<Object>> {
        let resource = match self.resource(type_name) {
            Ok(resource) => resource,
            Err(diag) => return Outcome::failed(diag),
        };

        resource
            .read(
                ctx,
                ReadRequest {
                    state: state.clone(),
                },
            )
            .await
            .map(|result| match result {
                ReadResult::Found(state) => Some(state),
                ReadResult::NotFound => {
                    tracing::info!(resource = type_name, "remote object gone, removing from state");
                    None
                }
            })
    }

    /// Import an existing remote object by identifier and read it
    pub async fn import_resource(
        &self,
        ctx: &CallContext,
        type_name: &str,
        id: &str,
    ) -> Outcome<Object> {
        let resource = match self.resource(type_name) {
            Ok(resource) => resource,
            Err(diag) => return Outcome::failed(diag),
        };

        let (partial, mut diags) = resource
            .import_state(ctx, ImportRequest { id: id.to_string() })
            .await
            .into_parts();
        let Some(partial) = partial else {
            return Outcome::failed(diags);
        };

        let (read, read_diags) = resource
            .read(ctx, ReadRequest { state: partial })
            .await
            .into_parts();
        diags.append(read_diags);
        match read {
            Some(ReadResult::Found(state)) => Outcome::ok(state).with_diagnostics(diags),
            Some(ReadResult::NotFound) => {
                diags.add_error(
                    "Cannot Import Non-Existent Remote Object",
                    format!("No remote object exists for import identifier \"{}\".", id),
                );
                Outcome::failed(diags)
            }
            None => Outcome::failed(diags),
        }
    }

    pub async fn read_data_source(
        &self,
        ctx: &CallContext,
        type_name: &str,
        config: &Object,
    ) -> Outcome<Object> {
        let data_source = match self.data_source(type_name) {
            Ok(data_source) => data_source,
            Err(diag) => return Outcome::failed(diag),
        };

        let diags = data_source.schema().validate_config(config);
        if diags.has_error() {
            return Outcome::failed(diags);
        }

        let outcome = data_source
            .read(
                ctx,
                DataSourceReadRequest {
                    config: config.clone(),
                },
            )
            .await;
        reject_unknown(outcome)
    }
}

async fn create(
    resource: &dyn Resource,
    ctx: &CallContext,
    config: &Object,
    planned: &Object,
) -> Outcome<Object> {
    let outcome = resource
        .create(
            ctx,
            CreateRequest {
                config: config.clone(),
                planned_state: planned.clone(),
            },
        )
        .await;
    check_applied(outcome, planned)
}

async fn delete(resource: &dyn Resource, ctx: &CallContext, prior: &Object) -> Outcome<()> {
    let diags = resource
        .delete(
            ctx,
            DeleteRequest {
                prior_state: prior.clone(),
            },
        )
        .await;
    if diags.has_error() {
        Outcome::failed(diags)
    } else {
        Outcome::ok(()).with_diagnostics(diags)
    }
}

/// The new state must be fully known and agree with every planned known value
fn check_applied(outcome: Outcome<Object>, planned: &Object) -> Outcome<Object> {
    let (state, mut diags) = outcome.into_parts();
    let Some(state) = state else {
        return Outcome::failed(diags);
    };

    for name in state.unknown_attributes() {
        diags.add_attribute_error(
            name.as_str(),
            "Provider Returned Invalid Result Object After Apply",
            "The provider left an attribute unknown after apply.",
        );
    }
    for (name, planned_value) in planned.iter() {
        if planned_value.is_known() && state.get(name) != planned_value {
            diags.add_attribute_error(
                name.as_str(),
                "Provider Produced Inconsistent Result After Apply",
                format!(
                    "Planned value {} for \"{}\", but the new value is {}.",
                    planned_value,
                    name,
                    state.get(name)
                ),
            );
        }
    }

    if diags.has_error() {
        Outcome::failed(diags)
    } else {
        Outcome::ok(state).with_diagnostics(diags)
    }
}

fn reject_unknown(outcome: Outcome<Object>) -> Outcome<Object> {
    let (state, mut diags) = outcome.into_parts();
    let Some(state) = state else {
        return Outcome::failed(diags);
    };
    for name in state.unknown_attributes() {
        diags.add_attribute_error(
            name.as_str(),
            "Provider Returned Invalid Result Object",
            "Data sources must return fully known values.",
        );
    }
    if diags.has_error() {
        Outcome::failed(diags)
    } else {
        Outcome::ok(state).with_diagnostics(diags)
    }
}
