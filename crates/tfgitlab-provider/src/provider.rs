//! GitLab provider implementation

use crate::config::ProviderConfig;
use crate::data_sources::{new_current_user_data_source, new_project_data_source};
use crate::error::ConfigError;
use crate::resources::new_project_resource;
use async_trait::async_trait;
use std::sync::Arc;
use tfgitlab_client::{GitlabApi, GitlabClient, GitlabError, RequestOptions};
use tfgitlab_framework::{
    Attribute, AttributeType, CallContext, DataSourceFactory, Diagnostic, Object, Outcome,
    Provider, ProviderData, ProviderMetadata, ResourceFactory, Schema,
};

/// Provider type name; prefix of every resource and data source
pub const TYPE_NAME: &str = "gitlab";

/// Client handle shared by every adapter of a session
pub type SharedClient = Arc<dyn GitlabApi>;

/// GitLab provider
#[derive(Debug, Clone)]
pub struct GitlabProvider {
    version: String,
}

impl GitlabProvider {
    /// `version` is the release version, or "dev" for local builds
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }
}

#[async_trait]
impl Provider for GitlabProvider {
    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            type_name: TYPE_NAME.to_string(),
            version: self.version.clone(),
        }
    }

    fn schema(&self) -> Schema {
        Schema::new("Interact with GitLab.")
            .attribute(
                "token",
                Attribute::optional(AttributeType::String)
                    .sensitive()
                    .description("GitLab API token. Falls back to the GITLAB_TOKEN environment variable."),
            )
            .attribute(
                "base_url",
                Attribute::optional(AttributeType::String).description(
                    "GitLab instance URL. Falls back to GITLAB_BASE_URL, then https://gitlab.com.",
                ),
            )
    }

    async fn configure(&self, _ctx: &CallContext, config: &Object) -> Outcome<ProviderData> {
        let config = match ProviderConfig::resolve(config) {
            Ok(config) => config,
            Err(err) => return Outcome::failed(Diagnostic::from(err)),
        };

        let client = match GitlabClient::with_base_url(&config.base_url, config.token.expose()) {
            Ok(client) => client,
            Err(err) => return Outcome::failed(Diagnostic::from(ConfigError::from(err))),
        };

        tracing::info!(base_url = %client.base_url(), version = %self.version, "configured GitLab client");
        let shared: SharedClient = Arc::new(client);
        Outcome::ok(ProviderData::new(shared))
    }

    fn resources(&self) -> Vec<ResourceFactory> {
        vec![new_project_resource]
    }

    fn data_sources(&self) -> Vec<DataSourceFactory> {
        vec![new_current_user_data_source, new_project_data_source]
    }
}

/// Recover the shared client from provider data
///
/// `kind` names the adapter kind ("Resource", "Data Source") in the
/// diagnostic summary.
pub(crate) fn client_from_provider_data(
    data: &ProviderData,
    kind: &str,
) -> Result<SharedClient, Diagnostic> {
    data.downcast::<SharedClient>().map_err(|err| {
        Diagnostic::error(
            format!("Unexpected {} Configure Type", kind),
            format!("{}. Please report this issue to the provider developers.", err),
        )
    })
}

/// Client of a configured adapter
pub(crate) fn require_client<'a>(
    client: &'a Option<SharedClient>,
    kind: &str,
) -> Result<&'a dyn GitlabApi, Diagnostic> {
    client.as_deref().ok_or_else(|| {
        Diagnostic::error(
            format!("Unconfigured {}", kind),
            "Expected a configured GitLab client. Please report this issue to the provider developers.",
        )
    })
}

/// Forward the host deadline to the HTTP request
pub(crate) fn request_options(ctx: &CallContext) -> RequestOptions {
    RequestOptions::with_timeout(ctx.remaining())
}

/// Remote failure as a diagnostic carrying the operation name
pub(crate) fn remote_error(operation: &str, err: &GitlabError) -> Diagnostic {
    tracing::warn!(operation, error = %err, "GitLab API call failed");
    Diagnostic::error(
        "Client Error",
        format!("Unable to {}, got error: {}", operation, err),
    )
}
