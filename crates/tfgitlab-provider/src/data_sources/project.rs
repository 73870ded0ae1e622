//! `gitlab_project` data source

use crate::convert::apply_project_lookup;
use crate::model::ProjectLookupModel;
use crate::provider::{
    SharedClient, client_from_provider_data, remote_error, request_options, require_client,
};
use async_trait::async_trait;
use tfgitlab_client::ProjectRef;
use tfgitlab_framework::{
    Attr, Attribute, AttributeType, CallContext, DataSource, DataSourceReadRequest, Diagnostic,
    Diagnostics, Object, Outcome, ProviderData, Schema,
};

const KIND: &str = "Data Source";

/// Looks up an existing project by its full path
#[derive(Default)]
pub struct ProjectDataSource {
    client: Option<SharedClient>,
}

pub fn new_project_data_source() -> Box<dyn DataSource> {
    Box::new(ProjectDataSource::default())
}

impl ProjectDataSource {
    pub fn with_client(client: SharedClient) -> Self {
        Self {
            client: Some(client),
        }
    }
}

#[async_trait]
impl DataSource for ProjectDataSource {
    fn type_suffix(&self) -> &'static str {
        "project"
    }

    fn schema(&self) -> Schema {
        Schema::new("An existing GitLab project.")
            .attribute(
                "path_with_namespace",
                Attribute::required(AttributeType::String)
                    .description("Full path of the project, e.g. `group/project`"),
            )
            .attribute("id", Attribute::computed(AttributeType::Int64))
            .attribute("name", Attribute::computed(AttributeType::String))
            .attribute("description", Attribute::computed(AttributeType::String))
            .attribute("visibility", Attribute::computed(AttributeType::String))
            .attribute("web_url", Attribute::computed(AttributeType::String))
    }

    fn configure(&mut self, data: &ProviderData) -> Diagnostics {
        match client_from_provider_data(data, KIND) {
            Ok(client) => {
                self.client = Some(client);
                Diagnostics::new()
            }
            Err(diag) => diag.into(),
        }
    }

    async fn read(&self, ctx: &CallContext, req: DataSourceReadRequest) -> Outcome<Object> {
        let client = match require_client(&self.client, KIND) {
            Ok(client) => client,
            Err(diag) => return Outcome::failed(diag),
        };
        let config = match ProjectLookupModel::from_object(&req.config) {
            Ok(model) => model,
            Err(diags) => return Outcome::failed(diags),
        };
        let key = match config.path_with_namespace {
            Attr::Known(key) if !key.trim().is_empty() => key,
            _ => {
                return Outcome::failed(Diagnostic::attribute_error(
                    "path_with_namespace",
                    "Invalid Project Path",
                    "A known, non-empty project path is required for the lookup.",
                ));
            }
        };

        let project = match client
            .get_project(&request_options(ctx), &ProjectRef::Path(key.clone()))
            .await
        {
            Ok(project) => project,
            Err(err) if err.is_not_found() => {
                return Outcome::failed(Diagnostic::attribute_error(
                    "path_with_namespace",
                    "Project Not Found",
                    format!("No project exists at path \"{}\".", key),
                ));
            }
            Err(err) => return Outcome::failed(remote_error("read project", &err)),
        };
        tracing::debug!(id = project.id, path = %key, "looked up project");

        match apply_project_lookup(&key, &project) {
            Ok(model) => Outcome::ok(model.to_object()),
            Err(diag) => Outcome::failed(diag),
        }
    }
}
