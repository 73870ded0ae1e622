//! `gitlab_project` resource

use crate::convert::{
    apply_project, create_project_request, parse_import_id, remote_id, update_project_request,
    validate_project,
};
use crate::model::ProjectModel;
use crate::provider::{
    SharedClient, client_from_provider_data, remote_error, request_options, require_client,
};
use async_trait::async_trait;
use tfgitlab_client::{GitlabApi, ProjectRef};
use tfgitlab_framework::{
    Attr, Attribute, AttributeType, CallContext, CreateRequest, DeleteRequest, Diagnostic,
    Diagnostics, ImportRequest, Object, Outcome, PlanModifier, ProviderData, ReadRequest,
    ReadResult, Resource, Schema, UpdateRequest,
};

const KIND: &str = "Resource";

/// Manages a GitLab project
#[derive(Default)]
pub struct ProjectResource {
    client: Option<SharedClient>,
}

pub fn new_project_resource() -> Box<dyn Resource> {
    Box::new(ProjectResource::default())
}

impl ProjectResource {
    pub fn with_client(client: SharedClient) -> Self {
        Self {
            client: Some(client),
        }
    }

    fn client(&self) -> Result<&dyn GitlabApi, Diagnostic> {
        require_client(&self.client, KIND)
    }
}

#[async_trait]
impl Resource for ProjectResource {
    fn type_suffix(&self) -> &'static str {
        "project"
    }

    fn schema(&self) -> Schema {
        Schema::new("GitLab project.")
            .attribute(
                "id",
                Attribute::computed(AttributeType::Int64)
                    .description("Project ID")
                    .plan_modifier(PlanModifier::UseStateForUnknown),
            )
            .attribute(
                "name",
                Attribute::required(AttributeType::String).description("Name of project"),
            )
            .attribute(
                "description",
                Attribute::optional(AttributeType::String).description("Project description"),
            )
            .attribute(
                "visibility",
                Attribute::optional_computed(AttributeType::String)
                    .description("One of `private`, `internal` or `public`")
                    .plan_modifier(PlanModifier::UseStateForUnknown),
            )
            .attribute(
                "namespace_id",
                Attribute::optional_computed(AttributeType::Int64)
                    .description("Namespace the project lives in; changing it replaces the project")
                    .plan_modifier(PlanModifier::UseStateForUnknown)
                    .plan_modifier(PlanModifier::RequiresReplace),
            )
            .attribute(
                "path_with_namespace",
                Attribute::computed(AttributeType::String)
                    .description("Full path, e.g. `group/project`")
                    .plan_modifier(PlanModifier::UseStateForUnknown),
            )
            .attribute(
                "web_url",
                Attribute::computed(AttributeType::String)
                    .plan_modifier(PlanModifier::UseStateForUnknown),
            )
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

    fn validate_config(&self, config: &Object) -> Diagnostics {
        match ProjectModel::from_object(config) {
            Ok(model) => validate_project(&model),
            Err(diags) => diags,
        }
    }

    async fn create(&self, ctx: &CallContext, req: CreateRequest) -> Outcome<Object> {
        let client = match self.client() {
            Ok(client) => client,
            Err(diag) => return Outcome::failed(diag),
        };
        let planned = match ProjectModel::from_object(&req.planned_state) {
            Ok(model) => model,
            Err(diags) => return Outcome::failed(diags),
        };
        let request = match create_project_request(&planned) {
            Ok(request) => request,
            Err(diags) => return Outcome::failed(diags),
        };

        let project = match client.create_project(&request_options(ctx), &request).await {
            Ok(project) => project,
            Err(err) => return Outcome::failed(remote_error("create project", &err)),
        };
        tracing::info!(id = project.id, path = %project.path_with_namespace, "created project");

        apply_project(&planned, &project)
            .map(|model| model.to_object())
            .into()
    }

    async fn read(&self, ctx: &CallContext, req: ReadRequest) -> Outcome<ReadResult> {
        let client = match self.client() {
            Ok(client) => client,
            Err(diag) => return Outcome::failed(diag),
        };
        let current = match ProjectModel::from_object(&req.state) {
            Ok(model) => model,
            Err(diags) => return Outcome::failed(diags),
        };
        let id = match remote_id("id", &current.id) {
            Ok(id) => id,
            Err(diag) => return Outcome::failed(diag),
        };

        tracing::debug!(id, "reading project");
        let project = match client.get_project(&request_options(ctx), &ProjectRef::Id(id)).await {
            Ok(project) => project,
            Err(err) if err.is_not_found() => {
                tracing::warn!(id, "project no longer exists");
                return Outcome::ok(ReadResult::NotFound);
            }
            Err(err) => return Outcome::failed(remote_error("read project", &err)),
        };
        if project.is_pending_deletion() {
            tracing::warn!(id, "project is scheduled for deletion");
            return Outcome::ok(ReadResult::NotFound);
        }

        apply_project(&current, &project)
            .map(|model| ReadResult::Found(model.to_object()))
            .into()
    }

    async fn update(&self, ctx: &CallContext, req: UpdateRequest) -> Outcome<Object> {
        let client = match self.client() {
            Ok(client) => client,
            Err(diag) => return Outcome::failed(diag),
        };
        let (prior, planned) = match (
            ProjectModel::from_object(&req.prior_state),
            ProjectModel::from_object(&req.planned_state),
        ) {
            (Ok(prior), Ok(planned)) => (prior, planned),
            (prior, planned) => {
                let mut diags = Diagnostics::new();
                for result in [prior, planned] {
                    if let Err(errors) = result {
                        diags.append(errors);
                    }
                }
                return Outcome::failed(diags);
            }
        };
        let id = match remote_id("id", &prior.id) {
            Ok(id) => id,
            Err(diag) => return Outcome::failed(diag),
        };
        let changes = match update_project_request(&prior, &planned) {
            Ok(changes) => changes,
            Err(diags) => return Outcome::failed(diags),
        };

        if changes.is_empty() {
            tracing::debug!(id, "no mutable attribute changed, skipping update");
            return Outcome::ok(planned.resolve_unknowns(&prior).to_object());
        }

        let project = match client
            .update_project(&request_options(ctx), id, &changes)
            .await
        {
            Ok(project) => project,
            Err(err) => return Outcome::failed(remote_error("update project", &err)),
        };
        tracing::info!(id, "updated project");

        apply_project(&planned, &project)
            .map(|model| model.to_object())
            .into()
    }

    async fn delete(&self, ctx: &CallContext, req: DeleteRequest) -> Diagnostics {
        let client = match self.client() {
            Ok(client) => client,
            Err(diag) => return diag.into(),
        };
        let prior = match ProjectModel::from_object(&req.prior_state) {
            Ok(model) => model,
            Err(diags) => return diags,
        };
        let id = match remote_id("id", &prior.id) {
            Ok(id) => id,
            Err(diag) => return diag.into(),
        };

        match client.delete_project(&request_options(ctx), id).await {
            Ok(()) => {
                tracing::info!(id, "deleted project");
                Diagnostics::new()
            }
            Err(err) if err.is_not_found() => {
                tracing::debug!(id, "project already deleted");
                Diagnostics::new()
            }
            Err(err) => remote_error("delete project", &err).into(),
        }
    }

    async fn import_state(&self, _ctx: &CallContext, req: ImportRequest) -> Outcome<Object> {
        match parse_import_id(&req.id) {
            Ok(id) => {
                let mut state = self.schema().null_object();
                state.set_attr("id", Attr::Known(id));
                Outcome::ok(state)
            }
            Err(diag) => Outcome::failed(diag),
        }
    }
}
