//! `gitlab_current_user` data source

use crate::convert::apply_user;
use crate::provider::{
    SharedClient, client_from_provider_data, remote_error, request_options, require_client,
};
use async_trait::async_trait;
use tfgitlab_framework::{
    Attribute, AttributeType, CallContext, DataSource, DataSourceReadRequest, Diagnostics,
    Object, Outcome, ProviderData, Schema,
};

const KIND: &str = "Data Source";

/// The user the API token belongs to
#[derive(Default)]
pub struct CurrentUserDataSource {
    client: Option<SharedClient>,
}

pub fn new_current_user_data_source() -> Box<dyn DataSource> {
    Box::new(CurrentUserDataSource::default())
}

impl CurrentUserDataSource {
    pub fn with_client(client: SharedClient) -> Self {
        Self {
            client: Some(client),
        }
    }
}

#[async_trait]
impl DataSource for CurrentUserDataSource {
    fn type_suffix(&self) -> &'static str {
        "current_user"
    }

    fn schema(&self) -> Schema {
        Schema::new("The user authenticated by the provider token.")
            .attribute(
                "id",
                Attribute::computed(AttributeType::Int64).description("User ID"),
            )
            .attribute(
                "username",
                Attribute::computed(AttributeType::String).description("Username"),
            )
            .attribute(
                "name",
                Attribute::computed(AttributeType::String).description("Display name"),
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

    async fn read(&self, ctx: &CallContext, _req: DataSourceReadRequest) -> Outcome<Object> {
        let client = match require_client(&self.client, KIND) {
            Ok(client) => client,
            Err(diag) => return Outcome::failed(diag),
        };

        let user = match client.current_user(&request_options(ctx)).await {
            Ok(user) => user,
            Err(err) => return Outcome::failed(remote_error("read current user", &err)),
        };
        tracing::debug!(id = user.id, username = %user.username, "read current user");

        match apply_user(&user) {
            Ok(model) => Outcome::ok(model.to_object()),
            Err(diag) => Outcome::failed(diag),
        }
    }
}
