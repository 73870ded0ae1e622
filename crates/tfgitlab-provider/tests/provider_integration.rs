//! End-to-end tests: host driver -> GitLab provider -> mocked GitLab API

use serde_json::json;
use tfgitlab_framework::{CallContext, ChangeAction, Object, ProviderServer, Value};
use tfgitlab_provider::{GitlabProvider, TOKEN_ENV};
use wiremock::matchers::{bearer_token, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "glpat-integration";
const PROJECT: &str = "gitlab_project";

fn project_json(id: u64, name: &str, description: &str, namespace_id: u64) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "description": description,
        "path": name,
        "path_with_namespace": format!("alice/{}", name),
        "visibility": "private",
        "web_url": format!("https://gitlab.example.com/alice/{}", name),
        "namespace": {"id": namespace_id, "name": "alice", "path": "alice", "full_path": "alice", "kind": "user"}
    })
}

async fn configured(mock: &MockServer) -> ProviderServer<GitlabProvider> {
    let mut server = ProviderServer::new(tfgitlab_provider::new("test"));
    let config = Object::new()
        .with("token", TOKEN)
        .with("base_url", mock.uri());
    let diags = server.configure(&CallContext::background(), &config).await;
    assert!(!diags.has_error(), "configure failed: {:?}", diags);
    server
}

async fn create_demo(mock: &MockServer, server: &ProviderServer<GitlabProvider>) -> Object {
    Mock::given(method("POST"))
        .and(path("/api/v4/projects"))
        .and(bearer_token(TOKEN))
        .and(body_json(json!({"name": "demo"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(project_json(42, "demo", "", 7)))
        .expect(1)
        .mount(mock)
        .await;

    let config = Object::new().with("name", "demo");
    let change = server
        .plan_resource(PROJECT, None, Some(&config))
        .into_result()
        .unwrap();
    assert_eq!(change.action, ChangeAction::Create);

    server
        .apply_resource(&CallContext::background(), PROJECT, None, &change, Some(&config))
        .await
        .into_result()
        .unwrap()
        .expect("created project has state")
}

mod lifecycle_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_read_update_delete() {
        let mock = MockServer::start().await;
        let server = configured(&mock).await;
        let ctx = CallContext::background();

        let state = create_demo(&mock, &server).await;
        assert_eq!(state.get("id"), &Value::Int64(42));
        assert_eq!(state.get("description"), &Value::Null);
        assert_eq!(state.get("path_with_namespace"), &Value::from("alice/demo"));

        Mock::given(method("GET"))
            .and(path("/api/v4/projects/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(project_json(42, "demo", "", 7)))
            .mount(&mock)
            .await;
        let refreshed = server
            .read_resource(&ctx, PROJECT, &state)
            .await
            .into_result()
            .unwrap();
        assert_eq!(refreshed.as_ref(), Some(&state));

        Mock::given(method("PUT"))
            .and(path("/api/v4/projects/42"))
            .and(body_json(json!({"description": "hello"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(project_json(42, "demo", "hello", 7)),
            )
            .expect(1)
            .mount(&mock)
            .await;
        let config = Object::new().with("name", "demo").with("description", "hello");
        let change = server
            .plan_resource(PROJECT, Some(&state), Some(&config))
            .into_result()
            .unwrap();
        assert_eq!(change.action, ChangeAction::Update);
        assert_eq!(change.changed, vec!["description".to_string()]);
        let updated = server
            .apply_resource(&ctx, PROJECT, Some(&state), &change, Some(&config))
            .await
            .into_result()
            .unwrap()
            .unwrap();
        assert_eq!(updated.get("description"), &Value::from("hello"));

        Mock::given(method("DELETE"))
            .and(path("/api/v4/projects/42"))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&mock)
            .await;
        let change = server
            .plan_resource(PROJECT, Some(&updated), None)
            .into_result()
            .unwrap();
        assert_eq!(change.action, ChangeAction::Delete);
        let gone = server
            .apply_resource(&ctx, PROJECT, Some(&updated), &change, None)
            .await
            .into_result()
            .unwrap();
        assert!(gone.is_none());
    }

    #[tokio::test]
    async fn test_unchanged_config_plans_no_op() {
        let mock = MockServer::start().await;
        let server = configured(&mock).await;
        let state = create_demo(&mock, &server).await;

        let change = server
            .plan_resource(PROJECT, Some(&state), Some(&Object::new().with("name", "demo")))
            .into_result()
            .unwrap();
        assert_eq!(change.action, ChangeAction::NoOp);
    }

    #[tokio::test]
    async fn test_namespace_change_replaces_project() {
        let mock = MockServer::start().await;
        let server = configured(&mock).await;
        let ctx = CallContext::background();
        let state = create_demo(&mock, &server).await;

        Mock::given(method("DELETE"))
            .and(path("/api/v4/projects/42"))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&mock)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v4/projects"))
            .and(body_json(json!({"name": "demo", "namespace_id": 8})))
            .respond_with(ResponseTemplate::new(201).set_body_json(project_json(43, "demo", "", 8)))
            .expect(1)
            .mount(&mock)
            .await;

        let config = Object::new().with("name", "demo").with("namespace_id", 8i64);
        let change = server
            .plan_resource(PROJECT, Some(&state), Some(&config))
            .into_result()
            .unwrap();
        assert_eq!(change.action, ChangeAction::Replace);

        let replaced = server
            .apply_resource(&ctx, PROJECT, Some(&state), &change, Some(&config))
            .await
            .into_result()
            .unwrap()
            .unwrap();
        assert_eq!(replaced.get("id"), &Value::Int64(43));
        assert_eq!(replaced.get("namespace_id"), &Value::Int64(8));
    }

    #[tokio::test]
    async fn test_failed_recreate_reports_deleted_project() {
        let mock = MockServer::start().await;
        let server = configured(&mock).await;
        let state = create_demo(&mock, &server).await;

        Mock::given(method("DELETE"))
            .and(path("/api/v4/projects/42"))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&mock)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v4/projects"))
            .and(body_json(json!({"name": "demo", "namespace_id": 8})))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "message": {"namespace": ["is not valid"]}
            })))
            .expect(1)
            .mount(&mock)
            .await;

        let config = Object::new().with("name", "demo").with("namespace_id", 8i64);
        let change = server
            .plan_resource(PROJECT, Some(&state), Some(&config))
            .into_result()
            .unwrap();
        let outcome = server
            .apply_resource(&CallContext::background(), PROJECT, Some(&state), &change, Some(&config))
            .await;

        let diags = outcome.into_result().unwrap_err();
        let summaries: Vec<_> = diags.errors().map(|d| d.summary.as_str()).collect();
        assert_eq!(summaries, vec!["Client Error", "Replacement Incomplete"]);
    }

    #[tokio::test]
    async fn test_remote_error_aborts_create() {
        let mock = MockServer::start().await;
        let server = configured(&mock).await;

        Mock::given(method("POST"))
            .and(path("/api/v4/projects"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "message": {"name": ["has already been taken"]}
            })))
            .mount(&mock)
            .await;

        let config = Object::new().with("name", "demo");
        let change = server
            .plan_resource(PROJECT, None, Some(&config))
            .into_result()
            .unwrap();
        let outcome = server
            .apply_resource(&CallContext::background(), PROJECT, None, &change, Some(&config))
            .await;

        let diags = outcome.into_result().unwrap_err();
        let diag = diags.errors().next().unwrap();
        assert!(diag.detail.contains("Unable to create project"));
        assert!(diag.detail.contains("has already been taken"));
    }

    #[tokio::test]
    async fn test_invalid_visibility_fails_at_plan() {
        let mock = MockServer::start().await;
        let server = configured(&mock).await;

        let config = Object::new().with("name", "demo").with("visibility", "secret");
        let outcome = server.plan_resource(PROJECT, None, Some(&config));
        let diags = outcome.into_result().unwrap_err();
        assert_eq!(
            diags.errors().next().unwrap().attribute.as_deref(),
            Some("visibility")
        );
    }
}

mod drift_tests {
    use super::*;

    #[tokio::test]
    async fn test_deleted_project_drops_from_state() {
        let mock = MockServer::start().await;
        let server = configured(&mock).await;

        Mock::given(method("GET"))
            .and(path("/api/v4/projects/42"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "404 Project Not Found"})),
            )
            .mount(&mock)
            .await;

        let state = Object::new().with("id", 42i64).with("name", "demo");
        let refreshed = server
            .read_resource(&CallContext::background(), PROJECT, &state)
            .await
            .into_result()
            .unwrap();
        assert!(refreshed.is_none());
    }

    #[tokio::test]
    async fn test_project_pending_deletion_drops_from_state() {
        let mock = MockServer::start().await;
        let server = configured(&mock).await;

        let mut body = project_json(42, "demo", "", 7);
        body["marked_for_deletion_at"] = json!("2026-10-17");
        body["marked_for_deletion_on"] = json!("2026-10-24");
        Mock::given(method("GET"))
            .and(path("/api/v4/projects/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&mock)
            .await;

        let state = Object::new().with("id", 42i64).with("name", "demo");
        let refreshed = server
            .read_resource(&CallContext::background(), PROJECT, &state)
            .await
            .into_result()
            .unwrap();
        assert!(refreshed.is_none());
    }

    #[tokio::test]
    async fn test_delete_of_missing_project_succeeds() {
        let mock = MockServer::start().await;
        let server = configured(&mock).await;

        Mock::given(method("DELETE"))
            .and(path("/api/v4/projects/42"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "404 Project Not Found"})),
            )
            .mount(&mock)
            .await;

        let state = Object::new().with("id", 42i64).with("name", "demo");
        let change = server
            .plan_resource(PROJECT, Some(&state), None)
            .into_result()
            .unwrap();
        let outcome = server
            .apply_resource(&CallContext::background(), PROJECT, Some(&state), &change, None)
            .await;
        assert!(!outcome.has_error());
    }
}

mod import_tests {
    use super::*;

    #[tokio::test]
    async fn test_import_reads_full_state() {
        let mock = MockServer::start().await;
        let server = configured(&mock).await;

        Mock::given(method("GET"))
            .and(path("/api/v4/projects/42"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(project_json(42, "demo", "hello", 7)),
            )
            .mount(&mock)
            .await;

        let state = server
            .import_resource(&CallContext::background(), PROJECT, "42")
            .await
            .into_result()
            .unwrap();
        assert_eq!(state.get("id"), &Value::Int64(42));
        assert_eq!(state.get("name"), &Value::from("demo"));
        assert_eq!(state.get("description"), &Value::from("hello"));
        assert_eq!(state.get("namespace_id"), &Value::Int64(7));
    }

    #[tokio::test]
    async fn test_malformed_import_id_makes_no_request() {
        let mock = MockServer::start().await;
        let server = configured(&mock).await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock)
            .await;

        for id in ["abc", "0"] {
            let outcome = server
                .import_resource(&CallContext::background(), PROJECT, id)
                .await;
            assert!(outcome.has_error(), "import of {:?} should fail", id);
        }
    }

    #[tokio::test]
    async fn test_import_of_missing_project_fails() {
        let mock = MockServer::start().await;
        let server = configured(&mock).await;

        Mock::given(method("GET"))
            .and(path("/api/v4/projects/99"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "404 Project Not Found"})),
            )
            .mount(&mock)
            .await;

        let diags = server
            .import_resource(&CallContext::background(), PROJECT, "99")
            .await
            .into_result()
            .unwrap_err();
        assert_eq!(
            diags.errors().next().unwrap().summary,
            "Cannot Import Non-Existent Remote Object"
        );
    }
}

mod data_source_tests {
    use super::*;

    #[tokio::test]
    async fn test_current_user() {
        let mock = MockServer::start().await;
        let server = configured(&mock).await;

        Mock::given(method("GET"))
            .and(path("/api/v4/user"))
            .and(bearer_token(TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1,
                "username": "alice",
                "name": "Alice Example",
                "state": "active"
            })))
            .mount(&mock)
            .await;

        let state = server
            .read_data_source(&CallContext::background(), "gitlab_current_user", &Object::new())
            .await
            .into_result()
            .unwrap();
        assert_eq!(state.get("id"), &Value::Int64(1));
        assert_eq!(state.get("username"), &Value::from("alice"));
    }

    #[tokio::test]
    async fn test_project_lookup_by_path() {
        let mock = MockServer::start().await;
        let server = configured(&mock).await;

        Mock::given(method("GET"))
            .and(path("/api/v4/projects/alice%2Fdemo"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(project_json(42, "demo", "hello", 7)),
            )
            .mount(&mock)
            .await;

        let config = Object::new().with("path_with_namespace", "alice/demo");
        let state = server
            .read_data_source(&CallContext::background(), PROJECT, &config)
            .await
            .into_result()
            .unwrap();
        assert_eq!(state.get("id"), &Value::Int64(42));
        assert_eq!(state.get("description"), &Value::from("hello"));
        assert_eq!(state.get("web_url"), &Value::from("https://gitlab.example.com/alice/demo"));
    }
}

mod session_tests {
    use super::*;

    #[tokio::test]
    async fn test_second_configure_is_rejected() {
        let mock = MockServer::start().await;
        let mut server = configured(&mock).await;

        let config = Object::new().with("token", TOKEN).with("base_url", mock.uri());
        let diags = server.configure(&CallContext::background(), &config).await;
        assert!(diags.has_error());
        assert_eq!(diags.errors().next().unwrap().summary, "Provider Already Configured");
        assert!(server.is_configured());
    }

    #[test]
    fn test_failed_configure_rejects_adapter_calls() {
        temp_env::with_var_unset(TOKEN_ENV, || {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            runtime.block_on(async {
                let mut server = ProviderServer::new(tfgitlab_provider::new("test"));
                let diags = server
                    .configure(&CallContext::background(), &Object::new())
                    .await;
                assert_eq!(
                    diags.errors().next().unwrap().summary,
                    "Missing GitLab API Token"
                );
                assert!(!server.is_configured());

                let outcome = server.plan_resource(
                    PROJECT,
                    None,
                    Some(&Object::new().with("name", "demo")),
                );
                assert_eq!(
                    outcome.diagnostics().errors().next().unwrap().summary,
                    "Unconfigured Provider"
                );
            });
        });
    }

    #[test]
    fn test_schemas_are_published_with_prefix() {
        let server = ProviderServer::new(tfgitlab_provider::new("test"));
        let resources = server.resource_schemas();
        let data_sources = server.data_source_schemas();

        assert!(resources.contains_key("gitlab_project"));
        assert!(data_sources.contains_key("gitlab_project"));
        assert!(data_sources.contains_key("gitlab_current_user"));
        assert!(server.provider_schema().get("token").unwrap().sensitive);
        assert_eq!(server.metadata().version, "test");
    }

    #[tokio::test]
    async fn test_unknown_resource_type() {
        let mock = MockServer::start().await;
        let server = configured(&mock).await;

        let outcome = server.plan_resource("gitlab_group", None, Some(&Object::new()));
        assert_eq!(
            outcome.diagnostics().errors().next().unwrap().summary,
            "Unknown Resource Type"
        );
    }
}
