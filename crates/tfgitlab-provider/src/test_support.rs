//! In-memory GitLab used by adapter unit tests

use crate::provider::SharedClient;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tfgitlab_client::{
    CreateProject, GitlabApi, GitlabError, Namespace, Project, ProjectRef, RequestOptions,
    UpdateProject, User, Visibility,
};

/// Request as the fake received it
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(CreateProject),
    Get(ProjectRef),
    Update(u64, UpdateProject),
    Delete(u64),
    CurrentUser,
}

#[derive(Default)]
struct State {
    projects: BTreeMap<u64, Project>,
    next_id: u64,
    calls: Vec<Call>,
    fail_next: Option<(u16, String)>,
    last_options: Option<RequestOptions>,
}

#[derive(Clone, Default)]
pub struct FakeGitlab {
    state: Arc<Mutex<State>>,
}

fn namespace(id: u64) -> Namespace {
    let path = if id == 7 { "alice".to_string() } else { format!("group-{}", id) };
    Namespace {
        id,
        name: path.clone(),
        path: path.clone(),
        full_path: path,
        kind: if id == 7 { "user" } else { "group" }.to_string(),
    }
}

impl FakeGitlab {
    pub fn new() -> Self {
        let fake = Self::default();
        fake.state.lock().unwrap().next_id = 42;
        fake
    }

    pub fn shared(&self) -> SharedClient {
        Arc::new(self.clone())
    }

    /// Store a project as if it had been created out of band
    pub fn insert(&self, project: Project) {
        self.state.lock().unwrap().projects.insert(project.id, project);
    }

    pub fn project(&self, id: u64) -> Option<Project> {
        self.state.lock().unwrap().projects.get(&id).cloned()
    }

    pub fn remove(&self, id: u64) {
        self.state.lock().unwrap().projects.remove(&id);
    }

    /// The next call fails with this status
    pub fn fail_next(&self, status: u16, message: &str) {
        self.state.lock().unwrap().fail_next = Some((status, message.to_string()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn last_options(&self) -> Option<RequestOptions> {
        self.state.lock().unwrap().last_options
    }

    fn record(&self, opts: &RequestOptions, call: Call) -> Result<(), GitlabError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        state.last_options = Some(*opts);
        match state.fail_next.take() {
            Some((404, message)) => Err(GitlabError::NotFound(message)),
            Some((status, message)) => Err(GitlabError::Api { status, message }),
            None => Ok(()),
        }
    }
}

pub fn sample_project(id: u64, name: &str) -> Project {
    Project {
        id,
        name: name.to_string(),
        description: Some(String::new()),
        path: name.to_string(),
        path_with_namespace: format!("alice/{}", name),
        visibility: Some(Visibility::Private),
        web_url: format!("https://gitlab.example.com/alice/{}", name),
        default_branch: None,
        namespace: Some(namespace(7)),
        marked_for_deletion_at: None,
        marked_for_deletion_on: None,
    }
}

#[async_trait]
impl GitlabApi for FakeGitlab {
    async fn create_project(
        &self,
        opts: &RequestOptions,
        request: &CreateProject,
    ) -> tfgitlab_client::Result<Project> {
        self.record(opts, Call::Create(request.clone()))?;

        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;

        let ns = namespace(request.namespace_id.unwrap_or(7));
        let path = request.name.to_lowercase().replace(' ', "-");
        let project = Project {
            id,
            name: request.name.clone(),
            description: Some(request.description.clone().unwrap_or_default()),
            path_with_namespace: format!("{}/{}", ns.full_path, path),
            web_url: format!("https://gitlab.example.com/{}/{}", ns.full_path, path),
            path,
            visibility: Some(request.visibility.unwrap_or(Visibility::Private)),
            default_branch: None,
            namespace: Some(ns),
            marked_for_deletion_at: None,
            marked_for_deletion_on: None,
        };
        state.projects.insert(id, project.clone());
        Ok(project)
    }

    async fn get_project(
        &self,
        opts: &RequestOptions,
        project: &ProjectRef,
    ) -> tfgitlab_client::Result<Project> {
        self.record(opts, Call::Get(project.clone()))?;

        let state = self.state.lock().unwrap();
        let found = match project {
            ProjectRef::Id(id) => state.projects.get(id),
            ProjectRef::Path(path) => state
                .projects
                .values()
                .find(|p| &p.path_with_namespace == path),
        };
        found
            .cloned()
            .ok_or_else(|| GitlabError::NotFound("404 Project Not Found".to_string()))
    }

    async fn update_project(
        &self,
        opts: &RequestOptions,
        id: u64,
        changes: &UpdateProject,
    ) -> tfgitlab_client::Result<Project> {
        self.record(opts, Call::Update(id, changes.clone()))?;

        let mut state = self.state.lock().unwrap();
        let project = state
            .projects
            .get_mut(&id)
            .ok_or_else(|| GitlabError::NotFound("404 Project Not Found".to_string()))?;
        if let Some(name) = &changes.name {
            project.name = name.clone();
        }
        if let Some(description) = &changes.description {
            project.description = Some(description.clone());
        }
        if let Some(visibility) = changes.visibility {
            project.visibility = Some(visibility);
        }
        Ok(project.clone())
    }

    async fn delete_project(&self, opts: &RequestOptions, id: u64) -> tfgitlab_client::Result<()> {
        self.record(opts, Call::Delete(id))?;

        let mut state = self.state.lock().unwrap();
        state
            .projects
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| GitlabError::NotFound("404 Project Not Found".to_string()))
    }

    async fn current_user(&self, opts: &RequestOptions) -> tfgitlab_client::Result<User> {
        self.record(opts, Call::CurrentUser)?;

        Ok(User {
            id: 1,
            username: "alice".to_string(),
            name: "Alice Example".to_string(),
            state: "active".to_string(),
        })
    }
}
