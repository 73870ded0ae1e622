//! GitLab API request and response types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Project visibility level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Private,
    Internal,
    Public,
}

impl Visibility {
    pub const ALL: [Visibility; 3] = [Visibility::Private, Visibility::Internal, Visibility::Public];

    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Internal => "internal",
            Visibility::Public => "public",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Visibility::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "expected one of private, internal, public; got {:?}",
                    s
                )
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub full_path: String,
    #[serde(default)]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub path: String,
    pub path_with_namespace: String,
    #[serde(default)]
    pub visibility: Option<Visibility>,
    #[serde(default)]
    pub web_url: String,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub namespace: Option<Namespace>,
    /// Set while a delayed deletion is pending
    #[serde(default)]
    pub marked_for_deletion_at: Option<String>,
    #[serde(default)]
    pub marked_for_deletion_on: Option<String>,
}

impl Project {
    /// Delayed deletion is scheduled; the project is still readable until it runs
    pub fn is_pending_deletion(&self) -> bool {
        self.marked_for_deletion_at.is_some() || self.marked_for_deletion_on.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub state: String,
}

/// Body of `POST /projects`; unset fields are not sent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateProject {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace_id: Option<u64>,
}

/// Body of `PUT /projects/:id`; only the changed fields are set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateProject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// An empty string clears the description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
}

impl UpdateProject {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.visibility.is_none()
    }
}

/// A project addressed by numeric id or by `namespace/path`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectRef {
    Id(u64),
    Path(String),
}

impl ProjectRef {
    /// URL path segment; namespaced paths are percent-encoded
    pub fn to_path_segment(&self) -> String {
        match self {
            ProjectRef::Id(id) => id.to_string(),
            ProjectRef::Path(path) => urlencoding::encode(path).into_owned(),
        }
    }
}

impl fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectRef::Id(id) => write!(f, "{}", id),
            ProjectRef::Path(path) => f.write_str(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_skips_unset_fields() {
        let request = CreateProject {
            name: "demo".to_string(),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({"name": "demo"}));
    }

    #[test]
    fn test_update_sends_explicit_empty_description() {
        let request = UpdateProject {
            description: Some(String::new()),
            ..Default::default()
        };
        assert!(!request.is_empty());
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({"description": ""}));
    }

    #[test]
    fn test_project_deserializes_null_description() {
        let project: Project = serde_json::from_value(json!({
            "id": 42,
            "name": "demo",
            "description": null,
            "path": "demo",
            "path_with_namespace": "alice/demo",
            "visibility": "private",
            "web_url": "https://gitlab.com/alice/demo",
            "namespace": {"id": 7, "name": "alice", "path": "alice", "full_path": "alice", "kind": "user"}
        }))
        .unwrap();
        assert_eq!(project.description, None);
        assert_eq!(project.visibility, Some(Visibility::Private));
        assert_eq!(project.namespace.as_ref().unwrap().id, 7);
        assert!(!project.is_pending_deletion());
    }

    #[test]
    fn test_project_marked_for_deletion() {
        let project: Project = serde_json::from_value(json!({
            "id": 42,
            "name": "demo",
            "path_with_namespace": "alice/demo",
            "marked_for_deletion_on": "2026-10-24"
        }))
        .unwrap();
        assert!(project.is_pending_deletion());
        assert_eq!(project.marked_for_deletion_on.as_deref(), Some("2026-10-24"));
    }

    #[test]
    fn test_visibility_parse() {
        assert_eq!("internal".parse::<Visibility>().unwrap(), Visibility::Internal);
        assert!("Secret".parse::<Visibility>().is_err());
    }

    #[test]
    fn test_project_ref_encoding() {
        assert_eq!(ProjectRef::Id(42).to_path_segment(), "42");
        assert_eq!(
            ProjectRef::Path("group/sub/demo".to_string()).to_path_segment(),
            "group%2Fsub%2Fdemo"
        );
    }
}
