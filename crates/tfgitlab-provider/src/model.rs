//! Typed views of the attribute snapshots exchanged with the host

use tfgitlab_framework::{Attr, Diagnostics, Object, Primitive};

fn read<T: Primitive>(object: &Object, name: &str, diags: &mut Diagnostics) -> Attr<T> {
    object.attr(name).unwrap_or_else(|diag| {
        diags.push(diag);
        Attr::Null
    })
}

fn finish<T>(model: T, diags: Diagnostics) -> Result<T, Diagnostics> {
    if diags.has_error() { Err(diags) } else { Ok(model) }
}

/// `gitlab_project` resource attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectModel {
    pub id: Attr<i64>,
    pub name: Attr<String>,
    pub description: Attr<String>,
    pub visibility: Attr<String>,
    pub namespace_id: Attr<i64>,
    pub path_with_namespace: Attr<String>,
    pub web_url: Attr<String>,
}

impl ProjectModel {
    pub fn from_object(object: &Object) -> Result<Self, Diagnostics> {
        let mut diags = Diagnostics::new();
        let model = Self {
            id: read(object, "id", &mut diags),
            name: read(object, "name", &mut diags),
            description: read(object, "description", &mut diags),
            visibility: read(object, "visibility", &mut diags),
            namespace_id: read(object, "namespace_id", &mut diags),
            path_with_namespace: read(object, "path_with_namespace", &mut diags),
            web_url: read(object, "web_url", &mut diags),
        };
        finish(model, diags)
    }

    pub fn to_object(&self) -> Object {
        let mut object = Object::new();
        object.set_attr("id", self.id.clone());
        object.set_attr("name", self.name.clone());
        object.set_attr("description", self.description.clone());
        object.set_attr("visibility", self.visibility.clone());
        object.set_attr("namespace_id", self.namespace_id.clone());
        object.set_attr("path_with_namespace", self.path_with_namespace.clone());
        object.set_attr("web_url", self.web_url.clone());
        object
    }

    /// Fill every unknown attribute from `prior`
    pub fn resolve_unknowns(&self, prior: &ProjectModel) -> ProjectModel {
        ProjectModel {
            id: self.id.or_if_unknown(&prior.id),
            name: self.name.or_if_unknown(&prior.name),
            description: self.description.or_if_unknown(&prior.description),
            visibility: self.visibility.or_if_unknown(&prior.visibility),
            namespace_id: self.namespace_id.or_if_unknown(&prior.namespace_id),
            path_with_namespace: self
                .path_with_namespace
                .or_if_unknown(&prior.path_with_namespace),
            web_url: self.web_url.or_if_unknown(&prior.web_url),
        }
    }
}

/// `gitlab_project` data source attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectLookupModel {
    pub path_with_namespace: Attr<String>,
    pub id: Attr<i64>,
    pub name: Attr<String>,
    pub description: Attr<String>,
    pub visibility: Attr<String>,
    pub web_url: Attr<String>,
}

impl ProjectLookupModel {
    pub fn from_object(object: &Object) -> Result<Self, Diagnostics> {
        let mut diags = Diagnostics::new();
        let model = Self {
            path_with_namespace: read(object, "path_with_namespace", &mut diags),
            id: read(object, "id", &mut diags),
            name: read(object, "name", &mut diags),
            description: read(object, "description", &mut diags),
            visibility: read(object, "visibility", &mut diags),
            web_url: read(object, "web_url", &mut diags),
        };
        finish(model, diags)
    }

    pub fn to_object(&self) -> Object {
        let mut object = Object::new();
        object.set_attr("path_with_namespace", self.path_with_namespace.clone());
        object.set_attr("id", self.id.clone());
        object.set_attr("name", self.name.clone());
        object.set_attr("description", self.description.clone());
        object.set_attr("visibility", self.visibility.clone());
        object.set_attr("web_url", self.web_url.clone());
        object
    }
}

/// `gitlab_current_user` data source attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentUserModel {
    pub id: Attr<i64>,
    pub username: Attr<String>,
    pub name: Attr<String>,
}

impl CurrentUserModel {
    pub fn to_object(&self) -> Object {
        let mut object = Object::new();
        object.set_attr("id", self.id.clone());
        object.set_attr("username", self.username.clone());
        object.set_attr("name", self.name.clone());
        object
    }
}
