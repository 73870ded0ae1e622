//! Field mapping between attribute models and GitLab API structs
//!
//! Everything here is pure: no I/O, no logging. Validation failures come
//! back as attribute-scoped diagnostics.

use crate::model::{CurrentUserModel, ProjectLookupModel, ProjectModel};
use tfgitlab_client::{CreateProject, Project, UpdateProject, User, Visibility};
use tfgitlab_framework::{Attr, Diagnostic, Diagnostics};

/// Remote identifier to model identifier
pub fn model_id(attribute: &str, id: u64) -> Result<i64, Diagnostic> {
    i64::try_from(id).map_err(|_| {
        Diagnostic::attribute_error(
            attribute,
            "Identifier Out Of Range",
            format!("GitLab returned identifier {} which does not fit in a 64-bit signed integer.", id),
        )
    })
}

/// Model identifier to remote identifier; must be known and positive
pub fn remote_id(attribute: &str, id: &Attr<i64>) -> Result<u64, Diagnostic> {
    match id {
        Attr::Known(n) if *n > 0 => u64::try_from(*n).map_err(|_| invalid_id(attribute, *n)),
        Attr::Known(n) => Err(invalid_id(attribute, *n)),
        Attr::Null | Attr::Unknown => Err(Diagnostic::attribute_error(
            attribute,
            "Missing Identifier",
            format!("The \"{}\" attribute must be known to address the project.", attribute),
        )),
    }
}

fn invalid_id(attribute: &str, id: i64) -> Diagnostic {
    Diagnostic::attribute_error(
        attribute,
        "Invalid Identifier",
        format!("Expected a positive integer, got: {}", id),
    )
}

/// Parse a user-supplied import identifier
pub fn parse_import_id(raw: &str) -> Result<i64, Diagnostic> {
    let invalid = || {
        Diagnostic::attribute_error(
            "id",
            "Invalid Import Identifier",
            format!("Expected a positive integer project ID, got: {:?}", raw),
        )
    };
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(invalid()),
    }
}

fn parse_visibility(value: &str) -> Result<Visibility, Diagnostic> {
    value.parse::<Visibility>().map_err(|message| {
        Diagnostic::attribute_error("visibility", "Invalid Project Visibility", message)
    })
}

/// Checks that need no remote call; unknown values pass
pub fn validate_project(model: &ProjectModel) -> Diagnostics {
    let mut diags = Diagnostics::new();
    if let Attr::Known(name) = &model.name {
        if name.trim().is_empty() {
            diags.add_attribute_error(
                "name",
                "Invalid Project Name",
                "The project name must not be empty.",
            );
        }
    }
    if let Attr::Known(visibility) = &model.visibility {
        if let Err(diag) = parse_visibility(visibility) {
            diags.push(diag);
        }
    }
    if let Attr::Known(namespace_id) = &model.namespace_id {
        if *namespace_id <= 0 {
            diags.push(invalid_id("namespace_id", *namespace_id));
        }
    }
    diags
}

/// Body of the create call; unset optional attributes are not sent
pub fn create_project_request(model: &ProjectModel) -> Result<CreateProject, Diagnostics> {
    let mut diags = validate_project(model);
    let name = match &model.name {
        Attr::Known(name) => name.clone(),
        _ => {
            diags.add_attribute_error(
                "name",
                "Missing Project Name",
                "The project name must be known before the project can be created.",
            );
            String::new()
        }
    };
    if diags.has_error() {
        return Err(diags);
    }

    let visibility = match &model.visibility {
        Attr::Known(v) => Some(parse_visibility(v).map_err(Diagnostics::from)?),
        _ => None,
    };
    let namespace_id = match &model.namespace_id {
        Attr::Known(_) => Some(remote_id("namespace_id", &model.namespace_id)?),
        _ => None,
    };

    Ok(CreateProject {
        name,
        description: model.description.as_known().cloned(),
        visibility,
        namespace_id,
    })
}

/// Body of the edit call: only the mutable attributes that differ
///
/// A description going from set to unset is sent as an empty string, which
/// GitLab treats as "clear". A namespace change cannot be applied in place.
pub fn update_project_request(
    prior: &ProjectModel,
    planned: &ProjectModel,
) -> Result<UpdateProject, Diagnostics> {
    let mut diags = validate_project(planned);

    if planned.namespace_id.is_known() && planned.namespace_id != prior.namespace_id {
        diags.add_attribute_error(
            "namespace_id",
            "Unsupported In-Place Update",
            "A project cannot be moved to another namespace in place; it must be replaced.",
        );
    }
    if diags.has_error() {
        return Err(diags);
    }

    let mut changes = UpdateProject::default();

    if let Attr::Known(name) = &planned.name {
        if prior.name.as_known() != Some(name) {
            changes.name = Some(name.clone());
        }
    }

    match (&prior.description, &planned.description) {
        (previous, Attr::Known(description)) if previous.as_known() != Some(description) => {
            changes.description = Some(description.clone());
        }
        (Attr::Known(previous), Attr::Null) if !previous.is_empty() => {
            changes.description = Some(String::new());
        }
        _ => {}
    }

    if let Attr::Known(visibility) = &planned.visibility {
        if prior.visibility.as_known() != Some(visibility) {
            changes.visibility = Some(parse_visibility(visibility).map_err(Diagnostics::from)?);
        }
    }

    Ok(changes)
}

/// GitLab reports an unset description as either null or ""; both read as null
fn remote_description(project: &Project) -> Attr<String> {
    match project.description.as_deref() {
        Some(description) if !description.is_empty() => Attr::known(description.to_string()),
        _ => Attr::Null,
    }
}

/// Merge a project response into the model
///
/// `prior` is the model the call was made from; it decides whether an empty
/// remote description is an explicit empty string or unset.
pub fn apply_project(prior: &ProjectModel, project: &Project) -> Result<ProjectModel, Diagnostics> {
    let id = model_id("id", project.id)?;

    let description = match remote_description(project) {
        Attr::Null if prior.description.as_known().is_some_and(|d| d.is_empty()) => {
            Attr::known(String::new())
        }
        description => description,
    };

    let visibility = match project.visibility {
        Some(visibility) => Attr::known(visibility.as_str().to_string()),
        None => prior.visibility.or_if_unknown(&Attr::Null),
    };

    let namespace_id = match &project.namespace {
        Some(namespace) => Attr::Known(model_id("namespace_id", namespace.id)?),
        None => prior.namespace_id.or_if_unknown(&Attr::Null),
    };

    Ok(ProjectModel {
        id: Attr::Known(id),
        name: Attr::known(project.name.clone()),
        description,
        visibility,
        namespace_id,
        path_with_namespace: Attr::known(project.path_with_namespace.clone()),
        web_url: Attr::known(project.web_url.clone()),
    })
}

/// Data source view of a project; the lookup key is kept as configured
pub fn apply_project_lookup(
    key: &str,
    project: &Project,
) -> Result<ProjectLookupModel, Diagnostic> {
    Ok(ProjectLookupModel {
        path_with_namespace: Attr::known(key.to_string()),
        id: Attr::Known(model_id("id", project.id)?),
        name: Attr::known(project.name.clone()),
        description: remote_description(project),
        visibility: Attr::from_option(project.visibility.map(|v| v.as_str().to_string())),
        web_url: Attr::known(project.web_url.clone()),
    })
}

pub fn apply_user(user: &User) -> Result<CurrentUserModel, Diagnostic> {
    Ok(CurrentUserModel {
        id: Attr::Known(model_id("id", user.id)?),
        username: Attr::known(user.username.clone()),
        name: Attr::known(user.name.clone()),
    })
}
