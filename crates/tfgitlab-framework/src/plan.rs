//! Plan computation: prior state + configuration -> planned state

use crate::schema::{AttributeMode, PlanModifier, Schema};
use crate::value::{Object, Value};

/// Change the host will apply to a resource instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeAction {
    /// Create a new resource
    Create,
    /// Update an existing resource in place
    Update,
    /// Destroy the existing resource and create a new one
    Replace,
    /// Delete a resource
    Delete,
    /// No changes needed
    NoOp,
}

impl std::fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeAction::Create => write!(f, "create"),
            ChangeAction::Update => write!(f, "update"),
            ChangeAction::Replace => write!(f, "replace"),
            ChangeAction::Delete => write!(f, "delete"),
            ChangeAction::NoOp => write!(f, "no-op"),
        }
    }
}

/// Planned change for one resource instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedChange {
    pub action: ChangeAction,

    /// State expected after apply; `None` when the instance is deleted
    pub planned_state: Option<Object>,

    /// Configurable attributes whose planned value differs from prior state
    pub changed: Vec<String>,

    /// Subset of `changed` that cannot be updated in place
    pub requires_replace: Vec<String>,
}

impl PlannedChange {
    pub fn has_changes(&self) -> bool {
        self.action != ChangeAction::NoOp
    }
}

/// Compute the planned change for a resource instance
///
/// `prior` is the last known state (`None` if the instance does not exist
/// yet) and `config` the desired configuration (`None` if the instance was
/// removed from configuration).
pub fn plan_resource_change(
    schema: &Schema,
    prior: Option<&Object>,
    config: Option<&Object>,
) -> PlannedChange {
    match (prior, config) {
        (None, None) => PlannedChange {
            action: ChangeAction::NoOp,
            planned_state: None,
            changed: Vec::new(),
            requires_replace: Vec::new(),
        },
        (Some(_), None) => PlannedChange {
            action: ChangeAction::Delete,
            planned_state: None,
            changed: Vec::new(),
            requires_replace: Vec::new(),
        },
        (None, Some(config)) => PlannedChange {
            action: ChangeAction::Create,
            changed: config
                .iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, _)| k.clone())
                .collect(),
            planned_state: Some(plan_create(schema, config)),
            requires_replace: Vec::new(),
        },
        (Some(prior), Some(config)) => plan_existing(schema, prior, config),
    }
}

fn plan_create(schema: &Schema, config: &Object) -> Object {
    let mut planned = Object::new();
    for (name, attribute) in &schema.attributes {
        let value = config.get(name);
        let planned_value = if !value.is_null() {
            value.clone()
        } else if attribute.mode.is_computed() {
            Value::Unknown
        } else {
            Value::Null
        };
        planned.set(name.as_str(), planned_value);
    }
    planned
}

fn plan_existing(schema: &Schema, prior: &Object, config: &Object) -> PlannedChange {
    let mut planned = Object::new();
    let mut changed = Vec::new();

    for (name, attribute) in &schema.attributes {
        let value = config.get(name);
        let proposed = if attribute.mode.is_computed() && value.is_null() {
            prior.get(name).clone()
        } else {
            value.clone()
        };

        if attribute.mode != AttributeMode::Computed && &proposed != prior.get(name) {
            changed.push(name.clone());
        }
        planned.set(name.as_str(), proposed);
    }

    if changed.is_empty() {
        return PlannedChange {
            action: ChangeAction::NoOp,
            planned_state: Some(planned),
            changed,
            requires_replace: Vec::new(),
        };
    }

    let requires_replace: Vec<String> = changed
        .iter()
        .filter(|name| {
            schema
                .get(name)
                .is_some_and(|a| a.has_modifier(PlanModifier::RequiresReplace))
        })
        .cloned()
        .collect();

    if !requires_replace.is_empty() {
        tracing::debug!(attributes = ?requires_replace, "change requires replacement");
        return PlannedChange {
            action: ChangeAction::Replace,
            planned_state: Some(plan_create(schema, config)),
            changed,
            requires_replace,
        };
    }

    // Computed values may change as a side effect of the update.
    for (name, attribute) in &schema.attributes {
        if attribute.mode.is_computed()
            && config.get(name).is_null()
            && !attribute.has_modifier(PlanModifier::UseStateForUnknown)
        {
            planned.set(name.as_str(), Value::Unknown);
        }
    }

    PlannedChange {
        action: ChangeAction::Update,
        planned_state: Some(planned),
        changed,
        requires_replace,
    }
}
