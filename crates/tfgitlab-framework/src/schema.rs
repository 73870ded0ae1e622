//! Schema descriptions for providers, resources and data sources

use crate::diag::Diagnostics;
use crate::value::{AttributeType, Object, Value};
use std::collections::BTreeMap;

/// How an attribute is supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeMode {
    /// Must be set by the caller
    Required,
    /// May be set by the caller; null when unset
    Optional,
    /// Set by the remote system only
    Computed,
    /// May be set by the caller; the remote system fills it when unset
    OptionalComputed,
}

impl AttributeMode {
    pub fn accepts_config(&self) -> bool {
        !matches!(self, AttributeMode::Computed)
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, AttributeMode::Computed | AttributeMode::OptionalComputed)
    }
}

/// Plan-time behaviour attached to an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanModifier {
    /// Keep the prior state value instead of planning an unknown one
    UseStateForUnknown,
    /// A change to this attribute cannot be applied in place
    RequiresReplace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub attribute_type: AttributeType,
    pub mode: AttributeMode,
    pub sensitive: bool,
    pub description: String,
    pub plan_modifiers: Vec<PlanModifier>,
}

impl Attribute {
    pub fn new(attribute_type: AttributeType, mode: AttributeMode) -> Self {
        Self {
            attribute_type,
            mode,
            sensitive: false,
            description: String::new(),
            plan_modifiers: Vec::new(),
        }
    }

    pub fn required(attribute_type: AttributeType) -> Self {
        Self::new(attribute_type, AttributeMode::Required)
    }

    pub fn optional(attribute_type: AttributeType) -> Self {
        Self::new(attribute_type, AttributeMode::Optional)
    }

    pub fn computed(attribute_type: AttributeType) -> Self {
        Self::new(attribute_type, AttributeMode::Computed)
    }

    pub fn optional_computed(attribute_type: AttributeType) -> Self {
        Self::new(attribute_type, AttributeMode::OptionalComputed)
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn plan_modifier(mut self, modifier: PlanModifier) -> Self {
        self.plan_modifiers.push(modifier);
        self
    }

    pub fn has_modifier(&self, modifier: PlanModifier) -> bool {
        self.plan_modifiers.contains(&modifier)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    /// Markdown description used by documentation generators
    pub description: String,
    pub attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Object with every declared attribute set to null
    pub fn null_object(&self) -> Object {
        self.attributes
            .keys()
            .fold(Object::new(), |object, name| object.with(name.as_str(), Value::Null))
    }

    /// Check a configuration against the declared attributes
    ///
    /// Unknown values are accepted for any configurable attribute; they are
    /// resolved before apply.
    pub fn validate_config(&self, config: &Object) -> Diagnostics {
        let mut diags = Diagnostics::new();

        for name in config.names() {
            if !self.attributes.contains_key(name) {
                diags.add_attribute_error(
                    name.as_str(),
                    "Unsupported Argument",
                    format!("An argument named \"{}\" is not expected here.", name),
                );
            }
        }

        for (name, attribute) in &self.attributes {
            let value = config.get(name);

            if let Some(actual) = value.value_type() {
                if actual != attribute.attribute_type {
                    diags.add_attribute_error(
                        name.as_str(),
                        "Incorrect Attribute Value Type",
                        format!(
                            "Expected a value of type {}, got: {}",
                            attribute.attribute_type, actual
                        ),
                    );
                    continue;
                }
            }

            match attribute.mode {
                AttributeMode::Computed if !value.is_null() => {
                    diags.add_attribute_error(
                        name.as_str(),
                        "Invalid Configuration for Read-Only Attribute",
                        format!(
                            "Cannot set value for attribute \"{}\": it is computed by the provider.",
                            name
                        ),
                    );
                }
                AttributeMode::Required if value.is_null() => {
                    diags.add_attribute_error(
                        name.as_str(),
                        "Missing Required Argument",
                        format!("The argument \"{}\" is required, but no definition was found.", name),
                    );
                }
                _ => {}
            }
        }

        diags
    }
}
