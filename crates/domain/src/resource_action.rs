use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::AutomationType;

/// Entry-point reference attached to a dialog field.
///
/// The four mode-sensitive keys are optional: `None` means the key is absent
/// from the stored record, `Some("")` means it is present but blank. Every
/// other key of the record is kept verbatim in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) ae_namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) ae_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) ae_instance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) ae_id: Option<String>,
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

impl ResourceAction {
    /// Creates an empty resource action with no keys present.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resource action pointing at one automation instance.
    #[must_use]
    pub fn for_instance(
        namespace: impl Into<String>,
        class: impl Into<String>,
        instance: impl Into<String>,
    ) -> Self {
        Self {
            ae_namespace: Some(namespace.into()),
            ae_class: Some(class.into()),
            ae_instance: Some(instance.into()),
            ..Self::default()
        }
    }

    /// Sets the opaque selection identifier.
    #[must_use]
    pub fn with_ae_id(mut self, ae_id: impl Into<String>) -> Self {
        self.ae_id = Some(ae_id.into());
        self
    }

    /// Sets one pass-through key.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Returns the automation namespace when present.
    #[must_use]
    pub fn ae_namespace(&self) -> Option<&str> {
        self.ae_namespace.as_deref()
    }

    /// Returns the automation class when present.
    #[must_use]
    pub fn ae_class(&self) -> Option<&str> {
        self.ae_class.as_deref()
    }

    /// Returns the automation instance (or workflow name) when present.
    #[must_use]
    pub fn ae_instance(&self) -> Option<&str> {
        self.ae_instance.as_deref()
    }

    /// Returns the selection identifier when present.
    #[must_use]
    pub fn ae_id(&self) -> Option<&str> {
        self.ae_id.as_deref()
    }

    /// Returns the selection identifier when present and not blank.
    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.ae_id().filter(|value| !value.trim().is_empty())
    }

    /// Returns keys that are not interpreted by the selector.
    #[must_use]
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Overwrites the displayed instance name while keeping the selection.
    pub fn set_ae_instance(&mut self, instance: impl Into<String>) {
        self.ae_instance = Some(instance.into());
    }
}

/// Dialog field record that owns a resource action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DialogField {
    #[serde(default)]
    name: String,
    #[serde(default)]
    label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    automation_type: Option<AutomationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resource_action: Option<ResourceAction>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl DialogField {
    /// Creates a field without automation configured.
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    /// Sets the persisted automation type.
    #[must_use]
    pub fn with_automation_type(mut self, automation_type: AutomationType) -> Self {
        self.automation_type = Some(automation_type);
        self
    }

    /// Attaches a resource action.
    #[must_use]
    pub fn with_resource_action(mut self, resource_action: ResourceAction) -> Self {
        self.resource_action = Some(resource_action);
        self
    }

    /// Returns field name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns field label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns the persisted automation type.
    #[must_use]
    pub fn automation_type(&self) -> Option<AutomationType> {
        self.automation_type
    }

    /// Replaces the persisted automation type.
    pub fn set_automation_type(&mut self, automation_type: Option<AutomationType>) {
        self.automation_type = automation_type;
    }

    /// Returns the attached resource action.
    #[must_use]
    pub fn resource_action(&self) -> Option<&ResourceAction> {
        self.resource_action.as_ref()
    }

    /// Returns the resource action, attaching an empty one first if missing.
    pub fn resource_action_mut(&mut self) -> &mut ResourceAction {
        self.resource_action.get_or_insert_with(ResourceAction::default)
    }

    /// Returns keys that are not interpreted by the selector.
    #[must_use]
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}
