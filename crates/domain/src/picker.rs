use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::PickerMode;

/// Node of the automation tree offered in automate mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Slash-delimited path of the node, usually with a leading domain.
    pub fqname: String,
    /// Opaque node key recorded as the selection identifier.
    pub key: String,
    /// Whether the node points at a selectable instance.
    #[serde(default)]
    pub has_payload: bool,
}

impl TreeNode {
    /// Creates a tree node.
    #[must_use]
    pub fn new(fqname: impl Into<String>, key: impl Into<String>, has_payload: bool) -> Self {
        Self {
            fqname: fqname.into(),
            key: key.into(),
            has_payload,
        }
    }
}

/// Workflow entry offered in workflow mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowRecord {
    /// Workflow identifier recorded as the selection identifier.
    pub id: String,
    /// Workflow display name.
    pub name: String,
    /// Whether the workflow carries an executable payload.
    pub has_payload: bool,
}

impl WorkflowRecord {
    /// Creates a workflow record.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, has_payload: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            has_payload,
        }
    }
}

/// Workflow as returned by the workflow collection, before filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRecordRaw {
    /// Workflow identifier; numeric identifiers are accepted and stringified.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Workflow display name.
    #[serde(default)]
    pub name: String,
    /// Workflow definition body, absent for records that cannot run.
    #[serde(default)]
    pub payload: Option<Value>,
}

impl WorkflowRecordRaw {
    /// Returns true when the payload is present and not empty-ish.
    #[must_use]
    pub fn has_payload(&self) -> bool {
        match &self.payload {
            None | Some(Value::Null) | Some(Value::Bool(false)) => false,
            Some(Value::String(text)) => !text.is_empty(),
            Some(Value::Number(number)) => number.as_f64().is_some_and(|value| value != 0.0),
            Some(_) => true,
        }
    }

    /// Converts the raw record into a picker record.
    #[must_use]
    pub fn to_record(&self) -> WorkflowRecord {
        WorkflowRecord::new(self.id.clone(), self.name.clone(), self.has_payload())
    }
}

/// Envelope of the workflow collection endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowCollection {
    /// Workflow records in collection order.
    #[serde(default)]
    pub resources: Vec<WorkflowRecordRaw>,
}

/// One selectable entry of the picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PickerItem {
    /// Automation tree node.
    TreeNode(TreeNode),
    /// Workflow list entry.
    WorkflowRecord(WorkflowRecord),
}

impl PickerItem {
    /// Returns the picker mode this item belongs to.
    #[must_use]
    pub fn mode(&self) -> PickerMode {
        match self {
            Self::TreeNode(_) => PickerMode::Automate,
            Self::WorkflowRecord(_) => PickerMode::Workflow,
        }
    }

    /// Returns whether the item can be selected.
    #[must_use]
    pub fn has_payload(&self) -> bool {
        match self {
            Self::TreeNode(node) => node.has_payload,
            Self::WorkflowRecord(workflow) => workflow.has_payload,
        }
    }

    /// Returns the identifier recorded when the item is selected.
    #[must_use]
    pub fn selection_id(&self) -> &str {
        match self {
            Self::TreeNode(node) => node.key.as_str(),
            Self::WorkflowRecord(workflow) => workflow.id.as_str(),
        }
    }
}

impl From<TreeNode> for PickerItem {
    fn from(value: TreeNode) -> Self {
        Self::TreeNode(value)
    }
}

impl From<WorkflowRecord> for PickerItem {
    fn from(value: WorkflowRecord) -> Self {
        Self::WorkflowRecord(value)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number identifier, got {other}"
        ))),
    }
}
