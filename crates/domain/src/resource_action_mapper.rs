//! Maps picker selections onto resource actions.

use crate::fqn::split_path;
use crate::{ResourceAction, TreeNode, WorkflowRecord};

/// Namespace recorded on workflow-sourced resource actions.
pub const WORKFLOW_NAMESPACE_SENTINEL: &str = "$embedded_workflow";

/// Class recorded on workflow-sourced resource actions.
pub const WORKFLOW_CLASS_SENTINEL: &str = "$workflow";

/// Blanks every mode-sensitive key present on the record.
///
/// Absent keys stay absent and pass-through keys are untouched.
#[must_use]
pub fn reset_for_mode(resource_action: &ResourceAction) -> ResourceAction {
    fn blank(value: &Option<String>) -> Option<String> {
        value.as_ref().map(|_| String::new())
    }

    ResourceAction {
        ae_namespace: blank(&resource_action.ae_namespace),
        ae_class: blank(&resource_action.ae_class),
        ae_instance: blank(&resource_action.ae_instance),
        ae_id: blank(&resource_action.ae_id),
        extra: resource_action.extra.clone(),
    }
}

/// Records an automation tree node as the entry point.
#[must_use]
pub fn apply_automate_selection(
    node: &TreeNode,
    resource_action: &ResourceAction,
    include_domain: bool,
) -> ResourceAction {
    let parts = split_path(&node.fqname, include_domain);

    ResourceAction {
        ae_namespace: Some(parts.namespace),
        ae_class: Some(parts.class),
        ae_instance: Some(parts.instance),
        ae_id: Some(node.key.clone()),
        extra: resource_action.extra.clone(),
    }
}

/// Records a workflow as the entry point.
#[must_use]
pub fn apply_workflow_selection(
    workflow: &WorkflowRecord,
    resource_action: &ResourceAction,
) -> ResourceAction {
    ResourceAction {
        ae_namespace: Some(WORKFLOW_NAMESPACE_SENTINEL.to_owned()),
        ae_class: Some(WORKFLOW_CLASS_SENTINEL.to_owned()),
        ae_instance: Some(workflow.name.clone()),
        ae_id: Some(workflow.id.clone()),
        extra: resource_action.extra.clone(),
    }
}

/// Returns true when the record carries the workflow sentinel pair.
#[must_use]
pub fn is_workflow_sourced(resource_action: &ResourceAction) -> bool {
    resource_action.ae_namespace() == Some(WORKFLOW_NAMESPACE_SENTINEL)
        && resource_action.ae_class() == Some(WORKFLOW_CLASS_SENTINEL)
}

/// Returns true when the record holds a non-blank automation selection.
#[must_use]
pub fn is_automate_sourced(resource_action: &ResourceAction) -> bool {
    !is_workflow_sourced(resource_action)
        && [
            resource_action.ae_namespace(),
            resource_action.ae_class(),
            resource_action.ae_instance(),
        ]
        .into_iter()
        .any(|value| value.is_some_and(|value| !value.is_empty()))
}
