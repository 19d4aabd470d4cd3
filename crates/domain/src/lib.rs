//! Domain entities and invariants of the automation entry-point selector.

#![forbid(unsafe_code)]

mod automation;
pub mod fqn;
mod picker;
mod resource_action;
pub mod resource_action_mapper;

pub use automation::{AutomationType, PickerMode};
pub use fqn::{FqnParts, build_fqn, show_fully_qualified_name, split_path, try_split_path};
pub use picker::{PickerItem, TreeNode, WorkflowCollection, WorkflowRecord, WorkflowRecordRaw};
pub use resource_action::{DialogField, ResourceAction};
pub use resource_action_mapper::{
    WORKFLOW_CLASS_SENTINEL, WORKFLOW_NAMESPACE_SENTINEL, apply_automate_selection,
    apply_workflow_selection, is_automate_sourced, is_workflow_sourced, reset_for_mode,
};
