//! Application services and ports.

#![forbid(unsafe_code)]

mod dialog_field_editor;
mod picker_ports;
mod selection_mode_controller;

pub use dialog_field_editor::{DialogFieldEditor, PickerCollaborators};
pub use picker_ports::{FieldValidator, TreeLoader, WorkflowLoader};
pub use selection_mode_controller::{
    LoadCompletion, PendingLoad, PickerOptions, PickerPhase, PickerState,
    SelectionModeController,
};
