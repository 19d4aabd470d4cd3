//! Picker state machine for the automation entry-point selector.
//!
//! Loads are modeled as an explicit suspension point. Opening the picker
//! hands out a [`PendingLoad`] ticket; the caller awaits the matching loader
//! and feeds the outcome back. Only the latest ticket is honored, so a
//! response that arrives after the picker was closed or reopened is dropped.

use entrypoint_core::{AppError, AppResult};
use entrypoint_domain::{
    PickerItem, PickerMode, ResourceAction, TreeNode, WorkflowCollection, apply_automate_selection,
    apply_workflow_selection, is_automate_sourced, is_workflow_sourced, reset_for_mode,
    show_fully_qualified_name,
};

/// Per-editor picker options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PickerOptions {
    /// Keeps the domain segment of tree paths in the recorded namespace.
    pub include_domain: bool,
}

/// Open/closed phase of the picker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PickerPhase {
    /// Picker hidden.
    #[default]
    Closed,
    /// Picker shown while its backing collection loads (or after it failed).
    OpenLoading(PickerMode),
    /// Picker shown with items ready for selection.
    OpenReady(PickerMode),
}

/// Picker state owned by one field editor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickerState {
    mode: Option<PickerMode>,
    phase: PickerPhase,
    items: Vec<PickerItem>,
    selected_label: Option<String>,
    load_error: Option<String>,
}

impl PickerState {
    /// Returns the active backing collection.
    ///
    /// Before the first toggle this is the mode the record was persisted
    /// with, or `None` for a field without an automation type.
    #[must_use]
    pub fn mode(&self) -> Option<PickerMode> {
        self.mode
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> PickerPhase {
        self.phase
    }

    /// Returns whether the picker is shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.phase != PickerPhase::Closed
    }

    /// Returns loaded, selectable items.
    #[must_use]
    pub fn items(&self) -> &[PickerItem] {
        &self.items
    }

    /// Returns the display marker of the current selection.
    #[must_use]
    pub fn selected_label(&self) -> Option<&str> {
        self.selected_label.as_deref()
    }

    /// Returns the last surfaced load failure.
    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }
}

/// Ticket for the single load in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLoad {
    generation: u64,
    mode: PickerMode,
    hint: Option<String>,
}

impl PendingLoad {
    /// Returns the monotonically increasing load generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the collection to load.
    #[must_use]
    pub fn mode(&self) -> PickerMode {
        self.mode
    }

    /// Returns the selection hint passed to the loader.
    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }
}

/// Outcome of feeding a load result back into the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadCompletion {
    /// Items were stored and the picker is ready.
    Applied,
    /// The ticket was stale; nothing changed.
    Discarded,
}

/// Owns the picker mode and phase and keeps the resource action consistent.
#[derive(Debug, Clone, Default)]
pub struct SelectionModeController {
    options: PickerOptions,
    state: PickerState,
    in_flight: Option<PendingLoad>,
    next_generation: u64,
}

impl SelectionModeController {
    /// Creates a closed controller.
    #[must_use]
    pub fn new(options: PickerOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Creates a closed controller over a record persisted for `recorded_mode`.
    ///
    /// Opening the picker on the other mode resets the record first, even
    /// when it carries no marker of where its values came from.
    #[must_use]
    pub fn with_recorded_mode(options: PickerOptions, recorded_mode: Option<PickerMode>) -> Self {
        let mut controller = Self::new(options);
        controller.state.mode = recorded_mode;
        controller
    }

    /// Returns picker options.
    #[must_use]
    pub fn options(&self) -> PickerOptions {
        self.options
    }

    /// Returns picker state.
    #[must_use]
    pub fn state(&self) -> &PickerState {
        &self.state
    }

    /// Returns the ticket of the load in flight.
    #[must_use]
    pub fn in_flight(&self) -> Option<&PendingLoad> {
        self.in_flight.as_ref()
    }

    /// Returns whether a load is outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Opens or closes the picker on the automation tree.
    ///
    /// Returns the load to perform when the picker opens.
    pub fn toggle_automate(&mut self, resource_action: &mut ResourceAction) -> Option<PendingLoad> {
        self.toggle(PickerMode::Automate, resource_action)
    }

    /// Opens or closes the picker on the workflow list.
    ///
    /// Returns the load to perform when the picker opens.
    pub fn toggle_workflow(&mut self, resource_action: &mut ResourceAction) -> Option<PendingLoad> {
        self.toggle(PickerMode::Workflow, resource_action)
    }

    /// Stores the automation tree returned for `pending`.
    ///
    /// A failed load keeps the picker in its loading phase with the error
    /// recorded; toggling again closes it so the user can retry.
    pub fn complete_tree_load(
        &mut self,
        pending: &PendingLoad,
        result: AppResult<Vec<TreeNode>>,
    ) -> AppResult<LoadCompletion> {
        if !self.accepts(pending, PickerMode::Automate) {
            return Ok(LoadCompletion::Discarded);
        }
        self.in_flight = None;

        let nodes = result.map_err(|error| self.record_failure(error))?;
        self.state.items = nodes
            .into_iter()
            .filter(|node| node.has_payload)
            .map(PickerItem::TreeNode)
            .collect();
        self.state.selected_label = pending.hint().map(|hint| format!("/{hint}"));
        self.state.phase = PickerPhase::OpenReady(PickerMode::Automate);

        Ok(LoadCompletion::Applied)
    }

    /// Stores the workflow list returned for `pending`.
    pub fn complete_workflow_load(
        &mut self,
        pending: &PendingLoad,
        result: AppResult<WorkflowCollection>,
        resource_action: &ResourceAction,
    ) -> AppResult<LoadCompletion> {
        if !self.accepts(pending, PickerMode::Workflow) {
            return Ok(LoadCompletion::Discarded);
        }
        self.in_flight = None;

        let collection = result.map_err(|error| self.record_failure(error))?;
        self.state.items = collection
            .resources
            .iter()
            .filter(|raw| raw.has_payload())
            .map(|raw| PickerItem::WorkflowRecord(raw.to_record()))
            .collect();

        let selected_id = resource_action.selected_id();
        self.state.selected_label = self.state.items.iter().find_map(|item| match item {
            PickerItem::WorkflowRecord(workflow) if Some(workflow.id.as_str()) == selected_id => {
                Some(workflow.name.clone())
            }
            _ => None,
        });
        self.state.phase = PickerPhase::OpenReady(PickerMode::Workflow);

        Ok(LoadCompletion::Applied)
    }

    /// Switches the active mode without opening the picker.
    ///
    /// Rejected while a load is outstanding. A ready picker is closed since
    /// its items belong to the previous mode.
    pub fn change_mode(
        &mut self,
        new_mode: PickerMode,
        resource_action: &mut ResourceAction,
    ) -> AppResult<()> {
        if self.is_loading() {
            return Err(AppError::InvalidState(format!(
                "cannot switch to {new_mode} while the picker is loading"
            )));
        }

        self.state.mode = Some(new_mode);
        *resource_action = reset_for_mode(resource_action);
        self.state.selected_label = None;
        if self.state.is_open() {
            self.close();
        }

        Ok(())
    }

    /// Records `item` as the entry point and closes the picker.
    pub fn select(
        &mut self,
        item: &PickerItem,
        resource_action: &mut ResourceAction,
    ) -> AppResult<()> {
        let PickerPhase::OpenReady(mode) = self.state.phase else {
            return Err(AppError::InvalidState(
                "picker has no loaded items to select from".to_owned(),
            ));
        };

        if item.mode() != mode {
            return Err(AppError::InvalidState(format!(
                "cannot select a {} item while the picker shows {mode} items",
                item.mode()
            )));
        }

        if !item.has_payload() {
            return Err(AppError::InvalidState(format!(
                "item '{}' has no payload and cannot be selected",
                item.selection_id()
            )));
        }

        *resource_action = match item {
            PickerItem::TreeNode(node) => {
                apply_automate_selection(node, resource_action, self.options.include_domain)
            }
            PickerItem::WorkflowRecord(workflow) => {
                apply_workflow_selection(workflow, resource_action)
            }
        };
        self.state.selected_label = Some(match item {
            PickerItem::TreeNode(_) => format!("/{}", show_fully_qualified_name(resource_action)),
            PickerItem::WorkflowRecord(workflow) => workflow.name.clone(),
        });
        self.close();

        Ok(())
    }

    /// Selects the loaded item whose selection identifier equals `id`.
    pub fn select_by_id(&mut self, id: &str, resource_action: &mut ResourceAction) -> AppResult<()> {
        let item = self
            .state
            .items
            .iter()
            .find(|item| item.selection_id() == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("picker item '{id}' is not loaded")))?;

        self.select(&item, resource_action)
    }

    fn toggle(
        &mut self,
        mode: PickerMode,
        resource_action: &mut ResourceAction,
    ) -> Option<PendingLoad> {
        if self.state.is_open() {
            self.close();
            return None;
        }

        if self.holds_other_mode(mode, resource_action) {
            *resource_action = reset_for_mode(resource_action);
        }

        let hint = match mode {
            PickerMode::Automate => {
                Some(show_fully_qualified_name(resource_action)).filter(|fqn| !fqn.is_empty())
            }
            PickerMode::Workflow => resource_action.selected_id().map(str::to_owned),
        };

        self.next_generation = self.next_generation.saturating_add(1);
        let pending = PendingLoad {
            generation: self.next_generation,
            mode,
            hint,
        };

        self.state.mode = Some(mode);
        self.state.phase = PickerPhase::OpenLoading(mode);
        self.state.items.clear();
        self.state.selected_label = None;
        self.state.load_error = None;
        self.in_flight = Some(pending.clone());

        Some(pending)
    }

    fn holds_other_mode(&self, mode: PickerMode, resource_action: &ResourceAction) -> bool {
        match mode {
            PickerMode::Automate => {
                self.state.mode == Some(PickerMode::Workflow)
                    || is_workflow_sourced(resource_action)
            }
            PickerMode::Workflow => {
                self.state.mode == Some(PickerMode::Automate)
                    || is_automate_sourced(resource_action)
            }
        }
    }

    fn accepts(&self, pending: &PendingLoad, mode: PickerMode) -> bool {
        self.in_flight.as_ref() == Some(pending)
            && pending.mode == mode
            && self.state.phase == PickerPhase::OpenLoading(mode)
    }

    fn record_failure(&mut self, error: AppError) -> AppError {
        let error = match error {
            AppError::LoadFailure(_) => error,
            other => AppError::LoadFailure(other.to_string()),
        };
        self.state.load_error = Some(error.to_string());
        error
    }

    fn close(&mut self) {
        self.state.phase = PickerPhase::Closed;
        self.state.items.clear();
        self.state.load_error = None;
        self.in_flight = None;
    }
}

#[cfg(test)]
mod tests;
