use std::sync::Arc;

use entrypoint_core::{AppResult, EditorSessionId};
use entrypoint_domain::{
    AutomationType, DialogField, PickerItem, ResourceAction, TreeNode, WorkflowCollection,
};
use tracing::{debug, info, warn};

use crate::picker_ports::{FieldValidator, TreeLoader, WorkflowLoader};
use crate::selection_mode_controller::{
    LoadCompletion, PendingLoad, PickerOptions, PickerState, SelectionModeController,
};

/// External collaborators shared by every field editor.
#[derive(Clone)]
pub struct PickerCollaborators {
    /// Automation tree source.
    pub tree_loader: Arc<dyn TreeLoader>,
    /// Workflow list source.
    pub workflow_loader: Arc<dyn WorkflowLoader>,
    /// Field validation routine.
    pub validator: Arc<dyn FieldValidator>,
}

/// Editing session for one dialog field's automation entry point.
pub struct DialogFieldEditor {
    session_id: EditorSessionId,
    field: DialogField,
    controller: SelectionModeController,
    collaborators: PickerCollaborators,
}

impl DialogFieldEditor {
    /// Opens an editor over `field` with a fresh, closed picker.
    #[must_use]
    pub fn open(
        field: DialogField,
        collaborators: PickerCollaborators,
        options: PickerOptions,
    ) -> Self {
        let session_id = EditorSessionId::new();
        info!(
            session_id = %session_id,
            field = %field.name(),
            automation_type = ?field.automation_type(),
            "field editor opened"
        );

        let recorded_mode = field.automation_type().map(|kind| kind.picker_mode());
        Self {
            session_id,
            field,
            controller: SelectionModeController::with_recorded_mode(options, recorded_mode),
            collaborators,
        }
    }

    /// Refreshes the displayed name of a recorded workflow.
    ///
    /// Only applies to `embedded_workflow` fields with a selected id. The
    /// caller decides whether a failure matters; the record is left as-is.
    pub async fn resolve_recorded_workflow(&mut self) -> AppResult<()> {
        if self.field.automation_type() != Some(AutomationType::EmbeddedWorkflow) {
            return Ok(());
        }

        let Some(workflow_id) = self
            .field
            .resource_action()
            .and_then(ResourceAction::selected_id)
            .map(str::to_owned)
        else {
            return Ok(());
        };

        match self
            .collaborators
            .workflow_loader
            .load_workflow(workflow_id.as_str())
            .await
        {
            Ok(workflow) => {
                debug!(
                    session_id = %self.session_id,
                    workflow_id = %workflow_id,
                    workflow_name = %workflow.name,
                    "recorded workflow resolved"
                );
                self.field.resource_action_mut().set_ae_instance(workflow.name);
                Ok(())
            }
            Err(error) => {
                warn!(
                    session_id = %self.session_id,
                    workflow_id = %workflow_id,
                    error = %error,
                    "failed to resolve recorded workflow"
                );
                Err(error)
            }
        }
    }

    /// Opens the automation tree picker, or closes the picker when open.
    pub async fn toggle_automate(&mut self) -> AppResult<()> {
        let Some(pending) = self.begin_toggle_automate() else {
            return Ok(());
        };

        let tree_loader = Arc::clone(&self.collaborators.tree_loader);
        let result = tree_loader.load(pending.hint()).await;
        self.complete_tree_load(&pending, result).map(|_| ())
    }

    /// Opens the workflow picker, or closes the picker when open.
    pub async fn toggle_workflow(&mut self) -> AppResult<()> {
        let Some(pending) = self.begin_toggle_workflow() else {
            return Ok(());
        };

        let workflow_loader = Arc::clone(&self.collaborators.workflow_loader);
        let result = workflow_loader.load_available().await;
        self.complete_workflow_load(&pending, result).map(|_| ())
    }

    /// Flips the automation tree picker without loading it.
    ///
    /// Returns the load the caller must run and feed to
    /// [`Self::complete_tree_load`], or `None` when the picker was closed.
    /// The editor stays usable while that load runs.
    pub fn begin_toggle_automate(&mut self) -> Option<PendingLoad> {
        let pending = self
            .controller
            .toggle_automate(self.field.resource_action_mut());
        self.log_toggle(pending.as_ref());
        pending
    }

    /// Flips the workflow picker without loading it.
    ///
    /// Returns the load the caller must run and feed to
    /// [`Self::complete_workflow_load`], or `None` when the picker was closed.
    pub fn begin_toggle_workflow(&mut self) -> Option<PendingLoad> {
        let pending = self
            .controller
            .toggle_workflow(self.field.resource_action_mut());
        self.log_toggle(pending.as_ref());
        pending
    }

    /// Feeds a finished tree load back into the picker.
    pub fn complete_tree_load(
        &mut self,
        pending: &PendingLoad,
        result: AppResult<Vec<TreeNode>>,
    ) -> AppResult<LoadCompletion> {
        let completion = self.controller.complete_tree_load(pending, result);
        self.log_completion(pending, completion)
    }

    /// Feeds a finished workflow list load back into the picker.
    pub fn complete_workflow_load(
        &mut self,
        pending: &PendingLoad,
        result: AppResult<WorkflowCollection>,
    ) -> AppResult<LoadCompletion> {
        let completion = self.controller.complete_workflow_load(
            pending,
            result,
            self.field.resource_action_mut(),
        );
        self.log_completion(pending, completion)
    }

    /// Applies the automation type chosen in the mode dropdown.
    pub fn change_mode(&mut self, automation_type: AutomationType) -> AppResult<()> {
        self.controller.change_mode(
            automation_type.picker_mode(),
            self.field.resource_action_mut(),
        )?;
        self.field.set_automation_type(Some(automation_type));

        info!(
            session_id = %self.session_id,
            automation_type = %automation_type,
            "automation type changed"
        );
        Ok(())
    }

    /// Records a picked item as the field's entry point.
    pub fn select(&mut self, item: &PickerItem) -> AppResult<()> {
        self.controller
            .select(item, self.field.resource_action_mut())?;
        self.log_selection();
        Ok(())
    }

    /// Records the loaded item with the given selection identifier.
    pub fn select_by_id(&mut self, id: &str) -> AppResult<()> {
        self.controller
            .select_by_id(id, self.field.resource_action_mut())?;
        self.log_selection();
        Ok(())
    }

    /// Returns whether the field may be saved.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.collaborators.validator.validate_field(&self.field)
    }

    /// Returns the session identifier.
    #[must_use]
    pub fn session_id(&self) -> EditorSessionId {
        self.session_id
    }

    /// Returns the field being edited.
    #[must_use]
    pub fn field(&self) -> &DialogField {
        &self.field
    }

    /// Returns the field's resource action.
    #[must_use]
    pub fn resource_action(&self) -> Option<&ResourceAction> {
        self.field.resource_action()
    }

    /// Returns the loaders and validator backing this editor.
    #[must_use]
    pub fn collaborators(&self) -> &PickerCollaborators {
        &self.collaborators
    }

    /// Returns picker state for rendering.
    #[must_use]
    pub fn picker(&self) -> &PickerState {
        self.controller.state()
    }

    /// Closes the editor and hands the field back for persistence.
    #[must_use]
    pub fn into_field(self) -> DialogField {
        debug!(session_id = %self.session_id, "field editor closed");
        self.field
    }

    fn log_toggle(&self, pending: Option<&PendingLoad>) {
        match pending {
            Some(pending) => debug!(
                session_id = %self.session_id,
                mode = %pending.mode(),
                generation = pending.generation(),
                hint = ?pending.hint(),
                "loading picker items"
            ),
            None => debug!(session_id = %self.session_id, "picker closed"),
        }
    }

    fn log_completion(
        &self,
        pending: &PendingLoad,
        completion: AppResult<LoadCompletion>,
    ) -> AppResult<LoadCompletion> {
        match &completion {
            Ok(LoadCompletion::Applied) => debug!(
                session_id = %self.session_id,
                generation = pending.generation(),
                item_count = self.picker().items().len(),
                selected = ?self.picker().selected_label(),
                "picker ready"
            ),
            Ok(LoadCompletion::Discarded) => debug!(
                session_id = %self.session_id,
                generation = pending.generation(),
                "stale picker load discarded"
            ),
            Err(error) => warn!(
                session_id = %self.session_id,
                generation = pending.generation(),
                error = %error,
                "picker load failed"
            ),
        }
        completion
    }

    fn log_selection(&self) {
        info!(
            session_id = %self.session_id,
            selected = ?self.picker().selected_label(),
            ae_id = ?self.resource_action().and_then(ResourceAction::ae_id),
            "entry point selected"
        );
    }
}
