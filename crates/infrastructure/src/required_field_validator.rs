use entrypoint_application::FieldValidator;
use entrypoint_domain::{
    AutomationType, DialogField, is_automate_sourced, is_workflow_sourced,
    show_fully_qualified_name,
};

/// Validator requiring a name, a label and a complete entry point.
///
/// The entry point is only checked when an automation type is set, and it
/// must come from the collection that type names.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredFieldValidator;

impl FieldValidator for RequiredFieldValidator {
    fn validate_field(&self, field: &DialogField) -> bool {
        if field.name().trim().is_empty() || field.label().trim().is_empty() {
            return false;
        }

        let resource_action = field.resource_action();
        match field.automation_type() {
            None => true,
            Some(AutomationType::EmbeddedAutomate) => resource_action.is_some_and(|action| {
                !is_workflow_sourced(action) && !show_fully_qualified_name(action).is_empty()
            }),
            Some(AutomationType::EmbeddedWorkflow) => resource_action.is_some_and(|action| {
                action.selected_id().is_some() && !is_automate_sourced(action)
            }),
        }
    }
}
