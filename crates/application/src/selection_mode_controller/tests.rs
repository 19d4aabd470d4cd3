use entrypoint_core::AppError;
use entrypoint_domain::{
    PickerItem, PickerMode, ResourceAction, TreeNode, WORKFLOW_CLASS_SENTINEL,
    WORKFLOW_NAMESPACE_SENTINEL, WorkflowCollection, WorkflowRecord, WorkflowRecordRaw,
};
use serde_json::json;

use super::{LoadCompletion, PickerOptions, PickerPhase, SelectionModeController};

fn tree() -> Vec<TreeNode> {
    vec![
        TreeNode::new("/ManageIQ/System", "aen-1", false),
        TreeNode::new("/ManageIQ/System/Request/InspectMe", "aei-1", true),
        TreeNode::new("/ManageIQ/Service/Generic/Default", "aei-2", true),
    ]
}

fn workflows() -> WorkflowCollection {
    WorkflowCollection {
        resources: vec![
            WorkflowRecordRaw {
                id: "10".to_owned(),
                name: "Provision".to_owned(),
                payload: Some(json!({"StartAt": "Provision"})),
            },
            WorkflowRecordRaw {
                id: "11".to_owned(),
                name: "Draft".to_owned(),
                payload: None,
            },
            WorkflowRecordRaw {
                id: "12".to_owned(),
                name: "Retire".to_owned(),
                payload: Some(json!("{}")),
            },
        ],
    }
}

fn automate_record() -> ResourceAction {
    ResourceAction::for_instance("System", "Request", "InspectMe")
        .with_ae_id("aei-1")
        .with_extra("ae_message", json!("create"))
}

fn open_automate(
    controller: &mut SelectionModeController,
    resource_action: &mut ResourceAction,
) {
    let pending = controller.toggle_automate(resource_action);
    assert!(pending.is_some());
    let pending = pending.unwrap_or_else(|| unreachable!());
    let completion = controller.complete_tree_load(&pending, Ok(tree()));
    assert!(matches!(completion, Ok(LoadCompletion::Applied)));
}

fn open_workflow(
    controller: &mut SelectionModeController,
    resource_action: &mut ResourceAction,
) {
    let pending = controller.toggle_workflow(resource_action);
    assert!(pending.is_some());
    let pending = pending.unwrap_or_else(|| unreachable!());
    let completion =
        controller.complete_workflow_load(&pending, Ok(workflows()), resource_action);
    assert!(matches!(completion, Ok(LoadCompletion::Applied)));
}

#[test]
fn starts_closed_without_mode() {
    let controller = SelectionModeController::new(PickerOptions::default());
    assert_eq!(controller.state().phase(), PickerPhase::Closed);
    assert_eq!(controller.state().mode(), None);
    assert!(!controller.is_loading());
}

#[test]
fn toggle_automate_uses_recorded_fqn_as_hint() {
    let mut controller = SelectionModeController::new(PickerOptions::default());
    let mut resource_action = automate_record();

    let pending = controller.toggle_automate(&mut resource_action);
    assert!(pending.is_some());
    let pending = pending.unwrap_or_else(|| unreachable!());

    assert_eq!(pending.mode(), PickerMode::Automate);
    assert_eq!(pending.hint(), Some("System/Request/InspectMe"));
    assert_eq!(
        controller.state().phase(),
        PickerPhase::OpenLoading(PickerMode::Automate)
    );
    assert_eq!(resource_action, automate_record());
}

#[test]
fn tree_load_keeps_only_payload_nodes_and_marks_selection() {
    let mut controller = SelectionModeController::new(PickerOptions::default());
    let mut resource_action = automate_record();
    open_automate(&mut controller, &mut resource_action);

    let state = controller.state();
    assert_eq!(state.phase(), PickerPhase::OpenReady(PickerMode::Automate));
    assert_eq!(state.items().len(), 2);
    assert!(state.items().iter().all(PickerItem::has_payload));
    assert_eq!(state.selected_label(), Some("/System/Request/InspectMe"));
}

#[test]
fn empty_tree_opens_ready_without_error() {
    let mut controller = SelectionModeController::new(PickerOptions::default());
    let mut resource_action = ResourceAction::new();

    let pending = controller
        .toggle_automate(&mut resource_action)
        .unwrap_or_else(|| unreachable!());
    assert_eq!(pending.hint(), None);

    let completion = controller.complete_tree_load(&pending, Ok(Vec::new()));
    assert!(matches!(completion, Ok(LoadCompletion::Applied)));
    assert_eq!(
        controller.state().phase(),
        PickerPhase::OpenReady(PickerMode::Automate)
    );
    assert!(controller.state().items().is_empty());
    assert_eq!(controller.state().load_error(), None);
    assert_eq!(controller.state().selected_label(), None);
}

#[test]
fn automate_selection_without_domain_updates_record_and_closes() {
    let mut controller = SelectionModeController::new(PickerOptions::default());
    let mut resource_action = ResourceAction::new();

    let pending = controller
        .toggle_automate(&mut resource_action)
        .unwrap_or_else(|| unreachable!());
    let completion = controller.complete_tree_load(
        &pending,
        Ok(vec![TreeNode::new("domain/ns/cls/inst", "42", true)]),
    );
    assert!(completion.is_ok());

    let item = controller.state().items()[0].clone();
    assert!(controller.select(&item, &mut resource_action).is_ok());

    assert_eq!(resource_action.ae_namespace(), Some("ns"));
    assert_eq!(resource_action.ae_class(), Some("cls"));
    assert_eq!(resource_action.ae_instance(), Some("inst"));
    assert_eq!(resource_action.ae_id(), Some("42"));
    assert_eq!(controller.state().phase(), PickerPhase::Closed);
    assert_eq!(controller.state().selected_label(), Some("/ns/cls/inst"));
}

#[test]
fn include_domain_keeps_domain_in_namespace() {
    let mut controller = SelectionModeController::new(PickerOptions {
        include_domain: true,
    });
    let mut resource_action = ResourceAction::new();
    open_automate(&mut controller, &mut resource_action);

    let selected = controller.select_by_id("aei-2", &mut resource_action);
    assert!(selected.is_ok());
    assert_eq!(resource_action.ae_namespace(), Some("ManageIQ/Service"));
    assert_eq!(resource_action.ae_class(), Some("Generic"));
}

#[test]
fn selecting_same_item_twice_matches_selecting_once() {
    let mut controller = SelectionModeController::new(PickerOptions::default());
    let mut resource_action = automate_record();
    open_automate(&mut controller, &mut resource_action);
    let item = controller.state().items()[1].clone();

    assert!(controller.select(&item, &mut resource_action).is_ok());
    let once = resource_action.clone();

    open_automate(&mut controller, &mut resource_action);
    assert!(controller.select(&item, &mut resource_action).is_ok());
    assert_eq!(resource_action, once);

    let closed = controller.select(&item, &mut resource_action);
    assert!(matches!(closed, Err(AppError::InvalidState(_))));
    assert_eq!(resource_action, once);
}

#[test]
fn workflow_load_filters_payloadless_records_and_matches_selection() {
    let mut controller = SelectionModeController::new(PickerOptions::default());
    let mut resource_action = ResourceAction::new().with_ae_id("12");
    open_workflow(&mut controller, &mut resource_action);

    let state = controller.state();
    assert_eq!(state.phase(), PickerPhase::OpenReady(PickerMode::Workflow));
    let ids: Vec<&str> = state.items().iter().map(PickerItem::selection_id).collect();
    assert_eq!(ids, vec!["10", "12"]);
    assert_eq!(state.selected_label(), Some("Retire"));
}

#[test]
fn workflow_selection_records_sentinels() {
    let mut controller = SelectionModeController::new(PickerOptions::default());
    let mut resource_action = ResourceAction::new();
    open_workflow(&mut controller, &mut resource_action);

    assert!(controller.select_by_id("10", &mut resource_action).is_ok());
    assert_eq!(resource_action.ae_instance(), Some("Provision"));
    assert_eq!(resource_action.ae_id(), Some("10"));
    assert_eq!(
        resource_action.ae_namespace(),
        Some(WORKFLOW_NAMESPACE_SENTINEL)
    );
    assert_eq!(resource_action.ae_class(), Some(WORKFLOW_CLASS_SENTINEL));
    assert_eq!(controller.state().selected_label(), Some("Provision"));
}

#[test]
fn opening_workflow_picker_purges_automate_selection() {
    let mut controller = SelectionModeController::new(PickerOptions::default());
    let mut resource_action = automate_record();

    let pending = controller
        .toggle_workflow(&mut resource_action)
        .unwrap_or_else(|| unreachable!());

    assert_eq!(pending.hint(), None);
    assert_eq!(resource_action.ae_namespace(), Some(""));
    assert_eq!(resource_action.ae_class(), Some(""));
    assert_eq!(resource_action.ae_instance(), Some(""));
    assert_eq!(resource_action.ae_id(), Some(""));
    assert_eq!(resource_action.extra().get("ae_message"), Some(&json!("create")));
}

#[test]
fn opening_automate_picker_purges_workflow_selection() {
    let mut controller = SelectionModeController::new(PickerOptions::default());
    let mut resource_action = ResourceAction::new();
    open_workflow(&mut controller, &mut resource_action);
    assert!(controller.select_by_id("10", &mut resource_action).is_ok());

    let pending = controller
        .toggle_automate(&mut resource_action)
        .unwrap_or_else(|| unreachable!());

    assert_eq!(pending.hint(), None);
    assert_eq!(resource_action.ae_id(), Some(""));
    assert_eq!(resource_action.ae_namespace(), Some(""));
}

#[test]
fn change_mode_clears_fields_without_opening() {
    let mut controller = SelectionModeController::new(PickerOptions::default());
    let mut resource_action = automate_record();

    let changed = controller.change_mode(PickerMode::Workflow, &mut resource_action);
    assert!(changed.is_ok());

    assert_eq!(controller.state().mode(), Some(PickerMode::Workflow));
    assert_eq!(controller.state().phase(), PickerPhase::Closed);
    assert_eq!(resource_action.ae_namespace(), Some(""));
    assert_eq!(resource_action.ae_class(), Some(""));
    assert_eq!(resource_action.ae_instance(), Some(""));
    assert_eq!(resource_action.ae_id(), Some(""));
}

#[test]
fn change_mode_closes_ready_picker() {
    let mut controller = SelectionModeController::new(PickerOptions::default());
    let mut resource_action = automate_record();
    open_automate(&mut controller, &mut resource_action);

    assert!(
        controller
            .change_mode(PickerMode::Workflow, &mut resource_action)
            .is_ok()
    );
    assert_eq!(controller.state().phase(), PickerPhase::Closed);
    assert!(controller.state().items().is_empty());
}

#[test]
fn change_mode_is_rejected_while_loading() {
    let mut controller = SelectionModeController::new(PickerOptions::default());
    let mut resource_action = automate_record();
    let pending = controller.toggle_automate(&mut resource_action);
    assert!(pending.is_some());

    let changed = controller.change_mode(PickerMode::Workflow, &mut resource_action);
    assert!(matches!(changed, Err(AppError::InvalidState(_))));
    assert_eq!(resource_action, automate_record());
}

#[test]
fn toggle_while_loading_closes_and_discards_late_result() {
    let mut controller = SelectionModeController::new(PickerOptions::default());
    let mut resource_action = ResourceAction::new();

    let pending = controller
        .toggle_automate(&mut resource_action)
        .unwrap_or_else(|| unreachable!());
    assert!(controller.toggle_automate(&mut resource_action).is_none());
    assert_eq!(controller.state().phase(), PickerPhase::Closed);

    let completion = controller.complete_tree_load(&pending, Ok(tree()));
    assert!(matches!(completion, Ok(LoadCompletion::Discarded)));
    assert_eq!(controller.state().phase(), PickerPhase::Closed);
    assert!(controller.state().items().is_empty());
}

#[test]
fn stale_ticket_from_previous_open_is_discarded() {
    let mut controller = SelectionModeController::new(PickerOptions::default());
    let mut resource_action = ResourceAction::new();

    let first = controller
        .toggle_automate(&mut resource_action)
        .unwrap_or_else(|| unreachable!());
    assert!(controller.toggle_automate(&mut resource_action).is_none());
    let second = controller
        .toggle_automate(&mut resource_action)
        .unwrap_or_else(|| unreachable!());
    assert!(second.generation() > first.generation());

    let stale = controller.complete_tree_load(&first, Ok(tree()));
    assert!(matches!(stale, Ok(LoadCompletion::Discarded)));
    assert_eq!(
        controller.state().phase(),
        PickerPhase::OpenLoading(PickerMode::Automate)
    );

    let fresh = controller.complete_tree_load(&second, Ok(Vec::new()));
    assert!(matches!(fresh, Ok(LoadCompletion::Applied)));
}

#[test]
fn load_failure_is_surfaced_and_picker_stays_loading() {
    let mut controller = SelectionModeController::new(PickerOptions::default());
    let mut resource_action = ResourceAction::new();

    let pending = controller
        .toggle_workflow(&mut resource_action)
        .unwrap_or_else(|| unreachable!());
    let completion = controller.complete_workflow_load(
        &pending,
        Err(AppError::Internal("connection reset".to_owned())),
        &resource_action,
    );

    assert!(matches!(completion, Err(AppError::LoadFailure(_))));
    assert_eq!(
        controller.state().phase(),
        PickerPhase::OpenLoading(PickerMode::Workflow)
    );
    assert!(!controller.is_loading());
    assert!(
        controller
            .state()
            .load_error()
            .is_some_and(|message| message.contains("connection reset"))
    );

    assert!(controller.toggle_workflow(&mut resource_action).is_none());
    assert_eq!(controller.state().phase(), PickerPhase::Closed);
    assert_eq!(controller.state().load_error(), None);
    assert!(controller.toggle_workflow(&mut resource_action).is_some());
}

#[test]
fn select_rejects_items_from_other_mode() {
    let mut controller = SelectionModeController::new(PickerOptions::default());
    let mut resource_action = ResourceAction::new();
    open_automate(&mut controller, &mut resource_action);

    let workflow = PickerItem::WorkflowRecord(WorkflowRecord::new("10", "Provision", true));
    let selected = controller.select(&workflow, &mut resource_action);

    assert!(matches!(selected, Err(AppError::InvalidState(_))));
    assert_eq!(
        controller.state().phase(),
        PickerPhase::OpenReady(PickerMode::Automate)
    );
}

#[test]
fn select_rejects_payloadless_items() {
    let mut controller = SelectionModeController::new(PickerOptions::default());
    let mut resource_action = ResourceAction::new();
    open_automate(&mut controller, &mut resource_action);

    let namespace = PickerItem::TreeNode(TreeNode::new("/ManageIQ/System", "aen-1", false));
    let selected = controller.select(&namespace, &mut resource_action);
    assert!(matches!(selected, Err(AppError::InvalidState(_))));

    let unknown = controller.select_by_id("aen-1", &mut resource_action);
    assert!(matches!(unknown, Err(AppError::NotFound(_))));
}

#[test]
fn recorded_workflow_mode_resets_record_when_opening_automate() {
    let mut controller = SelectionModeController::with_recorded_mode(
        PickerOptions::default(),
        Some(PickerMode::Workflow),
    );
    let mut resource_action = ResourceAction::new().with_ae_id("12");
    assert_eq!(controller.state().mode(), Some(PickerMode::Workflow));

    let pending = controller.toggle_automate(&mut resource_action);

    assert!(pending.is_some());
    assert_eq!(pending.and_then(|pending| pending.hint().map(str::to_owned)), None);
    assert_eq!(resource_action.ae_id(), Some(""));
    assert_eq!(resource_action.ae_namespace(), None);
}

#[test]
fn recorded_same_mode_keeps_selection_hint() {
    let mut controller = SelectionModeController::with_recorded_mode(
        PickerOptions::default(),
        Some(PickerMode::Automate),
    );
    let mut resource_action = automate_record();

    let pending = controller.toggle_automate(&mut resource_action);

    assert_eq!(
        pending.and_then(|pending| pending.hint().map(str::to_owned)),
        Some("System/Request/InspectMe".to_owned())
    );
    assert_eq!(resource_action.ae_id(), Some("aei-1"));
}
