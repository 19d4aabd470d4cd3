//! Entry-point selector command line runtime.
//!
//! Runs one scripted field editor session against the automation REST API
//! and prints the resulting field record.

#![forbid(unsafe_code)]

mod cli_config;

use std::fs;
use std::sync::Arc;

use clap::Parser;
use entrypoint_application::{DialogFieldEditor, PickerCollaborators, PickerOptions};
use entrypoint_core::{AppError, AppResult};
use entrypoint_domain::{DialogField, PickerItem, PickerMode};
use entrypoint_infrastructure::{
    HttpApiClient, HttpApiClientConfig, HttpAutomateTreeLoader, HttpWorkflowLoader,
    RequiredFieldValidator,
};
use tracing::{info, warn};

use crate::cli_config::{CliArgs, CliConfig, init_tracing};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = CliConfig::load()?;
    let args = CliArgs::parse();
    let mode = args.picker_mode();
    let field = read_field(&args)?;

    info!(
        api_url = %config.api_url,
        field_path = %args.field_path.display(),
        mode = %mode,
        include_domain = config.include_domain,
        "entrypoint-cli started"
    );

    let mut editor = DialogFieldEditor::open(
        field,
        build_collaborators(&config)?,
        PickerOptions {
            include_domain: config.include_domain,
        },
    );

    if let Err(error) = editor.resolve_recorded_workflow().await {
        warn!(error = %error, "continuing with recorded workflow name");
    }

    if editor.field().automation_type() != Some(mode.automation_type()) {
        editor.change_mode(mode.automation_type())?;
    }

    match mode {
        PickerMode::Automate => editor.toggle_automate().await?,
        PickerMode::Workflow => editor.toggle_workflow().await?,
    }

    for item in editor.picker().items() {
        let marker = if is_selected(item, editor.picker().selected_label()) {
            "*"
        } else {
            " "
        };
        println!("{marker} {}\t{}", item.selection_id(), item_label(item));
    }

    if let Some(select_id) = args.select_id.as_deref() {
        editor.select_by_id(select_id)?;
    }

    let valid = editor.is_valid();
    let field = editor.into_field();
    let rendered = serde_json::to_string_pretty(&field)
        .map_err(|error| AppError::Internal(format!("failed to render field: {error}")))?;
    println!("{rendered}");
    info!(valid, "entrypoint-cli finished");

    Ok(())
}

fn read_field(args: &CliArgs) -> AppResult<DialogField> {
    let contents = fs::read_to_string(&args.field_path).map_err(|error| {
        AppError::Validation(format!(
            "failed to read '{}': {error}",
            args.field_path.display()
        ))
    })?;

    serde_json::from_str(&contents).map_err(|error| {
        AppError::Validation(format!(
            "'{}' is not a dialog field record: {error}",
            args.field_path.display()
        ))
    })
}

fn build_collaborators(config: &CliConfig) -> AppResult<PickerCollaborators> {
    let client = HttpApiClient::new(HttpApiClientConfig {
        base_url: config.api_url.clone(),
        auth_token: config.api_token.clone(),
        timeout: config.http_timeout,
        max_attempts: config.http_max_attempts,
        retry_backoff_ms: config.http_retry_backoff_ms,
    })?;

    Ok(PickerCollaborators {
        tree_loader: Arc::new(HttpAutomateTreeLoader::new(
            client.clone(),
            config.tree_path.as_str(),
        )),
        workflow_loader: Arc::new(HttpWorkflowLoader::new(
            client,
            config.workflows_path.as_str(),
        )),
        validator: Arc::new(RequiredFieldValidator),
    })
}

fn item_label(item: &PickerItem) -> &str {
    match item {
        PickerItem::TreeNode(node) => node.fqname.as_str(),
        PickerItem::WorkflowRecord(workflow) => workflow.name.as_str(),
    }
}

fn is_selected(item: &PickerItem, selected_label: Option<&str>) -> bool {
    match (item, selected_label) {
        (PickerItem::TreeNode(node), Some(label)) => node.fqname.ends_with(label),
        (PickerItem::WorkflowRecord(workflow), Some(label)) => workflow.name == label,
        (_, None) => false,
    }
}
