//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod http_api_client;
mod http_automate_tree_loader;
mod http_workflow_loader;
mod in_memory_picker_loaders;
mod required_field_validator;

pub use http_api_client::{HttpApiClient, HttpApiClientConfig};
pub use http_automate_tree_loader::HttpAutomateTreeLoader;
pub use http_workflow_loader::HttpWorkflowLoader;
pub use in_memory_picker_loaders::{InMemoryTreeLoader, InMemoryWorkflowLoader};
pub use required_field_validator::RequiredFieldValidator;
