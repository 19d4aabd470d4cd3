//! Fully-qualified automation names (`namespace/class/instance`).
//!
//! Picker paths coming from the automation tree carry a leading domain
//! segment (`/Domain/Namespace/Class/Instance`). The domain is stripped unless
//! the caller asks to keep it.

use entrypoint_core::{AppError, AppResult};

use crate::ResourceAction;

/// Structured parts of a fully-qualified automation name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FqnParts {
    /// Namespace, possibly nested with `/`.
    pub namespace: String,
    /// Class name.
    pub class: String,
    /// Instance name.
    pub instance: String,
}

impl FqnParts {
    /// Joins the parts back into a fully-qualified name.
    #[must_use]
    pub fn to_fqn(&self) -> String {
        build_fqn(&self.namespace, &self.class, &self.instance)
    }
}

/// Builds `namespace/class/instance`, or an empty string when any part is empty.
#[must_use]
pub fn build_fqn(namespace: &str, class: &str, instance: &str) -> String {
    if namespace.is_empty() || class.is_empty() || instance.is_empty() {
        return String::new();
    }

    format!("{namespace}/{class}/{instance}")
}

/// Splits a picker path into structured parts.
///
/// Missing segments come back as empty strings, so partial tree data never
/// breaks the picker.
#[must_use]
pub fn split_path(path: &str, include_domain: bool) -> FqnParts {
    let mut segments = path_segments(path, include_domain);

    let instance = segments.pop().unwrap_or_default().to_owned();
    let class = segments.pop().unwrap_or_default().to_owned();
    let namespace = segments
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    FqnParts {
        namespace,
        class,
        instance,
    }
}

/// Strict form of [`split_path`] that rejects paths without a class and instance.
pub fn try_split_path(path: &str, include_domain: bool) -> AppResult<FqnParts> {
    let remaining = path_segments(path, include_domain)
        .into_iter()
        .skip_while(|segment| segment.is_empty())
        .count();

    if remaining < 2 {
        return Err(AppError::MalformedPath(format!(
            "'{path}' needs at least a class and an instance segment"
        )));
    }

    Ok(split_path(path, include_domain))
}

/// Returns the recorded automation FQN, or an empty string when incomplete.
#[must_use]
pub fn show_fully_qualified_name(resource_action: &ResourceAction) -> String {
    match (
        resource_action.ae_namespace(),
        resource_action.ae_class(),
        resource_action.ae_instance(),
    ) {
        (Some(namespace), Some(class), Some(instance)) => build_fqn(namespace, class, instance),
        _ => String::new(),
    }
}

// A leading '/' yields an empty root segment; the domain is the segment after it.
// A path made of the domain alone leaves nothing behind.
fn path_segments(path: &str, include_domain: bool) -> Vec<&str> {
    let mut segments: Vec<&str> = path.split('/').collect();

    if !include_domain {
        let domain_index = usize::from(segments.first().is_some_and(|first| first.is_empty()));
        if segments.len() > domain_index {
            segments.remove(domain_index);
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{FqnParts, build_fqn, show_fully_qualified_name, split_path, try_split_path};
    use crate::ResourceAction;

    fn parts(namespace: &str, class: &str, instance: &str) -> FqnParts {
        FqnParts {
            namespace: namespace.to_owned(),
            class: class.to_owned(),
            instance: instance.to_owned(),
        }
    }

    #[test]
    fn build_fqn_requires_every_part() {
        assert_eq!(build_fqn("ns", "cls", "inst"), "ns/cls/inst");
        assert_eq!(build_fqn("", "cls", "inst"), "");
        assert_eq!(build_fqn("ns", "", "inst"), "");
        assert_eq!(build_fqn("ns", "cls", ""), "");
    }

    #[test]
    fn split_path_drops_domain_segment() {
        assert_eq!(
            split_path("domain/ns/cls/instance", false),
            parts("ns", "cls", "instance")
        );
        assert_eq!(
            split_path("/ManageIQ/System/Request/InspectMe", false),
            parts("System", "Request", "InspectMe")
        );
    }

    #[test]
    fn split_path_keeps_domain_when_requested() {
        assert_eq!(
            split_path("/ManageIQ/System/Request/InspectMe", true),
            parts("ManageIQ/System", "Request", "InspectMe")
        );
    }

    #[test]
    fn split_path_rejoins_nested_namespaces() {
        assert_eq!(
            split_path("/Domain/Infra/VM/Provisioning/StateMachines/Default", false),
            parts("Infra/VM/Provisioning", "StateMachines", "Default")
        );
    }

    #[test]
    fn split_path_fills_missing_segments_with_empty_strings() {
        assert_eq!(split_path("", false), parts("", "", ""));
        assert_eq!(split_path("inst", true), parts("", "", "inst"));
        assert_eq!(split_path("/Domain/inst", false), parts("", "", "inst"));
    }

    #[test]
    fn split_path_never_keeps_a_lone_domain_as_instance() {
        assert_eq!(split_path("/Domain", false), parts("", "", ""));
        assert_eq!(split_path("Domain", false), parts("", "", ""));
        assert_eq!(split_path("/Domain", true), parts("", "", "Domain"));
    }

    #[test]
    fn try_split_path_reports_malformed_paths() {
        assert!(try_split_path("inst", true).is_err());
        assert!(try_split_path("/Domain/inst", false).is_err());
        assert!(try_split_path("/Domain/cls/inst", false).is_ok());
    }

    #[test]
    fn show_fully_qualified_name_needs_all_three_keys() {
        let complete = ResourceAction::for_instance("System", "Request", "InspectMe");
        assert_eq!(
            show_fully_qualified_name(&complete),
            "System/Request/InspectMe"
        );

        let blank_class = ResourceAction::for_instance("System", "", "InspectMe");
        assert_eq!(show_fully_qualified_name(&blank_class), "");
        assert_eq!(show_fully_qualified_name(&ResourceAction::new()), "");
    }

    proptest! {
        #[test]
        fn split_path_inverts_build_fqn(
            namespace in "[A-Za-z0-9_.-]{1,16}",
            class in "[A-Za-z0-9_.-]{1,16}",
            instance in "[A-Za-z0-9_.-]{1,16}",
        ) {
            let fqn = build_fqn(&namespace, &class, &instance);
            prop_assert_eq!(
                split_path(&fqn, true),
                parts(&namespace, &class, &instance)
            );
        }

        #[test]
        fn split_path_without_domain_drops_exactly_one_segment(
            domain in "[A-Za-z0-9]{1,8}",
            namespace in "[A-Za-z0-9]{1,8}",
            class in "[A-Za-z0-9]{1,8}",
            instance in "[A-Za-z0-9]{1,8}",
        ) {
            let path = format!("/{domain}/{namespace}/{class}/{instance}");
            prop_assert_eq!(
                split_path(&path, false),
                parts(&namespace, &class, &instance)
            );
        }
    }
}
