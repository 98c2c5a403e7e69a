//! # Resource Name Handling
//!
//! Disablement state is keyed on the `projects/<project>/locations/<location>`
//! prefix shared by every resource a tenant owns, not on the full resource
//! name.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::DispatchError;

static RESOURCE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn resource_pattern() -> &'static Regex {
    RESOURCE_PATTERN.get_or_init(|| {
        Regex::new(r"^(projects/[^/]+/locations/[^/]+)").expect("resource pattern is valid")
    })
}

/// Derives the project/location prefix a resource name belongs to.
///
/// Fails with [`DispatchError::InvalidResourceName`] when the name does not
/// start with the expected structure.
pub fn project_key(resource_name: &str) -> Result<String, DispatchError> {
    let captures =
        resource_pattern()
            .captures(resource_name)
            .ok_or_else(|| DispatchError::InvalidResourceName {
                name: resource_name.to_string(),
            })?;
    Ok(captures[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_prefix_from_nested_resource() {
        let key = project_key("projects/my-project/locations/us-central1/runs/run-1").unwrap();
        assert_eq!(key, "projects/my-project/locations/us-central1");
    }

    #[test]
    fn bare_prefix_is_its_own_key() {
        let key = project_key("projects/p/locations/l").unwrap();
        assert_eq!(key, "projects/p/locations/l");
    }

    #[test]
    fn rejects_names_without_location() {
        let err = project_key("projects/p").unwrap_err();
        assert!(matches!(err, DispatchError::InvalidResourceName { .. }));
    }

    #[test]
    fn rejects_unrelated_names() {
        assert!(project_key("folders/f/locations/l").is_err());
        assert!(project_key("").is_err());
    }

    #[test]
    fn rejects_empty_segments() {
        assert!(project_key("projects//locations/l").is_err());
        assert!(project_key("projects/p/locations//runs/r").is_err());
    }
}
