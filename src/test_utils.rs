//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    /// Generate a package import path with one to three segments
    pub fn package_id() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9]{0,7}(/[a-z][a-z0-9]{0,7}){0,2}"
    }

    /// Generate an ordered list of package ids (duplicates allowed)
    pub fn catalog_ids() -> impl Strategy<Value = Vec<String>> {
        proptest::collection::vec(package_id(), 0..24)
    }

    /// Generate a linker flags string, including spaces and quotes
    pub fn ldflags() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            Just("-X foo=bar".to_string()),
            Just("-s -w".to_string()),
            "[ -~]{0,40}",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_package_id_generator(id in package_id()) {
            prop_assert!(!id.is_empty());
            prop_assert!(id.split('/').all(|segment| !segment.is_empty()));
            prop_assert!(id.split('/').count() <= 3);
        }

        #[test]
        fn test_catalog_ids_generator(ids in catalog_ids()) {
            prop_assert!(ids.len() < 24);
        }
    }
}
