//! Tests for the standard task registry tables.
//!
//! The standard tables are never validated at runtime, so these tests are what guarantees
//! every kind exposes public categories and that no category is registered twice.

use super::*;

/// Expect the standard tables to pass the same validation as custom registries
#[test]
fn standard_tables_are_valid() {
    let standard = TaskRegistry::standard();

    let result = TaskRegistry::new(
        standard.table(EntityKind::Alliance).clone(),
        standard.table(EntityKind::Corporation).clone(),
        standard.table(EntityKind::Character).clone(),
    );

    assert!(result.is_ok(), "Error: {:?}", result);
}

#[test]
fn alliance_categories() {
    let registry = TaskRegistry::standard();

    let public: Vec<_> = registry
        .public_categories(EntityKind::Alliance)
        .iter()
        .map(|d| d.category)
        .collect();
    let authenticated: Vec<_> = registry
        .authenticated_categories(EntityKind::Alliance)
        .iter()
        .map(|d| d.category)
        .collect();

    assert_eq!(public, vec![TaskCategory::Info, TaskCategory::Members]);
    assert_eq!(
        authenticated,
        vec![TaskCategory::ContactLabels, TaskCategory::Contacts]
    );
}

#[test]
fn character_categories() {
    let registry = TaskRegistry::standard();

    let public: Vec<_> = registry
        .public_categories(EntityKind::Character)
        .iter()
        .map(|d| d.category)
        .collect();

    assert_eq!(
        public,
        vec![
            TaskCategory::Info,
            TaskCategory::CorporationHistory,
            TaskCategory::Affiliation
        ]
    );
    assert_eq!(
        registry.authenticated_categories(EntityKind::Character).len(),
        36
    );
    assert!(registry
        .authenticated_categories(EntityKind::Character)
        .iter()
        .all(|d| d.shape == ArgShape::Credential));
}

#[test]
fn corporation_categories() {
    let registry = TaskRegistry::standard();

    let public: Vec<_> = registry
        .public_categories(EntityKind::Corporation)
        .iter()
        .map(|d| d.category)
        .collect();

    assert_eq!(
        public,
        vec![TaskCategory::Info, TaskCategory::AllianceHistory]
    );
    assert_eq!(
        registry
            .authenticated_categories(EntityKind::Corporation)
            .len(),
        34
    );
    assert!(registry
        .authenticated_categories(EntityKind::Corporation)
        .iter()
        .all(|d| d.shape == ArgShape::EntityIdWithCredential));
}

/// Members is public for alliances but needs director access for corporations
#[test]
fn shared_category_can_differ_per_kind() {
    let registry = TaskRegistry::standard();

    assert!(registry
        .public_categories(EntityKind::Alliance)
        .iter()
        .any(|d| d.category == TaskCategory::Members));
    assert!(registry
        .authenticated_categories(EntityKind::Corporation)
        .iter()
        .any(|d| d.category == TaskCategory::Members));
}

#[test]
fn standard_registry_is_shared() {
    let first = TaskRegistry::standard();
    let second = TaskRegistry::standard();

    assert!(std::sync::Arc::ptr_eq(&first, &second));
}
