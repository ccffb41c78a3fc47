#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Classification and matching over claim sets parsed from raw JSON.

use claims_security::{
    ClaimSet, ClassificationError, PermissionFamily, PermissionRequirement, TokenKind, classify,
    satisfies,
};
use serde_json::json;

fn claims(value: serde_json::Value) -> ClaimSet {
    ClaimSet::from_json(value).expect("valid claims")
}

#[test]
fn disjoint_delegated_permissions_are_denied() {
    let claims = claims(json!({ "scp": "Todolist.Read Todolist.Write" }));

    assert!(!satisfies(
        &claims,
        &PermissionRequirement::any_of(["Todolist.ReadWrite"]),
        PermissionFamily::Delegated,
    ));
}

#[test]
fn one_overlapping_delegated_permission_is_enough() {
    let claims = claims(json!({ "scp": "Todolist.ReadWrite" }));

    assert!(satisfies(
        &claims,
        &PermissionRequirement::any_of(["Todolist.Read", "Todolist.ReadWrite"]),
        PermissionFamily::Delegated,
    ));
}

#[test]
fn read_only_application_cannot_write_and_is_classified_as_application() {
    let claims = claims(json!({ "roles": ["Todolist.Read.All"] }));

    assert!(!satisfies(
        &claims,
        &PermissionRequirement::any_of(["Todolist.ReadWrite.All"]),
        PermissionFamily::Application,
    ));
    assert_eq!(classify(&claims), Ok(TokenKind::Application));
}

#[test]
fn application_token_satisfies_write_through_roles() {
    let claims = claims(json!({ "idtyp": "app", "roles": ["Todolist.ReadWrite.All"] }));

    let delegated = PermissionRequirement::any_of(["Todolist.ReadWrite"]);
    let application = PermissionRequirement::any_of(["Todolist.ReadWrite.All"]);

    assert!(!satisfies(&claims, &delegated, PermissionFamily::Delegated));
    assert!(satisfies(&claims, &application, PermissionFamily::Application));
}

#[test]
fn empty_claims_are_unclassifiable() {
    let claims = claims(json!({}));
    assert_eq!(classify(&claims), Err(ClassificationError::Ambiguous));
}

#[test]
fn unrelated_claims_do_not_help_classification() {
    let claims = claims(json!({
        "oid": "00000000-0000-0000-66f3-3332eca7ea81",
        "aud": "api://todolist",
        "tid": "a8eec281-aaa3-4dae-ac9b-9a398b9215e7",
    }));

    assert_eq!(classify(&claims), Err(ClassificationError::Ambiguous));
}

#[test]
fn classification_is_stable_across_repeated_calls() {
    let claims = claims(json!({ "scp": "Todolist.Read", "roles": ["Todolist.Read.All"] }));

    let first = classify(&claims);
    for _ in 0..16 {
        assert_eq!(classify(&claims), first);
    }
    assert_eq!(first, Ok(TokenKind::User));
}

#[test]
fn user_token_roles_do_not_grant_delegated_access() {
    let claims = claims(json!({ "idtyp": "user", "roles": ["Todolist.Read"] }));

    assert_eq!(classify(&claims), Ok(TokenKind::User));
    assert!(!satisfies(
        &claims,
        &PermissionRequirement::any_of(["Todolist.Read"]),
        PermissionFamily::Delegated,
    ));
}
