//! Tests for the todo list service.
//!
//! The service runs against the in-memory repository with the default
//! route permissions, so each test exercises authorization and scoping
//! together.

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::sync::Arc;

    use authz_resolver_sdk::{PolicyEnforcer, ProtectedRouteConfig};
    use claims_security::{ClaimSet, SecurityContext};
    use todolist_sdk::{NewTodo, Todo, TodoPatch};

    use crate::domain::error::DomainError;
    use crate::domain::service::{Service, ServiceConfig};
    use crate::infra::storage::InMemoryTodoRepository;

    const ALICE: &str = "00000000-0000-0000-0000-00000000a11c";
    const BOB: &str = "00000000-0000-0000-0000-000000000b0b";

    fn todo(id: &str, owner: &str, description: &str) -> Todo {
        Todo {
            id: id.to_owned(),
            owner: owner.to_owned(),
            description: description.to_owned(),
        }
    }

    fn service_with(todos: Vec<Todo>) -> Service {
        Service::new(
            Arc::new(InMemoryTodoRepository::with_todos(todos)),
            PolicyEnforcer::new(ProtectedRouteConfig::default()),
            ServiceConfig {
                max_description_length: 16,
            },
        )
    }

    fn seeded() -> Service {
        service_with(vec![
            todo("1", ALICE, "buy milk"),
            todo("2", BOB, "walk dog"),
            todo("3", ALICE, "pay rent"),
        ])
    }

    fn user(oid: &str, scp: &str) -> SecurityContext {
        SecurityContext::builder()
            .claims(ClaimSet::builder().idtyp("user").scp(scp).oid(oid).build())
            .build()
    }

    fn app(roles: &[&str]) -> SecurityContext {
        SecurityContext::builder()
            .claims(
                ClaimSet::builder()
                    .idtyp("app")
                    .roles(roles.iter().copied())
                    .build(),
            )
            .build()
    }

    fn new_todo(description: &str) -> NewTodo {
        NewTodo {
            description: description.to_owned(),
            ..NewTodo::default()
        }
    }

    #[tokio::test]
    async fn user_lists_only_own_todos() {
        let svc = seeded();

        let todos = svc.list_todos(&user(ALICE, "Todolist.Read")).await.unwrap();

        let ids: Vec<_> = todos.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
        assert!(todos.iter().all(|t| t.owner == ALICE));
    }

    #[tokio::test]
    async fn application_lists_every_todo() {
        let svc = seeded();

        let todos = svc.list_todos(&app(&["Todolist.Read.All"])).await.unwrap();

        assert_eq!(todos.len(), 3);
    }

    #[tokio::test]
    async fn user_without_delegated_permission_is_forbidden() {
        let svc = seeded();

        let err = svc
            .list_todos(&user(ALICE, "Other.Permission"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Forbidden { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn user_token_is_not_checked_against_application_roles() {
        let svc = seeded();
        let ctx = SecurityContext::builder()
            .claims(
                ClaimSet::builder()
                    .idtyp("user")
                    .oid(ALICE)
                    .roles(["Todolist.ReadWrite.All"])
                    .build(),
            )
            .build();

        let err = svc.list_todos(&ctx).await.unwrap_err();

        assert!(matches!(err, DomainError::Forbidden { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn token_without_kind_claims_is_unclassifiable() {
        let svc = seeded();
        let ctx = SecurityContext::builder()
            .claims(ClaimSet::builder().oid(ALICE).build())
            .build();

        let err = svc.get_todo(&ctx, "1").await.unwrap_err();

        assert_eq!(err, DomainError::Unclassifiable);
    }

    #[tokio::test]
    async fn user_token_without_oid_is_malformed() {
        let svc = seeded();
        let ctx = SecurityContext::builder()
            .claims(ClaimSet::builder().idtyp("user").scp("Todolist.Read").build())
            .build();

        let err = svc.list_todos(&ctx).await.unwrap_err();

        assert!(matches!(err, DomainError::MalformedClaims { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn empty_oid_does_not_match_ownerless_records() {
        let svc = service_with(vec![todo("orphan", "", "no owner")]);

        let err = svc.list_todos(&user("", "Todolist.Read")).await.unwrap_err();

        assert!(matches!(err, DomainError::MalformedClaims { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn other_owners_todo_looks_missing() {
        let svc = seeded();
        let alice = user(ALICE, "Todolist.ReadWrite");

        assert_eq!(
            svc.get_todo(&alice, "2").await.unwrap_err(),
            DomainError::not_found("2")
        );
        assert_eq!(
            svc.update_todo(
                &alice,
                "2",
                TodoPatch {
                    description: Some("stolen".to_owned())
                }
            )
            .await
            .unwrap_err(),
            DomainError::not_found("2")
        );
        assert_eq!(
            svc.delete_todo(&alice, "2").await.unwrap_err(),
            DomainError::not_found("2")
        );

        let bob_view = svc
            .get_todo(&user(BOB, "Todolist.Read"), "2")
            .await
            .unwrap();
        assert_eq!(bob_view.description, "walk dog");
    }

    #[tokio::test]
    async fn user_create_takes_owner_from_token() {
        let svc = service_with(Vec::new());
        let alice = user(ALICE, "Todolist.ReadWrite");

        let created = svc
            .create_todo(
                &alice,
                NewTodo {
                    owner: Some(BOB.to_owned()),
                    ..new_todo("write tests")
                },
            )
            .await
            .unwrap();

        assert_eq!(created.owner, ALICE);
        assert!(!created.id.is_empty());
        assert_eq!(svc.get_todo(&alice, &created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn application_create_requires_owner() {
        let svc = service_with(Vec::new());
        let ctx = app(&["Todolist.ReadWrite.All"]);

        let err = svc.create_todo(&ctx, new_todo("ship it")).await.unwrap_err();
        assert!(
            matches!(err, DomainError::Validation { ref field, .. } if field == "owner"),
            "{err:?}"
        );

        let created = svc
            .create_todo(
                &ctx,
                NewTodo {
                    id: Some("app-1".to_owned()),
                    owner: Some(BOB.to_owned()),
                    ..new_todo("ship it")
                },
            )
            .await
            .unwrap();
        assert_eq!(created, todo("app-1", BOB, "ship it"));
    }

    #[tokio::test]
    async fn create_is_granted_by_either_family() {
        let svc = service_with(Vec::new());
        let ctx = SecurityContext::builder()
            .claims(
                ClaimSet::builder()
                    .idtyp("app")
                    .scp("Todolist.ReadWrite")
                    .oid(ALICE)
                    .build(),
            )
            .build();

        let created = svc
            .create_todo(
                &ctx,
                NewTodo {
                    owner: Some(BOB.to_owned()),
                    ..new_todo("cross family")
                },
            )
            .await
            .unwrap();

        assert_eq!(created.owner, BOB);
    }

    #[tokio::test]
    async fn create_needs_write_permission() {
        let svc = service_with(Vec::new());

        let err = svc
            .create_todo(&user(ALICE, "Todolist.Read"), new_todo("nope"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Forbidden { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn duplicate_id_conflicts_across_owners() {
        let svc = seeded();

        let err = svc
            .create_todo(
                &user(BOB, "Todolist.ReadWrite"),
                NewTodo {
                    id: Some("1".to_owned()),
                    ..new_todo("mine now")
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::id_already_exists("1"));
    }

    #[tokio::test]
    async fn descriptions_are_validated() {
        let svc = service_with(Vec::new());
        let alice = user(ALICE, "Todolist.ReadWrite");

        assert_eq!(
            svc.create_todo(&alice, new_todo("   ")).await.unwrap_err(),
            DomainError::EmptyDescription
        );
        assert_eq!(
            svc.create_todo(&alice, new_todo("seventeen chars!!"))
                .await
                .unwrap_err(),
            DomainError::description_too_long(17, 16)
        );
        assert_eq!(
            svc.create_todo(
                &alice,
                NewTodo {
                    id: Some(" ".to_owned()),
                    ..new_todo("ok")
                }
            )
            .await
            .unwrap_err(),
            DomainError::EmptyId
        );
    }

    #[tokio::test]
    async fn update_and_delete_own_todo() {
        let svc = seeded();
        let alice = user(ALICE, "Todolist.ReadWrite");

        let updated = svc
            .update_todo(
                &alice,
                "1",
                TodoPatch {
                    description: Some("buy oat milk".to_owned()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated, todo("1", ALICE, "buy oat milk"));

        svc.delete_todo(&alice, "1").await.unwrap();
        assert_eq!(
            svc.get_todo(&alice, "1").await.unwrap_err(),
            DomainError::not_found("1")
        );
    }

    #[tokio::test]
    async fn application_updates_any_owners_todo() {
        let svc = seeded();
        let ctx = app(&["Todolist.ReadWrite.All"]);

        let updated = svc
            .update_todo(
                &ctx,
                "2",
                TodoPatch {
                    description: Some("walk cat".to_owned()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.owner, BOB);
        assert_eq!(updated.description, "walk cat");
    }

    #[tokio::test]
    async fn read_only_application_cannot_delete() {
        let svc = seeded();

        let err = svc
            .delete_todo(&app(&["Todolist.Read.All"]), "2")
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Forbidden { .. }), "{err:?}");
        assert_eq!(svc.list_todos(&app(&["Todolist.Read.All"])).await.unwrap().len(), 3);
    }
}
