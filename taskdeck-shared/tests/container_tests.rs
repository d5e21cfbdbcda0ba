/// Service container lifecycle tests
///
/// The two-phase lifecycle (register → boot → get), lazy singleton
/// caching, and the concurrency guarantee for first accesses.
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::Duration;
use taskdeck_shared::auth::jwt::TokenIssuer;
use taskdeck_shared::error::CoreError;
use taskdeck_shared::registry::{wire, BoxedService, EntityKind, ServiceContainer, ServiceRef};
use taskdeck_shared::services::{GroupMemberService, GroupService, TaskService, UserService};
use taskdeck_shared::storage::Database;

fn test_issuer() -> TokenIssuer {
    TokenIssuer::new("test-secret-key-at-least-32-bytes!!", Duration::hours(24))
}

#[test]
fn test_get_before_boot_is_a_configuration_error() {
    let container = ServiceContainer::new();
    container
        .register(EntityKind::Task, Box::new(|| Arc::new(1_u32) as BoxedService))
        .unwrap();

    let err = container.get::<u32>(EntityKind::Task).unwrap_err();
    assert!(matches!(err, CoreError::Configuration(_)));
}

#[test]
fn test_get_returns_the_cached_singleton() {
    let container = ServiceContainer::new();
    container
        .register(
            EntityKind::Task,
            Box::new(|| Arc::new(String::from("singleton")) as BoxedService),
        )
        .unwrap();
    container.boot().unwrap();

    let first: Arc<String> = container.get(EntityKind::Task).unwrap();
    let second: Arc<String> = container.get(EntityKind::Task).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_register_after_boot_is_rejected() {
    let container = ServiceContainer::new();
    container.boot().unwrap();

    let err = container
        .register(EntityKind::User, Box::new(|| Arc::new(1_u32) as BoxedService))
        .unwrap_err();
    assert!(matches!(err, CoreError::Configuration(_)));
}

#[test]
fn test_double_boot_is_rejected() {
    let container = ServiceContainer::new();
    container.boot().unwrap();
    assert!(matches!(
        container.boot().unwrap_err(),
        CoreError::Configuration(_)
    ));
}

#[test]
fn test_unknown_key_and_type_mismatch() {
    let container = ServiceContainer::new();
    container
        .register(EntityKind::Task, Box::new(|| Arc::new(1_u32) as BoxedService))
        .unwrap();
    container.boot().unwrap();

    assert!(matches!(
        container.get::<u32>(EntityKind::Group).unwrap_err(),
        CoreError::Configuration(_)
    ));
    assert!(matches!(
        container.get::<String>(EntityKind::Task).unwrap_err(),
        CoreError::Configuration(_)
    ));
}

#[tokio::test]
async fn test_concurrent_first_access_constructs_once() {
    let constructions = Arc::new(AtomicUsize::new(0));
    let container = Arc::new(ServiceContainer::new());

    let counter = constructions.clone();
    container
        .register(
            EntityKind::User,
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Arc::new(String::from("expensive")) as BoxedService
            }),
        )
        .unwrap();
    container.boot().unwrap();

    let mut handles = Vec::new();
    for _ in 0..16 {
        let container = container.clone();
        handles.push(tokio::spawn(async move {
            container.get::<String>(EntityKind::User).unwrap()
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(constructions.load(Ordering::SeqCst), 1);
}

#[test]
fn test_service_ref_resolves_lazily() {
    let container = Arc::new(ServiceContainer::new());
    let handle: ServiceRef<String> =
        ServiceRef::new(Arc::downgrade(&container), EntityKind::Group);

    // Before boot the handle exists but cannot resolve.
    assert!(handle.resolve().is_err());

    container
        .register(
            EntityKind::Group,
            Box::new(|| Arc::new(String::from("resolved")) as BoxedService),
        )
        .unwrap();
    container.boot().unwrap();

    assert_eq!(*handle.resolve().unwrap(), "resolved");

    drop(container);
    assert!(matches!(
        handle.resolve().unwrap_err(),
        CoreError::Configuration(_)
    ));
}

#[tokio::test]
async fn test_wire_serves_the_whole_service_graph() {
    let db = Arc::new(Database::new());
    let container = wire(db, test_issuer()).unwrap();

    assert!(container.is_booted());
    container.get::<UserService>(EntityKind::User).unwrap();
    container.get::<GroupService>(EntityKind::Group).unwrap();
    container
        .get::<GroupMemberService>(EntityKind::GroupMember)
        .unwrap();
    container.get::<TaskService>(EntityKind::Task).unwrap();
}
