/// Composition root
///
/// Registers every domain service against its entity-type key and boots
/// the container. Factories only capture the database handle and a weak
/// container pointer — no service constructs its peers eagerly, so the
/// registration order here carries no meaning.
use std::sync::Arc;

use super::container::{BoxedService, EntityKind, ServiceContainer};
use crate::auth::jwt::TokenIssuer;
use crate::error::CoreResult;
use crate::services::group::GroupService;
use crate::services::group_member::GroupMemberService;
use crate::services::task::TaskService;
use crate::services::user::UserService;
use crate::storage::Database;

/// Wires all domain services and boots the container
pub fn wire(db: Arc<Database>, issuer: TokenIssuer) -> CoreResult<Arc<ServiceContainer>> {
    let container = Arc::new(ServiceContainer::new());
    let weak = Arc::downgrade(&container);

    {
        let db = db.clone();
        container.register(
            EntityKind::User,
            Box::new(move || Arc::new(UserService::new(&db, issuer.clone())) as BoxedService),
        )?;
    }

    {
        let db = db.clone();
        let weak = weak.clone();
        container.register(
            EntityKind::Group,
            Box::new(move || Arc::new(GroupService::new(&db, weak.clone())) as BoxedService),
        )?;
    }

    {
        let db = db.clone();
        let weak = weak.clone();
        container.register(
            EntityKind::GroupMember,
            Box::new(move || {
                Arc::new(GroupMemberService::new(&db, weak.clone())) as BoxedService
            }),
        )?;
    }

    container.register(
        EntityKind::Task,
        Box::new(move || Arc::new(TaskService::new(&db)) as BoxedService),
    )?;

    container.boot()?;
    Ok(container)
}
