/// Group-member service
use std::sync::Weak;

use crate::error::CoreResult;
use crate::models::group_member::{CreateGroupMember, GroupMember, GroupMemberView};
use crate::registry::{EntityKind, ServiceContainer, ServiceRef};
use crate::repository::group_member_repository;
use crate::services::base::CrudService;
use crate::services::group::GroupService;
use crate::storage::Database;

/// Domain service for group memberships
pub struct GroupMemberService {
    crud: CrudService<GroupMember, GroupMemberView>,
    groups: ServiceRef<GroupService>,
}

impl GroupMemberService {
    /// Creates the service; the group peer is captured as a lazy handle
    pub fn new(db: &Database, container: Weak<ServiceContainer>) -> Self {
        Self {
            crud: CrudService::new(group_member_repository(db)),
            groups: ServiceRef::new(container, EntityKind::Group),
        }
    }

    /// Generic CRUD operations bound to the membership projection
    pub fn crud(&self) -> &CrudService<GroupMember, GroupMemberView> {
        &self.crud
    }

    /// Lazy handle to the group service
    pub fn group_service(&self) -> &ServiceRef<GroupService> {
        &self.groups
    }

    /// Extension point for self-service joins; intentionally inert
    // TODO: define the join rules (invites, role assignment, duplicate
    // handling) before wiring this into a route
    pub async fn add_member(&self, _payload: CreateGroupMember) -> CoreResult<()> {
        tracing::warn!("add_member is not implemented");
        Ok(())
    }
}
