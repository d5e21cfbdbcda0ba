/// Group service: CRUD plus the create-with-admin orchestration
use std::sync::Weak;

use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::models::group::{CreateGroup, Group, GroupView};
use crate::models::group_member::{CreateGroupMember, GroupMember, GroupRole};
use crate::registry::{EntityKind, ServiceContainer, ServiceRef};
use crate::repository::group_repository;
use crate::services::base::CrudService;
use crate::services::group_member::GroupMemberService;
use crate::services::user::UserService;
use crate::storage::Database;

/// Domain service for groups
pub struct GroupService {
    crud: CrudService<Group, GroupView>,
    users: ServiceRef<UserService>,
    members: ServiceRef<GroupMemberService>,
}

impl GroupService {
    /// Creates the service; peers are captured as lazy handles, not
    /// constructed
    pub fn new(db: &Database, container: Weak<ServiceContainer>) -> Self {
        Self {
            crud: CrudService::new(group_repository(db)),
            users: ServiceRef::new(container.clone(), EntityKind::User),
            members: ServiceRef::new(container, EntityKind::GroupMember),
        }
    }

    /// Generic CRUD operations bound to the group projection
    pub fn crud(&self) -> &CrudService<Group, GroupView> {
        &self.crud
    }

    /// Creates a group and its admin membership for the acting user
    ///
    /// The acting user is resolved first (not-found if missing), the group
    /// record is created, and a membership with role `admin` links the two.
    /// If the membership insert fails the group is removed again so the
    /// orchestration never leaves an orphaned group behind.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown acting user and propagates
    /// storage failures from either insert
    pub async fn create_group(
        &self,
        payload: CreateGroup,
        user_id: Uuid,
    ) -> CoreResult<GroupView> {
        let users = self.users.resolve()?;
        let user = users
            .crud()
            .get_by_id_model(&user_id)
            .await?
            .ok_or_else(|| CoreError::not_found("user", user_id))?;

        let group = self.crud.create_model(Group::new(payload)).await?;

        let members = self.members.resolve()?;
        let membership = GroupMember::new(CreateGroupMember {
            group_id: group.id,
            user_id: user.id,
            role: GroupRole::Admin,
        });

        if let Err(err) = members.crud().create(membership).await {
            tracing::error!(
                group_id = %group.id,
                error = %err,
                "admin membership creation failed, removing group"
            );
            if let Err(cleanup) = self.crud.repo().delete_by_id(&group.id, false).await {
                tracing::error!(
                    group_id = %group.id,
                    error = %cleanup,
                    "orphaned group could not be removed"
                );
            }
            return Err(err);
        }

        Ok(GroupView::from(group))
    }
}
