/// Service layer
///
/// [`base::CrudService`] wraps a repository and binds an output
/// projection; the domain modules add the business rules the repository
/// cannot know about — not-found/conflict semantics and cross-entity
/// orchestration.
///
/// # Modules
///
/// - `base`: Generic CRUD service bound to a projection
/// - `user`: Registration and login
/// - `group`: Group CRUD plus the create-with-admin orchestration
/// - `group_member`: Membership CRUD
/// - `task`: Task CRUD

pub mod base;
pub mod group;
pub mod group_member;
pub mod task;
pub mod user;

pub use base::CrudService;
pub use group::GroupService;
pub use group_member::GroupMemberService;
pub use task::TaskService;
pub use user::UserService;
