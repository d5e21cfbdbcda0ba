/// Repository layer
///
/// [`Repository`] is entity-agnostic: it applies the query filter engine
/// against a storage backend and enforces the soft-delete default. The
/// per-entity modules only declare filter/sort composition tables — no
/// concrete repository hand-writes query logic.
///
/// # Modules
///
/// - `base`: The generic repository
/// - `user` / `group` / `group_member` / `task`: Per-entity constructors

pub mod base;
pub mod group;
pub mod group_member;
pub mod task;
pub mod user;

pub use base::Repository;
pub use group::group_repository;
pub use group_member::group_member_repository;
pub use task::task_repository;
pub use user::user_repository;
