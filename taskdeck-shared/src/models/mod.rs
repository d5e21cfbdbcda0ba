/// Domain models for TaskDeck
///
/// Each module holds one entity: the stored record, its `Create*`/`Update*`
/// input payloads, and its output projection (the shape callers see).
///
/// # Models
///
/// - `user`: User accounts and the public projection used in tokens
/// - `group`: Groups owning memberships and tasks by reference
/// - `group_member`: (group, user) relationship with a role
/// - `task`: Tasks with status, attachments, and weak references

pub mod group;
pub mod group_member;
pub mod task;
pub mod user;
