/// Service registry
///
/// The domain services reference each other in a cycle
/// (Group ↔ GroupMember ↔ User). Instead of eager constructor injection,
/// each service captures a [`ServiceRef`] — an entity-type key plus a weak
/// container handle — and resolves the concrete instance on first use,
/// after the whole graph has been registered and booted.
///
/// # Modules
///
/// - `container`: Two-phase service-locator container and lazy handles
/// - `wiring`: The composition root registering every domain service

pub mod container;
pub mod wiring;

pub use container::{BoxedService, EntityKind, ServiceContainer, ServiceRef};
pub use wiring::wire;
