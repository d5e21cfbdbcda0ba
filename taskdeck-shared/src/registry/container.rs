/// Service-locator container
///
/// Lifecycle is two-phase: any number of `register` calls wire the factory
/// table, a one-time `boot` flips the container to servable, and `get`
/// lazily constructs each singleton on first access. Registration and boot
/// happen on a single thread at startup; after boot the container is read
/// from many request tasks concurrently, so the per-key `OnceLock` slots
/// guarantee a factory runs exactly once even under racing first accesses.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use taskdeck_shared::registry::{BoxedService, EntityKind, ServiceContainer};
///
/// # fn example() -> taskdeck_shared::error::CoreResult<()> {
/// let container = Arc::new(ServiceContainer::new());
/// container.register(
///     EntityKind::Task,
///     Box::new(|| Arc::new(42_u32) as BoxedService),
/// )?;
/// container.boot()?;
///
/// let value: Arc<u32> = container.get(EntityKind::Task)?;
/// assert_eq!(*value, 42);
/// # Ok(())
/// # }
/// ```
use std::any::Any;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, OnceLock, Weak};

use crate::error::{CoreError, CoreResult};

/// Entity-type keys the container resolves services by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Group,
    GroupMember,
    Task,
}

impl EntityKind {
    /// Converts the key to its string form for messages
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Group => "group",
            EntityKind::GroupMember => "group_member",
            EntityKind::Task => "task",
        }
    }
}

/// Type-erased service instance held by the container
pub type BoxedService = Arc<dyn Any + Send + Sync>;

/// Zero-argument factory producing a service instance
pub type ServiceFactory = Box<dyn Fn() -> BoxedService + Send + Sync>;

struct Slot {
    factory: ServiceFactory,
    instance: OnceLock<BoxedService>,
}

/// Two-phase registry mapping entity-type keys to lazily-constructed
/// singletons
pub struct ServiceContainer {
    pending: Mutex<HashMap<EntityKind, ServiceFactory>>,
    slots: OnceLock<HashMap<EntityKind, Slot>>,
}

impl ServiceContainer {
    /// Creates a container in the registration phase
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
            slots: OnceLock::new(),
        }
    }

    /// Registers a factory for a key
    ///
    /// Calls are order-independent; a later registration for the same key
    /// replaces the earlier one.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` when called after `boot`
    pub fn register(&self, kind: EntityKind, factory: ServiceFactory) -> CoreResult<()> {
        if self.is_booted() {
            return Err(CoreError::configuration(format!(
                "cannot register '{}' after boot",
                kind.as_str()
            )));
        }
        let mut pending = self
            .pending
            .lock()
            .map_err(|_| CoreError::configuration("registration table lock poisoned"))?;
        pending.insert(kind, factory);
        Ok(())
    }

    /// Flips the container from wiring to servable
    ///
    /// # Errors
    ///
    /// Returns `Configuration` when the container is already booted
    pub fn boot(&self) -> CoreResult<()> {
        let factories = {
            let mut pending = self
                .pending
                .lock()
                .map_err(|_| CoreError::configuration("registration table lock poisoned"))?;
            std::mem::take(&mut *pending)
        };

        let slots = factories
            .into_iter()
            .map(|(kind, factory)| {
                (
                    kind,
                    Slot {
                        factory,
                        instance: OnceLock::new(),
                    },
                )
            })
            .collect();

        self.slots
            .set(slots)
            .map_err(|_| CoreError::configuration("container is already booted"))
    }

    /// Whether `boot` has completed
    pub fn is_booted(&self) -> bool {
        self.slots.get().is_some()
    }

    /// Resolves the singleton for a key, constructing it on first access
    ///
    /// # Errors
    ///
    /// Returns `Configuration` when the container is not booted, the key
    /// has no registration, or the registered service is not a `T`
    pub fn get<T: Send + Sync + 'static>(&self, kind: EntityKind) -> CoreResult<Arc<T>> {
        let slots = self
            .slots
            .get()
            .ok_or_else(|| CoreError::configuration("container is not booted"))?;

        let slot = slots.get(&kind).ok_or_else(|| {
            CoreError::configuration(format!("no service registered for '{}'", kind.as_str()))
        })?;

        let instance = slot.instance.get_or_init(|| (slot.factory)());

        Arc::clone(instance).downcast::<T>().map_err(|_| {
            CoreError::configuration(format!(
                "service '{}' has an unexpected type",
                kind.as_str()
            ))
        })
    }
}

impl Default for ServiceContainer {
    fn default() -> Self {
        Self::new()
    }
}

/// Lazily-resolved handle to a service in the container
///
/// Services capture a `ServiceRef` instead of the concrete peer instance,
/// which is what lets mutually-dependent services be constructed at all.
/// The handle holds a weak container pointer so the service graph does not
/// keep its own container alive in a reference cycle.
pub struct ServiceRef<T> {
    container: Weak<ServiceContainer>,
    kind: EntityKind,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Send + Sync + 'static> ServiceRef<T> {
    /// Creates a handle for a key
    pub fn new(container: Weak<ServiceContainer>, kind: EntityKind) -> Self {
        Self {
            container,
            kind,
            _marker: PhantomData,
        }
    }

    /// Resolves the concrete service instance
    ///
    /// # Errors
    ///
    /// Returns `Configuration` when the container has been dropped or the
    /// key cannot be served
    pub fn resolve(&self) -> CoreResult<Arc<T>> {
        let container = self
            .container
            .upgrade()
            .ok_or_else(|| CoreError::configuration("container has been dropped"))?;
        container.get(self.kind)
    }
}

impl<T> Clone for ServiceRef<T> {
    fn clone(&self) -> Self {
        Self {
            container: self.container.clone(),
            kind: self.kind,
            _marker: PhantomData,
        }
    }
}
