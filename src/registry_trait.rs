//! Core trait defining registry behavior.
//!
//! This module provides the `RegistryApi` trait with default implementations for lazy,
//! type-keyed, single-instance construction and for tracing registry operations.
//!
//! The registry is type-based: each type (`TypeId`) owns one slot, and a slot is filled at most
//! once. A failed construction leaves the slot empty so the next request retries.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use once_cell::sync::OnceCell;

use crate::{Managed, RegistryError, RegistryEvent};

/// Type-erased slot storage, one entry per type.
///
/// Note: the `define_registry!` macro names this type for its statics.
#[doc(hidden)]
pub type Storage = Mutex<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>;

/// Type alias for the user-supplied tracing callback.
///
/// The callback receives a reference to a `RegistryEvent` every time the registry is
/// interacted with. It must be thread-safe because registries are shared across threads.
pub type TraceCallback = dyn Fn(&RegistryEvent) + Send + Sync + 'static;

#[doc(hidden)]
pub type TraceSlot = Mutex<Option<Arc<TraceCallback>>>;

/// A constructed instance together with the arguments it was built from.
struct Entry<T> {
    instance: Arc<T>,
    args: Option<Box<dyn Any + Send + Sync>>,
}

type Slot<T> = OnceCell<Entry<T>>;

/// Fetch the slot for `T`, creating an empty one if this is the first request.
///
/// The storage lock is released before returning, so construction never runs under it.
fn slot<R, T>(api: &R) -> Result<Arc<Slot<T>>, RegistryError>
where
    R: RegistryApi + ?Sized,
    T: Send + Sync + 'static,
{
    let erased = api
        .storage()
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .entry(TypeId::of::<T>())
        .or_insert_with(|| Arc::new(Slot::<T>::new()) as Arc<dyn Any + Send + Sync>)
        .clone();

    erased
        .downcast::<Slot<T>>()
        .map_err(|_| RegistryError::TypeMismatch {
            type_name: type_name::<T>(),
        })
}

fn existing_slot<R, T>(api: &R) -> Result<Option<Arc<Slot<T>>>, RegistryError>
where
    R: RegistryApi + ?Sized,
    T: Send + Sync + 'static,
{
    let erased = api
        .storage()
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&TypeId::of::<T>())
        .cloned();

    erased
        .map(|erased| {
            erased
                .downcast::<Slot<T>>()
                .map_err(|_| RegistryError::TypeMismatch {
                    type_name: type_name::<T>(),
                })
        })
        .transpose()
}

/// Return the cached `T`, running `init` only if the slot is empty.
///
/// `on_reuse` sees the cached entry whenever this call did not construct it.
fn resolve<R, T, E>(
    api: &R,
    init: impl FnOnce() -> Result<Entry<T>, E>,
    on_reuse: impl FnOnce(&Entry<T>),
) -> Result<Arc<T>, E>
where
    R: RegistryApi + ?Sized,
    T: Send + Sync + 'static,
    E: From<RegistryError>,
{
    let type_name = type_name::<T>();
    let slot = slot::<R, T>(api)?;

    let mut constructed = false;
    let entry = match slot.get_or_try_init(|| {
        constructed = true;
        init()
    }) {
        Ok(entry) => entry,
        Err(err) => {
            log::debug!("construction of {type_name} failed; nothing cached");
            api.emit_event(&RegistryEvent::ConstructionFailed { type_name });
            return Err(err);
        }
    };

    if constructed {
        log::debug!("constructed single instance of {type_name}");
        api.emit_event(&RegistryEvent::Construct { type_name });
    } else {
        on_reuse(entry);
        api.emit_event(&RegistryEvent::Reuse { type_name });
    }

    Ok(Arc::clone(&entry.instance))
}

/// Core trait defining registry behavior.
///
/// Provides default implementations for all registry operations, requiring only
/// two accessor methods (`storage` and `trace`) to be implemented by the implementor.
///
/// # Concurrency
///
/// The storage lock only guards slot lookup. Construction runs inside the slot itself, which
/// admits one initializer per type and makes concurrent requesters of that type wait for it.
/// A constructor may request other types from the same registry. Requesting its own type
/// from inside its constructor deadlocks.
pub trait RegistryApi {
    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Access the trace callback slot.
    fn trace(&self) -> &TraceSlot;

    /// Set a tracing callback for registry operations.
    ///
    /// If the trace lock is poisoned this recovers the inner value; tracing is non-critical.
    fn set_trace_callback(&self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        let mut guard = self.trace().lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(Arc::new(callback));
    }

    /// Clear the tracing callback.
    ///
    /// Cached instances are unaffected.
    fn clear_trace_callback(&self) {
        let mut guard = self.trace().lock().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    /// Emit a registry event to the current callback, if any.
    ///
    /// The callback runs after the trace lock is released, so it may use the registry.
    fn emit_event(&self, event: &RegistryEvent) {
        log::trace!("{event}");

        let callback = self
            .trace()
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        if let Some(callback) = callback {
            callback(event);
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Registry
    // -------------------------------------------------------------------------------------------------

    /// Access the slot storage.
    fn storage(&self) -> &Storage;

    /// Return the single instance of `T`, constructing it from `args` on first request.
    ///
    /// Every later call returns the same `Arc` (`Arc::ptr_eq` holds) and discards its `args`.
    /// Discarded arguments that differ from the ones the instance was built with are
    /// reported with `log::warn!` and a [`RegistryEvent::ArgumentsIgnored`] event.
    ///
    /// # Errors
    ///
    /// Returns the error of [`Managed::construct`] unchanged. Nothing is cached in that case,
    /// so the next call constructs again.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use singleton_cache::{LoggerConfig, LoggerHandle, RegistryApi, SingletonRegistry};
    /// use std::sync::Arc;
    ///
    /// let registry = SingletonRegistry::new();
    /// let first: Arc<LoggerHandle> = registry.get_or_create(LoggerConfig::for_module("app")).unwrap();
    /// let again: Arc<LoggerHandle> = registry.get_or_create(LoggerConfig::for_module("app")).unwrap();
    ///
    /// assert!(Arc::ptr_eq(&first, &again));
    /// ```
    fn get_or_create<T: Managed>(&self, args: T::Args) -> Result<Arc<T>, T::Error> {
        resolve(
            self,
            || {
                T::construct(&args).map(|instance| Entry {
                    instance: Arc::new(instance),
                    args: Some(Box::new(args.clone())),
                })
            },
            |entry| {
                let first = entry
                    .args
                    .as_deref()
                    .and_then(|first| first.downcast_ref::<T::Args>());

                if first == Some(&args) {
                    return;
                }

                let type_name = type_name::<T>();
                match first {
                    Some(first) => log::warn!(
                        "{type_name} was already constructed with {first:?}; ignoring {args:?}"
                    ),
                    None => log::warn!(
                        "{type_name} was already constructed without arguments; ignoring {args:?}"
                    ),
                }
                self.emit_event(&RegistryEvent::ArgumentsIgnored { type_name });
            },
        )
    }

    /// Return the single instance of `T`, building it with `init` on first request.
    ///
    /// Shares its slot with [`RegistryApi::get_or_create`]: whichever runs first for a type
    /// decides the instance.
    ///
    /// # Errors
    ///
    /// Returns the error of `init` unchanged and leaves the slot empty.
    fn get_or_try_init<T, E>(&self, init: impl FnOnce() -> Result<T, E>) -> Result<Arc<T>, E>
    where
        T: Send + Sync + 'static,
        E: From<RegistryError>,
    {
        resolve(
            self,
            || {
                init().map(|instance| Entry {
                    instance: Arc::new(instance),
                    args: None,
                })
            },
            |_| {},
        )
    }

    /// Infallible form of [`RegistryApi::get_or_try_init`].
    fn get_or_init<T>(&self, init: impl FnOnce() -> T) -> Result<Arc<T>, RegistryError>
    where
        T: Send + Sync + 'static,
    {
        self.get_or_try_init(|| Ok::<T, RegistryError>(init()))
    }

    /// Retrieve the instance of `T` without constructing it.
    ///
    /// # Errors
    ///
    /// - `TypeNotFound` if `T` was never constructed (or its construction failed)
    /// - `TypeMismatch` if the slot holds a different type (should not happen)
    fn get<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, RegistryError> {
        let type_name = type_name::<T>();

        let found = existing_slot::<Self, T>(self)?
            .and_then(|slot| slot.get().map(|entry| Arc::clone(&entry.instance)));

        self.emit_event(&RegistryEvent::Get {
            type_name,
            found: found.is_some(),
        });

        found.ok_or(RegistryError::TypeNotFound { type_name })
    }

    /// Check whether an instance of `T` has been constructed.
    fn contains<T: Send + Sync + 'static>(&self) -> bool {
        let found = existing_slot::<Self, T>(self)
            .ok()
            .flatten()
            .is_some_and(|slot| slot.get().is_some());

        self.emit_event(&RegistryEvent::Contains {
            type_name: type_name::<T>(),
            found,
        });

        found
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
