//! An owned, injectable registry.
//!
//! `SingletonRegistry` is a plain value: create one per application, per subsystem, or per test
//! and pass it by reference to whatever needs single instances. Dropping it drops every
//! instance it constructed (outstanding `Arc`s stay valid).
//!
//! # Examples
//!
//! ```
//! use singleton_cache::{RegistryApi, SingletonRegistry};
//! use std::sync::Arc;
//!
//! let registry = SingletonRegistry::new();
//!
//! let a: Arc<String> = registry.get_or_init(|| "Hello, World!".to_string()).unwrap();
//! let b: Arc<String> = registry.get_or_init(|| "ignored".to_string()).unwrap();
//!
//! assert!(Arc::ptr_eq(&a, &b));
//! assert_eq!(&*b, "Hello, World!");
//! ```

use std::fmt;
use std::sync::PoisonError;

use crate::registry_trait::{RegistryApi, Storage, TraceSlot};

/// A registry owning its own slot storage and trace callback.
#[derive(Default)]
pub struct SingletonRegistry {
    storage: Storage,
    trace: TraceSlot,
}

impl SingletonRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RegistryApi for SingletonRegistry {
    fn storage(&self) -> &Storage {
        &self.storage
    }

    fn trace(&self) -> &TraceSlot {
        &self.trace
    }
}

impl fmt::Debug for SingletonRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self
            .storage
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("SingletonRegistry")
            .field("slots", &slots)
            .finish_non_exhaustive()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
