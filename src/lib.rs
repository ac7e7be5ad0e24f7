//! # Singleton Cache
//!
//! Lazy, type-keyed, single-instance construction.
//!
//! A registry holds at most one instance per type. The first request for a type constructs it;
//! every later request gets the same `Arc` back, whatever arguments it passes. A failed
//! construction caches nothing, so the next request tries again.
//!
//! ## Quick Start
//!
//! ```rust
//! use singleton_cache::{ProducerConfig, ProducerHandle, RegistryApi, SingletonRegistry};
//! use std::sync::Arc;
//!
//! let registry = SingletonRegistry::new();
//!
//! let producer: Arc<ProducerHandle> = registry.get_or_create(ProducerConfig::default()).unwrap();
//! let again: Arc<ProducerHandle> = registry.get_or_create(ProducerConfig::default()).unwrap();
//!
//! assert!(Arc::ptr_eq(&producer, &again));
//! ```
//!
//! ## Features
//!
//! - **Thread-safe**: exactly one construction per type even under concurrent requests
//! - **Injectable**: [`SingletonRegistry`] is a plain value; [`define_registry!`] gives a
//!   module-scoped one when a process-wide access point is needed
//! - **Retryable**: constructor errors are returned as-is and leave nothing behind
//! - **Tracing support**: optional callback for monitoring registry operations
//!
//! ## Main Items
//!
//! - [`Managed`] - Opt a type into argument-driven construction
//! - [`RegistryApi::get_or_create`] - Get or construct a managed instance
//! - [`RegistryApi::get_or_try_init`] - Get or construct with a closure
//! - [`RegistryApi::get`] - Retrieve an already constructed instance
//! - [`RegistryApi::set_trace_callback`] - Observe registry operations

mod logger;
mod macros;
mod managed;
mod producer;
mod registry;
mod registry_error;
mod registry_event;
mod registry_trait;

pub use logger::{LoggerConfig, LoggerError, LoggerHandle, ScopedLogger};
pub use managed::Managed;
pub use producer::{
    BrokerEndpoint, BrokerProducer, ProducerConfig, ProducerError, ProducerHandle,
    BOOTSTRAP_SERVERS_ENV, DEFAULT_BOOTSTRAP_SERVERS,
};
pub use registry::SingletonRegistry;
pub use registry_error::RegistryError;
pub use registry_event::RegistryEvent;
pub use registry_trait::{RegistryApi, TraceCallback};

#[doc(hidden)]
pub use registry_trait::{Storage, TraceSlot};
