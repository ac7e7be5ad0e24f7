//! Macros for creating module-scoped singleton registries.

/// Creates a module-scoped singleton registry with a single macro invocation.
///
/// The macro generates a module containing:
/// - Slot storage static (hidden)
/// - Trace callback static (hidden)
/// - An `Api` struct that implements `RegistryApi`
/// - Free functions delegating to it
///
/// Prefer an owned [`SingletonRegistry`](crate::SingletonRegistry) wherever it can be passed
/// around; this macro is for the cases that need a process-wide access point.
///
/// # Examples
///
/// ```rust
/// use singleton_cache::define_registry;
/// use std::sync::Arc;
///
/// define_registry!(global);
///
/// let a: Arc<i32> = global::get_or_init(|| 42).unwrap();
/// let b: Arc<i32> = global::get_or_init(|| 7).unwrap();
///
/// assert!(Arc::ptr_eq(&a, &b));
/// assert_eq!(*global::get::<i32>().unwrap(), 42);
/// ```
///
/// # Multiple Registries
///
/// Each invocation is isolated:
///
/// ```rust
/// use singleton_cache::define_registry;
///
/// define_registry!(messaging);
/// define_registry!(telemetry);
///
/// messaging::get_or_init(|| "broker".to_string()).unwrap();
///
/// assert!(messaging::contains::<String>());
/// assert!(!telemetry::contains::<String>());
/// ```
///
/// # Trait-Based Usage
///
/// ```rust
/// use singleton_cache::{define_registry, RegistryApi};
///
/// define_registry!(app);
///
/// let value = app::API.get_or_init(|| 100i32).unwrap();
/// assert_eq!(*value, 100);
/// ```
#[macro_export]
macro_rules! define_registry {
    ($name:ident) => {
        pub mod $name {
            use std::sync::{Arc, LazyLock, Mutex};

            // Slot storage (module-private)
            static STORAGE: LazyLock<$crate::Storage> =
                LazyLock::new(|| Mutex::new(std::collections::HashMap::new()));

            // Trace callback storage (module-private)
            static TRACE: $crate::TraceSlot = Mutex::new(None);

            /// Zero-sized type that implements the registry API over the module statics.
            pub struct Api;

            impl $crate::RegistryApi for Api {
                fn storage(&self) -> &$crate::Storage {
                    &STORAGE
                }

                fn trace(&self) -> &$crate::TraceSlot {
                    &TRACE
                }
            }

            /// Convenient constant for accessing the registry API.
            pub const API: Api = Api;

            /// Return the single instance of `T`, constructing it from `args` on first request.
            pub fn get_or_create<T: $crate::Managed>(args: T::Args) -> Result<Arc<T>, T::Error> {
                use $crate::RegistryApi;
                API.get_or_create(args)
            }

            /// Return the single instance of `T`, building it with `init` on first request.
            pub fn get_or_try_init<T, E>(init: impl FnOnce() -> Result<T, E>) -> Result<Arc<T>, E>
            where
                T: Send + Sync + 'static,
                E: From<$crate::RegistryError>,
            {
                use $crate::RegistryApi;
                API.get_or_try_init(init)
            }

            /// Infallible form of `get_or_try_init`.
            pub fn get_or_init<T: Send + Sync + 'static>(
                init: impl FnOnce() -> T,
            ) -> Result<Arc<T>, $crate::RegistryError> {
                use $crate::RegistryApi;
                API.get_or_init(init)
            }

            /// Retrieve the instance of `T` without constructing it.
            pub fn get<T: Send + Sync + 'static>() -> Result<Arc<T>, $crate::RegistryError> {
                use $crate::RegistryApi;
                API.get()
            }

            /// Check whether an instance of `T` has been constructed.
            pub fn contains<T: Send + Sync + 'static>() -> bool {
                use $crate::RegistryApi;
                API.contains::<T>()
            }

            /// Set a tracing callback for registry operations.
            pub fn set_trace_callback(
                callback: impl Fn(&$crate::RegistryEvent) + Send + Sync + 'static,
            ) {
                use $crate::RegistryApi;
                API.set_trace_callback(callback)
            }

            /// Clear the tracing callback.
            pub fn clear_trace_callback() {
                use $crate::RegistryApi;
                API.clear_trace_callback()
            }
        }
    };
}
