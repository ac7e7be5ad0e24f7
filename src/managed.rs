//! The contract a type implements to have its instances gated through a registry.

use std::fmt::Debug;

use crate::RegistryError;

/// A type whose single instance is constructed lazily by a registry.
///
/// The registry calls [`Managed::construct`] at most once per registry for each implementing
/// type. The arguments of that first successful call are remembered; arguments passed on later
/// requests are compared against them and discarded.
///
/// # Examples
///
/// ```rust
/// use singleton_cache::{Managed, RegistryApi, RegistryError, SingletonRegistry};
/// use std::sync::Arc;
///
/// struct Pool {
///     size: usize,
/// }
///
/// impl Managed for Pool {
///     type Args = usize;
///     type Error = RegistryError;
///
///     fn construct(size: &usize) -> Result<Self, Self::Error> {
///         Ok(Pool { size: *size })
///     }
/// }
///
/// let registry = SingletonRegistry::new();
/// let a: Arc<Pool> = registry.get_or_create(4).unwrap();
/// let b: Arc<Pool> = registry.get_or_create(8).unwrap();
///
/// assert!(Arc::ptr_eq(&a, &b));
/// assert_eq!(b.size, 4);
/// ```
pub trait Managed: Sized + Send + Sync + 'static {
    /// Arguments needed to build a fresh instance.
    type Args: Debug + PartialEq + Clone + Send + Sync + 'static;

    /// Failure raised by [`Managed::construct`].
    type Error: From<RegistryError>;

    fn construct(args: &Self::Args) -> Result<Self, Self::Error>;
}
