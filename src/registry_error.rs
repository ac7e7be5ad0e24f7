use thiserror::Error;

/// Failures raised by the registry itself.
///
/// Constructor failures never show up here: `get_or_create` and `get_or_try_init` return the
/// constructor's own error value untouched. Managed error types only need a `From<RegistryError>`
/// conversion so these variants can travel through the same `Result`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Type not found in registry: {type_name}")]
    TypeNotFound { type_name: &'static str },

    #[error("Type mismatch in registry for type: {type_name}")]
    TypeMismatch { type_name: &'static str },
}
