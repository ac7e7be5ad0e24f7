/// Events emitted by a registry during operations.
///
/// These events are passed to the tracing callback set via `set_trace_callback`.
///
/// # Examples
///
/// ```rust
/// use singleton_cache::RegistryEvent;
///
/// let event = RegistryEvent::Construct { type_name: "i32" };
/// assert_eq!(event.to_string(), "construct { type_name: i32 }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// The constructor ran and its instance was cached.
    Construct {
        /// The type name of the constructed value (e.g., "i32", "alloc::string::String")
        type_name: &'static str,
    },

    /// A cached instance was handed out instead of constructing a new one.
    Reuse { type_name: &'static str },

    /// The cached instance was built from different arguments than the ones just supplied.
    ArgumentsIgnored { type_name: &'static str },

    /// The constructor returned an error. Nothing was cached.
    ConstructionFailed { type_name: &'static str },

    /// A value was requested without construction.
    Get {
        type_name: &'static str,
        /// Whether a constructed instance was present
        found: bool,
    },

    /// A type existence check was performed.
    Contains { type_name: &'static str, found: bool },
}

impl RegistryEvent {
    /// The type the event refers to.
    pub fn type_name(&self) -> &'static str {
        match self {
            RegistryEvent::Construct { type_name }
            | RegistryEvent::Reuse { type_name }
            | RegistryEvent::ArgumentsIgnored { type_name }
            | RegistryEvent::ConstructionFailed { type_name }
            | RegistryEvent::Get { type_name, .. }
            | RegistryEvent::Contains { type_name, .. } => type_name,
        }
    }
}

impl std::fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEvent::Construct { type_name } => {
                write!(f, "construct {{ type_name: {type_name} }}")
            }
            RegistryEvent::Reuse { type_name } => write!(f, "reuse {{ type_name: {type_name} }}"),
            RegistryEvent::ArgumentsIgnored { type_name } => {
                write!(f, "arguments ignored {{ type_name: {type_name} }}")
            }
            RegistryEvent::ConstructionFailed { type_name } => {
                write!(f, "construction failed {{ type_name: {type_name} }}")
            }
            RegistryEvent::Get { type_name, found } => {
                write!(f, "get {{ type_name: {type_name}, found: {found} }}")
            }
            RegistryEvent::Contains { type_name, found } => {
                write!(f, "contains {{ type_name: {type_name}, found: {found} }}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_event_display() {
        let event = RegistryEvent::Construct { type_name: "i32" };
        assert_eq!(event.to_string(), "construct { type_name: i32 }");

        let event = RegistryEvent::Reuse { type_name: "i32" };
        assert_eq!(event.to_string(), "reuse { type_name: i32 }");

        let event = RegistryEvent::ArgumentsIgnored { type_name: "Producer" };
        assert_eq!(event.to_string(), "arguments ignored { type_name: Producer }");

        let event = RegistryEvent::ConstructionFailed { type_name: "Logger" };
        assert_eq!(event.to_string(), "construction failed { type_name: Logger }");

        let event = RegistryEvent::Get {
            type_name: "String",
            found: true,
        };
        assert_eq!(event.to_string(), "get { type_name: String, found: true }");

        let event = RegistryEvent::Contains {
            type_name: "u8",
            found: false,
        };
        assert_eq!(
            event.to_string(),
            "contains { type_name: u8, found: false }"
        );
    }

    #[test]
    fn test_type_name_accessor() {
        let event = RegistryEvent::Get {
            type_name: "u16",
            found: false,
        };
        assert_eq!(event.type_name(), "u16");
        assert_eq!(RegistryEvent::Reuse { type_name: "x" }.type_name(), "x");
    }
}
