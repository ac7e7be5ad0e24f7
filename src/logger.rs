//! Logging service handle managed by a registry.

use std::fmt;

use log::Level;
use thiserror::Error;

use crate::{Managed, RegistryError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoggerError {
    #[error("logger target must not be empty")]
    EmptyTarget,

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Target attached to every record, normally the caller's `module_path!()`.
    pub target: String,
}

impl LoggerConfig {
    pub fn for_module(module: impl Into<String>) -> Self {
        Self {
            target: module.into(),
        }
    }
}

/// Forwards records to the `log` facade under a fixed target.
///
/// Which records are kept and where they go is decided by whatever logger the application
/// installs.
#[derive(Debug, Clone)]
pub struct ScopedLogger {
    target: String,
}

impl ScopedLogger {
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn enabled(&self, level: Level) -> bool {
        log::log_enabled!(target: &self.target, level)
    }

    pub fn log(&self, level: Level, message: impl fmt::Display) {
        log::log!(target: &self.target, level, "{message}");
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log(Level::Error, message);
    }

    pub fn warn(&self, message: impl fmt::Display) {
        self.log(Level::Warn, message);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(Level::Info, message);
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Level::Debug, message);
    }

    pub fn trace(&self, message: impl fmt::Display) {
        self.log(Level::Trace, message);
    }
}

/// The registry-managed wrapper around a scoped logger.
#[derive(Debug)]
pub struct LoggerHandle {
    logger: ScopedLogger,
}

impl LoggerHandle {
    pub fn logger(&self) -> &ScopedLogger {
        &self.logger
    }
}

impl Managed for LoggerHandle {
    type Args = LoggerConfig;
    type Error = LoggerError;

    fn construct(config: &LoggerConfig) -> Result<Self, Self::Error> {
        let target = config.target.trim();
        if target.is_empty() {
            return Err(LoggerError::EmptyTarget);
        }

        Ok(Self {
            logger: ScopedLogger {
                target: target.to_string(),
            },
        })
    }
}
