//! Message-queue producer handle managed by a registry.
//!
//! The handle owns a [`BrokerProducer`] built from a comma-separated bootstrap server list.
//! Publishing belongs to the broker client; this module only validates the connection target
//! and keeps the client reachable through the registry.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

use crate::{Managed, RegistryError};

/// Bootstrap server list used when nothing else is configured.
pub const DEFAULT_BOOTSTRAP_SERVERS: &str = "localhost:9092";

/// Environment variable read by [`ProducerConfig::from_env`].
pub const BOOTSTRAP_SERVERS_ENV: &str = "SINGLETON_CACHE_BOOTSTRAP_SERVERS";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProducerError {
    #[error("no bootstrap servers configured")]
    NoBootstrapServers,

    #[error("bootstrap server `{0}` has no port")]
    MissingPort(String),

    #[error("bootstrap server `{server}` has an invalid port")]
    InvalidPort {
        server: String,
        #[source]
        source: ParseIntError,
    },

    #[error("bootstrap server `{0}` has no host")]
    EmptyHost(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Connection target for the producer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducerConfig {
    /// Comma-separated `host:port` list.
    pub bootstrap_servers: String,
}

impl ProducerConfig {
    pub fn new(bootstrap_servers: impl Into<String>) -> Self {
        Self {
            bootstrap_servers: bootstrap_servers.into(),
        }
    }

    /// Reads [`BOOTSTRAP_SERVERS_ENV`], falling back to [`DEFAULT_BOOTSTRAP_SERVERS`] when it is
    /// unset or blank.
    pub fn from_env() -> Self {
        std::env::var(BOOTSTRAP_SERVERS_ENV)
            .ok()
            .filter(|servers| !servers.trim().is_empty())
            .map(Self::new)
            .unwrap_or_default()
    }
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BOOTSTRAP_SERVERS)
    }
}

/// A single `host:port` broker address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BrokerEndpoint {
    host: String,
    port: u16,
}

impl BrokerEndpoint {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl FromStr for BrokerEndpoint {
    type Err = ProducerError;

    fn from_str(server: &str) -> Result<Self, Self::Err> {
        // rsplit keeps bracketed IPv6 hosts such as `[::1]:9092` intact
        let (host, port) = server
            .rsplit_once(':')
            .ok_or_else(|| ProducerError::MissingPort(server.to_string()))?;

        if host.is_empty() {
            return Err(ProducerError::EmptyHost(server.to_string()));
        }

        let port = port.parse().map_err(|source| ProducerError::InvalidPort {
            server: server.to_string(),
            source,
        })?;

        Ok(Self {
            host: host.to_string(),
            port,
        })
    }
}

impl fmt::Display for BrokerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Producer client bound to a validated set of brokers.
#[derive(Debug)]
pub struct BrokerProducer {
    endpoints: Vec<BrokerEndpoint>,
}

impl BrokerProducer {
    /// Parses the bootstrap list. Blank entries between commas are skipped.
    pub fn from_config(config: &ProducerConfig) -> Result<Self, ProducerError> {
        let endpoints = config
            .bootstrap_servers
            .split(',')
            .map(str::trim)
            .filter(|server| !server.is_empty())
            .map(str::parse::<BrokerEndpoint>)
            .collect::<Result<Vec<_>, _>>()?;

        if endpoints.is_empty() {
            return Err(ProducerError::NoBootstrapServers);
        }

        Ok(Self { endpoints })
    }

    pub fn endpoints(&self) -> &[BrokerEndpoint] {
        &self.endpoints
    }

    /// The normalized bootstrap list, e.g. `a:9092,b:9092`.
    pub fn bootstrap_servers(&self) -> String {
        self.endpoints
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// The registry-managed wrapper around the producer client.
#[derive(Debug)]
pub struct ProducerHandle {
    producer: BrokerProducer,
}

impl ProducerHandle {
    pub fn producer(&self) -> &BrokerProducer {
        &self.producer
    }
}

impl Managed for ProducerHandle {
    type Args = ProducerConfig;
    type Error = ProducerError;

    fn construct(config: &ProducerConfig) -> Result<Self, Self::Error> {
        let producer = BrokerProducer::from_config(config)?;
        log::debug!("producer bound to {}", producer.bootstrap_servers());
        Ok(Self { producer })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_config() {
        assert_eq!(ProducerConfig::default().bootstrap_servers, "localhost:9092");
    }

    #[test]
    fn test_parse_endpoint() {
        let endpoint: BrokerEndpoint = "broker-1:9093".parse().unwrap();
        assert_eq!(endpoint.host(), "broker-1");
        assert_eq!(endpoint.port(), 9093);
        assert_eq!(endpoint.to_string(), "broker-1:9093");

        let v6: BrokerEndpoint = "[::1]:9092".parse().unwrap();
        assert_eq!(v6.host(), "[::1]");
    }

    #[test]
    fn test_parse_endpoint_errors() {
        assert_eq!(
            "broker".parse::<BrokerEndpoint>().unwrap_err(),
            ProducerError::MissingPort("broker".to_string())
        );
        assert_eq!(
            ":9092".parse::<BrokerEndpoint>().unwrap_err(),
            ProducerError::EmptyHost(":9092".to_string())
        );
        assert!(matches!(
            "broker:99999".parse::<BrokerEndpoint>(),
            Err(ProducerError::InvalidPort { .. })
        ));
    }

    #[test]
    fn test_producer_from_list() {
        let config = ProducerConfig::new(" a:9092, ,b:9093 ");
        let producer = BrokerProducer::from_config(&config).unwrap();

        assert_eq!(producer.endpoints().len(), 2);
        assert_eq!(producer.bootstrap_servers(), "a:9092,b:9093");
    }

    #[test]
    fn test_empty_list_fails() {
        let err = BrokerProducer::from_config(&ProducerConfig::new(" , ")).unwrap_err();
        assert_eq!(err, ProducerError::NoBootstrapServers);
        assert_eq!(err.to_string(), "no bootstrap servers configured");
    }

    #[test]
    fn test_invalid_port_has_source() {
        use std::error::Error;

        let err = BrokerProducer::from_config(&ProducerConfig::new("a:port")).unwrap_err();
        assert_eq!(err.to_string(), "bootstrap server `a:port` has an invalid port");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_construct_handle() {
        let handle = ProducerHandle::construct(&ProducerConfig::default()).unwrap();
        assert_eq!(handle.producer().bootstrap_servers(), DEFAULT_BOOTSTRAP_SERVERS);
    }

    #[test]
    #[serial]
    fn test_from_env() {
        std::env::set_var(BOOTSTRAP_SERVERS_ENV, "queue:19092");
        assert_eq!(ProducerConfig::from_env().bootstrap_servers, "queue:19092");

        std::env::set_var(BOOTSTRAP_SERVERS_ENV, "   ");
        assert_eq!(ProducerConfig::from_env(), ProducerConfig::default());

        std::env::remove_var(BOOTSTRAP_SERVERS_ENV);
        assert_eq!(ProducerConfig::from_env(), ProducerConfig::default());
    }
}
