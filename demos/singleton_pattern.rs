//! Producer and logger handles served from one registry.
//!
//! Demonstrates:
//! - Lazy construction on first request
//! - Identity of repeated requests
//! - A warning when a later request carries different arguments
//!
//! Run with: `RUST_LOG=debug cargo run --example singleton_pattern`

use singleton_cache::{
    LoggerConfig, LoggerHandle, ProducerConfig, ProducerHandle, RegistryApi, RegistryError,
    SingletonRegistry,
};
use std::error::Error;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let registry = SingletonRegistry::new();
    registry.set_trace_callback(|event| println!("[registry-trace] {event}"));

    println!("=== singleton-cache: Producer & Logger ===\n");

    let producer: Arc<ProducerHandle> = registry.get_or_create(ProducerConfig::from_env())?;
    let logger: Arc<LoggerHandle> =
        registry.get_or_create(LoggerConfig::for_module(module_path!()))?;

    println!("producer -> {:p} {:?}", producer, producer.producer().endpoints());
    println!("logger   -> {:p} target={}", logger, logger.logger().target());

    // Same instances, later arguments discarded (and warned about)
    let producer_again: Arc<ProducerHandle> =
        registry.get_or_create(ProducerConfig::new("elsewhere:9092"))?;
    let logger_again: Arc<LoggerHandle> =
        registry.get_or_create(LoggerConfig::for_module(module_path!()))?;

    println!("\nproducer reused: {}", Arc::ptr_eq(&producer, &producer_again));
    println!("logger reused:   {}", Arc::ptr_eq(&logger, &logger_again));

    logger.logger().info("handles ready");

    // Nothing is cached for a type whose construction failed
    let scratch = SingletonRegistry::new();
    match scratch.get_or_create::<ProducerHandle>(ProducerConfig::new("no-port")) {
        Ok(_) => println!("\nunexpected success"),
        Err(err) => println!("\nconstruction failed: {err}"),
    }
    let cached = scratch.get::<ProducerHandle>();
    println!(
        "cached after failure: {}",
        !matches!(cached, Err(RegistryError::TypeNotFound { .. }))
    );

    Ok(())
}
