//! Integration tests for records sent to the `log` facade.
//!
//! A capturing logger is installed once for this test binary.
//!
//! NOTE: All tests use #[serial] because they share the captured record list.

use log::{Level, LevelFilter, Log, Metadata, Record};
use serial_test::serial;
use singleton_cache::{
    LoggerConfig, LoggerHandle, Managed, ProducerConfig, ProducerHandle, RegistryApi,
    SingletonRegistry,
};
use std::sync::{Arc, Mutex, Once};

struct Capture {
    records: Mutex<Vec<(Level, String, String)>>,
}

impl Log for Capture {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.records.lock().unwrap().push((
            record.level(),
            record.target().to_string(),
            record.args().to_string(),
        ));
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture {
    records: Mutex::new(Vec::new()),
};

static INIT: Once = Once::new();

fn captured() -> &'static Capture {
    INIT.call_once(|| {
        log::set_logger(&CAPTURE).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
    CAPTURE.records.lock().unwrap().clear();
    &CAPTURE
}

fn take(capture: &Capture, level: Level) -> Vec<(String, String)> {
    capture
        .records
        .lock()
        .unwrap()
        .iter()
        .filter(|(l, _, _)| *l == level)
        .map(|(_, target, message)| (target.clone(), message.clone()))
        .collect()
}

#[test]
#[serial]
fn test_warns_when_arguments_differ() {
    let capture = captured();
    let registry = SingletonRegistry::new();

    let _: Arc<ProducerHandle> = registry.get_or_create(ProducerConfig::new("a:1")).unwrap();
    let _: Arc<ProducerHandle> = registry.get_or_create(ProducerConfig::new("b:2")).unwrap();

    let warnings = take(capture, Level::Warn);
    assert_eq!(warnings.len(), 1);
    let (_, message) = &warnings[0];
    assert!(message.contains("ProducerHandle"));
    assert!(message.contains("a:1"));
    assert!(message.contains("b:2"));
}

#[test]
#[serial]
fn test_no_warning_for_equal_arguments() {
    let capture = captured();
    let registry = SingletonRegistry::new();

    for _ in 0..3 {
        let _: Arc<ProducerHandle> = registry.get_or_create(ProducerConfig::default()).unwrap();
    }

    assert!(take(capture, Level::Warn).is_empty());
}

#[test]
#[serial]
fn test_warns_when_closure_built_instance_gets_arguments() {
    let capture = captured();
    let registry = SingletonRegistry::new();

    let _ = registry
        .get_or_try_init(|| LoggerHandle::construct(&LoggerConfig::for_module("default")))
        .unwrap();
    let _: Arc<LoggerHandle> = registry
        .get_or_create(LoggerConfig::for_module("later"))
        .unwrap();

    let warnings = take(capture, Level::Warn);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].1.contains("without arguments"));
}

#[test]
#[serial]
fn test_construction_is_logged_at_debug() {
    let capture = captured();
    let registry = SingletonRegistry::new();

    let _ = registry.get_or_init(|| 5u32).unwrap();

    let debug = take(capture, Level::Debug);
    assert!(debug
        .iter()
        .any(|(_, message)| message == "constructed single instance of u32"));
}

#[test]
#[serial]
fn test_scoped_logger_uses_its_target() {
    let capture = captured();
    let registry = SingletonRegistry::new();

    let handle: Arc<LoggerHandle> = registry
        .get_or_create(LoggerConfig::for_module(module_path!()))
        .unwrap();
    let logger = handle.logger();

    assert!(logger.enabled(Level::Info));
    logger.info("service started");
    logger.error(format_args!("{} failures", 2));

    let info = take(capture, Level::Info);
    assert_eq!(
        info,
        vec![(module_path!().to_string(), "service started".to_string())]
    );
    let errors = take(capture, Level::Error);
    assert_eq!(errors[0].1, "2 failures");
}
