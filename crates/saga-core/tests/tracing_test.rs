//! Tests for the Saga tracing setup.

use std::sync::Mutex;

use saga_core::tracing::init_tracing;

/// Serializes tests that touch SAGA_LOG.
static TRACING_MUTEX: Mutex<()> = Mutex::new(());

/// TRC-01: SAGA_LOG with per-module levels is accepted.
#[test]
fn test_per_module_filter() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("SAGA_LOG", "saga_engine::integrity=debug,saga_core=warn");
    init_tracing();
    std::env::remove_var("SAGA_LOG");
}

/// TRC-02: repeated initialization is harmless.
#[test]
fn test_init_tracing_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
    tracing::info!("tracing initialized twice without panicking");
}

/// TRC-03: garbage filter falls back to the default.
#[test]
fn test_invalid_filter_falls_back() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("SAGA_LOG", "[[not a filter");
    init_tracing();
    std::env::remove_var("SAGA_LOG");
}
