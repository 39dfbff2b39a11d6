//! Integration test for the process-wide configuration singleton.
//!
//! The singleton is per-process state, so the whole lifecycle (first load,
//! successful reload, failed reload) runs as one sequential test in this
//! dedicated test binary. Splitting it into separate `#[test]` functions
//! would make the outcome depend on execution order.

use std::env;

use ultraflow_config::{ConfigError, get_config, reload_config};

fn set_var(key: &str, value: &str) {
    // SAFETY: this binary runs its single test on one thread and nothing
    // else reads the environment concurrently.
    unsafe { env::set_var(key, value) };
}

fn remove_var(key: &str) {
    // SAFETY: see set_var.
    unsafe { env::remove_var(key) };
}

#[test]
fn test_singleton_lifecycle() {
    // Known-good baseline, independent of the host environment.
    set_var("ENVIRONMENT", "staging");
    set_var("RISK_MAX_LEVERAGE", "6.0");
    set_var("EXCHANGE_NAME", "kraken");
    remove_var("RISK_MIN_LEVERAGE");

    // First use constructs and publishes.
    let initial = get_config().expect("initial load should succeed");
    assert_eq!(initial.app.environment, "staging");
    assert_eq!(initial.risk.max_leverage, 6.0);
    assert_eq!(initial.exchange.name, "kraken");

    // Repeated reads hand back the published snapshot, not a rebuild.
    set_var("EXCHANGE_NAME", "coinbase");
    let again = get_config().unwrap();
    assert_eq!(again.exchange.name, "kraken");

    // An explicit reload picks the change up.
    let reloaded = reload_config().expect("reload should succeed");
    assert_eq!(reloaded.exchange.name, "coinbase");
    assert_eq!(get_config().unwrap().exchange.name, "coinbase");

    // A reload that fails validation leaves the previous snapshot in force.
    set_var("ENVIRONMENT", "qa");
    set_var("EXCHANGE_NAME", "bitfinex");
    let err = reload_config().expect_err("qa is not a valid environment");
    assert_eq!(err.group(), "app");
    assert!(matches!(
        err,
        ConfigError::ConstraintViolation {
            field: "environment",
            ..
        }
    ));

    let surviving = get_config().unwrap();
    assert_eq!(surviving.app.environment, "staging");
    assert_eq!(surviving.exchange.name, "coinbase");

    // A malformed value fails the same way, snapshot untouched.
    set_var("ENVIRONMENT", "staging");
    set_var("RISK_MAX_LEVERAGE", "lots");
    let err = reload_config().expect_err("non-numeric leverage");
    assert!(matches!(err, ConfigError::MalformedValue { .. }));
    assert_eq!(get_config().unwrap().risk.max_leverage, 6.0);

    // Once the environment is fixed, reload publishes again.
    set_var("RISK_MAX_LEVERAGE", "7.5");
    let recovered = reload_config().expect("environment fixed");
    assert_eq!(recovered.risk.max_leverage, 7.5);
    assert_eq!(recovered.exchange.name, "bitfinex");
}
