use crate::config::{PricingConfig, RegressionSolver};
use std::env;
use std::sync::Mutex;
use std::sync::OnceLock;

// Global lock to prevent race conditions when modifying environment variables in tests
static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn get_env_lock() -> &'static Mutex<()> {
    ENV_LOCK.get_or_init(|| Mutex::new(()))
}

const KEYS: &[&str] = &[
    "SAMPLE_COUNT",
    "DATA_SEED",
    "TEST_SIZE",
    "SPLIT_SEED",
    "REGRESSION_SOLVER",
    "MARKUP_LIMIT",
    "FLOOR_PRICE",
    "CEILING_PRICE",
];

fn clear_env() {
    for key in KEYS {
        unsafe { env::remove_var(key) };
    }
}

fn set(key: &str, value: &str) {
    unsafe { env::set_var(key, value) };
}

#[test]
fn test_config_defaults() {
    let _guard = get_env_lock().lock().unwrap();
    clear_env();

    let config = PricingConfig::from_env().unwrap();

    assert_eq!(config, PricingConfig::default());
    assert_eq!(config.sample_count, 500);
    assert_eq!(config.data_seed, 0);
    assert_eq!(config.split_seed, 42);
    assert!((config.test_size - 0.2).abs() < 1e-12);
    assert!((config.markup_limit - 0.25).abs() < 1e-12);
    assert_eq!(config.solver, RegressionSolver::Svd);
    assert!(config.floor_price.is_none());
    assert!(config.ceiling_price.is_none());
}

#[test]
fn test_config_from_env_values() {
    let _guard = get_env_lock().lock().unwrap();
    clear_env();

    set("SAMPLE_COUNT", "1000");
    set("DATA_SEED", "7");
    set("TEST_SIZE", "0.25");
    set("REGRESSION_SOLVER", "QR");
    set("MARKUP_LIMIT", "0.1");
    set("FLOOR_PRICE", "80");
    set("CEILING_PRICE", " 150.5 ");

    let config = PricingConfig::from_env().unwrap();

    assert_eq!(config.sample_count, 1000);
    assert_eq!(config.data_seed, 7);
    assert!((config.test_size - 0.25).abs() < 1e-12);
    assert_eq!(config.solver, RegressionSolver::Qr);

    let policy = config.pricing_policy();
    assert!((policy.markup_limit - 0.1).abs() < 1e-12);
    assert_eq!(policy.floor_price, Some(80.0));
    assert_eq!(policy.ceiling_price, Some(150.5));

    assert_eq!(config.synthesis_params().n_samples, 1000);
    assert_eq!(config.training_params().split_seed, 42);

    clear_env();
}

#[test]
fn test_config_rejects_bad_values() {
    let _guard = get_env_lock().lock().unwrap();

    for (key, value) in [
        ("SAMPLE_COUNT", "5"),
        ("SAMPLE_COUNT", "many"),
        ("TEST_SIZE", "1.0"),
        ("TEST_SIZE", "0"),
        ("MARKUP_LIMIT", "-0.1"),
        ("MARKUP_LIMIT", "inf"),
        ("REGRESSION_SOLVER", "lasso"),
        ("FLOOR_PRICE", "cheap"),
    ] {
        clear_env();
        set(key, value);
        assert!(
            PricingConfig::from_env().is_err(),
            "{}={} should be rejected",
            key,
            value
        );
    }

    clear_env();
}

#[test]
fn test_floor_above_ceiling_is_allowed() {
    let _guard = get_env_lock().lock().unwrap();
    clear_env();

    set("FLOOR_PRICE", "120");
    set("CEILING_PRICE", "100");
    let config = PricingConfig::from_env().unwrap();
    assert_eq!(config.floor_price, Some(120.0));
    assert_eq!(config.ceiling_price, Some(100.0));

    clear_env();
}

#[test]
fn test_blank_values_fall_back_to_defaults() {
    let _guard = get_env_lock().lock().unwrap();
    clear_env();

    set("REGRESSION_SOLVER", "");
    set("SAMPLE_COUNT", "  ");
    let config = PricingConfig::from_env().unwrap();
    assert_eq!(config.solver, RegressionSolver::Svd);
    assert_eq!(config.sample_count, 500);

    set("REGRESSION_SOLVER", " qr ");
    assert_eq!(PricingConfig::from_env().unwrap().solver, RegressionSolver::Qr);

    clear_env();
}
