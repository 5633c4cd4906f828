use super::*;

/// # Safety
/// Tests must run with `--test-threads=1` to avoid env races.
unsafe fn clear_env() {
    unsafe {
        std::env::remove_var("RINGMASK_DEBOUNCE_MS");
        std::env::remove_var("RINGMASK_RUN_QUEUE_CAPACITY");
    }
}

#[test]
fn default_matches_constants() {
    let cfg = SessionConfig::default();
    assert_eq!(cfg.debounce_ms(), DEFAULT_DEBOUNCE_MS);
    assert_eq!(cfg.run_queue_capacity, DEFAULT_RUN_QUEUE_CAPACITY);
}

#[test]
fn new_rejects_zero_debounce() {
    assert_eq!(SessionConfig::new(0, 8), Err(ConfigError::ZeroDebounce(0)));
}

#[test]
fn new_rejects_zero_capacity() {
    assert_eq!(SessionConfig::new(100, 0), Err(ConfigError::ZeroQueueCapacity));
}

#[test]
fn new_builds_duration() {
    let cfg = SessionConfig::new(250, 4).unwrap();
    assert_eq!(cfg.debounce, Duration::from_millis(250));
    assert_eq!(cfg.run_queue_capacity, 4);
}

#[test]
fn from_env_defaults_and_overrides() {
    unsafe { clear_env() };
    assert_eq!(SessionConfig::from_env().unwrap(), SessionConfig::default());

    unsafe {
        std::env::set_var("RINGMASK_DEBOUNCE_MS", "300");
        std::env::set_var("RINGMASK_RUN_QUEUE_CAPACITY", " 8 ");
    }
    let cfg = SessionConfig::from_env().unwrap();
    assert_eq!(cfg.debounce_ms(), 300);
    assert_eq!(cfg.run_queue_capacity, 8);

    unsafe {
        std::env::set_var("RINGMASK_DEBOUNCE_MS", "soon");
        std::env::remove_var("RINGMASK_RUN_QUEUE_CAPACITY");
    }
    assert_eq!(SessionConfig::from_env().unwrap().debounce_ms(), DEFAULT_DEBOUNCE_MS);

    unsafe { std::env::set_var("RINGMASK_DEBOUNCE_MS", "0") };
    assert!(SessionConfig::from_env().is_err());

    unsafe { clear_env() };
}
