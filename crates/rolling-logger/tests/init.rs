//! Global initialization; one test per binary since the subscriber is process-wide.

use rolling_logger::{init_with_config, LoggerConfig, LoggerError};

#[test]
fn test_init_writes_and_bridges_log_records() {
    assert!(matches!(rolling_logger::info("too early"), Err(LoggerError::NotInitialized)));

    let dir = tempfile::tempdir().unwrap();
    let config = LoggerConfig {
        filter: Some("debug".to_string()),
        ..Default::default()
    };
    init_with_config(dir.path().to_path_buf(), "foyer-test", config).unwrap();

    let again = init_with_config(dir.path().to_path_buf(), "foyer-test", LoggerConfig::default());
    assert!(matches!(again, Err(LoggerError::AlreadyInitialized)));

    rolling_logger::info("database ready").unwrap();
    log::warn!("bridged from log");

    let recent = rolling_logger::recent_lines();
    assert!(recent.iter().any(|l| l.contains("database ready")));
    assert!(recent.iter().any(|l| l.contains("bridged from log")));

    let written = std::fs::read_to_string(dir.path().join("foyer-test.log")).unwrap();
    assert!(written.contains("logger initialized"));
    assert!(written.contains("database ready"));
    assert_eq!(rolling_logger::log_dir(), Some(dir.path()));
}
