//! Integration tests for logging functionality
//!
//! The global subscriber can only be installed once per process, so all
//! assertions that need it live in a single test.

use piiguard::anonymization::{config::DetectionConfig, ScanEngine};
use piiguard::config::LoggingConfig;
use piiguard::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_rotation, "daily");
}

#[tokio::test]
async fn test_file_logging_never_contains_detected_values() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    let guard = init_logging("trace", &config).expect("Failed to initialize logging");
    assert!(log_path.exists());

    // A second subscriber cannot be installed
    assert!(init_logging("info", &LoggingConfig::default()).is_err());

    let engine = ScanEngine::new(&DetectionConfig::default()).unwrap();
    let result = engine.scan("Contact jane.doe@example.com or SW1A 1AA").await;
    assert_eq!(result.detected_entities.len(), 2);

    drop(guard);

    let contents = std::fs::read_to_string(log_path.join("piiguard.log")).unwrap();
    assert!(contents.contains("PII detector ready"));
    assert!(!contents.contains("jane.doe@example.com"));
    assert!(!contents.contains("SW1A 1AA"));

    for line in contents.lines() {
        let _: serde_json::Value = serde_json::from_str(line).expect("log line is JSON");
    }
}
