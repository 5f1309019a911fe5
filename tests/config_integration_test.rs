//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold `ENV_MUTEX` to avoid
//! interference between tests.

use piiguard::anonymization::ScanEngine;
use piiguard::config::{load_config, load_config_or_default};
use piiguard::domain::PiiGuardError;
use std::io::Write;
use std::sync::Mutex;
use tempfile::{NamedTempFile, TempDir};

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    for var in [
        "PIIGUARD_APPLICATION_LOG_LEVEL",
        "PIIGUARD_SERVER_BIND_ADDRESS",
        "PIIGUARD_SERVER_REQUEST_TIMEOUT_MS",
        "PIIGUARD_DETECTION_MASK_CHAR",
        "PIIGUARD_DETECTION_PATTERN_LIBRARY",
        "PIIGUARD_DETECTION_ADDRESS_ENABLED",
        "PIIGUARD_LOGGING_LOCAL_ROTATION",
        "TEST_PIIGUARD_RECOGNIZER",
    ] {
        std::env::remove_var(var);
    }
}

fn write_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_file(
        r#"
[application]
log_level = "warn"

[server]
bind_address = "0.0.0.0:8443"
request_timeout_ms = 250
max_body_bytes = 4096

[detection]
mask_char = "X"

[detection.address]
enabled = true
command = "python3"
args = ["detect.py", "--model", "en_core_web_sm"]
timeout_ms = 750

[logging]
local_enabled = false
local_rotation = "never"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.application.log_level, "warn");
    assert_eq!(config.server.bind_address, "0.0.0.0:8443");
    assert_eq!(config.server.request_timeout_ms, 250);
    assert_eq!(config.server.max_body_bytes, 4096);
    assert_eq!(config.detection.mask_char, 'X');
    assert!(config.detection.address.enabled);
    assert_eq!(config.detection.address.args.len(), 3);
    assert_eq!(config.detection.address.timeout_ms, 750);
    assert_eq!(config.logging.local_rotation, "never");
}

#[test]
fn test_env_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_file("[server]\nbind_address = \"127.0.0.1:8080\"\n");

    std::env::set_var("PIIGUARD_SERVER_BIND_ADDRESS", "0.0.0.0:9999");
    std::env::set_var("PIIGUARD_DETECTION_MASK_CHAR", "#");
    std::env::set_var("PIIGUARD_LOGGING_LOCAL_ROTATION", "hourly");

    let config = load_config(file.path());
    cleanup_env_vars();

    let config = config.unwrap();
    assert_eq!(config.server.bind_address, "0.0.0.0:9999");
    assert_eq!(config.detection.mask_char, '#');
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_invalid_env_override_is_configuration_error() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    std::env::set_var("PIIGUARD_SERVER_REQUEST_TIMEOUT_MS", "soon");
    let result = load_config_or_default("/nonexistent/piiguard.toml");
    cleanup_env_vars();

    let err = result.unwrap_err();
    assert!(matches!(err, PiiGuardError::Configuration(_)));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    std::env::set_var("TEST_PIIGUARD_RECOGNIZER", "/opt/nlp/bin/recognize");
    let file = write_file(
        r#"
# command = "${UNSET_IN_COMMENT}"
[detection.address]
enabled = true
command = "${TEST_PIIGUARD_RECOGNIZER}"
"#,
    );

    let config = load_config(file.path());
    cleanup_env_vars();

    let config = config.unwrap();
    assert_eq!(config.detection.address.command, "/opt/nlp/bin/recognize");
}

#[test]
fn test_missing_env_var_fails() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_file("[detection.address]\ncommand = \"${TEST_PIIGUARD_RECOGNIZER}\"\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_PIIGUARD_RECOGNIZER"));
}

#[test]
fn test_enabled_recognizer_without_command_fails() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_file("[detection.address]\nenabled = true\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("address recognizer"));
}

#[test]
fn test_custom_pattern_library_from_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let dir = TempDir::new().unwrap();
    let library = dir.path().join("patterns.toml");
    std::fs::write(
        &library,
        r#"
[[rules]]
category = "PASSPORT_NUMBER"
pattern = '\b[0-9]{9}\b'
"#,
    )
    .unwrap();

    let file = write_file(&format!(
        "[detection]\npattern_library = {:?}\nmask_char = \"?\"\n",
        library.to_string_lossy()
    ));

    let config = load_config(file.path()).unwrap();
    let engine = ScanEngine::new(&config.detection).unwrap();

    let result = engine.scan_core("passport 123456789, email a@b.io");
    assert_eq!(result.detected_entities.len(), 1);
    assert_eq!(result.masked_text, "passport ?????????, email a@b.io");
}

#[test]
fn test_invalid_pattern_library_fails_engine_creation() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let dir = TempDir::new().unwrap();
    let library = dir.path().join("patterns.toml");
    std::fs::write(
        &library,
        "[[rules]]\ncategory = \"EMAIL\"\npattern = '(unclosed'\n",
    )
    .unwrap();

    let file = write_file(&format!(
        "[detection]\npattern_library = {:?}\n",
        library.to_string_lossy()
    ));

    let config = load_config(file.path()).unwrap();
    let err = ScanEngine::new(&config.detection).err().unwrap();
    assert!(format!("{err:#}").contains("Invalid regex"));
}
