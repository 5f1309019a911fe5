//! Integration tests for the optional external address recognizer
//!
//! The recognizer process is emulated with `sh -c`, so these tests only run
//! on Unix.

#![cfg(unix)]

use piiguard::anonymization::{
    config::{AddressRecognizerConfig, DetectionConfig},
    PiiCategory, ScanEngine,
};

fn engine_with_script(script: &str, timeout_ms: u64) -> ScanEngine {
    let config = DetectionConfig {
        address: AddressRecognizerConfig {
            enabled: true,
            command: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
            timeout_ms,
        },
        ..Default::default()
    };
    ScanEngine::new(&config).expect("Failed to create engine")
}

const TEXT: &str = "Write to 10 Downing Street or admin@gov.uk";

#[tokio::test]
async fn test_address_findings_are_added_after_core_results() {
    let engine = engine_with_script(
        r#"cat > /dev/null; echo '[{"text": "10 Downing Street", "start": 9, "length": 17, "confidence": 0.9}]'"#,
        5000,
    );

    let result = engine.scan(TEXT).await;

    let categories: Vec<_> = result.detected_entities.iter().map(|e| e.category).collect();
    assert_eq!(categories, vec![PiiCategory::Email, PiiCategory::Address]);
    assert_eq!(result.detected_entities[1].confidence, 0.9);
    assert_eq!(
        result.masked_text,
        "Write to ***************** or ************"
    );
}

#[tokio::test]
async fn test_recognizer_failure_leaves_core_results_unchanged() {
    let core = engine_with_script("exit 0", 5000).scan_core(TEXT);

    for (script, timeout_ms) in [
        ("cat > /dev/null; exit 1", 5000),
        ("cat > /dev/null; echo 'not json'", 5000),
        ("sleep 5", 100),
        ("cat > /dev/null; echo '[{\"text\": \"nowhere\", \"start\": 500, \"length\": 7}]'", 5000),
    ] {
        let result = engine_with_script(script, timeout_ms).scan(TEXT).await;
        assert_eq!(result, core, "script: {script}");
    }
}

#[tokio::test]
async fn test_missing_recognizer_binary_is_ignored() {
    let config = DetectionConfig {
        address: AddressRecognizerConfig {
            enabled: true,
            command: "/nonexistent/piiguard-address-recognizer".to_string(),
            ..Default::default()
        },
        ..Default::default()
    };
    let engine = ScanEngine::new(&config).unwrap();

    let result = engine.scan(TEXT).await;
    assert_eq!(result.detected_entities.len(), 1);
    assert_eq!(result.masked_text, "Write to 10 Downing Street or ************");
}
