//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::PiiGuardConfig;
use crate::domain::errors::PiiGuardError;
use crate::domain::result::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

static ENV_PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("Hard-coded regex expression should be valid")
});

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into PiiGuardConfig
/// 4. Applies environment variable overrides (PIIGUARD_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`PiiGuardError::Configuration`] if the file cannot be read or
/// parsed, a referenced environment variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use piiguard::config::loader::load_config;
///
/// let config = load_config("piiguard.toml")?;
/// # Ok::<(), piiguard::domain::PiiGuardError>(())
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<PiiGuardConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(PiiGuardError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        PiiGuardError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&contents)
}

/// Loads configuration from a file if it exists, otherwise from defaults
///
/// Environment overrides and validation apply in both cases.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<PiiGuardConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "No configuration file, using defaults");
    finish(PiiGuardConfig::default())
}

/// Loads configuration from TOML content
pub fn load_config_from_str(contents: &str) -> Result<PiiGuardConfig> {
    let contents = substitute_env_vars(contents)?;

    let config: PiiGuardConfig = toml::from_str(&contents)
        .map_err(|e| PiiGuardError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finish(config)
}

fn finish(mut config: PiiGuardConfig) -> Result<PiiGuardConfig> {
    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        PiiGuardError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = &*ENV_PLACEHOLDER;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed_line = re.replace_all(line, |cap: &regex::Captures<'_>| {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(PiiGuardError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using PIIGUARD_* prefix
///
/// Environment variables follow the pattern: PIIGUARD_<SECTION>_<KEY>
/// For example: PIIGUARD_SERVER_BIND_ADDRESS, PIIGUARD_DETECTION_MASK_CHAR
fn apply_env_overrides(config: &mut PiiGuardConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("PIIGUARD_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Server overrides
    if let Ok(val) = std::env::var("PIIGUARD_SERVER_BIND_ADDRESS") {
        config.server.bind_address = val;
    }
    if let Ok(val) = std::env::var("PIIGUARD_SERVER_REQUEST_TIMEOUT_MS") {
        config.server.request_timeout_ms = parse_override("PIIGUARD_SERVER_REQUEST_TIMEOUT_MS", &val)?;
    }
    if let Ok(val) = std::env::var("PIIGUARD_SERVER_MAX_BODY_BYTES") {
        config.server.max_body_bytes = parse_override("PIIGUARD_SERVER_MAX_BODY_BYTES", &val)?;
    }

    // Detection overrides
    config
        .detection
        .apply_env_overrides()
        .map_err(|e| PiiGuardError::Configuration(format!("{e:#}")))?;

    // Logging overrides
    if let Ok(val) = std::env::var("PIIGUARD_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("PIIGUARD_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("PIIGUARD_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("PIIGUARD_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| PiiGuardError::Configuration(format!("Invalid {name} value: {value}")))
}
