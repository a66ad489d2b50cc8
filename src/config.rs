//! # Configuration Module
//!
//! [`AppConfig`] controls registration and request-size behaviour. It is
//! assembled in three layers, later layers winning:
//!
//! 1. built-in defaults
//! 2. an optional YAML, TOML or JSON file, deep-merged over the defaults with
//!    [`merge_deep`], so a file only has to name the keys it changes
//! 3. `BRISK_*` environment variables
//!
//! ## Environment Variables
//!
//! ### `BRISK_BODY_LIMIT`
//!
//! Maximum request body size in bytes. Accepts decimal (`1048576`) or
//! hexadecimal (`0x100000`). Default: 1 MiB.
//!
//! ### `BRISK_STRICT_PATH`
//!
//! `true` registers each route under its exact path only. When `false`
//! (default) `/users` also answers `/users/` and vice versa.
//!
//! Logging variables are described in [`crate::logging`].
//!
//! ## Example file
//!
//! ```yaml
//! body_limit: 65536
//! logging:
//!   format: pretty
//! ```

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::env;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::HookError;
use crate::logging::LogConfig;
use crate::merge::merge_deep;

/// 1 MiB
pub const DEFAULT_BODY_LIMIT: usize = 1_048_576;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Maximum request body size in bytes
    pub body_limit: usize,
    /// Register routes under their exact path only
    pub strict_path: bool,
    pub logging: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            body_limit: DEFAULT_BODY_LIMIT,
            strict_path: false,
            logging: LogConfig::default(),
        }
    }
}

impl AppConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::default().with_env(|key| env::var(key).ok())
    }

    /// Defaults, then `path` if given, then the process environment.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => load_config(path)?,
            None => Self::default(),
        };
        Ok(config.with_env(|key| env::var(key).ok()))
    }

    /// Override fields from `BRISK_*` variables resolved through `lookup`.
    ///
    /// Unparseable values are ignored with a warning.
    #[must_use]
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("BRISK_BODY_LIMIT") {
            let parsed = match val.strip_prefix("0x") {
                Some(hex) => usize::from_str_radix(hex, 16).ok(),
                None => val.parse().ok(),
            };
            match parsed {
                Some(limit) => self.body_limit = limit,
                None => warn!(value = %val, "Ignoring invalid BRISK_BODY_LIMIT"),
            }
        }

        if let Some(val) = lookup("BRISK_STRICT_PATH") {
            match val.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.strict_path = true,
                "0" | "false" | "no" => self.strict_path = false,
                _ => warn!(value = %val, "Ignoring invalid BRISK_STRICT_PATH"),
            }
        }

        self.logging = self.logging.with_env(lookup);
        self
    }

    /// Reject a body of `len` bytes when it exceeds `body_limit`.
    ///
    /// # Errors
    ///
    /// Returns a `BODY_LIMIT` [`HookError`] for `error` hooks to handle.
    pub fn check_body_limit(&self, len: usize) -> Result<(), HookError> {
        if len > self.body_limit {
            Err(HookError::body_limit(len, self.body_limit))
        } else {
            Ok(())
        }
    }
}

/// Read a configuration file into a JSON value, choosing the parser by extension.
///
/// # Errors
///
/// Fails on I/O errors, parse errors, or an unsupported extension.
pub fn read_config_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let value: Value = match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid YAML in {}", path.display()))?,
        "toml" => toml::from_str(&content)
            .with_context(|| format!("Invalid TOML in {}", path.display()))?,
        "json" => serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?,
        other => bail!(
            "Unsupported config extension '{}' for {}",
            other,
            path.display()
        ),
    };

    debug!(path = %path.display(), format = %ext, "Config file parsed");
    Ok(value)
}

/// Remove `null` entries from records, recursively.
///
/// An empty YAML section (`logging:` with only comments below it) parses to
/// `null`; it means "keep the defaults", not "replace the section".
fn drop_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, drop_nulls(v)))
                .collect(),
        ),
        other => other,
    }
}

/// Load `path` and deep-merge it over [`AppConfig::default`].
///
/// Keys set to `null` are treated as absent.
///
/// # Errors
///
/// Fails if the file cannot be read, parsed, or does not describe an `AppConfig`.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let overlay = drop_nulls(read_config_value(path)?);
    let defaults = serde_json::to_value(AppConfig::default())
        .context("Failed to serialize default config")?;
    let merged = merge_deep(&defaults, &overlay);
    let config: AppConfig = serde_json::from_value(merged)
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;

    info!(
        path = %path.display(),
        body_limit = config.body_limit,
        strict_path = config.strict_path,
        "Configuration loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::logging::LogFormat;
    use std::collections::HashMap;

    fn lookup(vars: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        move |k| vars.get(k).map(|v| v.to_string())
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.body_limit, 1_048_576);
        assert!(!config.strict_path);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_env_hex_and_decimal() {
        let hex = AppConfig::default().with_env(lookup(&[("BRISK_BODY_LIMIT", "0x400")]));
        assert_eq!(hex.body_limit, 1024);
        let dec = AppConfig::default().with_env(lookup(&[
            ("BRISK_BODY_LIMIT", "2048"),
            ("BRISK_STRICT_PATH", "TRUE"),
        ]));
        assert_eq!(dec.body_limit, 2048);
        assert!(dec.strict_path);
    }

    #[test]
    fn test_env_invalid_values_ignored() {
        let config = AppConfig::default().with_env(lookup(&[
            ("BRISK_BODY_LIMIT", "lots"),
            ("BRISK_STRICT_PATH", "maybe"),
        ]));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_check_body_limit() {
        let config = AppConfig {
            body_limit: 8,
            ..AppConfig::default()
        };
        assert!(config.check_body_limit(8).is_ok());
        assert_eq!(config.check_body_limit(9).unwrap_err().code, ErrorCode::BodyLimit);
    }

    #[test]
    fn test_drop_nulls_is_recursive() {
        let cleaned = drop_nulls(serde_json::json!({
            "logging": null,
            "nested": {"a": null, "b": 1, "list": [null]},
        }));
        assert_eq!(cleaned, serde_json::json!({"nested": {"b": 1, "list": [null]}}));
    }
}
