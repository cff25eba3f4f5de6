//! Configuration loader
//!
//! Loads the feed configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. If `BLENDFEED_CONFIG` names a file, load that file
//! 2. Otherwise attempt to load from environment variables
//! 3. If incomplete, fall back to loading from a probed file
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `BLEND_TENANT_NAME`: Default tenant (required)
//! - `BLEND_INSTANCE_ID`: Default instance (optional, `default`)
//! - `BLEND_API_USERNAME`: Basic-auth username (required)
//! - `BLEND_API_PASSWORD`: Basic-auth password (required)
//! - `BLEND_ENVIRONMENT`: `beta`, `production`, or a base URL (optional, `beta`)
//! - `BLEND_HTTP_TIMEOUT_SECS`: Request timeout in seconds (optional, `30`)
//!
//! Feeds are only available from files.
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./blendfeed.json` or `./blendfeed.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use blendfeed_domain::constants::{DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_INSTANCE_ID};
use blendfeed_domain::{ApiEnvironment, ApiSettings, Config, FeedError, HttpSettings, Result};

use crate::blend::validate_settings;
use crate::errors::InfraError;

/// Names a config file that takes precedence over every other source.
pub const CONFIG_PATH_ENV: &str = "BLENDFEED_CONFIG";

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `FeedError::Config` if configuration cannot be loaded from
/// any source or fails validation.
pub fn load() -> Result<Config> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return load_from_file(Some(PathBuf::from(path)));
    }

    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `FeedError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let tenant_name = env_var("BLEND_TENANT_NAME")?;
    let username = env_var("BLEND_API_USERNAME")?;
    let password = env_var("BLEND_API_PASSWORD")?;
    let instance_id =
        env_opt("BLEND_INSTANCE_ID").unwrap_or_else(|| DEFAULT_INSTANCE_ID.to_string());
    let environment = env_opt("BLEND_ENVIRONMENT").map(ApiEnvironment::from).unwrap_or_default();

    let timeout_seconds = match env_opt("BLEND_HTTP_TIMEOUT_SECS") {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|e| FeedError::Config(format!("Invalid HTTP timeout: {}", e)))?,
        None => DEFAULT_HTTP_TIMEOUT_SECS,
    };

    let config = Config {
        api: ApiSettings { tenant_name, instance_id, username, password, environment },
        http: HttpSettings { timeout_seconds },
        feeds: Vec::new(),
    };
    validate_config(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `FeedError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(FeedError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            FeedError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| FeedError::from(InfraError::from(e)))?;

    let config = parse_config(&contents, &config_path)?;
    validate_config(&config)?;
    Ok(config)
}

/// Check credentials and every configured feed.
///
/// # Errors
/// Returns `FeedError::Config` for missing settings, or the feed's own
/// validation error prefixed with its name.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_settings(&config.api)?;
    if config.http.timeout_seconds == 0 {
        return Err(FeedError::Config("HTTP timeout must be greater than zero".into()));
    }
    for feed in &config.feeds {
        feed.validate()
            .map_err(|e| FeedError::Config(format!("Feed '{}' is invalid: {}", feed.name, e)))?;
    }
    Ok(())
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| FeedError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| FeedError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(FeedError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(config_candidates(&cwd));
        candidates.push(cwd.join("../config.json"));
        candidates.push(cwd.join("../config.toml"));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(config_candidates(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn config_candidates(dir: &Path) -> [PathBuf; 4] {
    [
        dir.join("blendfeed.json"),
        dir.join("blendfeed.toml"),
        dir.join("config.json"),
        dir.join("config.toml"),
    ]
}

/// Get required environment variable
///
/// # Errors
/// Returns `FeedError::Config` if the variable is not set or blank.
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        FeedError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Optional environment variable; blank counts as unset.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ENV_KEYS: [&str; 6] = [
        "BLEND_TENANT_NAME",
        "BLEND_INSTANCE_ID",
        "BLEND_API_USERNAME",
        "BLEND_API_PASSWORD",
        "BLEND_ENVIRONMENT",
        "BLEND_HTTP_TIMEOUT_SECS",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
    }

    fn set_required_env() {
        std::env::set_var("BLEND_TENANT_NAME", "acme");
        std::env::set_var("BLEND_API_USERNAME", "api-user");
        std::env::set_var("BLEND_API_PASSWORD", "api-pass");
    }

    #[test]
    fn test_load_from_env_defaults() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        set_required_env();

        let result = load_from_env();
        clear_env();

        let config = result.expect("config from env");
        assert_eq!(config.api.tenant_name, "acme");
        assert_eq!(config.api.instance_id, "default");
        assert_eq!(config.api.environment, ApiEnvironment::Beta);
        assert_eq!(config.http.timeout_seconds, 30);
        assert!(config.feeds.is_empty());
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        set_required_env();
        std::env::set_var("BLEND_INSTANCE_ID", "prod1");
        std::env::set_var("BLEND_ENVIRONMENT", "production");
        std::env::set_var("BLEND_HTTP_TIMEOUT_SECS", "12");

        let result = load_from_env();
        clear_env();

        let config = result.expect("config from env");
        assert_eq!(config.api.instance_id, "prod1");
        assert_eq!(config.api.base_url(), "https://api.blend.com/");
        assert_eq!(config.http.timeout_seconds, 12);
    }

    #[test]
    fn test_load_from_env_missing_var() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        std::env::set_var("BLEND_TENANT_NAME", "acme");
        std::env::set_var("BLEND_API_USERNAME", "   ");

        let result = load_from_env();
        clear_env();

        match result {
            Err(FeedError::Config(msg)) => assert!(msg.contains("BLEND_API_USERNAME")),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_env_invalid_number() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        set_required_env();
        std::env::set_var("BLEND_HTTP_TIMEOUT_SECS", "soon");

        let result = load_from_env();
        clear_env();

        assert!(matches!(result, Err(FeedError::Config(msg)) if msg.contains("Invalid HTTP timeout")));
    }

    #[test]
    fn test_load_from_file_json() {
        let json_content = r#"{
            "api": {
                "tenant_name": "acme",
                "username": "api-user",
                "password": "api-pass",
                "environment": "https://blend.internal.test/"
            },
            "feeds": [
                {
                    "id": "7",
                    "name": "Purchase leads",
                    "field_map": [
                        { "target_path": "party.email", "source_field_id": "2" }
                    ],
                    "target_instance": "acme~prod1"
                }
            ]
        }"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(json_content.as_bytes()).unwrap();
        let json_path = temp_file.path().with_extension("json");
        std::fs::copy(temp_file.path(), &json_path).unwrap();

        let result = load_from_file(Some(json_path.clone()));
        std::fs::remove_file(&json_path).ok();

        let config = result.expect("config from json");
        assert_eq!(config.api.instance_id, "default");
        assert_eq!(config.api.base_url(), "https://blend.internal.test/");
        let feed = config.feed("Purchase leads").expect("feed by name");
        assert_eq!(feed.target_instance.as_deref(), Some("acme~prod1"));
        assert_eq!(config.feed("7"), Some(feed));
    }

    #[test]
    fn test_load_from_file_rejects_invalid_feed() {
        let toml_content = r#"
[api]
tenant_name = "acme"
username = "api-user"
password = "api-pass"

[[feeds]]
id = "1"
name = "Broken"
field_map = [{ target_path = "party..email", source_field_id = "2" }]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        let toml_path = temp_file.path().with_extension("toml");
        std::fs::copy(temp_file.path(), &toml_path).unwrap();

        let result = load_from_file(Some(toml_path.clone()));
        std::fs::remove_file(&toml_path).ok();

        assert!(matches!(result, Err(FeedError::Config(msg)) if msg.contains("Feed 'Broken'")));
    }

    #[test]
    fn test_parse_config_unsupported_extension() {
        let result = parse_config("", Path::new("config.yaml"));
        assert!(matches!(result, Err(FeedError::Config(msg)) if msg.contains("yaml")));
    }

    #[test]
    fn test_load_from_file_missing() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/blendfeed.toml")));
        assert!(matches!(result, Err(FeedError::Config(msg)) if msg.contains("not found")));
    }
}
