//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.askdoc/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AskdocConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub base_url: Option<String>,
    /// Per-request timeout in seconds. Absent = no client-imposed timeout;
    /// the transport's own behavior applies.
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UploadConfig {
    pub docs_dir: Option<String>,
    /// Extensions offered by the file picker. A UI hint only; the backend is
    /// the authority on what it accepts.
    pub extensions: Option<Vec<String>>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_EXTENSIONS: &[&str] = &["pdf", "txt", "docx"];

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub docs_dir: PathBuf,
    pub extensions: Vec<String>,
    pub request_timeout_secs: Option<u64>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.askdoc/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".askdoc").join("config.toml"))
}

/// Load config from `~/.askdoc/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `AskdocConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<AskdocConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(AskdocConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(AskdocConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: AskdocConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# askdoc Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [server]
# base_url = "http://localhost:8000/api"
# request_timeout_secs = 120        # Omit for no client-side timeout

# [upload]
# docs_dir = "~/Documents"          # Where the file picker starts
# extensions = ["pdf", "txt", "docx"]
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_base_url` and `cli_docs_dir` come from CLI flags (None = not specified).
pub fn resolve(
    config: &AskdocConfig,
    cli_base_url: Option<&str>,
    cli_docs_dir: Option<&str>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli_base_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("ASKDOC_BASE_URL").ok())
        .or_else(|| config.server.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Docs dir: CLI → env → config → current directory
    let docs_dir = cli_docs_dir
        .map(|s| s.to_string())
        .or_else(|| std::env::var("ASKDOC_DOCS_DIR").ok())
        .or_else(|| config.upload.docs_dir.clone())
        .map(expand_home)
        .unwrap_or_else(|| PathBuf::from("."));

    let extensions = config.upload.extensions.clone().unwrap_or_else(|| {
        DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
    });

    ResolvedConfig {
        base_url,
        docs_dir,
        extensions,
        request_timeout_secs: config.server.request_timeout_secs,
    }
}

/// Expands a leading `~/` to the user's home directory.
fn expand_home(path: String) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = AskdocConfig::default();
        assert!(config.server.base_url.is_none());
        assert!(config.upload.extensions.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = AskdocConfig::default();
        let resolved = resolve(&config, None, None);
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.docs_dir, PathBuf::from("."));
        assert_eq!(resolved.extensions, vec!["pdf", "txt", "docx"]);
        assert!(resolved.request_timeout_secs.is_none());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = AskdocConfig {
            server: ServerConfig {
                base_url: Some("http://10.0.0.5:9000/api".to_string()),
                request_timeout_secs: Some(30),
            },
            upload: UploadConfig {
                docs_dir: Some("/srv/books".to_string()),
                extensions: Some(vec!["pdf".to_string()]),
            },
        };
        let resolved = resolve(&config, None, None);
        assert_eq!(resolved.base_url, "http://10.0.0.5:9000/api");
        assert_eq!(resolved.docs_dir, PathBuf::from("/srv/books"));
        assert_eq!(resolved.extensions, vec!["pdf"]);
        assert_eq!(resolved.request_timeout_secs, Some(30));
    }

    #[test]
    fn test_resolve_cli_flags_win() {
        let config = AskdocConfig {
            server: ServerConfig {
                base_url: Some("http://from-config/api".to_string()),
                request_timeout_secs: None,
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some("http://from-cli/api"), Some("/cli/docs"));
        assert_eq!(resolved.base_url, "http://from-cli/api");
        assert_eq!(resolved.docs_dir, PathBuf::from("/cli/docs"));
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[server]
base_url = "http://192.168.1.20:8000/api"
request_timeout_secs = 60

[upload]
docs_dir = "/data/library"
extensions = ["pdf", "epub"]
"#;
        let config: AskdocConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.server.base_url.as_deref(),
            Some("http://192.168.1.20:8000/api")
        );
        assert_eq!(config.server.request_timeout_secs, Some(60));
        assert_eq!(config.upload.docs_dir.as_deref(), Some("/data/library"));
        assert_eq!(
            config.upload.extensions,
            Some(vec!["pdf".to_string(), "epub".to_string()])
        );
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[server]
base_url = "http://somewhere/api"
"#;
        let config: AskdocConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.base_url.as_deref(), Some("http://somewhere/api"));
        assert!(config.server.request_timeout_secs.is_none());
        assert!(config.upload.docs_dir.is_none());
    }

    #[test]
    fn test_expand_home_leaves_absolute_paths() {
        assert_eq!(expand_home("/abs/path".to_string()), PathBuf::from("/abs/path"));
    }
}
