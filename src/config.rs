//! Optional TOML settings: credentials, service endpoints, audio extensions.
//!
//! Config is read from the OS-standard config directory:
//! - Windows: %APPDATA%\artwork-embedder\config.toml
//! - macOS: ~/Library/Application Support/artwork-embedder/config.toml
//! - Linux: ~/.config/artwork-embedder/config.toml
//!
//! Every section is optional. A missing or broken file never stops a run;
//! we log and fall back to defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Everything that can be set in `config.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials
    pub credentials: Credentials,

    /// Remote lookup endpoints and limits
    pub providers: ProvidersConfig,

    /// Library layout settings
    pub library: LibraryConfig,
}

/// API credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Enables the fingerprint fallback
    pub acoustid_api_key: Option<String>,
}

/// Endpoints and query limits for the artwork lookup chain
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// iTunes catalog search endpoint
    pub catalog_url: String,

    /// Results requested per catalog search (1 to 10)
    pub catalog_limit: u32,

    /// Size token substituted into catalog artwork URLs (e.g. "600x600")
    pub catalog_artwork_size: String,

    /// MusicBrainz web service root
    pub musicbrainz_url: String,

    /// Maximum candidate releases probed per album
    pub release_limit: u32,

    /// Cover Art Archive root
    pub coverart_url: String,

    /// AcoustID lookup endpoint
    pub acoustid_url: String,

    /// Contact string appended to the User-Agent (MusicBrainz asks for one)
    pub contact: String,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            catalog_url: "https://itunes.apple.com/search".to_string(),
            catalog_limit: 10,
            catalog_artwork_size: "600x600".to_string(),
            musicbrainz_url: "https://musicbrainz.org/ws/2".to_string(),
            release_limit: 20,
            coverart_url: "https://coverartarchive.org".to_string(),
            acoustid_url: "https://api.acoustid.org/v2/lookup".to_string(),
            contact: "https://github.com/artwork-embedder".to_string(),
        }
    }
}

impl ProvidersConfig {
    /// User-Agent header sent to every service.
    pub fn user_agent(&self) -> String {
        format!(
            "{}/{} ({})",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            self.contact
        )
    }
}

/// Library layout settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// File extensions treated as audio (case-insensitive, no dot)
    pub extensions: Vec<String>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            extensions: ["mp3", "flac", "ogg", "m4a", "wav"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl Config {
    /// Resolve the fingerprint credential.
    ///
    /// An explicit value (flag or environment) wins over the config file.
    /// Blank keys count as absent.
    pub fn acoustid_api_key(&self, explicit: Option<&str>) -> Option<String> {
        fn usable(key: Option<&str>) -> Option<&str> {
            key.map(str::trim).filter(|key| !key.is_empty())
        }
        usable(explicit)
            .or_else(|| usable(self.credentials.acoustid_api_key.as_deref()))
            .map(String::from)
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// `<platform config dir>/artwork-embedder`
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("artwork-embedder"))
}

/// Default location of `config.toml`
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load from [`config_path`], falling back to defaults.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("No platform config directory; using built-in settings");
        return Config::default();
    };
    load_from(&path)
}

/// Load from `path`. A missing or broken file yields defaults, never an error.
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::debug!("{:?} absent; using built-in settings", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match parse(&contents) {
            Ok(config) => {
                tracing::info!("Settings read from {:?}", path);
                config
            }
            Err(e) => {
                tracing::warn!("Ignoring {:?}, not valid TOML: {}", path, e);
                Config::default()
            }
        },
        Err(e) => {
            tracing::warn!("Ignoring {:?}, unreadable: {}", path, e);
            Config::default()
        }
    }
}

/// Parse configuration from TOML text.
pub fn parse(contents: &str) -> crate::error::Result<Config> {
    toml::from_str(contents).map_err(|e| crate::error::Error::config(e.to_string()))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_write_every_section() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[credentials]"));
        assert!(toml.contains("[providers]"));
        assert!(toml.contains("[library]"));
    }

    #[test]
    fn test_default_limits() {
        let providers = ProvidersConfig::default();
        assert_eq!(providers.catalog_limit, 10);
        assert_eq!(providers.release_limit, 20);
        assert_eq!(providers.catalog_artwork_size, "600x600");
    }

    #[test]
    fn test_missing_keys_keep_defaults() {
        let toml = r#"
[credentials]
acoustid_api_key = "Xk3vQ9pL"

[providers]
release_limit = 5
"#;
        let config = parse(toml).unwrap();

        assert_eq!(
            config.credentials.acoustid_api_key,
            Some("Xk3vQ9pL".to_string())
        );
        assert_eq!(config.providers.release_limit, 5);
        assert_eq!(config.providers.catalog_limit, 10);
        assert_eq!(config.library.extensions.len(), 5);
    }

    #[test]
    fn test_invalid_config_is_error() {
        assert!(parse("[providers\nrelease_limit = ").is_err());
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let config = load_from(Path::new("/nonexistent/artwork-embedder/config.toml"));
        assert!(config.credentials.acoustid_api_key.is_none());
    }

    #[test]
    fn test_load_from_broken_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();

        let config = load_from(&path);
        assert_eq!(config.providers.release_limit, 20);
    }

    #[test]
    fn test_api_key_precedence() {
        let mut config = Config::default();
        config.credentials.acoustid_api_key = Some("from-file".to_string());

        assert_eq!(
            config.acoustid_api_key(Some("from-env")),
            Some("from-env".to_string())
        );
        assert_eq!(config.acoustid_api_key(None), Some("from-file".to_string()));
    }

    #[test]
    fn test_blank_env_key_does_not_hide_file_key() {
        let mut config = Config::default();
        config.credentials.acoustid_api_key = Some("from-file".to_string());

        assert_eq!(config.acoustid_api_key(Some("")), Some("from-file".to_string()));
        assert_eq!(config.acoustid_api_key(Some("  ")), Some("from-file".to_string()));
    }

    #[test]
    fn test_blank_api_key_is_absent() {
        let config = Config::default();
        assert_eq!(config.acoustid_api_key(Some("   ")), None);
        assert_eq!(config.acoustid_api_key(None), None);
    }

    #[test]
    fn test_user_agent_format() {
        let ua = ProvidersConfig::default().user_agent();
        assert!(ua.starts_with("artwork-embedder/"));
        assert!(ua.contains('('));
    }
}
