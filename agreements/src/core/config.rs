use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::domain::filters::AGREEMENT_CONTENT_FILTER;
use crate::domain::i18n::Messages;
use crate::utils::file::expand_path;

use super::cli::CliConfig;
use super::constants::{APP_DOT_FOLDER, CONFIG_FILE_NAME};

// =============================================================================
// File Config (all fields optional, merged from profile and local files)
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub filter_name: Option<String>,
    pub pretty: Option<bool>,
    /// Message id overrides for the built-in catalog
    pub messages: Option<BTreeMap<String, String>>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

/// Keys recognized in `erm-agreements.json`
const KNOWN_CONFIG_KEYS: &[&str] = &["filter_name", "pretty", "messages"];

impl FileConfig {
    /// Read one `erm-agreements.json` layer
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading agreements config");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read agreements config: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid agreements config: {}", path.display()))?;
        if let Some(messages) = &config.messages {
            tracing::debug!(overrides = messages.len(), "Config overrides messages");
        }
        Ok(config)
    }

    /// Names of keys this app does not read
    fn unknown_keys(&self) -> Vec<&str> {
        match &self.extra {
            serde_json::Value::Object(map) => map.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    fn warn_unknown_fields(&self, path: &Path) {
        let unknown = self.unknown_keys();
        if !unknown.is_empty() {
            tracing::warn!(
                path = %path.display(),
                fields = %unknown.join(", "),
                expected = %KNOWN_CONFIG_KEYS.join(", "),
                "Ignoring unknown agreements config keys"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if other.filter_name.is_some() {
            tracing::trace!(filter_name = ?other.filter_name, "Merging filter_name");
            self.filter_name = other.filter_name;
        }
        if other.pretty.is_some() {
            tracing::trace!(pretty = ?other.pretty, "Merging pretty");
            self.pretty = other.pretty;
        }
        if let Some(messages) = other.messages {
            let current = self.messages.get_or_insert_with(BTreeMap::new);
            for (id, text) in messages {
                tracing::trace!(id = %id, "Merging messages entry");
                current.insert(id, text);
            }
        }
    }
}

// =============================================================================
// Application Config (resolved)
// =============================================================================

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Filter name the content expression is committed under
    pub filter_name: String,
    pub pretty: bool,
    pub messages: Messages,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.erm-agreements/erm-agreements.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        // 1. Load from profile dir - skip if not exists
        if let Some(profile_path) = get_profile_config_path()
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields(&profile_path);
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        // 2. Load from CLI-specified path OR local directory
        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_path(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields(&path);
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        let config = Self::resolve(cli, file_config);
        config.validate()?;
        Ok(config)
    }

    /// Layer configs: defaults -> file config -> CLI/env overrides
    fn resolve(cli: &CliConfig, file_config: FileConfig) -> Self {
        let filter_name = cli
            .filter_name
            .clone()
            .or(file_config.filter_name)
            .unwrap_or_else(|| AGREEMENT_CONTENT_FILTER.to_string());

        // --pretty can only turn pretty output on
        let pretty = cli.pretty || file_config.pretty.unwrap_or(false);

        let messages = Messages::with_overrides(file_config.messages.unwrap_or_default());

        Self {
            filter_name,
            pretty,
            messages,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.filter_name.trim().is_empty() {
            anyhow::bail!("filter_name cannot be empty");
        }
        if self.filter_name.chars().any(char::is_whitespace) {
            anyhow::bail!(
                "filter_name cannot contain whitespace: '{}'",
                self.filter_name
            );
        }
        Ok(())
    }
}

/// Get the profile config path (~/.erm-agreements/erm-agreements.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_file_config_parse_full() {
        let json = r#"{
            "filter_name": "content",
            "pretty": true,
            "messages": { "ui-agreements.AND": "UND" }
        }"#;
        let config: FileConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.filter_name.as_deref(), Some("content"));
        assert_eq!(config.pretty, Some(true));
        assert_eq!(
            config.messages.as_ref().unwrap().get("ui-agreements.AND"),
            Some(&"UND".to_string())
        );
    }

    #[test]
    fn test_file_config_parse_empty() {
        let config: FileConfig = serde_json::from_str("{}").unwrap();

        assert!(config.filter_name.is_none());
        assert!(config.pretty.is_none());
        assert!(config.messages.is_none());
        assert!(config.unknown_keys().is_empty());
    }

    #[test]
    fn test_file_config_parse_extra_fields() {
        let json = r#"{ "pretty": false, "unknown_field": 123 }"#;
        let config: FileConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.pretty, Some(false));
        assert_eq!(config.extra.get("unknown_field").unwrap(), 123);
        assert_eq!(config.unknown_keys(), vec!["unknown_field"]);
    }

    #[test]
    fn test_file_config_merge() {
        let mut base: FileConfig = serde_json::from_str(
            r#"{ "filter_name": "base", "messages": { "a": "1", "b": "2" } }"#,
        )
        .unwrap();
        let overlay: FileConfig =
            serde_json::from_str(r#"{ "pretty": true, "messages": { "b": "3" } }"#).unwrap();

        base.merge(overlay);

        assert_eq!(base.filter_name.as_deref(), Some("base"));
        assert_eq!(base.pretty, Some(true));
        let messages = base.messages.unwrap();
        assert_eq!(messages.get("a").map(String::as_str), Some("1"));
        assert_eq!(messages.get("b").map(String::as_str), Some("3"));
    }

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::resolve(&CliConfig::default(), FileConfig::default());

        assert_eq!(config.filter_name, AGREEMENT_CONTENT_FILTER);
        assert!(!config.pretty);
        assert_eq!(config.messages.format("ui-agreements.OR"), "OR");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_app_config_cli_override() {
        let file_config: FileConfig =
            serde_json::from_str(r#"{ "filter_name": "fromFile", "pretty": false }"#).unwrap();
        let cli = CliConfig {
            filter_name: Some("fromCli".to_string()),
            pretty: true,
            ..CliConfig::default()
        };

        let config = AppConfig::resolve(&cli, file_config);
        assert_eq!(config.filter_name, "fromCli");
        assert!(config.pretty);
    }

    #[test]
    fn test_app_config_validation_filter_name() {
        let cli = CliConfig {
            filter_name: Some("agreement content".to_string()),
            ..CliConfig::default()
        };
        assert!(AppConfig::resolve(&cli, FileConfig::default()).validate().is_err());

        let cli = CliConfig {
            filter_name: Some("  ".to_string()),
            ..CliConfig::default()
        };
        assert!(AppConfig::resolve(&cli, FileConfig::default()).validate().is_err());
    }

    #[test]
    fn test_app_config_load_from_cli_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "filter_name": "content", "messages": {{ "ui-agreements.agreementContent.filter.has": "Contains" }} }}"#
        )
        .unwrap();

        let cli = CliConfig {
            config: Some(file.path().to_path_buf()),
            ..CliConfig::default()
        };
        let config = AppConfig::load(&cli).unwrap();

        assert_eq!(config.filter_name, "content");
        assert_eq!(
            config
                .messages
                .format("ui-agreements.agreementContent.filter.has"),
            "Contains"
        );
    }

    #[test]
    fn test_app_config_load_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let cli = CliConfig {
            config: Some(dir.path().join("missing.json")),
            ..CliConfig::default()
        };
        let err = AppConfig::load(&cli).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_app_config_load_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let cli = CliConfig {
            config: Some(file.path().to_path_buf()),
            ..CliConfig::default()
        };
        let err = AppConfig::load(&cli).unwrap_err();
        assert!(err.to_string().contains("Invalid agreements config"));
    }
}
