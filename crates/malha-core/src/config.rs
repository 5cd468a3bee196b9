//! Configuration for malha
//!
//! Looked up in order: an explicit `--config` file, `./malha.toml`, then
//! `config.toml` under `$MALHA_CONFIG_DIR` or the platform config directory
//! (`~/.config/malha` on Linux). Missing files mean defaults.

pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{MalhaError, Result};

pub use types::{
    BatchConfig, ColumnsConfig, GraphConfig, MalhaConfig, RoutingConfig, TraversalConfig, ViaRule,
    DEFAULT_TIMEOUT_SECS,
};

const CONFIG_DIR: &str = "malha";
const CONFIG_FILE: &str = "config.toml";
const LOCAL_CONFIG_FILE: &str = "malha.toml";
const CONFIG_DIR_ENV_VAR: &str = "MALHA_CONFIG_DIR";

impl MalhaConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            MalhaError::io_operation("read config", path.display().to_string(), e)
        })?;
        let config: MalhaConfig = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "config_loaded");
        Ok(config)
    }

    /// Resolve and load configuration; an explicit path must exist
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Self::load(&local);
        }

        match global_config_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MalhaError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Apply the alias table to a normalized endpoint
    pub fn resolve_alias<'a>(&'a self, name: &'a str) -> &'a str {
        self.routing
            .aliases
            .get(name)
            .map_or(name, String::as_str)
    }

    /// Mandatory intermediate for a normalized `(from, to)` query, if any
    pub fn via_for(&self, from: &str, to: &str) -> Option<&str> {
        self.routing
            .via
            .iter()
            .find(|rule| rule.from == from && rule.to == to)
            .map(|rule| rule.through.as_str())
    }
}

/// `config.toml` under `$MALHA_CONFIG_DIR` or the platform config directory
pub fn global_config_path() -> Option<PathBuf> {
    // Allow environment variable override for testing
    let config_dir = match std::env::var(CONFIG_DIR_ENV_VAR) {
        Ok(env_dir) => PathBuf::from(env_dir),
        Err(_) => dirs::config_dir()?.join(CONFIG_DIR),
    };
    Some(config_dir.join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = MalhaConfig::default();
        assert!(!config.graph.directed);
        assert!(config.graph.normalize_names);
        assert_eq!(config.traversal.max_cycles, 10);
        assert_eq!(config.batch.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.columns.weight, "weight");
        assert!(config.routing.aliases.is_empty());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: MalhaConfig = toml::from_str(
            r#"
[graph]
directed = true

[columns]
from = "bairro_origem"
to = "bairro_destino"
weight = "peso"
"#,
        )
        .unwrap();

        assert!(config.graph.directed);
        assert!(config.graph.normalize_names);
        assert_eq!(config.columns.from, "bairro_origem");
        assert_eq!(config.columns.origin, "origin");
        assert_eq!(config.traversal.max_cycles, 10);
    }

    #[test]
    fn test_routing_rules() {
        let config: MalhaConfig = toml::from_str(
            r#"
[routing.aliases]
setubal = "boa viagem"

[[routing.via]]
from = "nova descoberta"
to = "setubal"
through = "boa viagem"
"#,
        )
        .unwrap();

        assert_eq!(config.resolve_alias("setubal"), "boa viagem");
        assert_eq!(config.resolve_alias("pina"), "pina");
        assert_eq!(config.via_for("nova descoberta", "setubal"), Some("boa viagem"));
        assert_eq!(config.via_for("setubal", "nova descoberta"), None);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("malha.toml");

        let mut config = MalhaConfig::default();
        config.batch.timeout_secs = 5;
        config.routing.via.push(ViaRule {
            from: "a".to_string(),
            to: "c".to_string(),
            through: "b".to_string(),
        });
        config.save(&path).unwrap();

        let loaded = MalhaConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_explicit_missing_config_fails() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(MalhaConfig::discover(Some(&missing)).is_err());
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[traversal]\nmax_cycles = \"many\"\n").unwrap();
        let err = MalhaConfig::load(&path).unwrap_err();
        assert!(matches!(err, MalhaError::Toml(_)));
    }
}
