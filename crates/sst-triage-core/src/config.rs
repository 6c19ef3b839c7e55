use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TriageError};
use crate::language::{LanguageTable, LanguagesConfig};
use crate::triage::{RuleStore, RulesConfig};

const CONFIG_FILE: &str = "config.toml";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# sst-triage configuration file
# Location: ~/.sst-triage/config.toml

# Extend a builtin category with extra trigger phrases.
# Set replace = true to discard the builtin lists instead of appending.
# Category keys: make-new-package, add-missing-assets,
#                publish-to-platform, change-existing-assets
#
# [rules."publish-to-platform"]
# signals = ["push the art live"]
# counter_signals = [{ phrase = "nothing in pmam", redirect = "make-new-package" }]

# Add or override language entries (name = locale code).
#
# [languages]
# "Basque" = "eu-ES"
"#;

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub rules: RulesConfig,

    #[serde(default)]
    pub languages: LanguagesConfig,
}

impl Config {
    /// Load config from base directory
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content).map_err(|e| TriageError::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        Ok(config)
    }

    /// Save config to base directory
    pub fn save(&self, base_dir: &Path) -> Result<()> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE)
    }

    /// Initialize config with default template (rich comments)
    pub fn init(base_dir: &Path) -> Result<PathBuf> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path)
    }

    /// Build the rule store with this config applied
    pub fn rule_store(&self) -> Result<RuleStore> {
        RuleStore::builtin().with_config(&self.rules)
    }

    /// Build the language table with this config applied
    pub fn language_table(&self) -> LanguageTable {
        LanguageTable::builtin().with_config(&self.languages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_config_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert!(config.rules.rules.is_empty());
        assert!(config.languages.entries.is_empty());
    }

    #[test]
    fn test_config_round_trip() {
        let dir = TempDir::new().unwrap();

        let mut config = Config::default();
        config
            .languages
            .entries
            .insert("Basque".to_string(), "eu-ES".to_string());
        config.save(dir.path()).unwrap();

        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(
            loaded.languages.entries.get("Basque"),
            Some(&"eu-ES".to_string())
        );
    }

    #[test]
    fn test_config_init_writes_template() {
        let dir = TempDir::new().unwrap();
        let path = Config::init(dir.path()).unwrap();
        assert!(path.exists());

        // Template must stay loadable
        let config = Config::load(dir.path()).unwrap();
        assert!(config.rules.rules.is_empty());
    }

    #[test]
    fn test_config_parse_error_reports_path() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "rules = \"oops\"").unwrap();

        let err = Config::load(dir.path()).unwrap_err();
        assert!(matches!(err, TriageError::ConfigParse { .. }));
    }

    #[test]
    fn test_config_builds_store_and_table() {
        let content = r#"
[rules."make-new-package"]
signals = ["fresh delivery"]

[languages]
"Basque" = "eu-ES"
"#;
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), content).unwrap();

        let config = Config::load(dir.path()).unwrap();
        let store = config.rule_store().unwrap();
        assert!(store
            .get(crate::triage::Category::MakeNewPackage)
            .signals
            .contains(&"fresh delivery".to_string()));

        let table = config.language_table();
        assert_eq!(table.code_for("Basque").unwrap(), "eu-ES");
    }
}
