//! Configuration for the Warden CLI
//!
//! Handles loading the TOML configuration and building the access
//! controller it describes.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use warden_core::LogLevel;
use warden_policy::{
    demo_policies, load_policy_file, AccessController, InMemoryPolicyStore, Policy, PolicyEngine,
    PolicyStore, Vocabulary,
};

/// Errors that can occur in configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Log level used when `RUST_LOG` is not set
    #[serde(default)]
    pub log_level: LogLevel,

    /// Policy definition files to load. Relative paths are resolved against
    /// the directory holding the configuration file.
    #[serde(default)]
    pub policy_files: Vec<PathBuf>,

    /// Recognized roles and actions
    #[serde(default)]
    pub vocabulary: Vocabulary,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            policy_files: Vec::new(),
            vocabulary: Vocabulary::demo(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a file
    ///
    /// A missing file is not an error: the defaults are used instead. This
    /// runs before logging is set up, so it does not log.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let mut config = Self::parse(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }

        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseFailed(e.to_string()).into())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.vocabulary.roles.is_empty() {
            return Err(ConfigError::Invalid("vocabulary.roles cannot be empty".to_string()).into());
        }
        if self.vocabulary.actions.is_empty() {
            return Err(
                ConfigError::Invalid("vocabulary.actions cannot be empty".to_string()).into(),
            );
        }
        if self.vocabulary.roles.iter().any(|role| role.is_blank()) {
            return Err(
                ConfigError::Invalid("vocabulary.roles contains a blank role".to_string()).into(),
            );
        }
        if self.vocabulary.actions.iter().any(|action| action.is_blank()) {
            return Err(ConfigError::Invalid(
                "vocabulary.actions contains a blank action".to_string(),
            )
            .into());
        }

        Ok(())
    }

    fn resolve_paths(&mut self, base: &Path) {
        for file in &mut self.policy_files {
            if file.is_relative() {
                *file = base.join(&*file);
            }
        }
    }

    /// Load the policies this configuration names.
    ///
    /// `overrides` replaces the configured files when non-empty. With no
    /// files at all the demo policies are used.
    pub fn load_policies(&self, overrides: &[PathBuf]) -> Result<Vec<Policy>> {
        let files = if overrides.is_empty() {
            self.policy_files.as_slice()
        } else {
            overrides
        };

        if files.is_empty() {
            info!("No policy files configured, using demo policies");
            return Ok(demo_policies()?);
        }

        let mut policies = Vec::new();
        for file in files {
            let loaded = load_policy_file(file)
                .with_context(|| format!("Failed to load policy file: {}", file.display()))?;
            policies.extend(loaded);
        }

        Ok(policies)
    }

    /// Build the access controller described by this configuration.
    pub fn build_controller(
        &self,
        overrides: &[PathBuf],
    ) -> Result<AccessController<InMemoryPolicyStore>> {
        let store = InMemoryPolicyStore::new();
        store.load_all(self.load_policies(overrides)?);

        Ok(AccessController::new(
            PolicyEngine::new(store),
            self.vocabulary.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const GUEST_POLICY: &str =
        r#"{"name": "guest_policy", "rules": {"guest": {"allow": {"action": ["view"]}}}}"#;

    #[test]
    fn test_defaults() {
        let config = CliConfig::load(None).unwrap();

        assert_eq!(config, CliConfig::default());
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.vocabulary, Vocabulary::demo());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = CliConfig::load(Some(Path::new("/no/such/warden.toml"))).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_parse() {
        let config = CliConfig::parse(
            r#"
            log_level = "debug"
            policy_files = ["policies.json"]

            [vocabulary]
            roles = ["ops"]
            actions = ["deploy", "rollback"]
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.policy_files, vec![PathBuf::from("policies.json")]);
        assert!(config.vocabulary.recognizes_role("ops"));
        assert!(config.vocabulary.recognizes_action("rollback"));
    }

    #[test]
    fn test_partial_vocabulary_keeps_demo_actions() {
        let config = CliConfig::parse(
            r#"
            [vocabulary]
            roles = ["ops"]
            "#,
        )
        .unwrap();

        assert!(config.vocabulary.recognizes_role("ops"));
        assert!(!config.vocabulary.recognizes_role("admin"));
        assert_eq!(config.vocabulary.actions, Vocabulary::demo().actions);
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_error() {
        let err = CliConfig::parse("log_level = [").unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }

    #[test]
    fn test_validate_rejects_empty_vocabulary() {
        let config = CliConfig::parse(
            r#"
            [vocabulary]
            roles = []
            actions = ["view"]
            "#,
        )
        .unwrap();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("vocabulary.roles cannot be empty"));
    }

    #[test]
    fn test_relative_policy_paths_resolve_against_config_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("guest.json"), GUEST_POLICY).unwrap();
        let config_path = dir.path().join("warden.toml");
        fs::write(&config_path, "policy_files = [\"guest.json\"]\n").unwrap();

        let config = CliConfig::load(Some(&config_path)).unwrap();
        assert_eq!(config.policy_files, vec![dir.path().join("guest.json")]);

        let controller = config.build_controller(&[]).unwrap();
        assert_eq!(controller.engine().store().len(), 1);
        assert_eq!(
            controller.check("guest", "view"),
            "Permission granted for view action."
        );
        assert_eq!(
            controller.check("admin", "edit"),
            "Permission denied for edit action."
        );
    }

    #[test]
    fn test_overrides_replace_configured_files() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("guest.json");
        fs::write(&file, GUEST_POLICY).unwrap();

        let config = CliConfig {
            policy_files: vec![PathBuf::from("/no/such/file.json")],
            ..CliConfig::default()
        };

        let policies = config.load_policies(&[file]).unwrap();
        assert_eq!(policies.len(), 1);
        assert_eq!(policies[0].name(), "guest_policy");
    }

    #[test]
    fn test_demo_policies_when_no_files() {
        let controller = CliConfig::default().build_controller(&[]).unwrap();
        assert_eq!(
            controller.check("admin", "edit"),
            "Permission granted for edit action."
        );
    }

    #[test]
    fn test_missing_policy_file_is_an_error() {
        let config = CliConfig::default();
        let err = config
            .load_policies(&[PathBuf::from("/no/such/file.json")])
            .unwrap_err();
        assert!(err.to_string().contains("Failed to load policy file"));
    }
}
