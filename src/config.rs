use crate::core::score::{Policy, WeightProfile};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "anonhealth.toml";

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<WeightProfile>,
    pub report: ReportConfig,
}

impl Config {
    /// Custom `[weights]` win over the policy's built-in profile.
    pub fn weight_profile(&self) -> WeightProfile {
        self.weights.unwrap_or_else(|| self.general.policy.weights())
    }

    /// An explicitly chosen policy replaces any custom `[weights]`.
    pub fn select_policy(&mut self, policy: Policy) {
        self.general.policy = policy;
        self.weights = None;
    }

    fn validate(&self) -> Result<()> {
        if let Some(weights) = self.weights.filter(|weights| !weights.is_valid()) {
            bail!(
                "weights must be finite and non-negative (got success={}, info={}, warning={})",
                weights.success,
                weights.info,
                weights.warning
            );
        }
        if self.report.sections.iter().any(|s| s.trim().is_empty()) {
            bail!("report.sections must not contain empty paths");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub policy: Policy,
    pub fail_on: FailOn,
    pub json: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            policy: Policy::Severity,
            fail_on: FailOn::Error,
            json: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailOn {
    Warning,
    #[default]
    Error,
    None,
}

impl fmt::Display for FailOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
            Self::None => write!(f, "none"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub sections: Vec<String>,
    pub fields: FieldsConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            sections: vec![
                "summary.phases".to_string(),
                "data".to_string(),
                "processing".to_string(),
                "rows".to_string(),
            ],
            fields: FieldsConfig::default(),
        }
    }
}

/// Row field names read for each category, first present alias wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldsConfig {
    pub success: Vec<String>,
    pub info: Vec<String>,
    pub warning: Vec<String>,
    pub error: Vec<String>,
}

impl Default for FieldsConfig {
    fn default() -> Self {
        Self {
            success: vec!["success".to_string(), "successes".to_string()],
            info: vec!["info".to_string(), "infos".to_string()],
            warning: vec!["warning".to_string(), "warnings".to_string()],
            error: vec!["error".to_string(), "errors".to_string()],
        }
    }
}

pub fn load_config(cli_config_path: Option<&Path>, cwd: &Path) -> Result<LoadedConfig> {
    if let Some(path) = cli_config_path {
        if !path.exists() {
            bail!(
                "config file not found at {} (passed with --config)",
                path.display()
            );
        }

        return Ok(LoadedConfig {
            config: read_config(path)?,
        });
    }

    let local_path = cwd.join(CONFIG_FILE_NAME);
    if local_path.exists() {
        return Ok(LoadedConfig {
            config: read_config(&local_path)?,
        });
    }

    Ok(LoadedConfig {
        config: Config::default(),
    })
}

pub fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!(
            "refusing to overwrite existing config file: {}",
            path.display()
        );
    }

    let content = default_config_toml()?;
    fs::write(path, content).with_context(|| format!("failed writing {}", path.display()))?;
    Ok(())
}

pub fn default_config_toml() -> Result<String> {
    toml::to_string_pretty(&Config::default()).context("failed to serialize default config")
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading config file {}", path.display()))?;
    let config = toml::from_str::<Config>(&content)
        .with_context(|| format!("failed parsing config file {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config file {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let rendered = default_config_toml().unwrap();
        assert!(rendered.contains("policy = \"severity\""));
        assert!(rendered.contains("fail_on = \"error\""));
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.general.policy, Policy::Severity);
        assert!(parsed.weights.is_none());
        assert_eq!(parsed.report.sections.len(), 4);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let parsed: Config = toml::from_str("[general]\npolicy = \"equal\"\n").unwrap();
        assert_eq!(parsed.general.policy, Policy::Equal);
        assert_eq!(parsed.general.fail_on, FailOn::Error);
        assert_eq!(parsed.weight_profile(), Policy::Equal.weights());
        assert_eq!(parsed.report.fields.info, vec!["info", "infos"]);
    }

    #[test]
    fn custom_weights_override_policy() {
        let parsed: Config = toml::from_str(
            "[general]\npolicy = \"equal\"\n[weights]\nsuccess = 2.0\ninfo = 0.5\nwarning = 10.0\n",
        )
        .unwrap();
        let weights = parsed.weight_profile();
        assert_eq!(weights.success, 2.0);
        assert_eq!(weights.warning, 10.0);
    }

    #[test]
    fn selecting_a_policy_drops_custom_weights() {
        let mut parsed: Config =
            toml::from_str("[weights]\nsuccess = 1.0\ninfo = 0.1\nwarning = 100.0\n").unwrap();
        parsed.select_policy(Policy::Equal);

        assert_eq!(parsed.general.policy, Policy::Equal);
        assert!(parsed.weights.is_none());
        assert_eq!(parsed.weight_profile(), Policy::Equal.weights());
    }

    #[test]
    fn negative_weights_fail_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            "[weights]\nsuccess = -1.0\ninfo = 0.1\nwarning = 100.0\n",
        )
        .unwrap();

        let err = load_config(Some(&path), dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("non-negative"));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_config(Some(&missing), dir.path()).is_err());
    }

    #[test]
    fn local_config_is_picked_up_and_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        write_default_config(&path).unwrap();
        assert!(write_default_config(&path).is_err());

        let loaded = load_config(None, dir.path()).unwrap();
        assert_eq!(loaded.config.general.fail_on, FailOn::Error);
    }
}
