//! YAML configuration file support for the umbrella crate.
//!
//! Loads a single YAML document covering every stage of the pipeline
//! (normalizer, fingerprint, LSH, checker, and server), so a deployment can
//! configure the whole thing from one file instead of per-crate defaults.
//!
//! ## Example
//!
//! ```yaml
//! version: "1.0"
//!
//! fingerprint:
//!   k: 5
//!   w: 4
//!   num_perm: 100
//!
//! lsh:
//!   bands: 20
//!
//! checker:
//!   default_threshold: 0.8
//!   default_max_candidates: 10
//!   deadline_secs: 60
//!   use_parallel: false
//!
//! server:
//!   bind_addr: "0.0.0.0"
//!   port: 8080
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration for the whole pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimtextConfig {
    pub version: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub normalizer: NormalizerYamlConfig,

    #[serde(default)]
    pub fingerprint: FingerprintYamlConfig,

    #[serde(default)]
    pub lsh: LshYamlConfig,

    #[serde(default)]
    pub checker: CheckerYamlConfig,

    #[serde(default)]
    pub server: ServerYamlConfig,
}

impl SimtextConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: SimtextConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => {}
            v => return Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }
        self.fingerprint.validate()?;
        self.lsh.validate()?;
        self.checker.validate()?;
        Ok(())
    }
}

impl Default for SimtextConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            normalizer: NormalizerYamlConfig::default(),
            fingerprint: FingerprintYamlConfig::default(),
            lsh: LshYamlConfig::default(),
            checker: CheckerYamlConfig::default(),
            server: ServerYamlConfig::default(),
        }
    }
}

/// The normalizer has no tunables today; this section exists so a future
/// normalization rule change can be versioned without breaking old files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,
}

impl Default for NormalizerYamlConfig {
    fn default() -> Self {
        Self { version: 1 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FingerprintYamlConfig {
    #[serde(default = "default_k")]
    pub k: usize,
    #[serde(default = "default_w")]
    pub w: usize,
    #[serde(default = "default_num_perm")]
    pub num_perm: usize,
}

impl FingerprintYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.k == 0 {
            return Err(ConfigLoadError::Validation("fingerprint.k must be >= 1".into()));
        }
        if self.w == 0 {
            return Err(ConfigLoadError::Validation("fingerprint.w must be >= 1".into()));
        }
        if self.num_perm == 0 {
            return Err(ConfigLoadError::Validation(
                "fingerprint.num_perm must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for FingerprintYamlConfig {
    fn default() -> Self {
        Self {
            k: default_k(),
            w: default_w(),
            num_perm: default_num_perm(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LshYamlConfig {
    #[serde(default = "default_bands")]
    pub bands: usize,
}

impl LshYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.bands == 0 {
            return Err(ConfigLoadError::Validation("lsh.bands must be >= 1".into()));
        }
        Ok(())
    }
}

impl Default for LshYamlConfig {
    fn default() -> Self {
        Self { bands: default_bands() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckerYamlConfig {
    #[serde(default = "default_threshold")]
    pub default_threshold: f64,
    #[serde(default = "default_max_candidates")]
    pub default_max_candidates: usize,
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,
    #[serde(default)]
    pub use_parallel: bool,
}

impl CheckerYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if !(0.0..=1.0).contains(&self.default_threshold) {
            return Err(ConfigLoadError::Validation(
                "checker.default_threshold must be within [0, 1]".into(),
            ));
        }
        Ok(())
    }
}

impl Default for CheckerYamlConfig {
    fn default() -> Self {
        Self {
            default_threshold: default_threshold(),
            default_max_candidates: default_max_candidates(),
            deadline_secs: default_deadline_secs(),
            use_parallel: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerYamlConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerYamlConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
        }
    }
}

fn default_version() -> u32 {
    1
}
fn default_k() -> usize {
    5
}
fn default_w() -> usize {
    4
}
fn default_num_perm() -> usize {
    100
}
fn default_bands() -> usize {
    20
}
fn default_threshold() -> f64 {
    0.8
}
fn default_max_candidates() -> usize {
    10
}
fn default_deadline_secs() -> u64 {
    60
}
fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = SimtextConfig::default();
        assert_eq!(cfg.fingerprint.k, 5);
        assert_eq!(cfg.lsh.bands, 20);
        assert_eq!(cfg.checker.default_threshold, 0.8);
    }

    #[test]
    fn parses_partial_yaml_with_defaults() {
        let yaml = r#"
version: "1.0"
fingerprint:
  k: 9
  w: 4
  num_perm: 128
"#;
        let cfg = SimtextConfig::from_yaml(yaml).unwrap();
        assert_eq!(cfg.fingerprint.k, 9);
        assert_eq!(cfg.fingerprint.num_perm, 128);
        assert_eq!(cfg.lsh.bands, 20);
    }

    #[test]
    fn rejects_unsupported_version() {
        let yaml = "version: \"9.9\"\n";
        assert!(matches!(
            SimtextConfig::from_yaml(yaml),
            Err(ConfigLoadError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let yaml = "version: \"1.0\"\nchecker:\n  default_threshold: 1.5\n";
        assert!(matches!(
            SimtextConfig::from_yaml(yaml),
            Err(ConfigLoadError::Validation(_))
        ));
    }
}
