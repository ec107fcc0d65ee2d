//! Construction-time configuration for the phase offset filter.
//!
//! Configuration is plain YAML:
//!
//! ```yaml
//! vlen: 1536
//! alpha: 0.01
//! diag_interval: 100
//! alpha_policy: accept
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Number of active carriers in a DAB transmission mode I symbol.
pub const DAB_MODE_I_CARRIERS: usize = 1536;

/// Default snapshot cadence, in items.
pub const DEFAULT_DIAG_INTERVAL: u64 = 100;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(String),
    #[error("failed to parse config: {0}")]
    Parse(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// What to do with a smoothing factor outside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlphaPolicy {
    /// Keep the value and log a warning. Estimates may oscillate or diverge.
    #[default]
    Accept,
    /// Refuse to build the filter.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseOffsetConfig {
    /// Values per item (one per carrier).
    pub vlen: usize,
    /// Smoothing factor of the per-carrier exponential average.
    pub alpha: f32,
    /// Emit an estimate snapshot every this many items; 0 disables.
    pub diag_interval: u64,
    pub alpha_policy: AlphaPolicy,
}

impl Default for PhaseOffsetConfig {
    fn default() -> Self {
        Self {
            vlen: DAB_MODE_I_CARRIERS,
            alpha: 0.01,
            diag_interval: DEFAULT_DIAG_INTERVAL,
            alpha_policy: AlphaPolicy::Accept,
        }
    }
}

impl PhaseOffsetConfig {
    pub fn new(vlen: usize, alpha: f32) -> Self {
        Self { vlen, alpha, ..Self::default() }
    }

    pub fn with_diag_interval(mut self, every: u64) -> Self {
        self.diag_interval = every;
        self
    }

    pub fn with_alpha_policy(mut self, policy: AlphaPolicy) -> Self {
        self.alpha_policy = policy;
        self
    }

    /// Parse configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a YAML file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(format!("{}: {}", path.display(), e)))?;
        Self::parse(&content)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Structural checks only. The alpha range is governed by `alpha_policy`
    /// at construction, not here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.alpha.is_nan() {
            return Err(ConfigError::Invalid("alpha must not be NaN".to_string()));
        }
        Ok(())
    }

    #[inline]
    pub fn alpha_in_range(&self) -> bool {
        (0.0..=1.0).contains(&self.alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let cfg = PhaseOffsetConfig::parse("alpha: 0.25\n").unwrap();
        assert_eq!(cfg.vlen, DAB_MODE_I_CARRIERS);
        assert_eq!(cfg.alpha, 0.25);
        assert_eq!(cfg.diag_interval, DEFAULT_DIAG_INTERVAL);
        assert_eq!(cfg.alpha_policy, AlphaPolicy::Accept);
    }

    #[test]
    fn yaml_roundtrip_keeps_policy() {
        let cfg = PhaseOffsetConfig::new(384, 0.1)
            .with_diag_interval(0)
            .with_alpha_policy(AlphaPolicy::Reject);
        let yaml = cfg.to_yaml().unwrap();
        assert!(yaml.contains("alpha_policy: reject"));
        assert_eq!(PhaseOffsetConfig::parse(&yaml).unwrap(), cfg);
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = PhaseOffsetConfig::parse("vlen: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn nan_alpha_fails_validation() {
        let cfg = PhaseOffsetConfig::new(4, f32::NAN);
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
        assert!(PhaseOffsetConfig::new(4, 1.5).validate().is_ok());
    }

    #[test]
    fn load_from_missing_file_is_a_read_error() {
        let err = PhaseOffsetConfig::load_from(Path::new("/nonexistent/phase_offset.yaml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read(_)));
    }
}
