//! Options for the alignment operations.

use serde::{Deserialize, Serialize};

use crate::error::{AlignError, Result};

/// Options for a tolerance merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeOptions {
    /// Largest accepted |key_left − key_right|
    #[serde(default)]
    pub tolerance: f64,

    /// Suffixes appended to the left and right column names
    #[serde(default = "default_suffixes")]
    pub suffixes: (String, String),
}

fn default_suffixes() -> (String, String) {
    ("_1".to_string(), "_2".to_string())
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            tolerance: 0.0,
            suffixes: default_suffixes(),
        }
    }
}

impl MergeOptions {
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }

    pub fn suffixes(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.suffixes = (left.into(), right.into());
        self
    }

    /// Reject negative and NaN tolerances.
    pub fn validate(&self) -> Result<()> {
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(AlignError::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }
}

/// Options for symmetrization around a neutral point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymmetrizeOptions {
    /// Pivot of the index axis
    #[serde(default)]
    pub neutral_point: f64,

    /// Appended to objective names in the symmetric output
    #[serde(default = "default_sym_suffix")]
    pub sym_suffix: String,

    /// Appended to objective names in the antisymmetric output
    #[serde(default = "default_antisym_suffix")]
    pub antisym_suffix: String,
}

fn default_sym_suffix() -> String {
    "sym".to_string()
}

fn default_antisym_suffix() -> String {
    "antisym".to_string()
}

impl Default for SymmetrizeOptions {
    fn default() -> Self {
        Self {
            neutral_point: 0.0,
            sym_suffix: default_sym_suffix(),
            antisym_suffix: default_antisym_suffix(),
        }
    }
}

impl SymmetrizeOptions {
    pub fn around(neutral_point: f64) -> Self {
        Self {
            neutral_point,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.neutral_point.is_nan() {
            return Err(AlignError::InvalidNeutralPoint(self.neutral_point));
        }
        Ok(())
    }
}

/// Both option sets, as a host would keep them alongside its own settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignConfig {
    #[serde(default)]
    pub merge: MergeOptions,

    #[serde(default)]
    pub symmetrize: SymmetrizeOptions,
}

impl AlignConfig {
    /// Parse from JSON; absent fields take their defaults.
    pub fn from_json_str(text: &str) -> anyhow::Result<Self> {
        let config: AlignConfig = serde_json::from_str(text)?;
        config.merge.validate()?;
        config.symmetrize.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_merge_options() {
        let opts = MergeOptions::default();
        assert_eq!(opts.tolerance, 0.0);
        assert_eq!(opts.suffixes, ("_1".to_string(), "_2".to_string()));
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_negative_and_nan_tolerance_rejected() {
        assert_eq!(
            MergeOptions::with_tolerance(-1.0).validate(),
            Err(AlignError::InvalidTolerance(-1.0))
        );
        assert!(MergeOptions::with_tolerance(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = AlignConfig::from_json_str(r#"{ "merge": { "tolerance": 0.05 } }"#).unwrap();
        assert_eq!(config.merge.tolerance, 0.05);
        assert_eq!(config.merge.suffixes.1, "_2");
        assert_eq!(config.symmetrize.neutral_point, 0.0);
        assert_eq!(config.symmetrize.antisym_suffix, "antisym");
    }

    #[test]
    fn test_json_with_negative_tolerance_fails() {
        assert!(AlignConfig::from_json_str(r#"{ "merge": { "tolerance": -0.5 } }"#).is_err());
    }

    #[test]
    fn test_config_round_trips() {
        let config = AlignConfig {
            merge: MergeOptions::with_tolerance(0.25).suffixes("_a", "_b"),
            symmetrize: SymmetrizeOptions::around(1.5),
        };
        let text = config.to_json_string().unwrap();
        assert_eq!(AlignConfig::from_json_str(&text).unwrap(), config);
    }
}
