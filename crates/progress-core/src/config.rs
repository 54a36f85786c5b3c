use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Policies
// ---------------------------------------------------------------------------

/// When the catalog is written back to disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SavePolicy {
    /// Synchronously after each successful mutation.
    #[default]
    EveryMutation,
    /// Once, when the workspace is closed.
    OnClose,
}

impl fmt::Display for SavePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SavePolicy::EveryMutation => "every_mutation",
            SavePolicy::OnClose => "on_close",
        };
        f.write_str(s)
    }
}

/// What to do when the catalog file exists but cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Refuse to open; the file is left for the operator to fix.
    #[default]
    Fail,
    /// Log a warning and start from an empty catalog.
    Reset,
}

impl fmt::Display for MalformedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MalformedPolicy::Fail => "fail",
            MalformedPolicy::Reset => "reset",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub save_policy: SavePolicy,
    #[serde(default)]
    pub on_malformed: MalformedPolicy,
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,
}

fn default_version() -> u32 {
    1
}

fn default_chart_width() -> usize {
    40
}

const MAX_CHART_WIDTH: usize = 200;

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            save_policy: SavePolicy::default(),
            on_malformed: MalformedPolicy::default(),
            chart_width: default_chart_width(),
        }
    }
}

impl Config {
    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Load `.progress/config.yaml`, falling back to defaults when absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        let Some(data) = crate::io::read_optional(&path)? else {
            return Ok(Self::default());
        };
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.version != 1 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("unknown config version {}", self.version),
            });
        }

        if self.chart_width == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "chart_width must be at least 1".to_string(),
            });
        } else if self.chart_width > MAX_CHART_WIDTH {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "chart_width {} exceeds {MAX_CHART_WIDTH}; charts will be clamped",
                    self.chart_width
                ),
            });
        }

        warnings
    }

    /// Chart width with validation bounds applied.
    pub fn effective_chart_width(&self) -> usize {
        self.chart_width.clamp(1, MAX_CHART_WIDTH)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg.save_policy, SavePolicy::EveryMutation);
        assert_eq!(cfg.on_malformed, MalformedPolicy::Fail);
        assert_eq!(cfg.chart_width, 40);
    }

    #[test]
    fn config_roundtrip() {
        let dir = TempDir::new().unwrap();
        let cfg = Config {
            save_policy: SavePolicy::OnClose,
            on_malformed: MalformedPolicy::Reset,
            ..Config::default()
        };
        cfg.save(dir.path()).unwrap();
        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.save_policy, SavePolicy::OnClose);
        assert_eq!(loaded.on_malformed, MalformedPolicy::Reset);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let cfg: Config = serde_yaml::from_str("on_malformed: reset\n").unwrap();
        assert_eq!(cfg.on_malformed, MalformedPolicy::Reset);
        assert_eq!(cfg.save_policy, SavePolicy::EveryMutation);
        assert_eq!(cfg.version, 1);
    }

    #[test]
    fn validate_flags_zero_width() {
        let cfg = Config {
            chart_width: 0,
            ..Config::default()
        };
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, WarnLevel::Error);
        assert_eq!(cfg.effective_chart_width(), 1);
    }

    #[test]
    fn default_config_is_clean() {
        assert!(Config::default().validate().is_empty());
    }
}
