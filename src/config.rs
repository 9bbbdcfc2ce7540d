//! Configuration loading and management
//!
//! The config lives at `$XDG_CONFIG_HOME/quickcalc/config.toml`. Every section
//! is optional; missing keys take their defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CalcError, CalcResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub chooser: ChooserConfig,
    pub history: HistoryConfig,
    pub clipboard: ClipboardConfig,
    pub notifications: NotificationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChooserConfig {
    /// dmenu-compatible program (rofi, wofi, fuzzel, dmenu)
    pub program: String,
    /// Replaces the built-in argument set; `{prompt}` and `{lines}` are
    /// substituted
    pub args: Option<Vec<String>>,
    pub prompt: String,
    /// Visible line count
    pub lines: u32,
    /// rofi theme name
    pub theme: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub capacity: usize,
    /// Entries shown under the prompt
    pub visible: usize,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    /// Sinks tried in order: wl-copy, xclip, xsel, arboard
    pub order: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub enabled: bool,
    pub timeout_ms: u32,
}

impl Default for ChooserConfig {
    fn default() -> Self {
        Self {
            program: "rofi".to_string(),
            args: None,
            prompt: "Calc:".to_string(),
            lines: 12,
            theme: None,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: 20,
            visible: 6,
            path: None,
        }
    }
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            order: ["wl-copy", "xclip", "xsel", "arboard"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_ms: 3000,
        }
    }
}

impl HistoryConfig {
    /// The configured history file (with `~` expanded), or the default under
    /// the data dir.
    pub fn resolved_path(&self) -> PathBuf {
        if let Some(ref path) = self.path {
            return PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());
        }

        dirs::data_local_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".local/share"))
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
            })
            .join("quickcalc")
            .join("history")
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".config"))
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
            })
            .join("quickcalc")
            .join("config.toml")
    }

    /// Load config from the default path, or return defaults if not found
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load config from `path`; read and parse errors are logged and the
    /// defaults used instead.
    pub fn load_from(path: &Path) -> Self {
        let mut config = if path.exists() {
            match Self::read(path) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "using default config");
                    Self::default()
                }
            }
        } else {
            Self::default()
        };

        config.validate();
        config
    }

    fn read(path: &Path) -> CalcResult<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| CalcError::Config(e.to_string()))?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate and clamp config values to acceptable ranges
    fn validate(&mut self) {
        self.history.capacity = self.history.capacity.clamp(1, 500);
        self.history.visible = self.history.visible.min(self.history.capacity);
        self.chooser.lines = self.chooser.lines.clamp(1, 50);
        if self.chooser.program.trim().is_empty() {
            self.chooser.program = ChooserConfig::default().program;
        }
        if self.chooser.prompt.is_empty() {
            self.chooser.prompt = ChooserConfig::default().prompt;
        }
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> CalcResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                CalcError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| CalcError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)
            .map_err(|e| CalcError::Config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.chooser.program, "rofi");
        assert_eq!(config.chooser.prompt, "Calc:");
        assert_eq!(config.history.capacity, 20);
        assert_eq!(config.history.visible, 6);
        assert_eq!(config.clipboard.order[0], "wl-copy");
        assert!(config.notifications.enabled);
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[history]\ncapacity = 15\n\n[chooser]\nprogram = \"wofi\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.history.capacity, 15);
        assert_eq!(config.history.visible, 6);
        assert_eq!(config.chooser.program, "wofi");
        assert_eq!(config.chooser.prompt, "Calc:");
    }

    #[test]
    fn test_clamping() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[history]\ncapacity = 0\nvisible = 9\n[chooser]\nlines = 400\n").unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.history.capacity, 1);
        assert_eq!(config.history.visible, 1);
        assert_eq!(config.chooser.lines, 50);
    }

    #[test]
    fn test_bad_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "this is not toml = = =").unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.history.capacity, 20);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        let mut config = Config::default();
        config.chooser.theme = Some("Arc-Dark".into());
        config.history.capacity = 42;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path);
        assert_eq!(loaded.chooser.theme.as_deref(), Some("Arc-Dark"));
        assert_eq!(loaded.history.capacity, 42);
    }

    #[test]
    fn test_history_path() {
        let mut history = HistoryConfig::default();
        assert!(history.resolved_path().ends_with("quickcalc/history"));

        history.path = Some(PathBuf::from("/tmp/calc-history"));
        assert_eq!(history.resolved_path(), PathBuf::from("/tmp/calc-history"));

        history.path = Some(PathBuf::from("~/calc-history"));
        assert!(!history.resolved_path().starts_with("~"));
    }
}
