use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

const CONFIG_DIR: &str = "tidytask";
const CONFIG_FILE: &str = "config.toml";
const DATA_FILE: &str = "user.json";
const DEFAULT_SHARE_ORIGIN: &str = "https://tidytask.app";

/// CLI configuration loaded from `tidytask/config.toml` under the platform
/// config directory (or an explicit `--config` path).
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Path of the JSON state file.
    #[serde(default)]
    data_file: Option<PathBuf>,
    /// Origin used when building share links.
    #[serde(default)]
    share_origin: Option<String>,
}

impl AppConfig {
    /// Load configuration. An explicit path must exist and parse; the
    /// default location is optional and falls back to defaults when absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let Some(dir) = dirs::config_dir() else {
                    return Ok(Self::default());
                };
                let path = dir.join(CONFIG_DIR).join(CONFIG_FILE);
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Resolve the state file path, preferring an explicit `--data`
    /// override, then the config file, then the platform data directory.
    pub fn data_file(&self, explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        if let Some(path) = &self.data_file {
            return path.clone();
        }
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR)
            .join(DATA_FILE)
    }

    /// Origin for share links.
    pub fn share_origin(&self) -> &str {
        self.share_origin.as_deref().unwrap_or(DEFAULT_SHARE_ORIGIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn explicit_config_is_parsed() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        let mut file = fs::File::create(&path)?;
        writeln!(
            file,
            "data_file = \"/tmp/elsewhere.json\"\nshare_origin = \"https://example.invalid\""
        )?;

        let cfg = AppConfig::load(Some(&path))?;
        assert_eq!(cfg.data_file(None), PathBuf::from("/tmp/elsewhere.json"));
        assert_eq!(cfg.share_origin(), "https://example.invalid");
        Ok(())
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
        let missing = dir.path().join("nope.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn data_override_wins_over_config() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "data_file = \"/tmp/from-config.json\"")?;

        let cfg = AppConfig::load(Some(&path))?;
        let explicit = dir.path().join("override.json");
        assert_eq!(cfg.data_file(Some(&explicit)), explicit);
        Ok(())
    }

    #[test]
    fn defaults_apply_without_a_config_file() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.share_origin(), DEFAULT_SHARE_ORIGIN);
        assert!(cfg.data_file(None).ends_with("tidytask/user.json"));
    }
}
