use crate::fetch::FetchOptions;
use crate::formula::DEFAULT_BASE_URL;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Global configuration loaded from `~/.config/relay-formula/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormulaConfig {
    /// Directory the binary is installed into. None = `~/.local/bin`.
    #[serde(default)]
    pub bin_dir: Option<PathBuf>,
    /// Release download prefix; `<base_url>/<version>/<asset>`.
    pub base_url: String,
    /// Seconds allowed for the TCP/TLS connect.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for the whole archive transfer.
    pub timeout_secs: u64,
    /// Redirect hops followed before giving up.
    pub max_redirections: u32,
    /// Optional User-Agent override.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for FormulaConfig {
    fn default() -> Self {
        Self {
            bin_dir: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: 15,
            timeout_secs: 600,
            max_redirections: 10,
            user_agent: None,
        }
    }
}

impl FormulaConfig {
    pub fn fetch_options(&self) -> FetchOptions {
        let mut opts = FetchOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.timeout_secs),
            max_redirections: self.max_redirections,
            ..FetchOptions::default()
        };
        if let Some(ua) = &self.user_agent {
            opts.user_agent = ua.clone();
        }
        opts
    }

    /// Configured bin dir, else `$HOME/.local/bin`.
    pub fn resolve_bin_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.bin_dir {
            return Ok(dir.clone());
        }
        let home = std::env::var_os("HOME").context("HOME is not set; pass --bin-dir")?;
        Ok(Path::new(&home).join(".local").join("bin"))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("relay-formula")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FormulaConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<FormulaConfig> {
    if !path.exists() {
        let default_cfg = FormulaConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: FormulaConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
