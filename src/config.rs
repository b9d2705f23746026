use crate::error::{Result, SchoolSearchError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 接続先を上書きする環境変数
pub const BASE_URL_ENV: &str = "SCHOOL_SEARCH_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    /// 州フィルタの既定値（NSW など）
    pub default_state: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            default_state: None,
            timeout_seconds: 30,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// ファイルがなければ既定値
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SchoolSearchError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("school-search").join("config.json"))
    }

    /// 接続先の決定（CLI引数 > 環境変数 > 設定ファイル）
    pub fn resolve_base_url(&self, cli_override: Option<&str>) -> String {
        if let Some(url) = cli_override.filter(|u| !u.trim().is_empty()) {
            return url.trim().to_string();
        }
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                return url.trim().to_string();
            }
        }
        self.base_url.clone()
    }

    /// 州フィルタの決定（CLI引数 > 設定ファイル）
    pub fn resolve_state(&self, cli_override: Option<&str>) -> Option<String> {
        cli_override
            .map(str::to_string)
            .or_else(|| self.default_state.clone())
    }

    pub fn set_base_url(&mut self, url: String) -> Result<()> {
        let url = url.trim().trim_end_matches('/').to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(SchoolSearchError::Config(format!(
                "base_url は http:// または https:// で始めてください: {}",
                url
            )));
        }
        self.base_url = url;
        Ok(())
    }

    pub fn set_default_state(&mut self, state: Option<String>) {
        self.default_state = state
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty());
    }
}
