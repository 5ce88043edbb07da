use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::paths;

pub const DEFAULT_API_BASE: &str = "http://localhost:3001";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub http_proxy: String,
    #[serde(default)]
    pub https_proxy: String,
    /// Where the session token and phone number are kept between runs.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

const CONFIG_FILE_PATH: &str = "config.toml";

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            http_proxy: String::new(),
            https_proxy: String::new(),
            data_dir: None,
        }
    }
}

impl Config {
    /// Loads `~/.breakerbot/config.json`, falling back to `./config.toml`,
    /// then applies environment overrides.
    pub fn new() -> Self {
        let mut config =
            Self::load_from(&paths::config_json_path(), Path::new(CONFIG_FILE_PATH));
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    pub fn load_from(json_path: &Path, toml_path: &Path) -> Self {
        if json_path.exists() {
            match std::fs::read_to_string(json_path)
                .map_err(|e| e.to_string())
                .and_then(|content| {
                    serde_json::from_str::<Config>(&content).map_err(|e| e.to_string())
                }) {
                Ok(config) => return config,
                Err(err) => log::warn!("Ignoring {}: {}", json_path.display(), err),
            }
        }

        if toml_path.exists() {
            if let Ok(content) = std::fs::read_to_string(toml_path) {
                match toml::from_str::<Config>(&content) {
                    Ok(config) => return config,
                    Err(err) => log::warn!("Ignoring {}: {}", toml_path.display(), err),
                }
            }
        }

        Config::default()
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_base) = lookup("BREAKERBOT_API_URL").filter(|v| !v.trim().is_empty()) {
            self.api_base = api_base;
        }
        if let Some(http_proxy) = lookup("HTTP_PROXY") {
            self.http_proxy = http_proxy;
        }
        if let Some(https_proxy) = lookup("HTTPS_PROXY") {
            self.https_proxy = https_proxy;
        }
        if let Some(data_dir) = lookup("BREAKERBOT_DATA_DIR").filter(|v| !v.trim().is_empty()) {
            self.data_dir = Some(PathBuf::from(data_dir));
        }
    }

    /// API base without a trailing slash, ready for `format!("{base}{path}")`.
    pub fn api_base(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }

    pub fn session_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(paths::session_dir)
    }
}
