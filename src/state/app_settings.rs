use anyhow::Context;
use fpl_api::client::FPL_API_BASE;
use log::{LevelFilter, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "fpltui";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub api_base: String,
    /// Prefix for every request URL, e.g. `https://corsproxy.io/?`.
    pub proxy: String,
    /// Raw identifier as entered; digits only once validated.
    pub team_id: Option<String>,
    pub settings_path: PathBuf,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            api_base: FPL_API_BASE.to_string(),
            proxy: String::new(),
            team_id: None,
            settings_path: PathBuf::from(SETTINGS_FILE),
        }
    }
}

/// On-disk form of the remembered team.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SavedSettings {
    pub fpl_team_id: String,
}

impl AppSettings {
    /// Defaults, then the saved team, then environment overrides.
    pub fn load() -> Self {
        let settings_path = settings_path(
            std::env::var("XDG_CONFIG_HOME").ok().as_deref(),
            std::env::var("HOME").ok().as_deref(),
        );

        let mut settings = Self {
            team_id: load_saved_team(&settings_path),
            settings_path,
            ..Self::default()
        };

        if let Ok(base) = std::env::var("FPLTUI_API_BASE")
            && !base.trim().is_empty()
        {
            settings.api_base = base.trim().to_string();
        }
        if let Ok(proxy) = std::env::var("FPLTUI_PROXY") {
            settings.proxy = proxy.trim().to_string();
        }
        if let Ok(team) = std::env::var("FPLTUI_TEAM_ID")
            && !team.trim().is_empty()
        {
            settings.team_id = Some(team.trim().to_string());
        }
        if let Ok(level) = std::env::var("FPLTUI_LOG") {
            settings.log_level = parse_log_level(&level);
        }

        settings
    }

    pub fn save_team_id(&mut self, team_id: &str) -> anyhow::Result<()> {
        save_team(&self.settings_path, team_id)?;
        self.team_id = Some(team_id.to_string());
        Ok(())
    }
}

pub fn parse_log_level(raw: &str) -> Option<LevelFilter> {
    match raw.trim().parse::<LevelFilter>() {
        Ok(level) => Some(level),
        Err(_) => {
            warn!("ignoring unknown log level {raw:?}");
            None
        }
    }
}

fn settings_path(xdg_config_home: Option<&str>, home: Option<&str>) -> PathBuf {
    if let Some(config_dir) = xdg_config_home
        && !config_dir.trim().is_empty()
    {
        return PathBuf::from(config_dir).join(APP_DIR).join(SETTINGS_FILE);
    }
    if let Some(home) = home
        && !home.trim().is_empty()
    {
        return PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join(SETTINGS_FILE);
    }
    PathBuf::from(SETTINGS_FILE)
}

/// Missing or unreadable file means no saved team.
fn load_saved_team(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str::<SavedSettings>(&content) {
        Ok(saved) => Some(saved.fpl_team_id),
        Err(e) => {
            warn!("ignoring malformed {}: {e}", path.display());
            None
        }
    }
}

fn save_team(path: &Path, team_id: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }
    let payload = serde_json::to_string_pretty(&SavedSettings { fpl_team_id: team_id.to_string() })?;
    std::fs::write(path, payload).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
