use crate::access::{AccessGuard, ThrottlePolicy};
use crate::client::SheetRanges;
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

pub mod credentials;

/// Shown instead of the admin secret by `config --print`.
pub const SECRET_MASK: &str = "********";

/// Every field name the config file may carry, used by `config --check`.
pub const FIELDS: [&str; 9] = [
    "workbook",
    "credentials_file",
    "primary_range",
    "archive_range",
    "settings_range",
    "areas",
    "admin_secret",
    "max_login_attempts",
    "login_cooldown_secs",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_workbook")]
    pub workbook: String,
    #[serde(default = "default_credentials_file")]
    pub credentials_file: String,
    #[serde(default = "default_primary_range")]
    pub primary_range: String,
    #[serde(default = "default_archive_range")]
    pub archive_range: String,
    #[serde(default = "default_settings_range")]
    pub settings_range: String,
    #[serde(default = "default_areas")]
    pub areas: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_secret: Option<String>,
    #[serde(default = "default_max_login_attempts")]
    pub max_login_attempts: u32,
    #[serde(default = "default_login_cooldown_secs")]
    pub login_cooldown_secs: u64,
}

fn default_workbook() -> String {
    Config::workbook_file().to_string_lossy().to_string()
}
fn default_credentials_file() -> String {
    "secrets.json".to_string()
}
fn default_primary_range() -> String {
    "Reports!A:E".to_string()
}
fn default_archive_range() -> String {
    "Archive!A:F".to_string()
}
fn default_settings_range() -> String {
    "Settings!A1:B1".to_string()
}
fn default_areas() -> Vec<String> {
    ["Mechanical", "Electronics", "PR", "General"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_max_login_attempts() -> u32 {
    3
}
fn default_login_cooldown_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workbook: default_workbook(),
            credentials_file: default_credentials_file(),
            primary_range: default_primary_range(),
            archive_range: default_archive_range(),
            settings_range: default_settings_range(),
            areas: default_areas(),
            admin_secret: None,
            max_login_attempts: default_max_login_attempts(),
            login_cooldown_secs: default_login_cooldown_secs(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("teamlog")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".teamlog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("teamlog.conf")
    }

    /// Return the default path of the workbook
    pub fn workbook_file() -> PathBuf {
        Self::config_dir().join("teamlog.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            Self::from_yaml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let cfg: Config = serde_yaml::from_str(content)
            .map_err(|e| AppError::Config(format!("cannot parse configuration: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| AppError::Config(format!("cannot serialize configuration: {e}")))
    }

    /// YAML for display, with the admin secret masked.
    pub fn to_masked_yaml(&self) -> AppResult<String> {
        let mut shown = self.clone();
        if shown.admin_secret.is_some() {
            shown.admin_secret = Some(SECRET_MASK.to_string());
        }
        shown.to_yaml()
    }

    fn validate(&self) -> AppResult<()> {
        if self.areas.is_empty() {
            return Err(AppError::Config("`areas` must list at least one area".into()));
        }
        self.ranges()?;
        Ok(())
    }

    /// Fields of [`FIELDS`] missing from a raw config document.
    pub fn missing_fields(content: &str) -> AppResult<Vec<&'static str>> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| AppError::Config(format!("cannot parse configuration: {e}")))?;
        let map = value.as_mapping();

        Ok(FIELDS
            .iter()
            .copied()
            .filter(|f| {
                map.is_none_or(|m| !m.contains_key(serde_yaml::Value::String(f.to_string())))
            })
            // the secret is optional on purpose
            .filter(|f| *f != "admin_secret")
            .collect())
    }

    pub fn ranges(&self) -> AppResult<SheetRanges> {
        SheetRanges::parse(&self.primary_range, &self.archive_range, &self.settings_range)
    }

    pub fn guard(&self) -> AccessGuard {
        AccessGuard::from_sources(
            self.admin_secret.as_deref(),
            ThrottlePolicy {
                max_attempts: self.max_login_attempts,
                cooldown: Duration::from_secs(self.login_cooldown_secs),
            },
        )
    }

    pub fn workbook_path(&self) -> String {
        expand_tilde(&self.workbook).to_string_lossy().to_string()
    }

    /// Case-insensitive lookup of a configured area, returning its canonical
    /// spelling.
    pub fn resolve_area(&self, name: &str) -> AppResult<String> {
        let needle = name.trim().to_lowercase();
        self.areas
            .iter()
            .find(|a| a.to_lowercase() == needle)
            .cloned()
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "unknown area '{}'. Use one of: {}",
                    name,
                    self.areas.join(", ")
                ))
            })
    }

    /// Write the configuration file (skipped in test mode) and make sure the
    /// workbook directory exists.
    pub fn init_all(&self, is_test: bool) -> io::Result<()> {
        if !is_test {
            fs::create_dir_all(Self::config_dir())?;
            let yaml = serde_yaml::to_string(self).map_err(io::Error::other)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = PathBuf::from(self.workbook_path()).parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(())
    }
}
