use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod migrate; // use submodule at src/config/migrate.rs

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_employee")]
    pub default_employee: String,
    /// IANA name of the zone calendar days are cut in.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub intensive_schedules: Vec<IntensiveScheduleConfig>,
}

/// Regular weekly schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_expected_minutes")]
    pub expected_minutes: u32,
    /// ISO weekdays (1 = Monday … 7 = Sunday) with expected work.
    #[serde(default = "default_workdays")]
    pub workdays: Vec<u32>,
    #[serde(default)]
    pub paid_breaks: Vec<PaidBreakConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaidBreakConfig {
    pub id: String,
    /// "HH:MM"
    pub start: String,
    /// "HH:MM"
    pub end: String,
    #[serde(default)]
    pub automatic: bool,
}

/// Schedule overriding the regular one between two month-days (e.g. summer hours).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntensiveScheduleConfig {
    pub name: String,
    /// "MM-DD", inclusive
    pub from: String,
    /// "MM-DD", inclusive; may be earlier than `from` to wrap the new year
    pub to: String,
    pub expected_minutes: u32,
    #[serde(default)]
    pub paid_breaks: Vec<PaidBreakConfig>,
}

fn default_employee() -> String {
    "default".to_string()
}
fn default_timezone() -> String {
    "UTC".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}
fn default_separator_char() -> String {
    "-".to_string()
}
fn default_expected_minutes() -> u32 {
    480
}
fn default_workdays() -> Vec<u32> {
    vec![1, 2, 3, 4, 5]
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            expected_minutes: default_expected_minutes(),
            workdays: default_workdays(),
            paid_breaks: Vec::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            default_employee: default_employee(),
            timezone: default_timezone(),
            log_level: default_log_level(),
            separator_char: default_separator_char(),
            schedule: ScheduleConfig::default(),
            intensive_schedules: Vec::new(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rtimeclock")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rtimeclock")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rtimeclock.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rtimeclock.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        cfg.tz()?;
        Ok(cfg)
    }

    /// Parsed timezone used to cut calendar days.
    pub fn tz(&self) -> AppResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| AppError::InvalidTimezone(self.timezone.clone()))
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_name {
            Some(name) => {
                let p = crate::utils::path::expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => dir.join("rtimeclock.sqlite"),
        };

        // Write config file
        if !is_test {
            let config = Self::with_database(db_path.clone());
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file()).map_err(|_| AppError::ConfigSave)?;
            file.write_all(yaml.as_bytes())?;
            success(format!("Config file: {:?}", Self::config_file()));
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        success(format!("Database:    {:?}", db_path));

        Ok(db_path)
    }

    /// First character of `separator_char`, used for table rules.
    pub fn separator(&self) -> char {
        self.separator_char.chars().next().unwrap_or('-')
    }
}
