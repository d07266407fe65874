use crate::errors::{AppError, AppResult};
use crate::export::ReportFormat;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub mod migrate;

pub const APP_DIR: &str = ".rworklog";
pub const CONFIG_FILE: &str = "rworklog.conf";
pub const DATABASE_FILE: &str = "rworklog.sqlite";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    /// Where weekly reports go; unset means the Documents directory.
    #[serde(default)]
    pub report_dir: Option<String>,
    #[serde(default)]
    pub report_format: ReportFormat,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_separator_char() -> String {
    "-".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            report_dir: None,
            report_format: ReportFormat::default(),
            separator_char: default_separator_char(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rworklog")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(APP_DIR)
        }
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE)
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join(DATABASE_FILE)
    }

    /// Load configuration from file, or defaults if there is none yet.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "cannot parse configuration");
            AppError::ConfigLoad
        })
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Directory for weekly reports: `report_dir`, else Documents, else home.
    pub fn report_directory(&self) -> PathBuf {
        if let Some(dir) = self.report_dir.as_deref().filter(|d| !d.trim().is_empty()) {
            return crate::utils::path::expand_tilde(dir);
        }
        dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Create the config directory, config file and an empty database file.
    /// Returns the database path.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) if Path::new(name).is_absolute() => PathBuf::from(name),
            Some(name) => dir.join(name),
            None => dir.join(DATABASE_FILE),
        };

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        // test runs never touch the user's config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Config::default()
            };
            fs::write(Self::config_file(), config.to_yaml()?)?;
            tracing::info!(path = %Self::config_file().display(), "configuration written");
        }

        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_get_defaults() {
        let path = env::temp_dir().join("rworklog_partial.conf");
        fs::write(&path, "database: /tmp/x.sqlite\nreport_format: yaml\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert_eq!(cfg.report_format, ReportFormat::Yaml);
        assert_eq!(cfg.separator_char, "-");
        assert_eq!(cfg.log_level, "warn");
        assert!(cfg.report_dir.is_none());
    }

    #[test]
    fn broken_yaml_is_a_load_error() {
        let path = env::temp_dir().join("rworklog_broken.conf");
        fs::write(&path, "database: [unterminated").unwrap();
        assert!(matches!(Config::load_from(&path), Err(AppError::ConfigLoad)));
    }

    #[test]
    fn configured_report_dir_wins() {
        let cfg = Config {
            report_dir: Some("/srv/reports".into()),
            ..Config::default()
        };
        assert_eq!(cfg.report_directory(), PathBuf::from("/srv/reports"));
    }
}
