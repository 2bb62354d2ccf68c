use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::domain::entities::entity::EntityKind;
use crate::error::ConfigError;
use crate::ui::list_view::controller::CountMarker;
use crate::ui::list_view::info::ListLabels;

pub const ENV_PREFIX: &str = "ENTITY_CONSOLE_";

/// Settings handed to the root component and shared through context.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ConsoleConfig {
    pub namespace: String,
    /// Number of selectable entity categories; selecting this many counts
    /// as selecting all of them.
    pub category_count: usize,
    pub search_debounce_ms: u64,
    pub page_size: usize,
    pub count_marker: CountMarker,
    pub seed_csv: Option<PathBuf>,
    pub log_level: String,
    pub labels: ListLabels,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            namespace: Self::NAMESPACE.to_string(),
            category_count: Self::CATEGORY_COUNT,
            search_debounce_ms: Self::SEARCH_DEBOUNCE_MS,
            page_size: Self::PAGE_SIZE,
            count_marker: CountMarker::Always,
            seed_csv: None,
            log_level: Self::LOG_LEVEL.to_string(),
            labels: ListLabels::default(),
        }
    }
}

impl ConsoleConfig {
    const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
    const NAMESPACE: &str = "default";
    const CATEGORY_COUNT: usize = EntityKind::ALL.len();
    const SEARCH_DEBOUNCE_MS: u64 = 500;
    const PAGE_SIZE: usize = 10;
    const LOG_LEVEL: &str = "info";

    pub fn figment(config_path: &Path) -> Figment {
        Figment::from(Serialized::defaults(ConsoleConfig::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Reads defaults, then `config_path`, then the environment. Returns
    /// the config with invalid values reset, plus a note for each reset.
    pub fn from_path(config_path: &Path) -> Result<(Self, Vec<String>), ConfigError> {
        let mut config: ConsoleConfig = Self::figment(config_path)
            .extract()
            .map_err(Box::new)?;
        let notes = config.ensure_valid();
        Ok((config, notes))
    }

    /// Loads `config.toml` from the platform config directory, writing the
    /// defaults there first if the file does not exist. Never fails: any
    /// problem is reported in the returned notes and defaults are used.
    pub fn load(project_dirs: &ProjectDirs) -> (Self, Vec<String>) {
        let config_path = project_dirs.config_dir().join("config.toml");
        let mut notes = Vec::new();

        if !config_path.exists() {
            if let Err(err) = write_default(&config_path) {
                notes.push(format!(
                    "Failed to write default config to {}: {err}",
                    config_path.display()
                ));
            }
        }

        match Self::from_path(&config_path) {
            Ok((config, mut validation)) => {
                notes.append(&mut validation);
                (config, notes)
            }
            Err(err) => {
                notes.push(format!(
                    "Could not load config file {}: {err}. Using default configuration.",
                    config_path.display()
                ));
                (ConsoleConfig::default(), notes)
            }
        }
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn level(&self) -> dioxus::logger::tracing::Level {
        self.log_level
            .parse()
            .unwrap_or(dioxus::logger::tracing::Level::INFO)
    }

    fn ensure_valid(&mut self) -> Vec<String> {
        let mut notes = Vec::new();

        let original = self.log_level.clone();
        self.log_level = self.log_level.trim().to_ascii_lowercase();
        if !Self::LOG_LEVELS.contains(&self.log_level.as_str()) {
            notes.push(format!(
                "log level of '{original}' is invalid - using default of '{}'",
                Self::LOG_LEVEL
            ));
            self.log_level = Self::LOG_LEVEL.to_owned();
        }

        if self.category_count == 0 {
            notes.push(format!(
                "category_count must be at least 1 - using default of {}",
                Self::CATEGORY_COUNT
            ));
            self.category_count = Self::CATEGORY_COUNT;
        } else if self.category_count != Self::CATEGORY_COUNT {
            notes.push(format!(
                "category_count of {} does not match the {} entity kinds - using {}",
                self.category_count,
                Self::CATEGORY_COUNT,
                Self::CATEGORY_COUNT
            ));
            self.category_count = Self::CATEGORY_COUNT;
        }

        if self.page_size == 0 {
            notes.push(format!(
                "page_size must be at least 1 - using default of {}",
                Self::PAGE_SIZE
            ));
            self.page_size = Self::PAGE_SIZE;
        }

        if self.namespace.trim().is_empty() {
            notes.push(format!(
                "namespace is empty - using default of '{}'",
                Self::NAMESPACE
            ));
            self.namespace = Self::NAMESPACE.to_owned();
        }

        notes
    }
}

pub fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("com", "entity-console", "entity-console").ok_or(ConfigError::NoProjectDirs)
}

pub fn default_db_path(project_dirs: &ProjectDirs) -> PathBuf {
    project_dirs.data_local_dir().join("entities.sqlite")
}

fn write_default(config_path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let toml_string = toml::to_string_pretty(&ConsoleConfig::default())
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    fs::write(config_path, toml_string)?;
    Ok(())
}
