use std::{
    env::{self, VarError},
    fs::File,
    path::{Path, PathBuf},
    time::Duration,
};

use platform_dirs::AppDirs;
use serde::{Deserialize, Serialize};

use crate::{
    carousel::{DEFAULT_INTERVAL, MIN_INTERVAL}, course::COURSES_COLLECTION, error::Error,
    paging::DEFAULT_PAGE_SIZE, store::FirestoreConfig,
};

const APP_NAME: &str = "CodeWise";
const CONFIG_FILENAME: &str = "config.json";
const PROXY_ENV_VAR: &str = "HTTPS_PROXY";
const PROJECT_ENV_VAR: &str = "CODEWISE_PROJECT_ID";
const API_KEY_ENV_VAR: &str = "CODEWISE_API_KEY";
const BEARER_ENV_VAR: &str = "CODEWISE_BEARER_TOKEN";

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project_id: String,
    pub database: String,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub bearer_token: Option<String>,
    pub collection: String,
    pub page_size: usize,
    pub carousel_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            database: "(default)".to_string(),
            endpoint: None,
            api_key: None,
            bearer_token: None,
            collection: COURSES_COLLECTION.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            carousel_interval_ms: DEFAULT_INTERVAL.as_millis() as u64,
        }
    }
}

impl Config {
    fn app_dirs() -> Option<AppDirs> {
        const USE_XDG_ON_MACOS: bool = false;

        AppDirs::new(Some(APP_NAME), USE_XDG_ON_MACOS)
    }

    pub fn config_dir() -> Option<PathBuf> {
        Self::app_dirs().map(|dirs| dirs.config_dir)
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(CONFIG_FILENAME))
    }

    /// Load the config file from the platform config directory, falling
    /// back to defaults when it does not exist, then apply the environment.
    pub fn load() -> Result<Config, Error> {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?.unwrap_or_default(),
            None => {
                log::warn!("no config directory on this platform, using defaults");
                Config::default()
            }
        };
        config.apply_env(|key| env::var(key));
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Option<Config>, Error> {
        match File::open(path) {
            Ok(file) => {
                log::info!("loading config: {:?}", path);
                serde_json::from_reader(file)
                    .map(Some)
                    .map_err(|err| Error::ConfigError(format!("{}: {}", path.display(), err)))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Result<String, VarError>) {
        let lookup = |key: &str| match var(key) {
            Ok(value) if !value.is_empty() => Some(value),
            Ok(_) | Err(VarError::NotPresent) => None,
            Err(VarError::NotUnicode(_)) => {
                log::error!("{} is not valid unicode", key);
                None
            }
        };
        if let Some(project_id) = lookup(PROJECT_ENV_VAR) {
            self.project_id = project_id;
        }
        if let Some(api_key) = lookup(API_KEY_ENV_VAR) {
            self.api_key = Some(api_key);
        }
        if let Some(token) = lookup(BEARER_ENV_VAR) {
            self.bearer_token = Some(token);
        }
    }

    pub fn proxy() -> Option<String> {
        env::var(PROXY_ENV_VAR).map_or_else(
            |err| match err {
                VarError::NotPresent => None,
                VarError::NotUnicode(_) => {
                    log::error!("proxy URL is not a valid unicode");
                    None
                }
            },
            Some,
        )
    }

    pub fn carousel_interval(&self) -> Duration {
        Duration::from_millis(self.carousel_interval_ms).max(MIN_INTERVAL)
    }

    pub fn firestore(&self) -> Result<FirestoreConfig, Error> {
        if self.project_id.is_empty() {
            return Err(Error::ConfigError(format!(
                "missing project id, set it in {} or {}",
                CONFIG_FILENAME, PROJECT_ENV_VAR
            )));
        }
        let mut firestore = FirestoreConfig::new(&self.project_id);
        firestore.database = self.database.clone();
        if let Some(endpoint) = &self.endpoint {
            firestore.endpoint = endpoint.clone();
        }
        firestore.api_key = self.api_key.clone();
        firestore.bearer_token = self.bearer_token.clone();
        firestore.proxy_url = Self::proxy();
        Ok(firestore)
    }
}
