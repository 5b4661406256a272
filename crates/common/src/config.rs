use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(".")
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        load_env_file();

        Config::builder()
            .add_source(
                File::with_name(
                    path.as_ref()
                        .join("config/default")
                        .to_string_lossy()
                        .as_ref(),
                )
                .required(false),
            )
            .add_source(
                File::with_name(
                    path.as_ref()
                        .join("config/local")
                        .to_string_lossy()
                        .as_ref(),
                )
                .required(false),
            )
            .add_source(Environment::default().separator("__"))
            .build()?
            .try_deserialize()
    }
}

/// Exports `.env` entries into the process environment without overriding
/// variables that are already set. Must run before anything reads the
/// environment, including argument parsing.
pub fn load_env_file() {
    dotenvy::dotenv().ok();
}

/// Like [`load_env_file`] for an explicit file. Returns whether it was read.
pub fn load_env_file_from<P: AsRef<Path>>(path: P) -> bool {
    dotenvy::from_path(path.as_ref()).is_ok()
}

#[derive(Debug, Clone, Deserialize)]
pub struct GithubConfig {
    #[serde(default = "GithubConfig::default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "GithubConfig::default_user_agent")]
    pub user_agent: String,
    #[serde(default = "GithubConfig::default_page_size")]
    pub page_size: u32,
    /// Fallback credential when `GITHUB_TOKEN` is not exported.
    #[serde(default)]
    pub token: Option<String>,
}

impl GithubConfig {
    /// Largest `per_page` the REST API honours.
    pub const MAX_PAGE_SIZE: u32 = 100;

    fn default_api_base_url() -> String {
        "https://api.github.com/".to_string()
    }

    fn default_user_agent() -> String {
        "repo-miner".to_string()
    }

    const fn default_page_size() -> u32 {
        100
    }

    pub fn effective_page_size(&self) -> u32 {
        self.page_size.clamp(1, Self::MAX_PAGE_SIZE)
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base_url: Self::default_api_base_url(),
            user_agent: Self::default_user_agent(),
            page_size: Self::default_page_size(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "ObservabilityConfig::default_log_level")]
    pub log_level: String,
}

impl ObservabilityConfig {
    fn default_log_level() -> String {
        "info".to_string()
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
        }
    }
}
