//! App configuration: optional RON file, then environment, then CLI flags.
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use otbozor_client::{ClientSettings, DEFAULT_API_URL};
use serde::{Deserialize, Serialize};

use super::cli::Cli;
use super::logging::LogDestination;

pub const DEFAULT_CONFIG_FILE: &str = "otbozor.ron";
const API_URL_VARS: [&str; 2] = ["OTBOZOR_API_URL", "NEXT_PUBLIC_API_URL"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub log_destination: LogDestination,
    pub state_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            log_destination: LogDestination::File,
            state_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..ClientSettings::with_base_url(self.api_url.clone())
        }
    }
}

/// Reads `path`, or `./otbozor.ron` if it exists. An explicit path must exist.
pub fn load_file(path: Option<&Path>) -> Result<AppConfig> {
    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    if !required && !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = fs::read_to_string(&path)
        .with_context(|| format!("reading config {}", path.display()))?;
    ron::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

/// Applies environment and flag overrides on top of the file config.
pub fn resolve(
    mut config: AppConfig,
    cli: &Cli,
    env: impl Fn(&str) -> Option<String>,
) -> AppConfig {
    if let Some(url) = API_URL_VARS
        .iter()
        .filter_map(|name| env(name))
        .find(|value| !value.trim().is_empty())
    {
        config.api_url = url;
    }
    if let Some(url) = &cli.api_url {
        config.api_url = url.clone();
    }
    if let Some(dir) = &cli.state_dir {
        config.state_dir = dir.clone();
    }
    if let Some(destination) = cli.log {
        config.log_destination = destination;
    }
    config.api_url = config.api_url.trim().trim_end_matches('/').to_string();
    config
}

pub fn load(cli: &Cli) -> Result<AppConfig> {
    let file = load_file(cli.config.as_deref())?;
    Ok(resolve(file, cli, |name| std::env::var(name).ok()))
}
