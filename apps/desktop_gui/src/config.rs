use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use clap::Parser;
use serde::Deserialize;
use url::Url;

const CONFIG_FILE_NAME: &str = "flowpilot.toml";

#[derive(Parser, Debug, Default)]
#[command(name = "flowpilot", about = "Browse workflow definitions and their steps")]
pub struct Args {
    /// Base URL of the workflow backend, e.g. http://127.0.0.1:8001
    #[arg(long)]
    pub api_base_url: Option<String>,
    /// Route to open first (`/`, `/workflows`, `/steps/<id>`)
    #[arg(long)]
    pub start_path: Option<String>,
    /// Settings file; defaults to ./flowpilot.toml, then the user config dir
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub start_path: String,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8001".into(),
            start_path: "/".into(),
            log_level: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    start_path: Option<String>,
    log_level: Option<String>,
}

/// Resolves settings: defaults, then the TOML file, then environment, then
/// command-line flags.
pub fn load_settings(args: &Args) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match &args.config {
        Some(path) => apply_file(&mut settings, path)?,
        None => {
            if let Some(path) = default_config_path() {
                apply_file(&mut settings, &path)?;
            }
        }
    }

    apply_env(&mut settings, |name| std::env::var(name).ok());
    apply_args(&mut settings, args);
    Ok(settings)
}

fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join("flowpilot").join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}

fn apply_file(settings: &mut Settings, path: &Path) -> anyhow::Result<()> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
    let file_cfg: FileSettings = toml::from_str(&raw)
        .with_context(|| format!("invalid settings file '{}'", path.display()))?;

    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = v;
    }
    if let Some(v) = file_cfg.start_path {
        settings.start_path = v;
    }
    if let Some(v) = file_cfg.log_level {
        settings.log_level = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_empty("FLOWPILOT_API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = non_empty("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = non_empty("FLOWPILOT_START_PATH") {
        settings.start_path = v;
    }
    if let Some(v) = non_empty("FLOWPILOT_LOG") {
        settings.log_level = v;
    }
}

fn apply_args(settings: &mut Settings, args: &Args) {
    if let Some(v) = &args.api_base_url {
        settings.api_base_url = v.clone();
    }
    if let Some(v) = &args.start_path {
        settings.start_path = v.clone();
    }
}

pub fn parse_api_base_url(raw: &str) -> anyhow::Result<Url> {
    let raw = raw.trim();
    let url = Url::parse(raw).with_context(|| format!("invalid API base URL '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("API base URL must use http or https, got '{}'", url.scheme());
    }
    Ok(url)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
