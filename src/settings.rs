use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Show extracted notices and the count badge. Off: the raw fallback is shown as is.
    pub nice_display: bool,
    /// css expression replacing the default notice selection
    pub selector: Option<String>,
    pub database: Option<PathBuf>,
    /// Raw output displayed when nice display is off.
    pub fallback: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            nice_display: true,
            selector: None,
            database: None,
            fallback: String::new(),
        }
    }
}

impl Settings {
    /// Missing file means defaults. Env wins over the file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut settings = if path.exists() {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str::<Self>(&raw)
                .with_context(|| format!("parsing {}", path.display()))?
        } else {
            tracing::debug!("{} not found, using defaults", path.display());
            Self::default()
        };
        settings.apply_env()?;
        Ok(settings)
    }

    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(value) = env::var("UNAGI_NICE_DISPLAY") {
            self.nice_display = parse_flag(&value)
                .with_context(|| "UNAGI_NICE_DISPLAY".to_owned())?;
        }
        if let Ok(value) = env::var("UNAGI_SELECTOR") {
            self.selector = Some(value).filter(|v| !v.trim().is_empty());
        }
        if let Ok(value) = env::var("UNAGI_DATABASE") {
            self.database = Some(value.into());
        }
        Ok(())
    }

    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database {
            Some(path) => Ok(path.clone()),
            None => Ok(config_dir()?.join("notifications.db")),
        }
    }
}

pub fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("not a flag: {other}"),
    }
}

/// `$HOME/.config/unagi`, created if missing.
pub fn config_dir() -> Result<PathBuf> {
    let home = env::var("HOME").context("HOME is not set")?;
    let config_dir: PathBuf = (home + "/.config/unagi").into();

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)
            .with_context(|| format!("creating {}", config_dir.display()))?;
    }
    Ok(config_dir)
}
