use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::i18n::Locale;
use crate::persistence::scheduler::DEFAULT_DEBOUNCE;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory backing the key-value store.
    pub storage_dir: PathBuf,
    /// Where previews and downloads are written.
    pub out_dir: PathBuf,
    pub persist_debounce: Duration,
    pub locale: Locale,
    /// Page URL share links are built on when no location is known.
    pub share_base_url: String,
    pub photo_max_side: u32,
    pub photo_quality: f32,
    /// Answer to confirmation prompts when running headless.
    pub assume_yes: bool,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".cv-builder/storage"),
            out_dir: PathBuf::from(".cv-builder/out"),
            persist_debounce: DEFAULT_DEBOUNCE,
            locale: Locale::Id,
            share_base_url: "http://localhost/index.html".to_string(),
            photo_max_side: 512,
            photo_quality: 0.85,
            assume_yes: false,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            storage_dir: optional_env("CV_STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_dir),
            out_dir: optional_env("CV_OUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.out_dir),
            persist_debounce: parse_env::<u64>("CV_PERSIST_DEBOUNCE_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.persist_debounce),
            locale: parse_env("CV_LOCALE")?.unwrap_or(defaults.locale),
            share_base_url: optional_env("CV_SHARE_BASE_URL").unwrap_or(defaults.share_base_url),
            photo_max_side: parse_env("CV_PHOTO_MAX_SIDE")?.unwrap_or(defaults.photo_max_side),
            photo_quality: parse_env::<f32>("CV_PHOTO_QUALITY")?
                .filter(|q| (0.0..=1.0).contains(q))
                .unwrap_or(defaults.photo_quality),
            assume_yes: parse_env("CV_ASSUME_YES")?.unwrap_or(defaults.assume_yes),
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    optional_env(key)
        .map(|v| {
            v.trim()
                .parse::<T>()
                .with_context(|| format!("Environment variable '{key}' has an invalid value '{v}'"))
        })
        .transpose()
}
