//! Command-line host: drives the builder from files instead of a browser.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use crate::collaborators::Collaborators;
use crate::config::Config;
use crate::i18n::{Labels, Locale};
use crate::models::Profile;
use crate::persistence::{codec, FileStore};
use crate::render::preview::QR_BOX;
use crate::render::render_preview;
use crate::routes::{Builder, UiEvent};
use crate::surface::FileSurface;
use crate::validation::validate_profile;

#[derive(Parser)]
#[command(name = "cv-builder")]
#[command(about = "Build, preview and share a CV from structured profile data", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory backing the key-value store (overrides CV_STORAGE_DIR).
    #[arg(long, global = true)]
    pub storage_dir: Option<PathBuf>,

    /// Output directory for previews and downloads (overrides CV_OUT_DIR).
    #[arg(long, global = true)]
    pub out_dir: Option<PathBuf>,

    /// `id` or `en` (overrides CV_LOCALE).
    #[arg(long, global = true)]
    pub locale: Option<Locale>,

    /// Answer yes to confirmation prompts.
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the preview of a profile JSON file.
    Render {
        #[arg(long)]
        input: PathBuf,
        /// Write here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Replay UI events (one JSON object per line) against the stored profile.
    Replay {
        #[arg(long)]
        events: PathBuf,
        /// Page location used at startup, e.g. a share link.
        #[arg(long)]
        location: Option<String>,
    },

    /// Print a share link for a profile JSON file.
    Share {
        #[arg(long)]
        input: PathBuf,
    },

    /// Decode a share link and print the profile.
    Open { link: String },

    /// Print the advisory field checks for a profile JSON file.
    Validate {
        #[arg(long)]
        input: PathBuf,
    },
}

impl Cli {
    /// Command-line flags win over environment configuration.
    pub fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(dir) = &self.storage_dir {
            config.storage_dir = dir.clone();
        }
        if let Some(dir) = &self.out_dir {
            config.out_dir = dir.clone();
        }
        if let Some(locale) = self.locale {
            config.locale = locale;
        }
        if self.yes {
            config.assume_yes = true;
        }
        config
    }
}

pub async fn run(cli: Cli, config: Config) -> Result<()> {
    let config = cli.apply_overrides(config);
    match cli.command {
        Commands::Render { input, out } => render(&config, &input, out.as_deref()).await,
        Commands::Replay { events, location } => {
            replay(config, &events, location.as_deref()).await
        }
        Commands::Share { input } => {
            let profile = read_profile(&input)?;
            println!("{}", codec::share_link(&config.share_base_url, &profile)?);
            Ok(())
        }
        Commands::Open { link } => {
            let Some(param) = codec::share_param_from_location(&link) else {
                bail!("'{link}' has no data parameter");
            };
            let profile = codec::decode_share_param(&param)?;
            println!("{}", codec::to_json_pretty(&profile)?);
            Ok(())
        }
        Commands::Validate { input } => {
            let profile = read_profile(&input)?;
            let issues = validate_profile(&profile, Labels::for_locale(config.locale));
            if issues.is_empty() {
                println!("All checked fields are valid");
            }
            for issue in issues {
                println!("{}: {}", issue.field, issue.message);
            }
            Ok(())
        }
    }
}

fn read_profile(path: &Path) -> Result<Profile> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    codec::from_json(&text).with_context(|| format!("{} is not a profile", path.display()))
}

async fn render(config: &Config, input: &Path, out: Option<&Path>) -> Result<()> {
    let profile = read_profile(input)?;
    let rendered = render_preview(&profile, Labels::for_locale(config.locale));
    let mut html = rendered.html;
    if let Some(target) = rendered.qr_target {
        let qr = Collaborators::builtin().qr.get().await?;
        let markup = qr.render(&target).await?;
        html = html.replace(QR_BOX, &format!(r#"<div id="qrBox">{markup}</div>"#));
    }
    match out {
        Some(path) => {
            fs::write(path, &html).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{html}"),
    }
    Ok(())
}

async fn replay(config: Config, events: &Path, location: Option<&str>) -> Result<()> {
    let text = fs::read_to_string(events)
        .with_context(|| format!("Failed to read {}", events.display()))?;
    let backend = Arc::new(
        FileStore::open(&config.storage_dir)
            .with_context(|| format!("Failed to open {}", config.storage_dir.display()))?,
    );
    let surface = FileSurface::new(config.out_dir.clone(), config.assume_yes);
    let mut builder = Builder::new(config, backend, surface, Collaborators::builtin());

    let source = builder.bootstrap(location).await;
    info!("Replaying {} on a profile from {source:?}", events.display());

    let mut dispatched = 0usize;
    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let event: UiEvent = serde_json::from_str(line)
            .with_context(|| format!("{}:{}: not a UI event", events.display(), n + 1))?;
        builder.dispatch(event).await;
        dispatched += 1;
        if builder.surface_mut().take_reload() {
            // A reload drops the query string.
            builder.bootstrap(None).await;
        }
    }

    if let Err(e) = builder.flush() {
        warn!("Final persist failed: {e}");
    }
    builder.surface().write_snapshot()?;
    println!(
        "Replayed {dispatched} events; output in {}",
        builder.surface().out_dir().display()
    );
    Ok(())
}
