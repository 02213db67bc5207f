use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use repokit::cli::orchestration::{self, BeginDevArgs, ReleaseArgs};
use repokit::config;
use repokit::domain::{Bump, Version};
use repokit::ui;

#[derive(Parser)]
#[command(
    name = "repokit",
    version,
    about = "Inspect and update project change-logs, READMEs and versions"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a parsed document as JSON
    Inspect {
        #[arg(value_enum)]
        kind: DocumentKind,
        /// Document path; looked up from the config when omitted
        file: Option<PathBuf>,
    },
    /// Bump a version
    Bump {
        #[arg(value_name = "VERSION")]
        current: String,
        #[arg(short, long, value_enum, default_value = "minor")]
        level: Level,
    },
    /// Print the version that follows the given one
    Next {
        #[arg(value_name = "VERSION")]
        current: String,
        #[arg(long, help = "Advance final releases with a post-release bump")]
        post: bool,
    },
    /// Open an in-development change-log section for the next version
    BeginDev {
        /// The project's current version
        #[arg(value_name = "VERSION")]
        current: String,
        #[arg(long)]
        changelog: Option<PathBuf>,
    },
    /// Stamp the top change-log section with its release date
    Release {
        #[arg(long)]
        changelog: Option<PathBuf>,
        #[arg(long, help = "Release date (YYYY-MM-DD); defaults to today")]
        date: Option<NaiveDate>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DocumentKind {
    Changelog,
    Readme,
}

#[derive(Clone, Copy, ValueEnum)]
enum Level {
    Major,
    Minor,
    Micro,
    Post,
    Date,
}

impl From<Level> for Bump {
    fn from(level: Level) -> Self {
        match level {
            Level::Major => Bump::Major,
            Level::Minor => Bump::Minor,
            Level::Micro => Bump::Micro,
            Level::Post => Bump::Post,
            Level::Date => Bump::Date,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;
    let project_dir = std::env::current_dir()?;

    match args.command {
        Command::Inspect { kind, file } => {
            let candidates = match kind {
                DocumentKind::Changelog => &config.changelog.files,
                DocumentKind::Readme => &config.readme.files,
            };
            let path = match file {
                Some(path) => path,
                None => orchestration::find_document(&project_dir, candidates)
                    .context("No document found; pass a file path")?,
            };
            match kind {
                DocumentKind::Changelog => ui::display_json(&orchestration::read_changelog(&path)?)?,
                DocumentKind::Readme => ui::display_json(&orchestration::read_readme(&path)?)?,
            }
        }
        Command::Bump { current, level } => {
            let v = Version::parse(&current)?;
            let today = orchestration::today(&config);
            let bumped = v.bump_on(level.into(), today)?;
            println!("{}", bumped);
        }
        Command::Next { current, post } => {
            let v = Version::parse(&current)?;
            let next = if post || config.version.post_releases {
                v.next_post_version()?
            } else {
                v.next_version()?
            };
            println!("{}", next);
        }
        Command::BeginDev { current, changelog } => {
            let result = orchestration::begin_dev(
                &BeginDevArgs {
                    current_version: current.clone(),
                    changelog,
                    project_dir,
                },
                &config,
            )?;
            if let Some(next) = &result.next_version {
                ui::display_version_change(&current, next);
            }
            ui::display_success(&format!(
                "Added '{}' to {}",
                result.header,
                result.path.display()
            ));
        }
        Command::Release { changelog, date } => {
            let result = orchestration::release(
                &ReleaseArgs {
                    changelog,
                    project_dir,
                    date,
                },
                &config,
            )?;
            ui::display_success(&format!(
                "Updated {} to '{}'",
                result.path.display(),
                result.header
            ));
        }
    }
    Ok(())
}
