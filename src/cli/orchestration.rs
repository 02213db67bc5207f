//! Main workflow orchestration logic
//!
//! Each workflow reads a document in full, transforms it with the pure
//! engine, and writes it back only when every step succeeded. Keeping this
//! apart from `main.rs` lets the workflows run without clap.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, Utc};

use crate::changelog::{Changelog, ChangelogSection};
use crate::config::Config;
use crate::domain::Version;
use crate::error::{RepokitError, Result};
use crate::readme::Readme;

/// Arguments for the begin-dev workflow
#[derive(Debug, Clone, PartialEq)]
pub struct BeginDevArgs {
    /// Version the project is currently at
    pub current_version: String,

    /// Explicit change-log path; otherwise looked up from the config
    pub changelog: Option<PathBuf>,

    /// Directory the config's relative file names are resolved against
    pub project_dir: PathBuf,
}

/// Arguments for the release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseArgs {
    pub changelog: Option<PathBuf>,
    pub project_dir: PathBuf,

    /// Release date; defaults to today
    pub date: Option<NaiveDate>,
}

/// Result of a workflow that rewrote a change-log
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The file that was written
    pub path: PathBuf,

    /// Header of the change-log's top section after the change
    pub header: String,

    /// Version the project moves to, for begin-dev
    pub next_version: Option<String>,
}

/// Today's calendar day, local or UTC per the config
pub fn today(config: &Config) -> NaiveDate {
    if config.version.utc_dates {
        Utc::now().date_naive()
    } else {
        Local::now().date_naive()
    }
}

/// Returns the first of `candidates` that exists under `dir`
pub fn find_document(dir: &Path, candidates: &[String]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

pub fn read_changelog(path: &Path) -> Result<Changelog> {
    let text = fs::read_to_string(path)?;
    Ok(Changelog::load(&text)?)
}

pub fn read_readme(path: &Path) -> Result<Readme> {
    let text = fs::read_to_string(path)?;
    Ok(Readme::load(&text)?)
}

fn write_changelog(path: &Path, changelog: &Changelog) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, changelog.dump())?;
    tracing::info!(path = %path.display(), "wrote changelog");
    Ok(())
}

/// Computes the version that follows `current` under the config's policy
pub fn compute_next_version(current: &str, config: &Config) -> Result<Version> {
    let version = Version::parse(current)?;
    let next = if config.version.post_releases {
        version.next_post_version()?
    } else {
        version.next_version()?
    };
    Ok(next)
}

/// Begin work on the next version
///
/// Opens an in-development section for the next version at the top of the
/// change-log. If the project has no change-log yet, one is created holding
/// that section plus an "Initial release" section for the current version.
pub fn begin_dev(args: &BeginDevArgs, config: &Config) -> Result<WorkflowResult> {
    let current = Version::parse(&args.current_version)?;
    let next = compute_next_version(&args.current_version, config)?;
    let prefix = &config.changelog.version_prefix;
    let next_label = format!("{}{}", prefix, next);

    let existing = match &args.changelog {
        Some(path) => Some(path.clone()),
        None => find_document(&args.project_dir, &config.changelog.files),
    };

    let (path, changelog) = match existing.filter(|p| p.is_file()) {
        Some(path) => {
            let mut changelog = read_changelog(&path)?;
            changelog.begin_development(next_label);
            (path, changelog)
        }
        None => {
            let path = match &args.changelog {
                Some(path) => path.clone(),
                None => {
                    let name = config.changelog.files.first().ok_or_else(|| {
                        RepokitError::config("no change-log file names configured")
                    })?;
                    args.project_dir.join(name)
                }
            };
            let initial = ChangelogSection::released(
                format!("{}{}", prefix, current),
                today(config),
                "Initial release",
            );
            let changelog = Changelog::new(
                config.changelog.initial_intro.clone(),
                vec![ChangelogSection::in_development(next_label, ""), initial],
            );
            (path, changelog)
        }
    };

    write_changelog(&path, &changelog)?;
    Ok(WorkflowResult {
        header: changelog.current().map(|s| s.header()).unwrap_or_default(),
        path,
        next_version: Some(next.to_string()),
    })
}

/// Stamp the change-log's top section with its release date
pub fn release(args: &ReleaseArgs, config: &Config) -> Result<WorkflowResult> {
    let path = match &args.changelog {
        Some(path) => path.clone(),
        None => find_document(&args.project_dir, &config.changelog.files)
            .ok_or_else(|| RepokitError::config("no change-log found"))?,
    };
    let mut changelog = read_changelog(&path)?;
    changelog.release(args.date.unwrap_or_else(|| today(config)))?;
    write_changelog(&path, &changelog)?;
    Ok(WorkflowResult {
        header: changelog.current().map(|s| s.header()).unwrap_or_default(),
        path,
        next_version: None,
    })
}
