pub mod changelog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod readme;
pub mod ui;
pub mod version;

pub use changelog::{Changelog, ChangelogSection};
pub use domain::{Bump, Version};
pub use error::{ChangelogError, ReadmeError, RepokitError, Result, VersionError};
pub use readme::{HeaderLink, Image, Readme, Section};
