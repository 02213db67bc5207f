//! Change-log documents
//!
//! A change-log is free intro text followed by sections, most recent first.
//! Each section is a header line underlined with hyphens:
//!
//! ```text
//! v0.2.0 (in development)
//! -----------------------
//! - Added a thing
//!
//! v0.1.0 (2020-01-01)
//! -------------------
//! Initial release
//! ```
//!
//! Parsing keeps enough of the original text that formatting an unmodified
//! [`Changelog`] reproduces the input byte for byte.

pub mod parser;
pub mod section;

pub use parser::parse_changelog;
pub use section::{is_date_version, ChangelogSection};

use crate::error::ChangelogError;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Changelog {
    /// Text before the first section header, kept verbatim
    pub intro: String,
    /// Index 0 is the most recent section
    pub sections: Vec<ChangelogSection>,
}

impl Changelog {
    pub fn new(intro: impl Into<String>, sections: Vec<ChangelogSection>) -> Self {
        Changelog {
            intro: intro.into(),
            sections,
        }
    }

    /// Parse change-log text
    pub fn load(text: &str) -> Result<Self, ChangelogError> {
        parse_changelog(text)
    }

    /// Render the change-log back to text
    pub fn dump(&self) -> String {
        self.to_string()
    }

    /// The most recent section
    pub fn current(&self) -> Option<&ChangelogSection> {
        self.sections.first()
    }

    pub fn current_mut(&mut self) -> Option<&mut ChangelogSection> {
        self.sections.first_mut()
    }

    /// Open an empty `<version> (in development)` section at the top
    ///
    /// An unversioned "In Development" placeholder at the top is given the
    /// version instead, keeping its content.
    pub fn begin_development(&mut self, version: impl Into<String>) {
        let version = version.into();
        match self.sections.first_mut() {
            Some(top) if top.version().is_none() => {
                top.name_placeholder(version);
                tracing::debug!(header = %top.header(), "versioned development placeholder");
            }
            _ => {
                let section = ChangelogSection::in_development(version, "");
                tracing::debug!(header = %section.header(), "beginning development section");
                self.sections.insert(0, section);
            }
        }
    }

    /// Stamp the most recent section with its release date
    pub fn release(&mut self, date: NaiveDate) -> Result<(), ChangelogError> {
        let current = self
            .current_mut()
            .ok_or(ChangelogError::NoCurrentSection("release"))?;
        current.set_release_date(Some(date))
    }

    /// Separator between sections: one extra blank line when any body has
    /// more than one paragraph
    fn separator(&self) -> &'static str {
        if self.sections.iter().any(|s| s.content().contains("\n\n")) {
            "\n\n\n"
        } else {
            "\n\n"
        }
    }
}

impl FromStr for Changelog {
    type Err = ChangelogError;

    fn from_str(s: &str) -> Result<Self, ChangelogError> {
        Changelog::load(s)
    }
}

impl fmt::Display for Changelog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.intro)?;
        if self.sections.is_empty() {
            return Ok(());
        }
        let sep = self.separator();
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", sep)?;
            }
            write!(f, "{}", section)?;
        }
        writeln!(f)
    }
}
