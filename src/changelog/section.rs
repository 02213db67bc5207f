use crate::error::ChangelogError;
use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

static DATED_HEADER_RGX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<version>\S+)\s+\((?P<date>\d{4}-\d\d-\d\d|in development)\)\s*$")
        .expect("dated header pattern is valid")
});

static DATE_VERSION_RGX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v\d{4}\.\d?\d\.\d?\d$").expect("date version pattern is valid"));

const IN_DEVELOPMENT: &str = "In Development";

/// Whether `version` is a date-encoded label such as `v2021.2.3`
pub fn is_date_version(version: &str) -> bool {
    DATE_VERSION_RGX.is_match(version)
}

/// One section of a change-log
///
/// A section without a version is the "In Development" placeholder and never
/// carries a release date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangelogSection {
    version: Option<String>,
    release_date: Option<NaiveDate>,
    content: String,
}

impl ChangelogSection {
    /// Create a section, checking that a release date comes with a version
    pub fn new(
        version: Option<String>,
        release_date: Option<NaiveDate>,
        content: impl Into<String>,
    ) -> Result<Self, ChangelogError> {
        if version.is_none() {
            if let Some(date) = release_date {
                return Err(ChangelogError::DateWithoutVersion(date.to_string()));
            }
        }
        Ok(ChangelogSection {
            version,
            release_date,
            content: trim_newlines(content.into()),
        })
    }

    pub fn released(version: impl Into<String>, date: NaiveDate, content: impl Into<String>) -> Self {
        ChangelogSection {
            version: Some(version.into()),
            release_date: Some(date),
            content: trim_newlines(content.into()),
        }
    }

    pub fn in_development(version: impl Into<String>, content: impl Into<String>) -> Self {
        ChangelogSection {
            version: Some(version.into()),
            release_date: None,
            content: trim_newlines(content.into()),
        }
    }

    /// The bare "In Development" placeholder
    pub fn unreleased(content: impl Into<String>) -> Self {
        ChangelogSection {
            version: None,
            release_date: None,
            content: trim_newlines(content.into()),
        }
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// `None` means "in development"
    pub fn release_date(&self) -> Option<NaiveDate> {
        self.release_date
    }

    /// Body text, without trailing newlines
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_version(&mut self, version: Option<String>) -> Result<(), ChangelogError> {
        if version.is_none() {
            if let Some(date) = self.release_date {
                return Err(ChangelogError::DateWithoutVersion(date.to_string()));
            }
        }
        self.version = version;
        Ok(())
    }

    pub fn set_release_date(&mut self, date: Option<NaiveDate>) -> Result<(), ChangelogError> {
        if self.version.is_none() {
            if let Some(date) = date {
                return Err(ChangelogError::DateWithoutVersion(date.to_string()));
            }
        }
        self.release_date = date;
        Ok(())
    }

    /// Give a section a version while leaving it in development
    pub(crate) fn name_placeholder(&mut self, version: String) {
        self.version = Some(version);
        self.release_date = None;
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = trim_newlines(content.into());
    }

    pub(crate) fn push_content(&mut self, text: &str) {
        self.content.push_str(text);
    }

    pub(crate) fn end(&mut self) {
        let trimmed = self.content.trim_end_matches(['\r', '\n']).len();
        self.content.truncate(trimmed);
    }

    /// Parse a header line (the line directly above an hrule)
    ///
    /// `line_no` is only used for error context.
    pub fn parse_header(header: &str, line_no: usize) -> Result<Self, ChangelogError> {
        if let Some(caps) = DATED_HEADER_RGX.captures(header) {
            let version = caps["version"].to_string();
            let date = &caps["date"];
            let release_date = if date.eq_ignore_ascii_case("in development") {
                None
            } else {
                Some(date.parse::<NaiveDate>().map_err(|_| ChangelogError::BadDate {
                    line: line_no,
                    header: header.trim_end().to_string(),
                })?)
            };
            return Ok(ChangelogSection {
                version: Some(version),
                release_date,
                content: String::new(),
            });
        }

        let trimmed = header.trim_end();
        if is_date_version(trimmed) {
            let date = NaiveDate::parse_from_str(trimmed, "v%Y.%m.%d").map_err(|_| {
                ChangelogError::BadDate {
                    line: line_no,
                    header: trimmed.to_string(),
                }
            })?;
            return Ok(ChangelogSection::released(trimmed, date, ""));
        }

        if header.trim().eq_ignore_ascii_case(IN_DEVELOPMENT) {
            return Ok(ChangelogSection::unreleased(""));
        }

        Err(ChangelogError::BadHeader {
            line: line_no,
            header: header.trim_end().to_string(),
        })
    }

    /// The header line as it is rendered
    pub fn header(&self) -> String {
        match &self.version {
            None => IN_DEVELOPMENT.to_string(),
            Some(version) if is_date_version(version) => version.clone(),
            Some(version) => match self.release_date {
                Some(date) => format!("{} ({})", version, date.format("%Y-%m-%d")),
                None => format!("{} (in development)", version),
            },
        }
    }
}

fn trim_newlines(mut s: String) -> String {
    let trimmed = s.trim_end_matches(['\r', '\n']).len();
    s.truncate(trimmed);
    s
}

impl fmt::Display for ChangelogSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = self.header();
        write!(f, "{}\n{}", header, "-".repeat(header.chars().count()))?;
        if !self.content.is_empty() {
            write!(f, "\n{}", self.content)?;
        }
        Ok(())
    }
}
