use crate::domain::prerelease::{PreRelease, PreReleaseType};
use crate::error::VersionError;
use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static VERSION_RGX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        ^\s*v?
        (?:(?P<epoch>[0-9]+)!)?
        (?P<release>[0-9]+(?:\.[0-9]+)*)
        (?:[-_.]?(?P<pre_l>alpha|a|beta|b|preview|pre|c|rc)[-_.]?(?P<pre_n>[0-9]+)?)?
        (?:-(?P<post_n1>[0-9]+)|[-_.]?(?P<post_l>post|rev|r)[-_.]?(?P<post_n2>[0-9]+)?)?
        (?:[-_.]?(?P<dev_l>dev)[-_.]?(?P<dev_n>[0-9]+)?)?
        (?:\+(?P<local>[a-z0-9]+(?:[-_.][a-z0-9]+)*))?
        \s*$",
    )
    .expect("version pattern is valid")
});

/// Dotted-numeric version identifier
///
/// Rendered as `N!R.R.R[{a|b|rc}N][.postN][.devN][+local]`, with the epoch
/// omitted when zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Version {
    pub epoch: u64,
    /// Never empty once parsed
    pub release: Vec<u64>,
    pub pre: Option<PreRelease>,
    pub post: Option<u64>,
    pub dev: Option<u64>,
    pub local: Option<String>,
}

/// Bump policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bump {
    Major,
    Minor,
    Micro,
    Post,
    Date,
}

impl Bump {
    /// Index of the release component incremented by this policy
    fn release_index(self) -> Option<usize> {
        match self {
            Bump::Major => Some(0),
            Bump::Minor => Some(1),
            Bump::Micro => Some(2),
            Bump::Post | Bump::Date => None,
        }
    }
}

impl FromStr for Bump {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, VersionError> {
        match s.to_lowercase().as_str() {
            "major" => Ok(Bump::Major),
            "minor" => Ok(Bump::Minor),
            "micro" | "patch" => Ok(Bump::Micro),
            "post" => Ok(Bump::Post),
            "date" => Ok(Bump::Date),
            _ => Err(VersionError::UnknownBump(s.to_string())),
        }
    }
}

fn parse_number(digits: &str, input: &str) -> Result<u64, VersionError> {
    digits
        .parse::<u64>()
        .map_err(|_| VersionError::InvalidRelease(input.to_string()))
}

impl Version {
    /// Create a final release version from its components
    pub fn new(epoch: u64, release: Vec<u64>) -> Self {
        Version {
            epoch,
            release,
            pre: None,
            post: None,
            dev: None,
            local: None,
        }
    }

    /// Parse a version string
    ///
    /// Accepts the usual spellings of pre, post and dev markers (case
    /// insensitive, optional `-`/`_`/`.` separators, implicit zero numbers)
    /// and an optional leading `v`.
    pub fn parse(s: &str) -> Result<Self, VersionError> {
        let invalid = || VersionError::InvalidRelease(s.to_string());
        let caps = VERSION_RGX.captures(s).ok_or_else(invalid)?;

        let epoch = match caps.name("epoch") {
            Some(m) => parse_number(m.as_str(), s)?,
            None => 0,
        };
        let release = caps
            .name("release")
            .ok_or_else(invalid)?
            .as_str()
            .split('.')
            .map(|part| parse_number(part, s))
            .collect::<Result<Vec<_>, _>>()?;

        let pre = match caps.name("pre_l") {
            Some(label) => {
                let phase: PreReleaseType = label.as_str().parse()?;
                let number = match caps.name("pre_n") {
                    Some(n) => parse_number(n.as_str(), s)?,
                    None => 0,
                };
                Some(PreRelease::new(phase, number))
            }
            None => None,
        };

        let post = match (caps.name("post_n1"), caps.name("post_l")) {
            (Some(n), _) => Some(parse_number(n.as_str(), s)?),
            (None, Some(_)) => match caps.name("post_n2") {
                Some(n) => Some(parse_number(n.as_str(), s)?),
                None => Some(0),
            },
            (None, None) => None,
        };

        let dev = match caps.name("dev_l") {
            Some(_) => match caps.name("dev_n") {
                Some(n) => Some(parse_number(n.as_str(), s)?),
                None => Some(0),
            },
            None => None,
        };

        let local = caps
            .name("local")
            .map(|m| m.as_str().to_lowercase().replace(['-', '_'], "."));

        Ok(Version {
            epoch,
            release,
            pre,
            post,
            dev,
            local,
        })
    }

    /// Whether the version carries an alpha/beta/rc or dev marker
    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some() || self.dev.is_some()
    }

    pub fn is_postrelease(&self) -> bool {
        self.post.is_some()
    }

    /// The epoch and release segments alone, without any markers
    pub fn base_version(&self) -> Version {
        Version::new(self.epoch, self.release.clone())
    }

    /// Bump the version, taking today's local date for [`Bump::Date`]
    pub fn bump(&self, level: Bump) -> Result<Version, VersionError> {
        self.bump_on(level, Local::now().date_naive())
    }

    /// Bump the version, using `today` as the calendar day for [`Bump::Date`]
    ///
    /// Prerelease versions cannot be bumped; finalize them with
    /// [`Version::next_version`] instead.
    pub fn bump_on(&self, level: Bump, today: NaiveDate) -> Result<Version, VersionError> {
        if self.is_prerelease() {
            return Err(VersionError::Prerelease(self.to_string()));
        }
        let bumped = self.advance(level, today)?;
        tracing::debug!(from = %self, to = %bumped, ?level, "bumped version");
        Ok(bumped)
    }

    fn advance(&self, level: Bump, today: NaiveDate) -> Result<Version, VersionError> {
        let overflow = || VersionError::Overflow(self.to_string());
        match level {
            Bump::Post => {
                let mut v = self.base_version();
                v.post = Some(match self.post {
                    Some(p) => p.checked_add(1).ok_or_else(overflow)?,
                    None => 1,
                });
                Ok(v)
            }
            Bump::Date => {
                let mut release = vec![
                    today.year().max(0) as u64,
                    u64::from(today.month()),
                    u64::from(today.day()),
                ];
                if self.release.len() >= 3 && self.release[..3] == release[..] {
                    // Anything past the fourth component is dropped.
                    let seq = match self.release.get(3) {
                        Some(s) => s.checked_add(1).ok_or_else(overflow)?,
                        None => 1,
                    };
                    release.push(seq);
                }
                Ok(Version::new(self.epoch, release))
            }
            Bump::Major | Bump::Minor | Bump::Micro => {
                let idx = level.release_index().unwrap_or_default();
                let mut release = self.release.clone();
                if release.len() < idx + 1 {
                    release.resize(idx + 1, 0);
                }
                release[idx] = release[idx].checked_add(1).ok_or_else(overflow)?;
                for component in release.iter_mut().skip(idx + 1) {
                    *component = 0;
                }
                Ok(Version::new(self.epoch, release))
            }
        }
    }

    /// Compute the version that follows this one
    ///
    /// A prerelease is finalized to its base version; anything else gets a
    /// minor bump.
    pub fn next_version(&self) -> Result<Version, VersionError> {
        self.finalize_or(Bump::Minor)
    }

    /// Like [`Version::next_version`], but advance with a post-release bump
    pub fn next_post_version(&self) -> Result<Version, VersionError> {
        self.finalize_or(Bump::Post)
    }

    fn finalize_or(&self, level: Bump) -> Result<Version, VersionError> {
        if self.is_prerelease() {
            Ok(self.base_version())
        } else {
            self.advance(level, Local::now().date_naive())
        }
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, VersionError> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.epoch != 0 {
            write!(f, "{}!", self.epoch)?;
        }
        let release = self
            .release
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{}", release)?;
        if let Some(pre) = &self.pre {
            write!(f, "{}", pre)?;
        }
        if let Some(post) = self.post {
            write!(f, ".post{}", post)?;
        }
        if let Some(dev) = self.dev {
            write!(f, ".dev{}", dev)?;
        }
        if let Some(local) = &self.local {
            write!(f, "+{}", local)?;
        }
        Ok(())
    }
}
