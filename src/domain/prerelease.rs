//! Pre-release markers for dotted-numeric versions
//!
//! Supports the alpha, beta and release-candidate phases, each followed by a
//! phase number. Alternate spellings are accepted on input and normalized on
//! output (`alpha` -> `a`, `beta` -> `b`, `c`/`pre`/`preview` -> `rc`).

use crate::error::VersionError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Pre-release phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PreReleaseType {
    /// Alpha pre-release
    Alpha,
    /// Beta pre-release
    Beta,
    /// Release candidate
    #[serde(rename = "rc")]
    ReleaseCandidate,
}

impl FromStr for PreReleaseType {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, VersionError> {
        match s.to_lowercase().as_str() {
            "alpha" | "a" => Ok(PreReleaseType::Alpha),
            "beta" | "b" => Ok(PreReleaseType::Beta),
            "rc" | "c" | "pre" | "preview" => Ok(PreReleaseType::ReleaseCandidate),
            _ => Err(VersionError::InvalidRelease(s.to_string())),
        }
    }
}

impl fmt::Display for PreReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreReleaseType::Alpha => write!(f, "a"),
            PreReleaseType::Beta => write!(f, "b"),
            PreReleaseType::ReleaseCandidate => write!(f, "rc"),
        }
    }
}

/// Pre-release marker with its phase number
///
/// A missing number on input is read as zero, so `1.0a` and `1.0a0` are the
/// same version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PreRelease {
    pub phase: PreReleaseType,
    pub number: u64,
}

impl PreRelease {
    pub fn new(phase: PreReleaseType, number: u64) -> Self {
        PreRelease { phase, number }
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.phase, self.number)
    }
}
