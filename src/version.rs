//! String-level version helpers.
//!
//! Thin wrappers over [`crate::domain::Version`] for callers that read and
//! write version strings straight from project metadata.

use crate::domain::{Bump, Version};
use crate::error::VersionError;

/// Builds a final or post-release version string from its parts.
///
/// # Example
/// ```ignore
/// assert_eq!(mkversion(&[1, 2, 3], 0, None), "1.2.3");
/// assert_eq!(mkversion(&[1, 2, 3], 2, Some(3)), "2!1.2.3.post3");
/// ```
pub fn mkversion(release: &[u64], epoch: u64, post: Option<u64>) -> String {
    let mut v = Version::new(epoch, release.to_vec());
    v.post = post;
    v.to_string()
}

/// Parses `v` and bumps it according to `level`.
///
/// # Returns
/// * `Ok(String)` - The bumped version, rendered in normalized form
/// * `Err` - If `v` is not a valid version or is a prerelease
pub fn bump_version(v: &str, level: Bump) -> Result<String, VersionError> {
    Ok(Version::parse(v)?.bump(level)?.to_string())
}

/// Computes the version that follows `v`.
///
/// If `v` is a prerelease the base version is returned; otherwise the next
/// minor version.
pub fn next_version(v: &str) -> Result<String, VersionError> {
    Ok(Version::parse(v)?.next_version()?.to_string())
}

/// Like [`next_version`], but advances a final release to its next
/// post-release.
pub fn next_post_version(v: &str) -> Result<String, VersionError> {
    Ok(Version::parse(v)?.next_post_version()?.to_string())
}
