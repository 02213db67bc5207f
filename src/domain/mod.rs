//! Domain logic - version identifiers and their arithmetic

pub mod prerelease;
pub mod version;

pub use prerelease::{PreRelease, PreReleaseType};
pub use version::{Bump, Version};
