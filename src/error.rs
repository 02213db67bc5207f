use thiserror::Error;

/// Failures while loading a change-log document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChangelogError {
    #[error("file begins with hrule")]
    BeginsWithHrule,

    #[error("hrule at line {line} has no header line above it")]
    OrphanHrule { line: usize },

    #[error("section header not in recognized format (line {line}): {header:?}")]
    BadHeader { line: usize, header: String },

    #[error("invalid release date in section header (line {line}): {header:?}")]
    BadDate { line: usize, header: String },

    #[error("document is nonempty but lacks any section header")]
    MissingHeaders,

    #[error("a release date requires a version: {0}")]
    DateWithoutVersion(String),

    #[error("changelog has no current section to {0}")]
    NoCurrentSection(&'static str),
}

/// Failures while loading a project-description document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadmeError {
    #[error("expected image or header links, found {0:?}")]
    ExpectedImageOrHeaderLinks(String),

    #[error("invalid header link: {0:?}")]
    InvalidHeaderLink(String),

    #[error("not an image definition: {0:?}")]
    NotAnImage(String),

    #[error("unknown image option: ':{0}:'")]
    UnknownImageOption(String),

    #[error("image has multiple :{0}: options")]
    DuplicateImageOption(String),

    #[error("non-option line in image: {0:?}")]
    NonOptionLine(String),

    #[error("undefined image substitutions: {}", format_tags(.0))]
    UndefinedSubstitutions(Vec<String>),

    #[error("unexpected image substitution: |{0}|")]
    UnexpectedSubstitution(String),

    #[error("badge |{0}| is already defined")]
    DuplicateBadge(String),

    #[error("image |{0}| defined more than once")]
    DuplicateImage(String),

    #[error("badge tag |{0}| declared more than once")]
    DuplicateTag(String),
}

fn format_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|t| format!("|{}|", t))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Failures while parsing or advancing a version identifier
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("cannot bump pre-release version: {0:?}")]
    Prerelease(String),

    #[error("release segment is not a valid dotted-integer sequence: {0:?}")]
    InvalidRelease(String),

    #[error("unknown bump policy: {0:?}")]
    UnknownBump(String),

    #[error("version component overflows: {0:?}")]
    Overflow(String),
}

/// Unified error type for repokit operations
#[derive(Error, Debug)]
pub enum RepokitError {
    #[error("Changelog error: {0}")]
    Changelog(#[from] ChangelogError),

    #[error("README error: {0}")]
    Readme(#[from] ReadmeError),

    #[error("Version error: {0}")]
    Version(#[from] VersionError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in repokit
pub type Result<T> = std::result::Result<T, RepokitError>;

impl RepokitError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        RepokitError::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RepokitError::config("no changelog found");
        assert_eq!(err.to_string(), "Configuration error: no changelog found");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: RepokitError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_component_errors_wrap() {
        let err: RepokitError = ChangelogError::BeginsWithHrule.into();
        assert_eq!(err.to_string(), "Changelog error: file begins with hrule");

        let err: RepokitError = VersionError::Prerelease("1.0.dev1".into()).into();
        assert!(err.to_string().contains("cannot bump pre-release"));

        let err: RepokitError = ReadmeError::UnexpectedSubstitution("pypi".into()).into();
        assert!(err.to_string().starts_with("README error"));
    }

    #[test]
    fn test_undefined_substitutions_lists_every_tag() {
        let err = ReadmeError::UndefinedSubstitutions(vec!["ci".into(), "pypi".into()]);
        assert_eq!(err.to_string(), "undefined image substitutions: |ci| |pypi|");
    }

    #[test]
    fn test_bad_header_carries_context() {
        let err = ChangelogError::BadHeader {
            line: 7,
            header: "Version 1.0".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("section header not in recognized format"));
        assert!(msg.contains("line 7"));
        assert!(msg.contains("Version 1.0"));
    }
}
