use crate::error::ReadmeError;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// A simple reference name; substitution text may be more general than
/// this, but only this form is supported.
pub const SUBST_TEXT_RGX: &str = r"[A-Za-z0-9](?:[-_.:+]?[A-Za-z0-9])*";

pub(crate) static IMAGE_START_RGX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?m)\A\.\. \|(?P<tag>{})\| image:: (?P<href>\S+)$",
        SUBST_TEXT_RGX
    ))
    .expect("image pattern is valid")
});

static OPTION_RGX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*:(\w+):\s*").expect("option pattern is valid"));

/// An image substitution definition
///
/// ```text
/// .. |pypi| image:: https://img.shields.io/pypi/v/foo.svg
///     :target: https://pypi.org/project/foo
///     :alt: Latest Version
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub tag: String,
    pub href: String,
    pub target: Option<String>,
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageOption {
    Target,
    Alt,
}

impl ImageOption {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "target" => Some(ImageOption::Target),
            "alt" => Some(ImageOption::Alt),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            ImageOption::Target => "target",
            ImageOption::Alt => "alt",
        }
    }
}

impl Image {
    pub fn new(tag: impl Into<String>, href: impl Into<String>) -> Self {
        Image {
            tag: tag.into(),
            href: href.into(),
            target: None,
            alt: None,
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    /// Whether `para` opens with an image definition line
    pub fn is_image_start(para: &str) -> bool {
        IMAGE_START_RGX.is_match(para)
    }

    /// Parse an image definition paragraph
    ///
    /// Lines after the first are `:name: value` options or continuation
    /// lines of the option opened most recently.
    pub fn parse(para: &str) -> Result<Self, ReadmeError> {
        let caps = IMAGE_START_RGX
            .captures(para)
            .ok_or_else(|| ReadmeError::NotAnImage(para.to_string()))?;
        let mut image = Image::new(&caps["tag"], &caps["href"]);

        let mut open: Option<(ImageOption, String)> = None;
        for line in para.split_inclusive('\n').skip(1) {
            if let Some(m) = OPTION_RGX.captures(line) {
                let name = &m[1];
                let option = ImageOption::from_name(name)
                    .ok_or_else(|| ReadmeError::UnknownImageOption(name.to_string()))?;
                let already_set = image.option(option).is_some()
                    || open.as_ref().is_some_and(|(o, _)| *o == option);
                if already_set {
                    return Err(ReadmeError::DuplicateImageOption(option.name().to_string()));
                }
                if let Some((prev, value)) = open.take() {
                    image.set_option(prev, value);
                }
                let value_start = m.get(0).map_or(0, |whole| whole.end());
                open = Some((option, line[value_start..].to_string()));
            } else if let Some((_, value)) = open.as_mut() {
                value.push_str(line);
            } else if !line.trim().is_empty() {
                return Err(ReadmeError::NonOptionLine(line.to_string()));
            }
        }
        if let Some((option, value)) = open {
            image.set_option(option, value);
        }
        Ok(image)
    }

    fn option(&self, option: ImageOption) -> Option<&str> {
        match option {
            ImageOption::Target => self.target.as_deref(),
            ImageOption::Alt => self.alt.as_deref(),
        }
    }

    fn set_option(&mut self, option: ImageOption, value: String) {
        let value = Some(value.trim_end().to_string());
        match option {
            ImageOption::Target => self.target = value,
            ImageOption::Alt => self.alt = value,
        }
    }
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".. |{}| image:: {}", self.tag, self.href)?;
        if let Some(target) = &self.target {
            write!(f, "\n    :target: {}", target)?;
        }
        if let Some(alt) = &self.alt {
            write!(f, "\n    :alt: {}", alt)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_image() {
        let img = Image::parse(
            ".. |ci| image:: https://ci.example/badge.svg\n    :target: https://ci.example\n    :alt: CI Status\n\n",
        )
        .unwrap();
        assert_eq!(
            img,
            Image::new("ci", "https://ci.example/badge.svg")
                .with_target("https://ci.example")
                .with_alt("CI Status")
        );
    }

    #[test]
    fn test_parse_bare_image() {
        let img = Image::parse(".. |license| image:: license.svg\n").unwrap();
        assert_eq!(img.target, None);
        assert_eq!(img.alt, None);
    }

    #[test]
    fn test_parse_continuation_lines() {
        let text = ".. |status| image:: status.svg\n    :alt: Project Status: Active -- The project\n      is usable\n    :target: https://example.com\n";
        let img = Image::parse(text).unwrap();
        assert_eq!(
            img.alt.as_deref(),
            Some("Project Status: Active -- The project\n      is usable")
        );
        assert_eq!(img.target.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_parse_unknown_option() {
        let err = Image::parse(".. |x| image:: x.svg\n    :width: 100\n").unwrap_err();
        assert_eq!(err.to_string(), "unknown image option: ':width:'");
    }

    #[test]
    fn test_parse_duplicate_option() {
        let err =
            Image::parse(".. |x| image:: x.svg\n    :alt: one\n    :alt: two\n").unwrap_err();
        assert_eq!(err, ReadmeError::DuplicateImageOption("alt".into()));

        let err = Image::parse(
            ".. |x| image:: x.svg\n    :alt: one\n    :target: t\n    :alt: two\n",
        )
        .unwrap_err();
        assert_eq!(err, ReadmeError::DuplicateImageOption("alt".into()));
    }

    #[test]
    fn test_parse_non_option_line() {
        let err = Image::parse(".. |x| image:: x.svg\nstray text\n").unwrap_err();
        assert!(matches!(err, ReadmeError::NonOptionLine(line) if line == "stray text\n"));
    }

    #[test]
    fn test_parse_rejects_non_image() {
        assert!(matches!(
            Image::parse("`GitHub <https://github.com>`_"),
            Err(ReadmeError::NotAnImage(_))
        ));
        assert!(!Image::is_image_start(".. |bad tag| image:: x.svg"));
    }

    #[test]
    fn test_display_round_trips() {
        let text = ".. |ci| image:: ci.svg\n    :target: https://ci.example\n    :alt: CI";
        assert_eq!(Image::parse(text).unwrap().to_string(), text);
    }
}
