//! README documents
//!
//! The supported layout, in order: an optional line of badge substitution
//! tags, one image definition per tag, a paragraph of header links, an
//! optional table-of-contents directive, an optional introduction, and
//! `=`-underlined sections.

pub mod image;
pub mod paragraphs;
pub mod parser;

pub use image::Image;
pub use parser::{is_section_start, parse_readme};

use crate::error::ReadmeError;
use parser::CONTENTS_DIRECTIVE;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A `` `label <url>`_ `` link in the header paragraph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderLink {
    pub label: String,
    pub url: String,
}

impl HeaderLink {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        HeaderLink {
            label: label.into(),
            url: url.into(),
        }
    }
}

impl fmt::Display for HeaderLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{} <{}>`_", self.label, self.url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub name: String,
    /// Right-trimmed
    pub body: String,
}

impl Section {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Section {
            name: name.into(),
            body: body.into(),
        }
    }
}

/// A parsed README
///
/// Every tag in `badge_tags` has exactly one image in `badges` and vice
/// versa; use [`Readme::add_badge`] and [`Readme::remove_badge`] to keep the
/// two in step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Readme {
    pub badge_tags: Vec<String>,
    pub badges: Vec<Image>,
    pub header_links: Vec<HeaderLink>,
    pub contents: bool,
    pub introduction: Option<String>,
    pub sections: Vec<Section>,
}

impl Readme {
    /// Parse README text
    pub fn load(text: &str) -> Result<Self, ReadmeError> {
        parse_readme(text)
    }

    /// Render the README back to text
    pub fn dump(&self) -> String {
        self.to_string()
    }

    pub fn badge(&self, tag: &str) -> Option<&Image> {
        self.badges.iter().find(|b| b.tag == tag)
    }

    pub fn badge_mut(&mut self, tag: &str) -> Option<&mut Image> {
        self.badges.iter_mut().find(|b| b.tag == tag)
    }

    /// Append a badge, declaring its tag at the end of the tag list
    pub fn add_badge(&mut self, image: Image) -> Result<(), ReadmeError> {
        if self.badge_tags.contains(&image.tag) {
            return Err(ReadmeError::DuplicateBadge(image.tag));
        }
        self.badge_tags.push(image.tag.clone());
        self.badges.push(image);
        Ok(())
    }

    /// Remove a badge together with its tag declaration
    pub fn remove_badge(&mut self, tag: &str) -> Option<Image> {
        self.badge_tags.retain(|t| t != tag);
        let idx = self.badges.iter().position(|b| b.tag == tag)?;
        Some(self.badges.remove(idx))
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.name == name)
    }
}

impl FromStr for Readme {
    type Err = ReadmeError;

    fn from_str(s: &str) -> Result<Self, ReadmeError> {
        Readme::load(s)
    }
}

impl fmt::Display for Readme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.badge_tags.is_empty() {
            let tags = self
                .badge_tags
                .iter()
                .map(|t| format!("|{}|", t))
                .collect::<Vec<_>>()
                .join(" ");
            write!(f, "{}\n\n", tags)?;
        }
        for badge in &self.badges {
            write!(f, "{}\n\n", badge)?;
        }
        let links = self
            .header_links
            .iter()
            .map(HeaderLink::to_string)
            .collect::<Vec<_>>()
            .join("\n| ");
        write!(f, "{}", links)?;
        if self.contents {
            write!(f, "\n\n{}\n    :backlinks: top", CONTENTS_DIRECTIVE)?;
        }
        if let Some(intro) = &self.introduction {
            write!(f, "\n\n{}", intro)?;
        }
        let has_intro = self.introduction.as_deref().is_some_and(|i| !i.is_empty());
        for (i, section) in self.sections.iter().enumerate() {
            // Sections after the first, or after an introduction, get an
            // extra blank line above them.
            if i > 0 || has_intro {
                writeln!(f)?;
            }
            write!(
                f,
                "\n\n{}\n{}\n{}",
                section.name,
                "=".repeat(section.name.chars().count()),
                section.body
            )?;
        }
        writeln!(f)
    }
}
