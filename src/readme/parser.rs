//! Paragraph state machine for README documents.
//!
//! The parser folds over [`paragraphs`](super::paragraphs::paragraphs). Each
//! state has a transition function that inspects one paragraph and returns
//! the next state plus at most one [`Effect`] to apply to the document being
//! built. Validation that needs earlier paragraphs (declared and seen badge
//! tags) reads the builder but never mutates it.

use super::image::{Image, SUBST_TEXT_RGX};
use super::paragraphs::paragraphs;
use super::{HeaderLink, Readme, Section};
use crate::error::ReadmeError;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

const HEADER_LINK_PATTERN: &str = r"`(?P<label>[^`<>]+) <(?P<url>[^>]+)>`_";

pub(crate) const CONTENTS_DIRECTIVE: &str = ".. contents::";

static BADGE_TAGS_RGX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\A\|{tag}\|(?:\s+\|{tag}\|)*\s*\z",
        tag = SUBST_TEXT_RGX
    ))
    .expect("badge list pattern is valid")
});

static HEADER_LINK_START_RGX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\A{}", HEADER_LINK_PATTERN)).expect("header link pattern is valid")
});

static HEADER_LINK_RGX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\A{}\z", HEADER_LINK_PATTERN)).expect("header link pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    Start,
    Badges,
    PostLinks,
    PostContents,
    Intro,
    Sections,
}

/// A single change to the document under construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    DeclareBadges(Vec<String>),
    AddBadge(Image),
    SetHeaderLinks(Vec<HeaderLink>),
    EnableContents,
    AppendIntro(String),
    OpenSection { name: String, body: String },
    AppendBody(String),
}

type Transition = Result<(ParserState, Option<Effect>), ReadmeError>;

#[derive(Debug, Default)]
struct Builder {
    badge_tags: Vec<String>,
    badges: Vec<Image>,
    header_links: Vec<HeaderLink>,
    contents: bool,
    introduction: String,
    sections: Vec<Section>,
    open: Option<Section>,
}

impl Builder {
    fn is_declared(&self, tag: &str) -> bool {
        self.badge_tags.iter().any(|t| t == tag)
    }

    fn is_defined(&self, tag: &str) -> bool {
        self.badges.iter().any(|b| b.tag == tag)
    }

    fn undefined_tags(&self) -> Vec<String> {
        let seen: BTreeSet<&str> = self.badges.iter().map(|b| b.tag.as_str()).collect();
        let declared: BTreeSet<&str> = self.badge_tags.iter().map(String::as_str).collect();
        declared
            .difference(&seen)
            .map(|t| t.to_string())
            .collect()
    }

    fn close_section(&mut self) {
        if let Some(mut section) = self.open.take() {
            let trimmed = section.body.trim_end().len();
            section.body.truncate(trimmed);
            self.sections.push(section);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::DeclareBadges(tags) => self.badge_tags = tags,
            Effect::AddBadge(image) => self.badges.push(image),
            Effect::SetHeaderLinks(links) => self.header_links = links,
            Effect::EnableContents => self.contents = true,
            Effect::AppendIntro(text) => self.introduction.push_str(&text),
            Effect::OpenSection { name, body } => {
                self.close_section();
                tracing::trace!(section = %name, "opened readme section");
                self.open = Some(Section { name, body });
            }
            Effect::AppendBody(text) => {
                if let Some(section) = self.open.as_mut() {
                    section.body.push_str(&text);
                }
            }
        }
    }

    fn finish(mut self) -> Readme {
        self.close_section();
        let introduction = self.introduction.trim();
        Readme {
            badge_tags: self.badge_tags,
            badges: self.badges,
            header_links: self.header_links,
            contents: self.contents,
            introduction: (!introduction.is_empty()).then(|| introduction.to_string()),
            sections: self.sections,
        }
    }
}

/// Whether a paragraph opens a section: its second line is a run of `=`
/// exactly as long as its first line
pub fn is_section_start(para: &str) -> bool {
    let mut lines = para.lines();
    match (lines.next(), lines.next()) {
        (Some(title), Some(underline)) => {
            !underline.is_empty()
                && underline.chars().all(|c| c == '=')
                && underline.chars().count() == title.chars().count()
        }
        _ => false,
    }
}

fn open_section(para: &str) -> Effect {
    let mut lines = para.split_inclusive('\n');
    let name = lines.next().unwrap_or_default().trim().to_string();
    let body = lines.skip(1).collect::<String>();
    Effect::OpenSection { name, body }
}

fn parse_header_links(para: &str) -> Result<Vec<HeaderLink>, ReadmeError> {
    let mut chunks: Vec<String> = Vec::new();
    for line in para.trim().split_inclusive('\n') {
        match line.strip_prefix('|') {
            Some(rest) => chunks.push(rest.to_string()),
            None => match chunks.last_mut() {
                Some(chunk) => chunk.push_str(line),
                None => chunks.push(line.to_string()),
            },
        }
    }
    chunks
        .iter()
        .map(|chunk| {
            let chunk = chunk.trim();
            HEADER_LINK_RGX
                .captures(chunk)
                .map(|caps| HeaderLink::new(&caps["label"], &caps["url"]))
                .ok_or_else(|| ReadmeError::InvalidHeaderLink(chunk.to_string()))
        })
        .collect()
}

fn first_line(para: &str) -> String {
    para.lines().next().unwrap_or_default().to_string()
}

fn start(para: &str, builder: &Builder) -> Transition {
    if BADGE_TAGS_RGX.is_match(para) {
        let mut tags: Vec<String> = Vec::new();
        for tag in para.split_whitespace().map(|t| t.trim_matches('|')) {
            if tags.iter().any(|t| t == tag) {
                return Err(ReadmeError::DuplicateTag(tag.to_string()));
            }
            tags.push(tag.to_string());
        }
        return Ok((ParserState::Badges, Some(Effect::DeclareBadges(tags))));
    }
    badges(para, builder)
}

fn badges(para: &str, builder: &Builder) -> Transition {
    if Image::is_image_start(para) {
        let image = Image::parse(para)?;
        if !builder.is_declared(&image.tag) {
            return Err(ReadmeError::UnexpectedSubstitution(image.tag));
        }
        if builder.is_defined(&image.tag) {
            return Err(ReadmeError::DuplicateImage(image.tag));
        }
        return Ok((ParserState::Badges, Some(Effect::AddBadge(image))));
    }
    if HEADER_LINK_START_RGX.is_match(para) {
        let undefined = builder.undefined_tags();
        if !undefined.is_empty() {
            return Err(ReadmeError::UndefinedSubstitutions(undefined));
        }
        let links = parse_header_links(para)?;
        return Ok((ParserState::PostLinks, Some(Effect::SetHeaderLinks(links))));
    }
    Err(ReadmeError::ExpectedImageOrHeaderLinks(first_line(para)))
}

fn post_links(para: &str) -> Transition {
    if para.starts_with(CONTENTS_DIRECTIVE) {
        return Ok((ParserState::PostContents, Some(Effect::EnableContents)));
    }
    intro(para)
}

fn intro(para: &str) -> Transition {
    if is_section_start(para) {
        Ok((ParserState::Sections, Some(open_section(para))))
    } else {
        Ok((ParserState::Intro, Some(Effect::AppendIntro(para.to_string()))))
    }
}

fn sections(para: &str) -> Transition {
    if is_section_start(para) {
        Ok((ParserState::Sections, Some(open_section(para))))
    } else {
        Ok((ParserState::Sections, Some(Effect::AppendBody(para.to_string()))))
    }
}

impl ParserState {
    fn step(self, para: &str, builder: &Builder) -> Transition {
        match self {
            ParserState::Start => start(para, builder),
            ParserState::Badges => badges(para, builder),
            ParserState::PostLinks => post_links(para),
            ParserState::PostContents | ParserState::Intro => intro(para),
            ParserState::Sections => sections(para),
        }
    }
}

/// Parse README text
pub fn parse_readme(text: &str) -> Result<Readme, ReadmeError> {
    let (state, builder) = paragraphs(text).try_fold(
        (ParserState::Start, Builder::default()),
        |(state, mut builder), para| {
            let (next, effect) = state.step(para, &builder)?;
            if next != state {
                tracing::trace!(from = ?state, to = ?next, "readme parser transition");
            }
            if let Some(effect) = effect {
                builder.apply(effect);
            }
            Ok::<_, ReadmeError>((next, builder))
        },
    )?;
    tracing::debug!(final_state = ?state, "parsed readme");
    Ok(builder.finish())
}
