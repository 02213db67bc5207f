// changelog line scanner

use super::section::ChangelogSection;
use super::Changelog;
use crate::error::ChangelogError;
use regex::Regex;
use std::sync::LazyLock;

static HRULE_RGX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^---+\s*$").expect("hrule pattern is valid"));

fn is_hrule(line: &str) -> bool {
    HRULE_RGX.is_match(line)
}

/// parse change-log text
///
/// Each hrule closes the section whose header is the line directly above it.
/// Lines are kept with their endings so that [`Changelog`]'s `Display`
/// reproduces the input.
pub fn parse_changelog(text: &str) -> Result<Changelog, ChangelogError> {
    let mut intro = String::new();
    let mut sections: Vec<ChangelogSection> = Vec::new();
    // the most recent line not yet assigned to intro or a section body
    let mut prev: Option<&str> = None;

    for (idx, line) in text.split_inclusive('\n').enumerate() {
        let line_no = idx + 1;
        if is_hrule(line) {
            if let Some(last) = sections.last_mut() {
                last.end();
            }
            let header = match prev.take() {
                Some(header) => header,
                None if line_no == 1 => return Err(ChangelogError::BeginsWithHrule),
                None => return Err(ChangelogError::OrphanHrule { line: line_no }),
            };
            let section = ChangelogSection::parse_header(header, line_no - 1)?;
            tracing::trace!(line = line_no - 1, header = %section.header(), "opened changelog section");
            sections.push(section);
        } else {
            if let Some(pending) = prev {
                match sections.last_mut() {
                    Some(last) => last.push_content(pending),
                    None => intro.push_str(pending),
                }
            }
            prev = Some(line);
        }
    }

    if let Some(pending) = prev {
        match sections.last_mut() {
            Some(last) => last.push_content(pending),
            None => return Err(ChangelogError::MissingHeaders),
        }
    }
    if let Some(last) = sections.last_mut() {
        last.end();
    }

    tracing::debug!(sections = sections.len(), "parsed changelog");
    Ok(Changelog { intro, sections })
}
