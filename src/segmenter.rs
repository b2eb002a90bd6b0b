/*!
 * Script segmentation into titled sections.
 *
 * The segmenter scans a lecture script once, cutting it into blocks at
 * horizontal rules (`---`) and markdown headings (`#`), then derives a title
 * and a body for every block. Input without any usable structure falls back
 * to fixed-size groups of sentences.
 */

use std::fmt;

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::sentences::{first_sentence, split_sentences, truncate_chars};

/// Longest first line that is used verbatim as a section title
pub const MAX_TITLE_LINE_CHARS: usize = 70;

/// Sentences per section when falling back to sentence grouping
pub const FALLBACK_GROUP_SIZE: usize = 4;

// @const: Three or more dashes alone on a line
static RULE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*-{3,}\s*$").unwrap()
});

// @const: Leading heading markers
static HEADING_MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#+").unwrap()
});

// @struct: One titled unit of narration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    // @field: Slide title, never empty
    pub title: String,

    // @field: Slide body, may be empty
    pub body: String,
}

impl Section {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Text spoken for this section: the title followed by the body
    pub fn narration_text(&self) -> String {
        if self.body.is_empty() {
            self.title.clone()
        } else {
            format!("{}\n{}", self.title, self.body)
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "# {}", self.title)?;
        if !self.body.is_empty() {
            writeln!(f, "{}", self.body)?;
        }
        Ok(())
    }
}

/// Segment a script into ordered sections.
///
/// Never fails: empty or blank input yields an empty list.
pub fn segment(text: &str) -> Vec<Section> {
    let mut blocks = split_blocks(text);
    if blocks.is_empty() {
        blocks.push(text.lines().collect());
    }

    let sections: Vec<Section> = blocks
        .iter()
        .filter_map(|block| section_from_block(block))
        .collect();

    if !sections.is_empty() {
        debug!("Segmented script into {} sections", sections.len());
        return sections;
    }

    let fallback = group_sentences(text);
    if !fallback.is_empty() {
        warn!(
            "No structural sections found, grouped sentences into {} sections",
            fallback.len()
        );
    }
    fallback
}

// @splits: Lines into blocks at rules and headings
fn split_blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for line in text.lines() {
        if RULE_REGEX.is_match(line) {
            close_block(&mut blocks, &mut current);
            continue;
        }
        if line.starts_with('#') {
            close_block(&mut blocks, &mut current);
        }
        current.push(line);
    }
    close_block(&mut blocks, &mut current);

    blocks
}

// @pushes: Current block when it holds a non-blank line, then clears it
fn close_block<'a>(blocks: &mut Vec<Vec<&'a str>>, current: &mut Vec<&'a str>) {
    if current.iter().any(|line| !line.trim().is_empty()) {
        blocks.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

// @derives: Title and body for one block, None when the block is blank
fn section_from_block(lines: &[&str]) -> Option<Section> {
    let content = lines.join("\n");
    let content = content.trim();
    if content.is_empty() {
        return None;
    }

    if HEADING_MARKER_REGEX.is_match(content) {
        let (heading, rest) = content.split_once('\n').unwrap_or((content, ""));
        let title = HEADING_MARKER_REGEX.replace(heading, "");
        let title = title.trim();
        let body = rest.trim();
        if title.is_empty() {
            // Bare markers carry no heading text, keep the marker line as the title
            return Some(Section::new(heading.trim(), body));
        }
        return Some(Section::new(title, body));
    }

    untitled_section(content)
}

fn untitled_section(content: &str) -> Option<Section> {
    if content.is_empty() {
        return None;
    }

    let (first_line, rest) = content.split_once('\n').unwrap_or((content, ""));
    let first_line = first_line.trim();
    if first_line.chars().count() <= MAX_TITLE_LINE_CHARS {
        return Some(Section::new(first_line, rest.trim()));
    }

    match first_sentence(content) {
        Some((sentence, rest)) => Some(Section::new(sentence, rest)),
        None => Some(Section::new(content, "")),
    }
}

// @fallback: Groups of sentences under their first sentence
fn group_sentences(text: &str) -> Vec<Section> {
    split_sentences(text)
        .chunks(FALLBACK_GROUP_SIZE)
        .map(|group| {
            let title = truncate_chars(&group[0], MAX_TITLE_LINE_CHARS).trim();
            Section::new(title, group[1..].join(" "))
        })
        .collect()
}
