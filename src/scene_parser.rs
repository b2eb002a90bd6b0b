/*!
 * Scene breakdown parsing.
 *
 * Production scripts often arrive as a numbered scene list rather than prose:
 *
 * ```text
 * Scene 1: Welcome
 * Duration (in seconds): 12
 * Narration: Today we look at ownership.
 * Visual: Title card over the course logo
 * ```
 *
 * Each scene becomes a section; declared durations can stand in for measured
 * narration lengths.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::segmenter::Section;

// @const: Scene header, "Scene 3: Title" or "3. Title"
static SCENE_HEADER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:Scene\s*)?(\d+)\s*[:.-]?\s*(.*)$").unwrap()
});

// @const: Declared scene duration
static DURATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Duration\s*\(?in seconds\)?\s*[:=-]\s*(\d+(?:\.\d+)?)").unwrap()
});

static NARRATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(Narration|Voice|Text)\s*[:=-]").unwrap()
});

static VISUAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(Visual|Description)\s*[:=-]").unwrap()
});

// @const: Field label to strip from labelled lines
static LABEL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\w+\s*[:=-]\s*").unwrap()
});

// @struct: One scene of a breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub title: String,
    pub narration: String,
    // @field: Direction for the compositor, not narrated
    pub visual: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
}

impl Scene {
    /// Section whose text is spoken and captioned
    pub fn to_section(&self) -> Section {
        Section::new(self.title.clone(), self.narration.clone())
    }

    /// Section drawn on the slide: the visual direction, or the narration
    /// when the scene has none
    pub fn slide_section(&self) -> Section {
        let body = if self.visual.is_empty() {
            &self.narration
        } else {
            &self.visual
        };
        Section::new(self.title.clone(), body.clone())
    }
}

#[derive(Default)]
struct SceneDraft {
    title: String,
    narration: Vec<String>,
    visual: Vec<String>,
    duration_secs: Option<f64>,
}

impl SceneDraft {
    fn has_content(&self) -> bool {
        !self.narration.is_empty() || !self.visual.is_empty()
    }
}

/// Parse a scene breakdown into scenes, dropping scenes without narration
pub fn parse_scenes(text: &str) -> Vec<Scene> {
    let mut drafts = Vec::new();
    let mut current = SceneDraft::default();

    for line in text.lines() {
        if let Some(caps) = SCENE_HEADER_REGEX.captures(line) {
            if current.has_content() {
                drafts.push(std::mem::take(&mut current));
            }
            let heading = caps.get(2).map_or("", |m| m.as_str()).trim();
            current.title = if heading.is_empty() {
                format!("Scene {}", &caps[1])
            } else {
                heading.to_string()
            };
            continue;
        }

        if let Some(caps) = DURATION_REGEX.captures(line) {
            current.duration_secs = caps[1].parse().ok();
            continue;
        }

        if NARRATION_REGEX.is_match(line) {
            push_text(&mut current.narration, &LABEL_REGEX.replace(line, ""));
        } else if VISUAL_REGEX.is_match(line) {
            push_text(&mut current.visual, &LABEL_REGEX.replace(line, ""));
        } else {
            push_text(&mut current.narration, line);
        }
    }
    if current.has_content() {
        drafts.push(current);
    }

    let scenes: Vec<Scene> = drafts
        .into_iter()
        .enumerate()
        .map(|(i, draft)| Scene {
            title: if draft.title.is_empty() {
                format!("Scene {}", i + 1)
            } else {
                draft.title
            },
            narration: draft.narration.join(" "),
            visual: draft.visual.join(" "),
            duration_secs: draft.duration_secs.filter(|d| *d > 0.0),
        })
        .filter(|scene| !scene.narration.is_empty())
        .collect();

    debug!("Parsed {} scenes", scenes.len());
    scenes
}

fn push_text(parts: &mut Vec<String>, line: &str) {
    let trimmed = line.trim();
    if !trimmed.is_empty() {
        parts.push(trimmed.to_string());
    }
}

/// Declared durations, only when every scene declares one
pub fn declared_durations(scenes: &[Scene]) -> Option<Vec<f64>> {
    scenes.iter().map(|scene| scene.duration_secs).collect()
}
