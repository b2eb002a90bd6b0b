/*!
 * Deterministic slide layout for one section.
 *
 * The engine stacks the wrapped title lines (centered), draws one separator
 * rule and then lays out the body as bullets, one per paragraph. Positions are
 * absolute pixels on the canvas. Body content that would run past the bottom
 * margin is dropped and the layout is flagged as truncated.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::metrics::{FontRole, TextMeasurer};
use super::theme::{Palette, Theme};
use super::wrap::wrap_words;
use crate::segmenter::Section;

// @const: Blank line between paragraphs
static PARAGRAPH_BREAK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n[ \t]*(?:\r?\n)+").unwrap()
});

// @const: Leading list marker of a paragraph
static BULLET_MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[-*]\s+").unwrap()
});

/// Geometry constants of a slide.
///
/// All values are absolute pixels tuned for 1280x720 to 1920x1080 canvases;
/// they are not rescaled with the canvas size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Top and side margin
    #[serde(default = "default_margin")]
    pub margin: f32,

    /// Extra space kept free below the body, on top of `margin`
    #[serde(default = "default_bottom_slack")]
    pub bottom_slack: f32,

    /// Title wrap width in characters
    #[serde(default = "default_title_wrap_chars")]
    pub title_wrap_chars: usize,

    /// Body wrap width in characters
    #[serde(default = "default_body_wrap_chars")]
    pub body_wrap_chars: usize,

    /// Gap between stacked title lines
    #[serde(default = "default_title_line_gap")]
    pub title_line_gap: f32,

    /// Space above and below the separator rule
    #[serde(default = "default_separator_gap")]
    pub separator_gap: f32,

    /// Gap between wrapped lines of the same bullet
    #[serde(default = "default_body_line_gap")]
    pub body_line_gap: f32,

    /// Extra space between bullets
    #[serde(default = "default_bullet_spacing")]
    pub bullet_spacing: f32,

    /// Indent of bullet text from the side margin
    #[serde(default = "default_bullet_indent")]
    pub bullet_indent: f32,

    /// Distance from the bullet text to the center of its marker dot
    #[serde(default = "default_marker_offset")]
    pub marker_offset: f32,

    /// Marker dot radius
    #[serde(default = "default_marker_radius")]
    pub marker_radius: f32,
}

impl LayoutConfig {
    /// Bottom margin, measured from the canvas bottom edge
    pub fn bottom_margin(&self) -> f32 {
        self.margin + self.bottom_slack
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin: default_margin(),
            bottom_slack: default_bottom_slack(),
            title_wrap_chars: default_title_wrap_chars(),
            body_wrap_chars: default_body_wrap_chars(),
            title_line_gap: default_title_line_gap(),
            separator_gap: default_separator_gap(),
            body_line_gap: default_body_line_gap(),
            bullet_spacing: default_bullet_spacing(),
            bullet_indent: default_bullet_indent(),
            marker_offset: default_marker_offset(),
            marker_radius: default_marker_radius(),
        }
    }
}

fn default_margin() -> f32 {
    80.0
}

fn default_bottom_slack() -> f32 {
    60.0
}

fn default_title_wrap_chars() -> usize {
    28
}

fn default_body_wrap_chars() -> usize {
    50
}

fn default_title_line_gap() -> f32 {
    10.0
}

fn default_separator_gap() -> f32 {
    20.0
}

fn default_body_line_gap() -> f32 {
    6.0
}

fn default_bullet_spacing() -> f32 {
    16.0
}

fn default_bullet_indent() -> f32 {
    40.0
}

fn default_marker_offset() -> f32 {
    22.0
}

fn default_marker_radius() -> f32 {
    6.0
}

/// Kind of a laid out line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Title,
    Bullet,
}

/// Filled dot drawn left of a bullet's first line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BulletMarker {
    pub center_x: f32,
    pub center_y: f32,
    pub radius: f32,
}

/// One positioned line of text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    pub text: String,
    pub kind: LineKind,
    pub x_offset: f32,
    pub y_offset: f32,
    pub width: f32,
    pub height: f32,
    // @field: Set on the first line of each bullet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<BulletMarker>,
}

impl LineRecord {
    /// Bottom edge of the line
    pub fn bottom(&self) -> f32 {
        self.y_offset + self.height
    }
}

/// Horizontal rule between title and body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Separator {
    pub x_start: f32,
    pub x_end: f32,
    pub y: f32,
}

/// Computed arrangement of one section's slide
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineLayout {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub lines: Vec<LineRecord>,
    // @field: None only when the title alone fills the canvas
    pub separator: Option<Separator>,
    pub truncated: bool,
    pub palette: Palette,
}

impl LineLayout {
    pub fn title_lines(&self) -> impl Iterator<Item = &LineRecord> {
        self.lines.iter().filter(|l| l.kind == LineKind::Title)
    }

    pub fn bullet_lines(&self) -> impl Iterator<Item = &LineRecord> {
        self.lines.iter().filter(|l| l.kind == LineKind::Bullet)
    }

    /// Number of bullets that got at least one line
    pub fn bullet_count(&self) -> usize {
        self.lines.iter().filter(|l| l.marker.is_some()).count()
    }

    /// Lowest point reached by any emitted element
    pub fn content_bottom(&self) -> f32 {
        let lines_bottom = self.lines.iter().map(LineRecord::bottom).fold(0.0, f32::max);
        let separator_bottom = self.separator.map_or(0.0, |s| s.y);
        lines_bottom.max(separator_bottom)
    }
}

/// Split a body into bullet texts, one per blank-line separated paragraph
pub fn body_bullets(body: &str) -> Vec<String> {
    PARAGRAPH_BREAK_REGEX
        .split(body)
        .map(|paragraph| BULLET_MARKER_REGEX.replace(paragraph.trim(), "").trim().to_string())
        .filter(|bullet| !bullet.is_empty())
        .collect()
}

/// Slide layout engine
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine {
    /// Create an engine with default geometry
    pub fn new() -> Self {
        Self {
            config: LayoutConfig::default(),
        }
    }

    /// Create an engine with custom geometry
    pub fn with_config(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out one section on a `canvas_width` x `canvas_height` canvas.
    ///
    /// Never fails; content below the bottom margin is dropped and flagged via
    /// `truncated`.
    pub fn layout(
        &self,
        section: &Section,
        canvas_width: f32,
        canvas_height: f32,
        theme: Theme,
        measurer: &dyn TextMeasurer,
    ) -> LineLayout {
        let cfg = &self.config;
        let limit = canvas_height - cfg.bottom_margin();
        let mut lines = Vec::new();
        let mut truncated = false;
        let mut y = cfg.margin;

        for text in wrap_words(&section.title, cfg.title_wrap_chars) {
            let extent = measurer.measure(&text, FontRole::Title);
            if y + extent.height > limit {
                truncated = true;
                break;
            }
            lines.push(LineRecord {
                x_offset: ((canvas_width - extent.width) / 2.0).max(0.0),
                y_offset: y,
                width: extent.width,
                height: extent.height,
                kind: LineKind::Title,
                marker: None,
                text,
            });
            y += extent.height + cfg.title_line_gap;
        }

        let mut separator = None;
        if !truncated {
            let rule_y = y - cfg.title_line_gap + cfg.separator_gap;
            if rule_y <= limit {
                separator = Some(Separator {
                    x_start: cfg.margin,
                    x_end: canvas_width - cfg.margin,
                    y: rule_y,
                });
                y = rule_y + cfg.separator_gap;
            } else {
                truncated = true;
            }
        }

        if !truncated {
            truncated = self.layout_bullets(&section.body, y, limit, measurer, &mut lines);
        }

        if truncated {
            debug!(
                "Layout of '{}' truncated after {} lines",
                section.title,
                lines.len()
            );
        }

        LineLayout {
            canvas_width,
            canvas_height,
            lines,
            separator,
            truncated,
            palette: theme.palette(),
        }
    }

    // @returns: Whether body content was dropped at the bottom limit
    fn layout_bullets(
        &self,
        body: &str,
        mut y: f32,
        limit: f32,
        measurer: &dyn TextMeasurer,
        lines: &mut Vec<LineRecord>,
    ) -> bool {
        let cfg = &self.config;
        let text_x = cfg.margin + cfg.bullet_indent;

        for bullet in body_bullets(body) {
            for (i, text) in wrap_words(&bullet, cfg.body_wrap_chars).into_iter().enumerate() {
                let extent = measurer.measure(&text, FontRole::Body);
                if y + extent.height > limit {
                    return true;
                }
                let marker = (i == 0).then(|| BulletMarker {
                    center_x: text_x - cfg.marker_offset,
                    center_y: y + extent.height / 2.0,
                    radius: cfg.marker_radius,
                });
                lines.push(LineRecord {
                    x_offset: text_x,
                    y_offset: y,
                    width: extent.width,
                    height: extent.height,
                    kind: LineKind::Bullet,
                    marker,
                    text,
                });
                y += extent.height + cfg.body_line_gap;
            }
            y += cfg.bullet_spacing - cfg.body_line_gap;
        }

        false
    }
}

/// Lay out a section with the default geometry
pub fn layout(
    section: &Section,
    canvas_width: f32,
    canvas_height: f32,
    theme: Theme,
    measurer: &dyn TextMeasurer,
) -> LineLayout {
    LayoutEngine::new().layout(section, canvas_width, canvas_height, theme, measurer)
}
