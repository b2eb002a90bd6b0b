/*!
 * Text measurement capability injected into the layout engine.
 *
 * The layout engine never touches fonts. It asks a `TextMeasurer` for the
 * pixel extent of a string in a given font role; the glyph backend that
 * finally rasterizes the slide supplies the real implementation.
 */

use serde::{Deserialize, Serialize};

/// Font role a string is measured and drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontRole {
    Title,
    Body,
}

/// Pixel extent of a measured string
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextExtent {
    pub width: f32,
    pub height: f32,
}

impl TextExtent {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Pure function from text to pixel extent for a font role
pub trait TextMeasurer: Send + Sync {
    fn measure(&self, text: &str, role: FontRole) -> TextExtent;
}

/// Fixed-advance measurer: every character has the same width per role.
///
/// Deterministic stand-in for a glyph backend, used by the CLI and tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonospaceMeasurer {
    /// Advance per title character in pixels
    #[serde(default = "default_title_advance")]
    pub title_advance: f32,

    /// Title line height in pixels
    #[serde(default = "default_title_line_height")]
    pub title_line_height: f32,

    /// Advance per body character in pixels
    #[serde(default = "default_body_advance")]
    pub body_advance: f32,

    /// Body line height in pixels
    #[serde(default = "default_body_line_height")]
    pub body_line_height: f32,
}

impl MonospaceMeasurer {
    /// Measurer with the same advance and line height for both roles
    pub fn uniform(advance: f32, line_height: f32) -> Self {
        Self {
            title_advance: advance,
            title_line_height: line_height,
            body_advance: advance,
            body_line_height: line_height,
        }
    }
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self {
            title_advance: default_title_advance(),
            title_line_height: default_title_line_height(),
            body_advance: default_body_advance(),
            body_line_height: default_body_line_height(),
        }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, role: FontRole) -> TextExtent {
        let chars = text.chars().count() as f32;
        match role {
            FontRole::Title => TextExtent::new(chars * self.title_advance, self.title_line_height),
            FontRole::Body => TextExtent::new(chars * self.body_advance, self.body_line_height),
        }
    }
}

// Roughly a 56px title face and a 32px body face
fn default_title_advance() -> f32 {
    30.0
}

fn default_title_line_height() -> f32 {
    64.0
}

fn default_body_advance() -> f32 {
    17.0
}

fn default_body_line_height() -> f32 {
    40.0
}
