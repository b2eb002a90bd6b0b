use serde::{Deserialize, Serialize};
use std::fmt;

// @module: Slide color themes

/// Slide color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    // @theme: Light text on a dark background
    #[default]
    Dark,
    // @theme: Dark text on a light background
    Light,
}

impl Theme {
    /// Resolve the colors line records are drawn with
    pub fn palette(self) -> Palette {
        match self {
            Self::Dark => Palette {
                background: Rgb::new(18, 24, 38),
                foreground: Rgb::new(245, 246, 248),
                accent: Rgb::new(245, 246, 248),
            },
            Self::Light => Palette {
                background: Rgb::new(245, 246, 248),
                foreground: Rgb::new(20, 23, 27),
                accent: Rgb::new(20, 23, 27),
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dark => write!(f, "dark"),
            Self::Light => write!(f, "light"),
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(anyhow::anyhow!("Invalid theme: {}", s)),
        }
    }
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Hex notation, e.g. `#111827`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Resolved colors for one slide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub background: Rgb,
    pub foreground: Rgb,
    // @field: Separator rule and bullet markers, drawn in the text color
    pub accent: Rgb,
}
