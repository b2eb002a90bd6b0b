/*!
 * Narration duration providers.
 *
 * Caption timing needs the spoken length of every section. In production the
 * speech-synthesis step measures its rendered audio and hands the numbers
 * over; for drafts the length can be estimated from a speaking rate.
 */

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::file_utils::FileManager;
use crate::segmenter::Section;

/// Source of per-section narration durations, in seconds
pub trait NarrationTimer {
    /// Durations for the ordered sections, one per section
    fn durations(&self, sections: &[Section]) -> Result<Vec<f64>>;
}

/// Speaking-rate estimate used when no audio has been rendered yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRateEstimator {
    /// Speaking rate in words per minute
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: f64,

    /// Shortest duration given to any section
    #[serde(default = "default_min_section_secs")]
    pub min_section_secs: f64,
}

impl WordRateEstimator {
    /// Estimated spoken length of one section
    pub fn estimate(&self, section: &Section) -> f64 {
        let words = section.narration_text().split_whitespace().count() as f64;
        (words * 60.0 / self.words_per_minute).max(self.min_section_secs)
    }
}

impl Default for WordRateEstimator {
    fn default() -> Self {
        Self {
            words_per_minute: default_words_per_minute(),
            min_section_secs: default_min_section_secs(),
        }
    }
}

impl NarrationTimer for WordRateEstimator {
    fn durations(&self, sections: &[Section]) -> Result<Vec<f64>> {
        Ok(sections.iter().map(|s| self.estimate(s)).collect())
    }
}

fn default_words_per_minute() -> f64 {
    150.0
}

fn default_min_section_secs() -> f64 {
    1.0
}

/// Durations measured by the speech-synthesis collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredDurations {
    durations: Vec<f64>,
}

impl MeasuredDurations {
    pub fn new(durations: Vec<f64>) -> Self {
        Self { durations }
    }

    /// Load durations from a JSON array of seconds, e.g. `[12.4, 8.0]`
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)?;
        let durations: Vec<f64> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse durations file: {}", path.display()))?;
        Ok(Self::new(durations))
    }
}

impl NarrationTimer for MeasuredDurations {
    // Count mismatches surface as a timing error when captions are allocated
    fn durations(&self, _sections: &[Section]) -> Result<Vec<f64>> {
        Ok(self.durations.clone())
    }
}
