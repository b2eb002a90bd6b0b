/*!
 * Caption track checks.
 *
 * This module inspects a generated track for entries a viewer would struggle
 * with:
 * - Inverted or zero-length time ranges
 * - Starts going backwards or overlapping the previous caption
 * - Reading speed above a characters-per-second limit
 *
 * Issues are advisory; the pipeline logs them and still writes the track.
 */

use log::debug;

use super::srt::Subtitle;

/// Maximum characters per second for readable captions
const DEFAULT_MAX_CPS: f64 = 25.0;

/// Tolerance for float comparisons between adjacent captions
const TIME_EPSILON: f64 = 1e-9;

/// Types of caption issues
#[derive(Debug, Clone, PartialEq)]
pub enum CaptionIssue {
    /// End time before start time
    InvalidTimeRange { start: f64, end: f64 },
    /// Caption never shows, its floor was clamped away at the section end
    ZeroLength,
    /// Starts before the previous caption started
    StartsBeforePrevious { prev_index: usize },
    /// Overlaps with the previous caption
    OverlapsWithEntry { other_index: usize, overlap_secs: f64 },
    /// Reading speed exceeds limit
    ReadingSpeedTooHigh { cps: f64, max_cps: f64 },
}

impl std::fmt::Display for CaptionIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptionIssue::InvalidTimeRange { start, end } => {
                write!(f, "Invalid time range: start {:.3}s > end {:.3}s", start, end)
            }
            CaptionIssue::ZeroLength => write!(f, "Zero-length caption"),
            CaptionIssue::StartsBeforePrevious { prev_index } => {
                write!(f, "Starts before caption {}", prev_index)
            }
            CaptionIssue::OverlapsWithEntry { other_index, overlap_secs } => {
                write!(f, "Overlaps with caption {} by {:.3}s", other_index, overlap_secs)
            }
            CaptionIssue::ReadingSpeedTooHigh { cps, max_cps } => {
                write!(f, "Reading speed too high: {:.1} CPS (max: {:.1})", cps, max_cps)
            }
        }
    }
}

/// Issues found on one caption
#[derive(Debug, Clone)]
pub struct CaptionReport {
    pub index: usize,
    pub issues: Vec<CaptionIssue>,
}

/// Result of checking a whole track
#[derive(Debug, Clone, Default)]
pub struct TrackReport {
    /// Captions with at least one issue, in track order
    pub flagged: Vec<CaptionReport>,
}

impl TrackReport {
    pub fn passed(&self) -> bool {
        self.flagged.is_empty()
    }

    pub fn total_issues(&self) -> usize {
        self.flagged.iter().map(|r| r.issues.len()).sum()
    }
}

/// Configuration for track checks
#[derive(Debug, Clone)]
pub struct TrackValidatorConfig {
    /// Maximum characters per second
    pub max_cps: f64,
    /// Whether to check for overlaps and backwards starts
    pub check_order: bool,
}

impl Default for TrackValidatorConfig {
    fn default() -> Self {
        Self {
            max_cps: DEFAULT_MAX_CPS,
            check_order: true,
        }
    }
}

/// Checker for generated caption tracks
pub struct TrackValidator {
    config: TrackValidatorConfig,
}

impl Default for TrackValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackValidator {
    /// Create a new validator with default configuration
    pub fn new() -> Self {
        Self {
            config: TrackValidatorConfig::default(),
        }
    }

    /// Create a new validator with custom configuration
    pub fn with_config(config: TrackValidatorConfig) -> Self {
        Self { config }
    }

    /// Issues of a single caption in isolation
    pub fn check_caption(&self, caption: &Subtitle) -> Vec<CaptionIssue> {
        let duration = caption.duration();
        if duration < -TIME_EPSILON {
            return vec![CaptionIssue::InvalidTimeRange {
                start: caption.start,
                end: caption.end,
            }];
        }
        if duration <= TIME_EPSILON {
            return vec![CaptionIssue::ZeroLength];
        }

        let cps = Self::calculate_cps(caption);
        if cps > self.config.max_cps {
            vec![CaptionIssue::ReadingSpeedTooHigh {
                cps,
                max_cps: self.config.max_cps,
            }]
        } else {
            Vec::new()
        }
    }

    /// Check a whole track in order
    pub fn check_track(&self, track: &[Subtitle]) -> TrackReport {
        let mut report = TrackReport::default();
        let mut previous: Option<&Subtitle> = None;

        for caption in track {
            let mut issues = self.check_caption(caption);

            if let (true, Some(prev)) = (self.config.check_order, previous) {
                if caption.start + TIME_EPSILON < prev.start {
                    issues.push(CaptionIssue::StartsBeforePrevious {
                        prev_index: prev.index,
                    });
                } else if prev.end > caption.start + TIME_EPSILON {
                    issues.push(CaptionIssue::OverlapsWithEntry {
                        other_index: prev.index,
                        overlap_secs: prev.end - caption.start,
                    });
                }
            }

            if !issues.is_empty() {
                report.flagged.push(CaptionReport {
                    index: caption.index,
                    issues,
                });
            }
            previous = Some(caption);
        }

        debug!(
            "Caption check: {} captions, {} issues",
            track.len(),
            report.total_issues()
        );

        report
    }

    /// Calculate reading speed (characters per second) for a caption
    pub fn calculate_cps(caption: &Subtitle) -> f64 {
        let duration = caption.duration();
        if duration <= 0.0 {
            return f64::INFINITY;
        }
        caption.text.chars().count() as f64 / duration
    }
}
