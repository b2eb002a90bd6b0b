/*!
 * Proportional caption timing.
 *
 * Each section's narration is split into sentences and the section's audio
 * duration is shared out by sentence length. A caption clock threads through
 * the sections so that every section's captions start exactly where its audio
 * starts, whatever rounding the individual allocations accumulated.
 */

use log::debug;
use serde::{Deserialize, Serialize};

use super::srt::Subtitle;
use crate::errors::TimingError;
use crate::sentences::split_sentences;

/// Shortest time a caption is allocated before clamping to the section end
pub const DEFAULT_MIN_CAPTION_SECS: f64 = 0.8;

/// Configuration for caption timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Floor applied to every sentence allocation, in seconds
    #[serde(default = "default_min_caption_secs")]
    pub min_caption_secs: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            min_caption_secs: default_min_caption_secs(),
        }
    }
}

fn default_min_caption_secs() -> f64 {
    DEFAULT_MIN_CAPTION_SECS
}

/// Running position in the caption track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptionClock {
    /// Current time in seconds, the start of the next section's narration
    pub time: f64,
    /// Index the next caption gets
    pub next_index: usize,
    /// Zero-based position of the next section
    pub section: usize,
}

impl CaptionClock {
    /// Clock at the very start of a track
    pub fn start() -> Self {
        Self {
            time: 0.0,
            next_index: 1,
            section: 0,
        }
    }
}

impl Default for CaptionClock {
    fn default() -> Self {
        Self::start()
    }
}

/// Allocates caption time ranges to sentences
pub struct SubtitleTimer {
    config: TimingConfig,
}

impl Default for SubtitleTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl SubtitleTimer {
    /// Create a timer with the default caption floor
    pub fn new() -> Self {
        Self {
            config: TimingConfig::default(),
        }
    }

    /// Create a timer with custom configuration
    pub fn with_config(config: TimingConfig) -> Self {
        Self { config }
    }

    /// Allocate captions for a whole ordered list of sections.
    ///
    /// All inputs are validated before anything is allocated.
    pub fn allocate<S: AsRef<str>>(
        &self,
        section_texts: &[S],
        section_durations: &[f64],
    ) -> Result<Vec<Subtitle>, TimingError> {
        if section_texts.len() != section_durations.len() {
            return Err(TimingError::LengthMismatch {
                texts: section_texts.len(),
                durations: section_durations.len(),
            });
        }
        for (index, &value) in section_durations.iter().enumerate() {
            validate_duration(index, value)?;
        }

        let mut subtitles = Vec::new();
        let mut clock = CaptionClock::start();
        for (text, &duration) in section_texts.iter().zip(section_durations) {
            let (captions, next) = self.allocate_section(text.as_ref(), duration, clock)?;
            subtitles.extend(captions);
            clock = next;
        }

        debug!(
            "Allocated {} captions over {} sections ({:.3}s)",
            subtitles.len(),
            section_texts.len(),
            clock.time
        );

        Ok(subtitles)
    }

    /// Allocate captions for one section starting at `clock`.
    ///
    /// Returns the captions and the clock positioned at the end of this
    /// section's audio.
    pub fn allocate_section(
        &self,
        text: &str,
        duration: f64,
        clock: CaptionClock,
    ) -> Result<(Vec<Subtitle>, CaptionClock), TimingError> {
        validate_duration(clock.section, duration)?;

        let section_start = clock.time;
        let section_end = section_start + duration;
        let sentences = split_sentences(text);
        let mut captions = Vec::with_capacity(sentences.len());

        let total_len: usize = sentences.iter().map(|s| s.chars().count()).sum();
        let count = sentences.len();
        let mut t = section_start;
        let mut index = clock.next_index;

        for (i, sentence) in sentences.into_iter().enumerate() {
            let share = if total_len > 0 {
                duration * (sentence.chars().count() as f64 / total_len as f64)
            } else {
                duration / count as f64
            };
            let alloc = share.max(self.config.min_caption_secs);

            // The final caption closes the section exactly on its audio boundary
            let end = if i + 1 == count {
                section_end
            } else {
                (t + alloc).min(section_end)
            };

            captions.push(Subtitle::new(index, t, end, sentence));
            index += 1;
            t = end;
        }

        let next = CaptionClock {
            time: section_end,
            next_index: index,
            section: clock.section + 1,
        };

        Ok((captions, next))
    }
}

fn validate_duration(index: usize, value: f64) -> Result<(), TimingError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TimingError::InvalidDuration { index, value })
    }
}

/// Allocate captions with the default timing configuration
pub fn allocate<S: AsRef<str>>(
    section_texts: &[S],
    section_durations: &[f64],
) -> Result<Vec<Subtitle>, TimingError> {
    SubtitleTimer::new().allocate(section_texts, section_durations)
}
