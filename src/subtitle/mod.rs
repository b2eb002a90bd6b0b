/*!
 * Caption track generation.
 *
 * # Architecture
 *
 * - `timer`: Proportional per-sentence timing across sections
 * - `srt`: Caption entries, SRT serialization and parsing
 * - `validate`: Advisory checks on a generated track
 */

pub mod srt;
pub mod timer;
pub mod validate;

// Re-export main types
pub use srt::{Subtitle, format_timestamp, parse_srt, to_srt, write_srt};
pub use timer::{allocate, CaptionClock, SubtitleTimer, TimingConfig};
pub use validate::{CaptionIssue, TrackReport, TrackValidator};
