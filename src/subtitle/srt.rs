use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// @module: SRT caption entries, serialization and parsing

// @const: SRT time range line
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2,}):(\d{2}):(\d{2}),(\d{3}) --> (\d{2,}):(\d{2}):(\d{2}),(\d{3})").unwrap()
});

// @struct: One timed caption
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtitle {
    // @field: 1-based position in the whole track
    pub index: usize,

    // @field: Start in seconds
    pub start: f64,

    // @field: End in seconds
    pub end: f64,

    // @field: Caption text
    pub text: String,
}

impl Subtitle {
    pub fn new(index: usize, start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            index,
            start,
            end,
            text: text.into(),
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        format_timestamp(self.start)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        format_timestamp(self.end)
    }
}

impl fmt::Display for Subtitle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Format seconds as an SRT timestamp (HH:MM:SS,mmm).
///
/// Every field is floored; milliseconds are truncated, never rounded.
pub fn format_timestamp(secs: f64) -> String {
    let secs = secs.max(0.0);
    let hours = (secs / 3600.0).floor() as u64;
    let minutes = ((secs % 3600.0) / 60.0).floor() as u64;
    let seconds = (secs % 60.0).floor() as u64;
    let millis = (((secs - secs.floor()) * 1000.0).floor() as u64).min(999);

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

/// Parse an SRT timestamp (HH:MM:SS,mmm) to seconds
pub fn parse_timestamp(timestamp: &str) -> Result<f64> {
    let parts: Vec<&str> = timestamp.trim().split(&[':', ',', '.'][..]).collect();

    if parts.len() != 4 {
        return Err(anyhow!("Invalid timestamp format: {}", timestamp));
    }

    let hours: u64 = parts[0].parse().context("Failed to parse hours")?;
    let minutes: u64 = parts[1].parse().context("Failed to parse minutes")?;
    let seconds: u64 = parts[2].parse().context("Failed to parse seconds")?;
    let millis: u64 = parts[3].parse().context("Failed to parse milliseconds")?;

    if minutes >= 60 || seconds >= 60 || millis >= 1000 {
        return Err(anyhow!("Invalid time components in timestamp: {}", timestamp));
    }

    let total_ms = hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis;
    Ok(total_ms as f64 / 1000.0)
}

/// Serialize a caption track to SRT text
pub fn to_srt(subtitles: &[Subtitle]) -> String {
    let mut srt: String = subtitles.iter().map(|s| s.to_string()).collect();
    // No blank line after the last block
    if srt.ends_with("\n\n") {
        srt.pop();
    }
    srt
}

/// Write a caption track to an SRT file, creating parent directories
pub fn write_srt<P: AsRef<Path>>(path: P, subtitles: &[Subtitle]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut file = File::create(path)
        .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;

    file.write_all(to_srt(subtitles).as_bytes())
        .with_context(|| format!("Failed to write subtitle file: {}", path.display()))?;

    Ok(())
}

/// Parse SRT text back into captions.
///
/// Indexes and order are kept as written. Entries without a time line are
/// skipped with a warning; content without any entry is an error.
pub fn parse_srt(content: &str) -> Result<Vec<Subtitle>> {
    let mut subtitles = Vec::new();
    let mut index: Option<usize> = None;
    let mut range: Option<(f64, f64)> = None;
    let mut text_lines: Vec<&str> = Vec::new();

    let mut finish = |index: &mut Option<usize>, range: &mut Option<(f64, f64)>, text_lines: &mut Vec<&str>| {
        match (index.take(), range.take()) {
            (Some(i), Some((start, end))) => {
                subtitles.push(Subtitle::new(i, start, end, text_lines.join("\n")));
            }
            (Some(i), None) => warn!("Skipping subtitle entry {} without a time range", i),
            _ => {}
        }
        text_lines.clear();
    };

    for (line_no, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            if index.is_some() {
                finish(&mut index, &mut range, &mut text_lines);
            }
            continue;
        }

        if index.is_none() {
            match trimmed.parse::<usize>() {
                Ok(num) => index = Some(num),
                Err(_) => warn!("Unexpected text at line {}: {}", line_no + 1, trimmed),
            }
            continue;
        }

        if range.is_none() {
            if let Some(caps) = TIMESTAMP_REGEX.captures(trimmed) {
                let start = parse_timestamp(&format!("{}:{}:{},{}", &caps[1], &caps[2], &caps[3], &caps[4]))?;
                let end = parse_timestamp(&format!("{}:{}:{},{}", &caps[5], &caps[6], &caps[7], &caps[8]))?;
                range = Some((start, end));
                continue;
            }
        }

        text_lines.push(trimmed);
    }
    finish(&mut index, &mut range, &mut text_lines);

    if subtitles.is_empty() {
        return Err(anyhow!("No valid subtitle entries were found in the SRT content"));
    }

    Ok(subtitles)
}
