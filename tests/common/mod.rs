/*!
 * Common test utilities for the lecturecast test suite
 */

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tempfile::TempDir;

use lecturecast::layout::MonospaceMeasurer;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Routes library log output through the test harness
pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Measurer with 10px per character and 20px lines for both roles
pub fn fixed_measurer() -> MonospaceMeasurer {
    MonospaceMeasurer::uniform(10.0, 20.0)
}

/// A short lecture script with headings and a rule
pub const SAMPLE_SCRIPT: &str = "# Ownership
Every value has a single owner.

- When the owner goes out of scope, the value is dropped.
---
# Borrowing
References let code use a value without taking ownership. Mutable references are exclusive.
";

/// A scene breakdown with declared durations
pub const SAMPLE_SCENES: &str = "Scene 1: Welcome
Duration (in seconds): 6
Narration: Welcome to the course. Today we study ownership.
Visual: Title card

Scene 2: Moves
Duration (in seconds): 4.5
Narration: Assignment moves a value.
Visual: Two boxes and an arrow
";
