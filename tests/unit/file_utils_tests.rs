/*!
 * Tests for file utility functionality
 */

use anyhow::Result;
use std::fs;
use std::path::Path;
use lecturecast::file_utils::{normalize_line_endings, FileManager};
use crate::common;

/// Test file and directory existence checks
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file_path = common::create_test_file(temp_dir.path(), "lecture.md", "# Title")?;

    assert!(FileManager::file_exists(&file_path));
    assert!(!FileManager::file_exists(temp_dir.path()));
    assert!(FileManager::dir_exists(temp_dir.path()));
    assert!(!FileManager::file_exists(temp_dir.path().join("missing.md")));
    Ok(())
}

/// Test output path generation with and without a suffix
#[test]
fn test_generate_output_path_withSuffix_shouldInsertBeforeExtension() {
    let input = Path::new("/scripts/lecture-01.md");
    let out = Path::new("/out");

    assert_eq!(
        FileManager::generate_output_path(input, out, "", "srt"),
        Path::new("/out/lecture-01.srt")
    );
    assert_eq!(
        FileManager::generate_output_path(input, out, "slides", "json"),
        Path::new("/out/lecture-01.slides.json")
    );
}

/// Test script discovery across a tree
#[test]
fn test_find_scripts_withMixedFiles_shouldReturnSortedScripts() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("week2");
    fs::create_dir_all(&nested)?;

    common::create_test_file(temp_dir.path(), "b.md", "b")?;
    common::create_test_file(temp_dir.path(), "a.txt", "a")?;
    common::create_test_file(temp_dir.path(), "notes.srt", "x")?;
    common::create_test_file(&nested, "c.MARKDOWN", "c")?;

    let scripts = FileManager::find_scripts(temp_dir.path())?;

    assert_eq!(scripts.len(), 3);
    assert!(scripts.windows(2).all(|w| w[0] <= w[1]));
    assert!(scripts.iter().all(|p| p.extension().is_some_and(|e| e != "srt")));
    Ok(())
}

/// Test extension matching ignores a leading dot
#[test]
fn test_find_files_withDottedExtension_shouldMatch() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "one.srt", "1")?;

    assert_eq!(FileManager::find_files(temp_dir.path(), ".srt")?.len(), 1);
    assert_eq!(FileManager::find_files(temp_dir.path(), "srt")?.len(), 1);
    Ok(())
}

/// Test reading normalizes line endings
#[test]
fn test_read_to_string_withCrlfAndBom_shouldNormalize() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "s.md", "\u{feff}# A\r\nB\rC\n")?;

    assert_eq!(FileManager::read_to_string(&path)?, "# A\nB\nC\n");
    Ok(())
}

/// Test writing creates parent directories
#[test]
fn test_write_to_file_withNestedPath_shouldCreateParents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("deep").join("er").join("out.json");

    FileManager::write_to_file(&path, "[]")?;

    assert_eq!(fs::read_to_string(&path)?, "[]");
    Ok(())
}

/// Test line ending normalization on plain text
#[test]
fn test_normalize_line_endings_withLfText_shouldBeUnchanged() {
    assert_eq!(normalize_line_endings("a\nb"), "a\nb");
}
