/*!
 * # lecturecast - lecture scripts to timed slides
 *
 * A Rust library for turning a freeform lecture script into narrated slide
 * material.
 *
 * ## Features
 *
 * - Segment a script into titled sections at `#` headings and `---` rules,
 *   with sentence-group fallback for unstructured prose
 * - Parse numbered scene breakdowns with declared durations
 * - Compute deterministic slide layouts: wrapped, centered titles, bulleted
 *   body text and truncation at the canvas bottom
 * - Allocate per-sentence caption timing proportional to text length and
 *   write SRT caption tracks
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `segmenter`: Script to ordered sections
 * - `scene_parser`: Scene breakdown to sections
 * - `layout`: Slide layout computation:
 *   - `layout::engine`: Line placement and overflow policy
 *   - `layout::metrics`: Injected text measurement
 *   - `layout::theme`: Color themes
 * - `subtitle`: Caption track generation:
 *   - `subtitle::timer`: Proportional caption timing
 *   - `subtitle::srt`: SRT serialization and parsing
 *   - `subtitle::validate`: Advisory track checks
 * - `narration`: Narration duration providers
 * - `app_config`: Configuration management
 * - `app_controller`: End-to-end build of one script or a folder
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod layout;
pub mod narration;
pub mod scene_parser;
pub mod segmenter;
pub mod sentences;
pub mod subtitle;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AppError, TimingError};
pub use layout::{layout, LineLayout, TextMeasurer, Theme};
pub use segmenter::{segment, Section};
pub use subtitle::{allocate, to_srt, Subtitle};
