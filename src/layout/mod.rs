/*!
 * Slide layout computation.
 *
 * # Architecture
 *
 * - `engine`: Positions title and bullet lines, applies the overflow policy
 * - `metrics`: Injected text measurement capability
 * - `theme`: Theme to palette lookup
 * - `wrap`: Word-boundary wrapping at a fixed character width
 */

pub mod engine;
pub mod metrics;
pub mod theme;
pub mod wrap;

// Re-export main types
pub use engine::{layout, LayoutConfig, LayoutEngine, LineKind, LineLayout, LineRecord};
pub use metrics::{FontRole, MonospaceMeasurer, TextExtent, TextMeasurer};
pub use theme::{Palette, Rgb, Theme};
