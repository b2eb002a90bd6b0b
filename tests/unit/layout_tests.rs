/*!
 * Tests for slide layout computation
 */

use lecturecast::layout::engine::body_bullets;
use lecturecast::layout::wrap::wrap_words;
use lecturecast::layout::{
    layout, FontRole, LayoutConfig, LayoutEngine, LineKind, MonospaceMeasurer, TextExtent,
    Rgb, TextMeasurer, Theme,
};
use lecturecast::segmenter::Section;
use crate::common;

/// Measurer that reports a fixed extent regardless of text
struct BlockMeasurer;

impl TextMeasurer for BlockMeasurer {
    fn measure(&self, _text: &str, role: FontRole) -> TextExtent {
        match role {
            FontRole::Title => TextExtent::new(400.0, 50.0),
            FontRole::Body => TextExtent::new(300.0, 30.0),
        }
    }
}

/// Test positions of a small slide
#[test]
fn test_layout_withShortSection_shouldPlaceTitleSeparatorAndBullet() {
    let section = Section::new("Intro", "Hello");

    let result = layout(&section, 1280.0, 720.0, Theme::Dark, &common::fixed_measurer());

    assert!(!result.truncated);
    assert_eq!(result.lines.len(), 2);

    let title = &result.lines[0];
    assert_eq!(title.kind, LineKind::Title);
    assert_eq!(title.text, "Intro");
    assert_eq!(title.width, 50.0);
    assert_eq!(title.x_offset, 615.0);
    assert_eq!(title.y_offset, 80.0);
    assert!(title.marker.is_none());

    let separator = result.separator.expect("separator should be drawn");
    assert_eq!(separator.y, 120.0);
    assert_eq!(separator.x_start, 80.0);
    assert_eq!(separator.x_end, 1200.0);

    let bullet = &result.lines[1];
    assert_eq!(bullet.kind, LineKind::Bullet);
    assert_eq!(bullet.text, "Hello");
    assert_eq!(bullet.x_offset, 120.0);
    assert_eq!(bullet.y_offset, 140.0);
    let marker = bullet.marker.expect("first bullet line should carry a marker");
    assert_eq!(marker.center_x, 98.0);
    assert_eq!(marker.center_y, 150.0);
}

/// Test that consecutive bullets get extra spacing and wrapped lines do not
#[test]
fn test_layout_withTwoParagraphs_shouldSpaceBullets() {
    let body = format!("{}\n\nSecond point", "word ".repeat(15).trim());
    let section = Section::new("T", body);

    let result = layout(&section, 1280.0, 720.0, Theme::Dark, &common::fixed_measurer());
    let bullets: Vec<_> = result.bullet_lines().collect();

    // 15 words of 4 chars wrap at 50 chars into 10 + 5
    assert_eq!(bullets.len(), 3);
    assert_eq!(bullets[0].y_offset, 140.0);
    assert!(bullets[0].marker.is_some());
    assert_eq!(bullets[1].y_offset, 166.0);
    assert!(bullets[1].marker.is_none());
    assert_eq!(bullets[2].y_offset, 202.0);
    assert!(bullets[2].marker.is_some());
    assert_eq!(result.bullet_count(), 2);
}

/// Test long titles wrap and each line is centered
#[test]
fn test_layout_withLongTitle_shouldWrapAndCenterEachLine() {
    let section = Section::new("Understanding lifetimes in generic functions", "");

    let result = layout(&section, 1280.0, 720.0, Theme::Dark, &common::fixed_measurer());
    let titles: Vec<_> = result.title_lines().collect();

    assert_eq!(titles.len(), 2);
    assert_eq!(titles[0].y_offset, 80.0);
    assert_eq!(titles[1].y_offset, 110.0);
    for line in &titles {
        assert!(line.text.chars().count() <= 28);
        assert_eq!(line.x_offset, (1280.0 - line.width) / 2.0);
    }
    assert_eq!(result.bullet_count(), 0);
}

/// Test overflow policy drops trailing content and flags the slide
#[test]
fn test_layout_withLongBody_shouldTruncateAboveBottomMargin() {
    let body = vec!["A reasonably long paragraph that keeps going."; 40].join("\n\n");
    let section = Section::new("Overflow", body.clone());

    let result = layout(&section, 1280.0, 720.0, Theme::Dark, &common::fixed_measurer());

    assert!(result.truncated);
    assert!(result.content_bottom() <= 720.0 - 140.0);

    let total_lines: usize = body_bullets(&body)
        .iter()
        .map(|b| wrap_words(b, 50).len())
        .sum();
    assert!(result.bullet_lines().count() < total_lines);
}

/// Test every emitted line fits the canvas for varied inputs
#[test]
fn test_layout_withVariedSections_shouldStayWithinBounds() {
    let sections = [
        Section::new("A", ""),
        Section::new("Title", "one\n\ntwo\n\nthree"),
        Section::new("x ".repeat(60).trim(), "y ".repeat(400).trim()),
    ];
    let measurer = MonospaceMeasurer::default();

    for section in &sections {
        for height in [360.0, 720.0, 1080.0] {
            let result = layout(section, 1280.0, height, Theme::Light, &measurer);
            let limit = height - 140.0;
            for line in &result.lines {
                assert!(line.bottom() <= limit, "line {:?} below {}", line.text, limit);
            }
        }
    }
}

/// Test a canvas too small for even the title
#[test]
fn test_layout_withTinyCanvas_shouldEmitNothing() {
    let section = Section::new("Title", "Body");

    let result = layout(&section, 1280.0, 150.0, Theme::Dark, &common::fixed_measurer());

    assert!(result.truncated);
    assert!(result.lines.is_empty());
    assert!(result.separator.is_none());
}

/// Test an empty body yields a title-only slide
#[test]
fn test_layout_withEmptyBody_shouldNotTruncate() {
    let result = layout(&Section::new("Only title", ""), 1280.0, 720.0, Theme::Dark, &common::fixed_measurer());

    assert!(!result.truncated);
    assert_eq!(result.bullet_count(), 0);
    assert!(result.separator.is_some());
}

/// Test layout is a pure function of its inputs
#[test]
fn test_layout_withSameInputs_shouldBeDeterministic() {
    let sections = lecturecast::segmenter::segment(common::SAMPLE_SCRIPT);
    let measurer = common::fixed_measurer();

    for section in &sections {
        let first = layout(section, 1920.0, 1080.0, Theme::Dark, &measurer);
        let second = layout(section, 1920.0, 1080.0, Theme::Dark, &measurer);
        assert_eq!(first, second);
    }
}

/// Test the engine uses the injected measurer's extents
#[test]
fn test_layout_withCustomMeasurer_shouldUseReportedExtents() {
    let result = layout(&Section::new("Any", "Thing"), 1280.0, 720.0, Theme::Dark, &BlockMeasurer);

    assert_eq!(result.lines[0].width, 400.0);
    assert_eq!(result.lines[0].x_offset, 440.0);
    assert_eq!(result.lines[0].height, 50.0);
    // Title bottom 130, separator at 150, body at 170
    assert_eq!(result.separator.map(|s| s.y), Some(150.0));
    assert_eq!(result.lines[1].y_offset, 170.0);
    assert_eq!(result.lines[1].height, 30.0);
}

/// Test custom geometry is honored
#[test]
fn test_layout_engine_withCustomMargins_shouldShiftContent() {
    let config = LayoutConfig {
        margin: 40.0,
        bullet_indent: 20.0,
        ..LayoutConfig::default()
    };
    let engine = LayoutEngine::with_config(config);

    let result = engine.layout(&Section::new("T", "B"), 1280.0, 720.0, Theme::Dark, &common::fixed_measurer());

    assert_eq!(result.lines[0].y_offset, 40.0);
    assert_eq!(result.lines[1].x_offset, 60.0);
    assert_eq!(engine.config().bottom_margin(), 100.0);
}

/// Test theme palettes are attached
#[test]
fn test_layout_withTheme_shouldAttachPalette() {
    let section = Section::new("T", "");
    let dark = layout(&section, 1280.0, 720.0, Theme::Dark, &common::fixed_measurer());
    let light = layout(&section, 1280.0, 720.0, Theme::Light, &common::fixed_measurer());

    assert_eq!(dark.palette, Theme::Dark.palette());
    assert_eq!(light.palette, Theme::Light.palette());
    assert_ne!(dark.palette.background, light.palette.background);
    assert_eq!(dark.palette.background.to_hex(), "#121826");
}

/// Test palettes draw on the stock slide colors with markers in the text color
#[test]
fn test_theme_palette_withEachTheme_shouldUseSlideColors() {
    let dark = Theme::Dark.palette();
    let light = Theme::Light.palette();

    assert_eq!(dark.background, Rgb::new(18, 24, 38));
    assert_eq!(dark.foreground, Rgb::new(245, 246, 248));
    assert_eq!(dark.accent, dark.foreground);
    assert_eq!(light.background, Rgb::new(245, 246, 248));
    assert_eq!(light.foreground.to_hex(), "#14171b");
    assert_eq!(light.accent, light.foreground);
}

/// Test theme names parse case-insensitively
#[test]
fn test_theme_fromStr_withVariousCases_shouldParse() {
    assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
    assert_eq!("LIGHT".parse::<Theme>().unwrap(), Theme::Light);
    assert!("sepia".parse::<Theme>().is_err());
    assert_eq!(Theme::Light.to_string(), "light");
}
