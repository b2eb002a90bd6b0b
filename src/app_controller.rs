use anyhow::{Context, Result};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::Config;
use crate::errors::TimingError;
use crate::file_utils::FileManager;
use crate::layout::{LayoutEngine, LineLayout, TextMeasurer, Theme};
use crate::narration::{MeasuredDurations, NarrationTimer};
use crate::scene_parser;
use crate::segmenter::{self, Section};
use crate::subtitle::{self, Subtitle, SubtitleTimer, TrackValidator};

// @module: Application controller for slide and caption generation

/// How the input text is structured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// Freeform script with `#` headings and `---` rules
    #[default]
    Script,
    /// Numbered scene breakdown
    Scenes,
}

/// Sections loaded from one input
#[derive(Debug, Clone, Default)]
pub struct LoadedSections {
    /// Spoken and captioned text, one per section
    pub narration: Vec<Section>,
    /// Text laid out on each slide, same order and length as `narration`
    pub slides: Vec<Section>,
    /// Durations declared by the input itself
    pub declared_durations: Option<Vec<f64>>,
}

/// Per-run options
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub format: InputFormat,
    /// JSON array of measured narration durations, one per section
    pub durations_path: Option<PathBuf>,
    pub force_overwrite: bool,
}

/// One slide of the hand-off document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slide {
    // @field: Text drawn on the slide
    pub section: Section,
    pub narration_secs: f64,
    pub layout: LineLayout,
}

/// Hand-off document for the compositor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideDeck {
    pub size: [u32; 2],
    pub theme: Theme,
    pub fps: u32,
    pub slides: Vec<Slide>,
}

/// Outcome of building one script
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub srt_path: PathBuf,
    pub slides_path: PathBuf,
    pub sections: usize,
    pub captions: usize,
    pub truncated_slides: usize,
    pub total_secs: f64,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Shared by all layout tasks
    engine: Arc<LayoutEngine>,
    // @field: Glyph metrics backend
    measurer: Arc<dyn TextMeasurer>,
}

impl Controller {
    // @method: Create a controller using the configured fixed-width measurer
    pub fn with_config(config: Config) -> Result<Self> {
        let measurer = Arc::new(config.measure.clone());
        Self::with_measurer(config, measurer)
    }

    // @method: Create a controller with an external text measurer
    pub fn with_measurer(config: Config, measurer: Arc<dyn TextMeasurer>) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        let engine = Arc::new(LayoutEngine::with_config(config.layout.clone()));
        Ok(Self {
            config,
            engine,
            measurer,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Split input text into sections.
    ///
    /// Scripts show what they narrate. Scene breakdowns narrate the scene text
    /// but show its visual direction, and may declare durations.
    pub fn load_sections(&self, text: &str, format: InputFormat) -> LoadedSections {
        match format {
            InputFormat::Script => {
                let sections = segmenter::segment(text);
                LoadedSections {
                    slides: sections.clone(),
                    narration: sections,
                    declared_durations: None,
                }
            }
            InputFormat::Scenes => {
                let scenes = scene_parser::parse_scenes(text);
                LoadedSections {
                    narration: scenes.iter().map(|s| s.to_section()).collect(),
                    slides: scenes.iter().map(|s| s.slide_section()).collect(),
                    declared_durations: scene_parser::declared_durations(&scenes),
                }
            }
        }
    }

    /// Lay out every section concurrently, keeping section order
    pub async fn layout_sections(&self, sections: &[Section]) -> Result<Vec<LineLayout>> {
        let progress_bar = ProgressBar::new(sections.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} slides ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        progress_bar.set_message("Laying out");

        let width = self.config.canvas.width as f32;
        let height = self.config.canvas.height as f32;
        let theme = self.config.canvas.theme;

        let tasks = sections.iter().cloned().map(|section| {
            let engine = Arc::clone(&self.engine);
            let measurer = Arc::clone(&self.measurer);
            let pb = progress_bar.clone();
            tokio::task::spawn_blocking(move || {
                let layout = engine.layout(&section, width, height, theme, measurer.as_ref());
                pb.inc(1);
                layout
            })
        });

        let layouts = join_all(tasks)
            .await
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .context("Layout task failed")?;

        progress_bar.finish_and_clear();
        Ok(layouts)
    }

    /// Allocate the caption track for the ordered sections
    pub fn build_captions(&self, sections: &[Section], durations: &[f64]) -> Result<Vec<Subtitle>, TimingError> {
        let texts: Vec<String> = sections.iter().map(Section::narration_text).collect();
        SubtitleTimer::with_config(self.config.timing.clone()).allocate(&texts, durations)
    }

    // @resolves: Measured file, then declared scene durations, then estimate
    fn resolve_durations(&self, sections: &[Section], declared: Option<Vec<f64>>, options: &BuildOptions) -> Result<Vec<f64>> {
        if let Some(path) = &options.durations_path {
            debug!("Using measured narration durations from {:?}", path);
            return MeasuredDurations::from_json_file(path)?.durations(sections);
        }
        if let Some(durations) = declared {
            debug!("Using durations declared in the scene breakdown");
            return Ok(durations);
        }
        self.config.narration.durations(sections)
    }

    /// Build captions and slide layouts for one script file.
    ///
    /// Returns `None` when outputs already exist and overwriting is off.
    pub async fn run(&self, input_file: &Path, output_dir: &Path, options: &BuildOptions) -> Result<Option<BuildReport>> {
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(input_file) {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }
        FileManager::ensure_dir(output_dir)?;

        let srt_path = FileManager::generate_output_path(input_file, output_dir, "", "srt");
        let slides_path = FileManager::generate_output_path(input_file, output_dir, "slides", "json");
        if (srt_path.exists() || slides_path.exists()) && !options.force_overwrite {
            warn!("Skipping {:?}, outputs already exist (use -f to force overwrite)", input_file);
            return Ok(None);
        }

        let text = FileManager::read_to_string(input_file)?;
        let LoadedSections {
            narration: sections,
            slides,
            declared_durations,
        } = self.load_sections(&text, options.format);
        if sections.is_empty() {
            warn!("No content found in {:?}", input_file);
        }
        info!("Segmented {:?} into {} sections", input_file, sections.len());

        let durations = self.resolve_durations(&sections, declared_durations, options)?;
        let captions = self.build_captions(&sections, &durations)
            .with_context(|| format!("Failed to time captions for {:?}", input_file))?;

        let report = TrackValidator::new().check_track(&captions);
        for flagged in &report.flagged {
            for issue in &flagged.issues {
                warn!("Caption {}: {}", flagged.index, issue);
            }
        }

        let layouts = self.layout_sections(&slides).await?;
        let truncated_slides = layouts.iter().filter(|l| l.truncated).count();
        if truncated_slides > 0 {
            warn!("{} of {} slides were truncated to fit the canvas", truncated_slides, layouts.len());
        }

        let deck = SlideDeck {
            size: [self.config.canvas.width, self.config.canvas.height],
            theme: self.config.canvas.theme,
            fps: self.config.canvas.fps,
            slides: slides
                .into_iter()
                .zip(durations.iter().copied())
                .zip(layouts)
                .map(|((section, narration_secs), layout)| Slide {
                    section,
                    narration_secs,
                    layout,
                })
                .collect(),
        };

        subtitle::write_srt(&srt_path, &captions)?;
        let deck_json = serde_json::to_string_pretty(&deck)
            .context("Failed to serialize slide deck")?;
        FileManager::write_to_file(&slides_path, &deck_json)?;

        let total_secs: f64 = durations.iter().sum();
        info!(
            "Success: {} ({} captions, {}) in {}",
            srt_path.display(),
            captions.len(),
            Self::format_duration(std::time::Duration::from_secs_f64(total_secs)),
            Self::format_duration(start_time.elapsed())
        );

        Ok(Some(BuildReport {
            srt_path,
            slides_path,
            sections: sections.len(),
            captions: captions.len(),
            truncated_slides,
            total_secs,
        }))
    }

    /// Build every script found under a directory, writing outputs next to
    /// each script. Returns the number of scripts built.
    pub async fn run_folder(&self, input_dir: &Path, options: &BuildOptions) -> Result<usize> {
        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow::anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let scripts = FileManager::find_scripts(input_dir)?;
        info!("Found {} scripts in {:?}", scripts.len(), input_dir);

        let mut built = 0;
        for script in &scripts {
            let output_dir = script.parent().unwrap_or(Path::new(".")).to_path_buf();
            match self.run(script, &output_dir, options).await {
                Ok(Some(_)) => built += 1,
                Ok(None) => {}
                Err(e) => error!("Error processing {:?}: {:#}", script, e),
            }
        }

        info!("Finished processing {} of {} scripts", built, scripts.len());
        Ok(built)
    }

    // Format duration in a human-readable format (HH:MM:SS)
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
