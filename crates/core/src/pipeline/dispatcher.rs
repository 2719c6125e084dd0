use std::path::{Path, PathBuf};
use std::time::Instant;

use thiserror::Error;

use crate::detection::domain::detector_set::{DetectorSet, FrameDetections};
use crate::detection::domain::preprocessor::preprocess;
use crate::display::screen::Display;
use crate::settings::boundary_config::{BoundaryConfig, Category, SizeBounds};
use crate::shared::constants::{
    DEFAULT_DISPLAY_SCALE, ESC_KEY, IMAGE_KEY_DELAY_MS, MAIN_WINDOW_TITLE, STREAM_KEY_DELAY_MS,
};
use crate::shared::frame::Frame;
use crate::shared::region::ScaleFactors;
use crate::shared::video_source::VideoSource;
use crate::video::domain::frame_source::FrameSource;

use super::frame_timings::{FrameTimings, TimingSummary};

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("could not open video source {name}: {reason}")]
    SourceUnavailable { name: String, reason: String },
    #[error("no frame could be read from image {0}")]
    NoImageFrame(PathBuf),
}

/// What a run reads from.
#[derive(Clone, Debug, PartialEq)]
pub enum RunMode {
    /// One still image, shown until a key is pressed.
    Image(PathBuf),
    /// A camera or video file, processed until it ends or escape is pressed.
    Stream(VideoSource),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DispatchOptions {
    pub processed_frame_preview: bool,
    pub display_scale: f64,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            processed_frame_preview: false,
            display_scale: DEFAULT_DISPLAY_SCALE,
        }
    }
}

/// Outcome of a completed run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunReport {
    pub frames_processed: usize,
    pub regions_detected: usize,
    pub interrupted: bool,
    pub timing: Option<TimingSummary>,
}

/// Drives frames from a source through preprocessing, every detector and
/// the display.
///
/// The working resolution is taken from the first frame and kept for the
/// rest of the run.
pub struct Dispatcher {
    detectors: DetectorSet,
    display: Display,
    reader: Box<dyn FrameSource>,
    boundaries: Option<BoundaryConfig>,
    options: DispatchOptions,
    is_first_frame: bool,
    timings: FrameTimings,
}

impl Dispatcher {
    pub fn new(
        detectors: DetectorSet,
        display: Display,
        reader: Box<dyn FrameSource>,
        boundaries: Option<BoundaryConfig>,
        options: DispatchOptions,
    ) -> Self {
        Self {
            detectors,
            display,
            reader,
            boundaries,
            options,
            is_first_frame: true,
            timings: FrameTimings::new(),
        }
    }

    pub fn timings(&self) -> &FrameTimings {
        &self.timings
    }

    pub fn start(&mut self, mode: &RunMode) -> Result<RunReport, Box<dyn std::error::Error>> {
        if self.detectors.is_empty() {
            log::warn!("No detection models loaded, frames are shown unannotated");
        } else {
            let names: Vec<&str> = self.detectors.entries().iter().map(|e| e.name()).collect();
            log::info!("Running {} models: {}", self.detectors.len(), names.join(", "));
        }

        // TODO: drop detections outside the per-category min/max sizes once
        // models are tagged as face or body.
        if let Some(boundaries) = &self.boundaries {
            for category in Category::ALL {
                let SizeBounds { min, max } = boundaries.bounds(category);
                log::debug!(
                    "{category:?} size bounds {}x{} to {}x{} (not applied)",
                    min.width,
                    min.height,
                    max.width,
                    max.height
                );
            }
        }

        let result = match mode {
            RunMode::Image(path) => self.run_image(path),
            RunMode::Stream(source) => self.run_stream(source),
        };
        self.reader.close();
        result
    }

    fn run_image(&mut self, path: &Path) -> Result<RunReport, Box<dyn std::error::Error>> {
        let source = VideoSource::FilePath(path.to_path_buf());
        self.reader.open(&source)?;
        let frame = self
            .reader
            .read_frame()?
            .ok_or_else(|| DispatchError::NoImageFrame(path.to_path_buf()))?;

        let detections = self.detect_and_display(&frame)?;
        let mut report = RunReport {
            frames_processed: 1,
            regions_detected: detections.len(),
            ..RunReport::default()
        };

        let key = self.display.wait_key(IMAGE_KEY_DELAY_MS)?;
        if is_escape(key) {
            log::info!("Interrupted by user");
            report.interrupted = true;
        }
        Ok(report)
    }

    fn run_stream(
        &mut self,
        source: &VideoSource,
    ) -> Result<RunReport, Box<dyn std::error::Error>> {
        let metadata = self
            .reader
            .open(source)
            .map_err(|e| DispatchError::SourceUnavailable {
                name: source.to_string(),
                reason: e.to_string(),
            })?;
        log::info!(
            "Opened {source}: {}x{} @ {:.2} fps",
            metadata.width,
            metadata.height,
            metadata.fps
        );

        if let Some(total) = metadata.bounded_frame_count() {
            log::debug!("Collecting timings for {total} frames");
            self.timings.allocate(total);
        }

        let mut report = RunReport::default();
        while let Some(frame) = self.reader.read_frame()? {
            let detections = self.detect_and_display(&frame)?;
            report.frames_processed += 1;
            report.regions_detected += detections.len();

            let key = self.display.wait_key(STREAM_KEY_DELAY_MS)?;
            if is_escape(key) {
                log::info!("Interrupted by user after {} frames", report.frames_processed);
                report.interrupted = true;
                break;
            }
        }

        report.timing = self.timings.summary();
        if let Some(t) = report.timing {
            log::info!(
                "Detection time over {} frames: average {:.3} ms, max {:.3} ms, min {:.3} ms",
                t.frames,
                t.average_ms,
                t.max_ms,
                t.min_ms
            );
        }
        Ok(report)
    }

    /// Runs one detection pass and renders the result.
    fn detect_and_display(
        &mut self,
        frame: &Frame,
    ) -> Result<FrameDetections, Box<dyn std::error::Error>> {
        let (processed, detections) = self.detect(frame)?;

        self.display.render(
            frame.mat(),
            &detections.original,
            MAIN_WINDOW_TITLE,
            self.options.display_scale,
        )?;
        if self.options.processed_frame_preview {
            self.display.render_preview(&processed, &detections.working)?;
        }
        Ok(detections)
    }

    /// Preprocesses `frame` and runs every detector on it, timing the pass.
    fn detect(
        &mut self,
        frame: &Frame,
    ) -> Result<(opencv::core::Mat, FrameDetections), Box<dyn std::error::Error>> {
        let started = Instant::now();

        if self.is_first_frame {
            self.display.set_orientation(frame.size());
            self.is_first_frame = false;
        }
        let working = self
            .display
            .working_size()
            .ok_or("working resolution not set")?;

        let processed = preprocess(frame, working)?;
        let scale = ScaleFactors::between(frame.size(), working);
        let detections = self.detectors.detect(&processed, scale)?;

        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        log::info!(
            "Frame {}: {} regions in {:.3} ms",
            frame.index(),
            detections.len(),
            elapsed_ms
        );
        if self.timings.is_allocated() {
            self.timings.record(elapsed_ms);
        }
        Ok((processed, detections))
    }
}

fn is_escape(key: i32) -> bool {
    key >= 0 && (key & 0xFF) == ESC_KEY
}
