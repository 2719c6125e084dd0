use std::path::Path;

use opencv::core::{Mat, Rect, Size, Vector};
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::*;

use crate::detection::domain::object_detector::{BoundingBox, ObjectDetector};
use crate::shared::constants::{DETECTION_MIN_NEIGHBORS, DETECTION_SCALE_FACTOR};

/// Haar/LBP cascade classifier backed by OpenCV's `objdetect` module.
pub struct CascadeDetector {
    classifier: CascadeClassifier,
    window: (i32, i32),
    scale_factor: f64,
    min_neighbors: i32,
}

impl CascadeDetector {
    /// Loads a cascade XML file.
    ///
    /// OpenCV reports a missing or malformed file as an empty classifier
    /// rather than an error, so emptiness is checked explicitly.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let path_str = path
            .to_str()
            .ok_or_else(|| format!("Model path is not valid UTF-8: {}", path.display()))?;
        let mut classifier = CascadeClassifier::new(path_str)?;
        if classifier.empty()? {
            return Err(format!("Failed to load cascade model {}", path.display()).into());
        }
        let Size { width, height } = classifier.get_original_window_size()?;
        log::debug!(
            "Loaded cascade {} (window {width}x{height})",
            path.display()
        );

        Ok(Self {
            classifier,
            window: (width, height),
            scale_factor: DETECTION_SCALE_FACTOR,
            min_neighbors: DETECTION_MIN_NEIGHBORS,
        })
    }
}

impl ObjectDetector for CascadeDetector {
    fn detect_regions(
        &mut self,
        frame: &Mat,
    ) -> Result<Vec<BoundingBox>, Box<dyn std::error::Error>> {
        let mut objects = Vector::<Rect>::new();
        self.classifier.detect_multi_scale(
            frame,
            &mut objects,
            self.scale_factor,
            self.min_neighbors,
            0,
            Size::default(),
            Size::default(),
        )?;
        Ok(objects
            .iter()
            .map(|r| BoundingBox::new(r.x, r.y, r.width, r.height))
            .collect())
    }

    fn window_size(&self) -> (i32, i32) {
        self.window
    }
}
