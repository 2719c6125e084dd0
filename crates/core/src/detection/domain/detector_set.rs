use opencv::core::Mat;

use crate::detection::domain::color_palette::random_colors;
use crate::detection::domain::model_entry::ModelEntry;
use crate::detection::domain::object_detector::ObjectDetector;
use crate::shared::region::{Region, ScaleFactors};

/// Regions found in one frame, in both coordinate spaces.
///
/// `working[i]` and `original[i]` describe the same detection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameDetections {
    pub original: Vec<Region>,
    pub working: Vec<Region>,
}

impl FrameDetections {
    pub fn len(&self) -> usize {
        self.original.len()
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }
}

/// Every configured model, evaluated in configuration order.
pub struct DetectorSet {
    entries: Vec<ModelEntry>,
}

impl DetectorSet {
    pub fn new(entries: Vec<ModelEntry>) -> Self {
        Self { entries }
    }

    /// Pairs each named detector with a distinct random color.
    pub fn with_random_colors(models: Vec<(String, Box<dyn ObjectDetector>)>) -> Self {
        let colors = random_colors(models.len());
        let entries = models
            .into_iter()
            .zip(colors)
            .map(|((name, detector), color)| {
                let entry = ModelEntry::new(name, detector, color);
                log::debug!(
                    "Model {} drawn as {:?} in {}",
                    entry.name(),
                    entry.shape(),
                    entry.color()
                );
                entry
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[ModelEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs every model on the preprocessed frame.
    ///
    /// Results are concatenated in model order, then detector order; overlaps
    /// between models are kept.
    pub fn detect(
        &mut self,
        processed: &Mat,
        scale: ScaleFactors,
    ) -> Result<FrameDetections, Box<dyn std::error::Error>> {
        let mut detections = FrameDetections::default();
        for entry in &mut self.entries {
            let color = entry.color();
            let shape = entry.shape();
            let boxes = entry.detector_mut().detect_regions(processed)?;
            for b in boxes {
                let working = Region::new(
                    b.x as f64,
                    b.y as f64,
                    b.width as f64,
                    b.height as f64,
                    color,
                    shape,
                );
                detections.original.push(working.rescaled(scale));
                detections.working.push(working);
            }
        }
        Ok(detections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::object_detector::BoundingBox;
    use crate::shared::color::Color;
    use crate::shared::region::Shape;
    use approx::assert_relative_eq;

    struct StubDetector {
        window: (i32, i32),
        boxes: Vec<BoundingBox>,
    }

    impl ObjectDetector for StubDetector {
        fn detect_regions(
            &mut self,
            _frame: &Mat,
        ) -> Result<Vec<BoundingBox>, Box<dyn std::error::Error>> {
            Ok(self.boxes.clone())
        }

        fn window_size(&self) -> (i32, i32) {
            self.window
        }
    }

    struct FailingDetector;

    impl ObjectDetector for FailingDetector {
        fn detect_regions(
            &mut self,
            _frame: &Mat,
        ) -> Result<Vec<BoundingBox>, Box<dyn std::error::Error>> {
            Err("cascade exploded".into())
        }

        fn window_size(&self) -> (i32, i32) {
            (24, 24)
        }
    }

    fn entry(name: &str, window: (i32, i32), boxes: Vec<BoundingBox>, color: Color) -> ModelEntry {
        ModelEntry::new(name, Box::new(StubDetector { window, boxes }), color)
    }

    const RED: Color = Color::new(255, 0, 0);
    const BLUE: Color = Color::new(0, 0, 255);

    #[test]
    fn test_rescales_into_original_space() {
        let mut set = DetectorSet::new(vec![entry(
            "face",
            (24, 24),
            vec![BoundingBox::new(10, 20, 30, 40)],
            RED,
        )]);

        let d = set
            .detect(&Mat::default(), ScaleFactors { x: 2.0, y: 1.5 })
            .unwrap();

        assert_eq!(d.len(), 1);
        let o = d.original[0];
        assert_relative_eq!(o.x, 20.0);
        assert_relative_eq!(o.y, 30.0);
        assert_relative_eq!(o.width, 60.0);
        assert_relative_eq!(o.height, 60.0);
        let w = d.working[0];
        assert_relative_eq!(w.x, 10.0);
        assert_relative_eq!(w.y, 20.0);
        assert_relative_eq!(w.width, 30.0);
        assert_relative_eq!(w.height, 40.0);
    }

    #[test]
    fn test_concatenates_in_model_then_detector_order() {
        let mut set = DetectorSet::new(vec![
            entry(
                "face",
                (24, 24),
                vec![BoundingBox::new(1, 1, 5, 5), BoundingBox::new(2, 2, 5, 5)],
                RED,
            ),
            entry(
                "body",
                (14, 28),
                vec![BoundingBox::new(3, 3, 5, 10)],
                BLUE,
            ),
        ]);

        let d = set.detect(&Mat::default(), ScaleFactors::identity()).unwrap();

        let xs: Vec<f64> = d.original.iter().map(|r| r.x).collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0]);
        assert_eq!(d.original[0].shape, Shape::Ellipse);
        assert_eq!(d.original[0].color, RED);
        assert_eq!(d.original[2].shape, Shape::Rectangle);
        assert_eq!(d.original[2].color, BLUE);
    }

    #[test]
    fn test_overlapping_detections_across_models_are_kept() {
        let same = BoundingBox::new(10, 10, 20, 20);
        let mut set = DetectorSet::new(vec![
            entry("a", (24, 24), vec![same], RED),
            entry("b", (24, 24), vec![same], BLUE),
        ]);

        let d = set.detect(&Mat::default(), ScaleFactors::identity()).unwrap();

        assert_eq!(d.len(), 2);
    }

    #[test]
    fn test_no_detections_yields_empty_lists() {
        let mut set = DetectorSet::new(vec![entry("face", (24, 24), vec![], RED)]);
        let d = set.detect(&Mat::default(), ScaleFactors::identity()).unwrap();
        assert!(d.is_empty());
        assert!(d.working.is_empty());
    }

    #[test]
    fn test_detector_failure_propagates() {
        let mut set = DetectorSet::new(vec![ModelEntry::new(
            "broken",
            Box::new(FailingDetector),
            RED,
        )]);
        assert!(set
            .detect(&Mat::default(), ScaleFactors::identity())
            .is_err());
    }

    #[test]
    fn test_random_colors_are_distinct_per_model() {
        let models: Vec<(String, Box<dyn ObjectDetector>)> = (0..4)
            .map(|i| {
                let detector: Box<dyn ObjectDetector> = Box::new(StubDetector {
                    window: (24, 24),
                    boxes: vec![],
                });
                (format!("model-{i}"), detector)
            })
            .collect();

        let set = DetectorSet::with_random_colors(models);

        assert_eq!(set.len(), 4);
        let colors: std::collections::HashSet<_> =
            set.entries().iter().map(|e| e.color()).collect();
        assert_eq!(colors.len(), 4);
        assert_eq!(set.entries()[2].name(), "model-2");
    }
}
