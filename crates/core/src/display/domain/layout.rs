use crate::shared::constants::WORKING_LONG_SIDE;
use crate::shared::frame::FrameSize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
}

/// Orientation and working resolution, derived from the first frame of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayLayout {
    pub orientation: Orientation,
    pub working: FrameSize,
}

impl DisplayLayout {
    /// Scales `frame` so its longer side is at most [`WORKING_LONG_SIDE`],
    /// keeping the aspect ratio. Smaller frames keep their native size.
    pub fn for_frame(frame: FrameSize) -> Self {
        Self::with_long_side(frame, WORKING_LONG_SIDE)
    }

    pub fn with_long_side(frame: FrameSize, long_side: u32) -> Self {
        let orientation = if frame.width >= frame.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        };
        let (long, short) = match orientation {
            Orientation::Landscape => (frame.width, frame.height),
            Orientation::Portrait => (frame.height, frame.width),
        };

        let (working_long, working_short) = if long <= long_side {
            (long, short)
        } else {
            let scaled = (short as f64 * long_side as f64 / long as f64).round() as u32;
            (long_side, scaled.max(1))
        };

        let working = match orientation {
            Orientation::Landscape => FrameSize::new(working_long, working_short),
            Orientation::Portrait => FrameSize::new(working_short, working_long),
        };
        Self {
            orientation,
            working,
        }
    }
}
