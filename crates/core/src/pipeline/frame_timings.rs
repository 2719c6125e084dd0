/// Per-frame detection durations for a bounded source.
///
/// The buffer holds at most `capacity` samples, the frame count the source
/// reported when it was opened. Statistics cover only the samples actually
/// written.
#[derive(Debug, Default)]
pub struct FrameTimings {
    samples: Vec<f64>,
    capacity: Option<usize>,
}

/// Aggregate detection timing over the filled part of the buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimingSummary {
    pub frames: usize,
    pub average_ms: f64,
    pub max_ms: f64,
    pub min_ms: f64,
}

impl FrameTimings {
    /// An unallocated buffer: records are dropped, no summary is produced.
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the buffer at `frames` samples.
    ///
    /// The cap comes from the source's reported frame count, which may be
    /// wrong, so storage grows with recorded samples instead of being
    /// reserved here.
    pub fn allocate(&mut self, frames: usize) {
        self.samples = Vec::new();
        self.capacity = Some(frames);
    }

    pub fn is_allocated(&self) -> bool {
        self.capacity.is_some()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Number of slots written so far.
    pub fn filled(&self) -> usize {
        self.samples.len()
    }

    /// Appends a sample at the next free slot.
    ///
    /// Returns `false` without writing when the buffer is unallocated or
    /// already full.
    pub fn record(&mut self, duration_ms: f64) -> bool {
        match self.capacity {
            Some(capacity) if self.samples.len() < capacity => {
                self.samples.push(duration_ms);
                true
            }
            Some(capacity) => {
                log::debug!("Timing buffer full ({capacity} frames), sample dropped");
                false
            }
            None => false,
        }
    }

    /// Average, max and min over the written prefix; `None` if nothing was
    /// written or the buffer was never allocated.
    pub fn summary(&self) -> Option<TimingSummary> {
        if self.samples.is_empty() {
            return None;
        }
        let total: f64 = self.samples.iter().sum();
        let max_ms = self.samples.iter().copied().fold(f64::MIN, f64::max);
        let min_ms = self.samples.iter().copied().fold(f64::MAX, f64::min);
        Some(TimingSummary {
            frames: self.samples.len(),
            average_ms: total / self.samples.len() as f64,
            max_ms,
            min_ms,
        })
    }
}
