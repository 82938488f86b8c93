use std::collections::VecDeque;
use std::time::Duration;

/// Rolling window of per-frame update durations.
#[derive(Debug)]
pub struct FrameStats {
    window: VecDeque<Duration>,
    capacity: usize,
    total_frames: u64,
}

impl FrameStats {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
            total_frames: 0,
        }
    }

    pub fn record(&mut self, dt: Duration) {
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(dt);
        self.total_frames += 1;
    }

    /// Frames currently in the window.
    pub fn count(&self) -> usize {
        self.window.len()
    }

    /// Frames recorded since creation, including those that left the window.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    pub fn average(&self) -> Duration {
        if self.window.is_empty() {
            return Duration::ZERO;
        }
        self.window.iter().sum::<Duration>() / self.window.len() as u32
    }

    pub fn max(&self) -> Duration {
        self.window.iter().copied().max().unwrap_or(Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.window.iter().copied().min().unwrap_or(Duration::ZERO)
    }
}

impl std::fmt::Display for FrameStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "frames={} avg={:?} min={:?} max={:?}",
            self.total_frames,
            self.average(),
            self.min(),
            self.max()
        )
    }
}
