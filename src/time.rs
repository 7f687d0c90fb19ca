use std::time::Instant;

/// Timing values the host exposes for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds elapsed since the previous frame. Zero on the very first frame.
    pub delta: f64,
    /// Fallback used in place of a zero `delta`.
    pub maximum_delta: f64,
    /// Frames per second the host aims for.
    pub target_frame_rate: f64,
}

impl FrameTime {
    pub fn new(delta: f64, maximum_delta: f64, target_frame_rate: f64) -> Self {
        Self {
            delta,
            maximum_delta,
            target_frame_rate,
        }
    }

    /// `delta`, or `maximum_delta` when no time has been measured yet.
    pub fn effective_delta(&self) -> f64 {
        if self.delta == 0.0 {
            self.maximum_delta
        } else {
            self.delta
        }
    }

    pub fn target_period(&self) -> f64 {
        1.0 / self.target_frame_rate
    }
}

pub trait TimeSource {
    fn frame_time(&self) -> FrameTime;
}

impl TimeSource for FrameTime {
    fn frame_time(&self) -> FrameTime {
        *self
    }
}

/// Wall-clock time source for a host loop.
///
/// Call [`FrameClock::tick`] once per frame before reading it. Deltas are
/// clamped to `maximum_delta` so a stall (window drag, debugger) does not show
/// up as a single enormous frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    delta: f64,
    maximum_delta: f64,
    target_frame_rate: f64,
}

impl FrameClock {
    pub fn new(target_frame_rate: f64, maximum_delta: f64) -> Self {
        Self {
            last: None,
            delta: 0.0,
            maximum_delta,
            target_frame_rate,
        }
    }

    /// Forgets the previous tick; the next tick reports a zero delta.
    pub fn reset(&mut self) {
        self.last = None;
        self.delta = 0.0;
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        self.delta = match self.last {
            Some(last) => now
                .saturating_duration_since(last)
                .as_secs_f64()
                .min(self.maximum_delta),
            None => 0.0,
        };
        self.last = Some(now);

        self.frame_time()
    }
}

impl TimeSource for FrameClock {
    fn frame_time(&self) -> FrameTime {
        FrameTime::new(self.delta, self.maximum_delta, self.target_frame_rate)
    }
}
