use std::fmt;

use crate::overlay::{DisplayRoot, OverlaySink, OverlayStyle};
use crate::time::{FrameTime, TimeSource};

/// Seconds between two label refreshes.
pub const SAMPLE_WINDOW: f64 = 0.5;

/// One computed meter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    /// Frames per second.
    Rate(u64),
    /// Milliseconds per frame.
    Period(u64),
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Rate(fps) => write!(f, "FPS {}", fps),
            Reading::Period(ms) => write!(f, "ms  {}", ms),
        }
    }
}

/// Instantaneous rate, capped at the target rate.
///
/// A zero delta with a zero fallback reads as the target rate.
pub fn frame_rate(time: &FrameTime) -> u64 {
    whole((1.0 / time.effective_delta()).min(time.target_frame_rate))
}

/// Frame period in milliseconds, never shorter than the target period.
///
/// With no measured time and a zero target the period is unbounded and
/// reads as 0.
pub fn frame_period_ms(time: &FrameTime) -> u64 {
    whole(time.effective_delta().max(time.target_period()) * 1000.0)
}

/// Floors `value`; non-finite values read as 0.
fn whole(value: f64) -> u64 {
    if value.is_finite() {
        value.floor() as u64
    } else {
        0
    }
}

/// On-screen FPS / frame-time meter.
///
/// The sink is created through the display root the first time the meter is
/// enabled; afterwards enabling and disabling only toggles its visibility.
pub struct FpsMeter<R: DisplayRoot> {
    root: R,
    style: OverlayStyle,
    sink: Option<R::Sink>,
    enabled: bool,
    period_mode: bool,
    accumulator: f64,
    label: Option<String>,
}

impl<R: DisplayRoot> FpsMeter<R> {
    pub fn new(root: R) -> Self {
        Self::with_style(root, OverlayStyle::default())
    }

    pub fn with_style(root: R, style: OverlayStyle) -> Self {
        Self {
            root,
            style,
            sink: None,
            enabled: false,
            period_mode: false,
            accumulator: 0.0,
            label: None,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, value: bool) {
        self.set_active(value);
    }

    pub fn set_active(&mut self, state: bool) {
        if state == self.enabled {
            return;
        }

        match self.sink.as_mut() {
            Some(sink) => sink.set_visible(state),
            None => {
                log::debug!("attaching fps meter overlay");
                self.sink = Some(self.root.attach(&self.style));
            }
        }

        if state {
            self.accumulator = SAMPLE_WINDOW;
        }

        log::debug!("fps meter {}", if state { "enabled" } else { "disabled" });
        self.enabled = state;
    }

    pub fn period_mode(&self) -> bool {
        self.period_mode
    }

    /// Switches between frames per second and milliseconds per frame.
    ///
    /// Takes effect on the next [`update`](Self::update), even while disabled.
    pub fn set_period_mode(&mut self, value: bool) {
        self.period_mode = value;
        self.accumulator = SAMPLE_WINDOW;
    }

    /// Last label written to the sink.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn is_attached(&self) -> bool {
        self.sink.is_some()
    }

    pub fn root(&self) -> &R {
        &self.root
    }

    /// Advances the meter by one frame. Call once per rendered frame.
    pub fn update(&mut self, time: &impl TimeSource) {
        if !self.enabled {
            return;
        }

        let time = time.frame_time();

        if self.accumulator < SAMPLE_WINDOW {
            self.accumulator += time.delta;
            return;
        }

        self.accumulator = 0.0;

        let reading = if self.period_mode {
            Reading::Period(frame_period_ms(&time))
        } else {
            Reading::Rate(frame_rate(&time))
        };
        let label = reading.to_string();
        log::trace!("fps meter refresh: {}", label);

        if let Some(sink) = self.sink.as_mut() {
            sink.set_text(&label);
        }
        self.label = Some(label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::OverlayLayer;

    fn meter() -> FpsMeter<OverlayLayer> {
        FpsMeter::new(OverlayLayer::new())
    }

    #[test]
    fn reading_labels() {
        assert_eq!(Reading::Rate(60).to_string(), "FPS 60");
        assert_eq!(Reading::Period(16).to_string(), "ms  16");
    }

    #[test]
    fn rate_is_capped_at_target() {
        assert_eq!(frame_rate(&FrameTime::new(0.01, 0.1, 60.0)), 60);
        assert_eq!(frame_rate(&FrameTime::new(0.04, 0.1, 60.0)), 25);
    }

    #[test]
    fn rate_property_holds_for_sampled_inputs() {
        for &d in &[0.001, 0.0042, 0.0166, 0.02, 0.033, 0.07, 0.25, 1.5] {
            for &r in &[1.0, 24.0, 30.0, 59.94, 60.0, 144.0] {
                let rate = frame_rate(&FrameTime::new(d, 0.1, r));
                assert!(rate as f64 <= r);
                assert_eq!(rate, (1.0_f64 / d).min(r).floor() as u64);
            }
        }
    }

    #[test]
    fn period_is_floored_at_target_period() {
        assert_eq!(frame_period_ms(&FrameTime::new(0.02, 0.1, 60.0)), 20);
        assert_eq!(frame_period_ms(&FrameTime::new(0.001, 0.1, 60.0)), 16);
    }

    #[test]
    fn period_property_holds_for_sampled_inputs() {
        for &d in &[0.001, 0.0042, 0.0166, 0.02, 0.033, 0.07, 0.25, 1.5] {
            for &r in &[1.0, 24.0, 30.0, 59.94, 60.0, 144.0] {
                let ms = frame_period_ms(&FrameTime::new(d, 0.1, r));
                assert!(ms >= (1000.0 / r).floor() as u64);
                assert_eq!(ms, (d.max(1.0 / r) * 1000.0).floor() as u64);
            }
        }
    }

    #[test]
    fn zero_delta_and_zero_fallback_show_target() {
        let time = FrameTime::new(0.0, 0.0, 30.0);
        assert_eq!(frame_rate(&time), 30);
        assert_eq!(frame_period_ms(&time), 33);

        let degenerate = FrameTime::new(0.0, 0.0, 0.0);
        assert_eq!(frame_rate(&degenerate), 0);
        assert_eq!(frame_period_ms(&degenerate), 0);
    }

    #[test]
    fn unbounded_readings_label_as_zero() {
        let degenerate = FrameTime::new(0.0, 0.0, 0.0);
        let mut meter = meter();
        meter.set_period_mode(true);
        meter.set_active(true);

        meter.update(&degenerate);
        assert_eq!(meter.label(), Some("ms  0"));
        assert_eq!(meter.root().nodes()[0].text, "ms  0");

        meter.set_period_mode(false);
        meter.update(&degenerate);
        assert_eq!(meter.label(), Some("FPS 0"));
    }

    #[test]
    fn zero_measurement_labels_show_target() {
        let time = FrameTime::new(0.0, 0.0, 30.0);
        let mut meter = meter();
        meter.set_active(true);

        meter.update(&time);
        assert_eq!(meter.label(), Some("FPS 30"));

        meter.set_period_mode(true);
        meter.update(&time);
        assert_eq!(meter.label(), Some("ms  33"));
    }

    #[test]
    fn starts_disabled_and_detached() {
        let meter = meter();
        assert!(!meter.enabled());
        assert!(!meter.period_mode());
        assert!(!meter.is_attached());
        assert!(meter.root().is_empty());
    }

    #[test]
    fn disabled_meter_ignores_updates() {
        let mut meter = meter();
        meter.update(&FrameTime::new(0.016, 0.1, 60.0));
        assert_eq!(meter.label(), None);
        assert_eq!(meter.accumulator, 0.0);
    }

    #[test]
    fn enabling_primes_refresh() {
        let mut meter = meter();
        meter.set_active(true);
        assert_eq!(meter.accumulator, SAMPLE_WINDOW);

        meter.update(&FrameTime::new(0.04, 0.1, 60.0));
        assert_eq!(meter.label(), Some("FPS 25"));
        assert_eq!(meter.accumulator, 0.0);
    }

    #[test]
    fn period_mode_primes_refresh_while_disabled() {
        let mut meter = meter();
        meter.set_active(true);
        meter.update(&FrameTime::new(0.04, 0.1, 60.0));
        meter.set_active(false);
        meter.accumulator = 0.1;

        meter.set_period_mode(true);
        assert_eq!(meter.accumulator, SAMPLE_WINDOW);
    }

    #[test]
    fn second_activation_reuses_sink() {
        let mut meter = meter();
        meter.set_active(true);
        meter.set_active(true);
        assert_eq!(meter.root().len(), 1);

        meter.set_active(false);
        assert!(!meter.root().nodes()[0].visible);

        meter.set_enabled(true);
        assert_eq!(meter.root().len(), 1);
        assert!(meter.root().nodes()[0].visible);
    }
}
