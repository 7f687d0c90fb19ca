//! On-screen frames-per-second / frame-time meter.
//!
//! [`meter::FpsMeter`] samples the host's frame delta, refreshes its label
//! twice a second and writes it into an overlay sink created through a
//! [`overlay::DisplayRoot`]. The bundled [`overlay::OverlayLayer`] is drawn with
//! egui by [`gui_app::GuiApp`].

pub mod config;
pub mod gui_app;
pub mod meter;
pub mod overlay;
pub mod renderer;
pub mod time;

pub use meter::{FpsMeter, Reading, SAMPLE_WINDOW};
pub use overlay::{DisplayRoot, OverlayLayer, OverlaySink, OverlayStyle};
pub use time::{FrameClock, FrameTime, TimeSource};
