//! Turns per-frame hand landmarks into a pinch-controlled drawing.
//!
//! A pinch between thumb and index finger puts the pen down. Each frame with a
//! hand appends one smoothed [`PointerSample`] to the session's [`Path`], which
//! renders as separate strokes wherever the pinch was released.

pub(crate) mod util;

pub mod config;
pub mod engine;
pub mod geom;
pub mod render;
pub mod session;

pub use config::{PointerStyle, StrokeConfig};
pub use engine::gesture::{Gesture, GestureClassifier};
pub use engine::hand::{Finger, Hand, Handedness, Keypoint, KeypointError, RawHand};
pub use engine::smoothing::MovingAverage;
pub use engine::stroke::{Path, PathCommand, PointerSample, Stroke, StrokePathBuilder};
pub use render::{Renderer2D, RecordingRenderer, SvgRenderer};
pub use session::{FrameOutcome, PoseEstimator, Session, StopFlag, VideoSource};
