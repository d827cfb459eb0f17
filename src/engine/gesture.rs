use super::hand::{Finger, Hand};
use crate::geom::midpoint;
use glam::Vec2;

pub const DEFAULT_ACTIVATION_THRESHOLD: f32 = 1.1;

/// Result of classifying one hand for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gesture {
	pub activated: bool,
	/// Pointer position before any temporal smoothing.
	pub raw: Vec2,
	/// Squared pinch distance over squared thumb segment length, `None` when
	/// the thumb segment has collapsed to a point.
	pub ratio: Option<f32>,
}

/// Detects a thumb/index pinch and locates the pen tip.
///
/// The pinch distance is compared against the length of the last thumb segment
/// so the test does not depend on how far the hand is from the camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureClassifier {
	activation_threshold: f32,
}

impl Default for GestureClassifier {
	fn default() -> Self {
		Self::new(DEFAULT_ACTIVATION_THRESHOLD)
	}
}

impl GestureClassifier {
	pub fn new(activation_threshold: f32) -> Self {
		Self {
			activation_threshold,
		}
	}

	pub fn activation_threshold(&self) -> f32 {
		self.activation_threshold
	}

	pub fn classify(&self, hand: &Hand) -> Gesture {
		let [.., thumb_mid, thumb_tip] = Finger::Thumb.joints().map(|i| *hand.keypoint(i));
		let index_tip = hand.keypoint(Finger::Index.tip());

		let pinch_dist_sq = thumb_tip.distance_squared(index_tip);
		let thumb_seg_dist_sq = thumb_tip.distance_squared(&thumb_mid);

		let ratio = (thumb_seg_dist_sq > 0.0)
			.then(|| pinch_dist_sq / thumb_seg_dist_sq)
			.filter(|r| r.is_finite());
		let activated = ratio.is_some_and(|r| r < self.activation_threshold);

		let raw = if activated {
			midpoint(thumb_tip.position(), index_tip.position())
		} else {
			index_tip.position()
		};

		Gesture {
			activated,
			raw,
			ratio,
		}
	}
}
