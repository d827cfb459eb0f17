use super::gesture::GestureClassifier;
use super::hand::Hand;
use super::smoothing::MovingAverage;
use crate::config::{PointerStyle, StrokeConfig};
use crate::geom::AABox;
use crate::render::{render_path, RenderOptions, Renderer2D};
use glam::Vec2;
use std::collections::VecDeque;

/// The pen position and state for one frame. Never modified once created.
#[derive(Clone, Debug)]
pub struct PointerSample {
	pub position: Vec2,
	/// Pinch state of the raw hand geometry; smoothing does not affect it.
	pub activated: bool,
	pub color: csscolorparser::Color,
	pub line_width: f32,
}

impl PointerSample {
	pub fn new(position: Vec2, activated: bool, style: &PointerStyle) -> Self {
		Self {
			position,
			activated,
			color: style.color().clone(),
			line_width: style.line_width(),
		}
	}

	pub fn x(&self) -> f32 {
		self.position.x
	}

	pub fn y(&self) -> f32 {
		self.position.y
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
	MoveTo(Vec2),
	LineTo(Vec2),
}

/// A continuous run of line segments: an anchor followed by every activated
/// sample directly after it.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
	pub points: Vec<Vec2>,
}

/// Append-only sequence of pointer samples, oldest first.
#[derive(Clone, Debug, Default)]
pub struct Path {
	samples: VecDeque<PointerSample>,
	max_samples: Option<usize>,
}

impl Path {
	pub fn new(max_samples: Option<usize>) -> Self {
		Self {
			samples: VecDeque::new(),
			max_samples,
		}
	}

	fn push(&mut self, sample: PointerSample) {
		self.samples.push_back(sample);
		if let Some(max_samples) = self.max_samples {
			while self.samples.len() > max_samples {
				self.samples.pop_front();
			}
		}
	}

	fn clear(&mut self) {
		self.samples.clear();
	}

	pub fn len(&self) -> usize {
		self.samples.len()
	}

	pub fn is_empty(&self) -> bool {
		self.samples.is_empty()
	}

	pub fn iter(&self) -> impl DoubleEndedIterator<Item = &PointerSample> + ExactSizeIterator + '_ {
		self.samples.iter()
	}

	pub fn last(&self) -> Option<&PointerSample> {
		self.samples.back()
	}

	pub fn positions(&self) -> impl DoubleEndedIterator<Item = Vec2> + '_ {
		self.samples.iter().map(|s| s.position)
	}

	pub fn bounds(&self) -> AABox {
		AABox::containing(self.positions())
	}

	/// Pen movements for drawing the path. The first sample only anchors the
	/// pen; after that an activated sample draws a line to it and any other
	/// sample lifts the pen and moves it there.
	pub fn commands(&self) -> impl Iterator<Item = PathCommand> + '_ {
		self.samples.iter().enumerate().map(|(i, s)| {
			if i > 0 && s.activated {
				PathCommand::LineTo(s.position)
			} else {
				PathCommand::MoveTo(s.position)
			}
		})
	}

	/// Runs of connected line segments. Isolated anchors are not strokes.
	pub fn strokes(&self) -> Vec<Stroke> {
		let mut strokes = Vec::new();
		let mut current: Vec<Vec2> = Vec::new();
		for command in self.commands() {
			match command {
				PathCommand::MoveTo(p) => {
					if current.len() > 1 {
						strokes.push(Stroke {
							points: std::mem::take(&mut current),
						});
					}
					current.clear();
					current.push(p);
				}
				PathCommand::LineTo(p) => current.push(p),
			}
		}
		if current.len() > 1 {
			strokes.push(Stroke { points: current });
		}
		strokes
	}
}

impl<'a> IntoIterator for &'a Path {
	type Item = &'a PointerSample;
	type IntoIter = std::collections::vec_deque::Iter<'a, PointerSample>;
	fn into_iter(self) -> Self::IntoIter {
		self.samples.iter()
	}
}

/// Owns the drawing for one tracked hand and grows it one frame at a time.
#[derive(Clone, Debug)]
pub struct StrokePathBuilder {
	config: StrokeConfig,
	classifier: GestureClassifier,
	smoothing: MovingAverage,
	path: Path,
}

impl Default for StrokePathBuilder {
	fn default() -> Self {
		Self::new(StrokeConfig::default())
	}
}

impl StrokePathBuilder {
	pub fn new(config: StrokeConfig) -> Self {
		Self {
			classifier: GestureClassifier::new(config.activation_threshold),
			smoothing: MovingAverage::new(config.smoothing_window),
			path: Path::new(config.max_samples),
			config,
		}
	}

	pub fn config(&self) -> &StrokeConfig {
		&self.config
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn append_frame(&mut self, hand: &Hand) -> PointerSample {
		let gesture = self.classifier.classify(hand);
		let position = self.smoothing.apply(self.path.positions(), gesture.raw);
		let sample = PointerSample::new(position, gesture.activated, &self.config.style);

		let was_activated = self.path.last().is_some_and(|s| s.activated);
		if was_activated != sample.activated {
			tracing::debug!(
				activated = sample.activated,
				ratio = ?gesture.ratio,
				"pen {}",
				if sample.activated { "down" } else { "up" }
			);
		}
		tracing::trace!(x = position.x, y = position.y, "append sample");

		self.path.push(sample.clone());
		sample
	}

	pub fn reset(&mut self) {
		tracing::info!(samples = self.path.len(), "clearing path");
		self.path.clear();
	}

	pub fn render(&self, renderer: &mut impl Renderer2D) {
		render_path(&self.path, renderer, RenderOptions::default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test::*;
	use approx::assert_relative_eq;
	use glam::vec2;

	fn sample(x: f32, y: f32, activated: bool) -> PointerSample {
		PointerSample::new(vec2(x, y), activated, &PointerStyle::default())
	}

	fn path_of(samples: impl IntoIterator<Item = PointerSample>) -> Path {
		let mut path = Path::default();
		for s in samples {
			path.push(s);
		}
		path
	}

	#[test]
	fn commands_break_at_released_points() {
		let path = path_of([
			sample(0.0, 0.0, true),
			sample(1.0, 1.0, true),
			sample(5.0, 5.0, false),
		]);
		let commands: Vec<_> = path.commands().collect();
		assert_eq!(
			commands,
			[
				PathCommand::MoveTo(vec2(0.0, 0.0)),
				PathCommand::LineTo(vec2(1.0, 1.0)),
				PathCommand::MoveTo(vec2(5.0, 5.0)),
			]
		);
	}

	#[test]
	fn first_point_never_draws() {
		let path = path_of([sample(2.0, 3.0, true)]);
		let commands: Vec<_> = path.commands().collect();
		assert_eq!(commands, [PathCommand::MoveTo(vec2(2.0, 3.0))]);
		assert!(path.strokes().is_empty());
	}

	#[test]
	fn strokes() {
		let path = path_of([
			sample(0.0, 0.0, false),
			sample(1.0, 0.0, true),
			sample(2.0, 0.0, true),
			sample(3.0, 0.0, false),
			sample(4.0, 0.0, false),
			sample(5.0, 0.0, true),
		]);
		assert_eq!(
			path.strokes(),
			[
				Stroke {
					points: vec![vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(2.0, 0.0)]
				},
				Stroke {
					points: vec![vec2(4.0, 0.0), vec2(5.0, 0.0)]
				},
			]
		);
	}

	#[test]
	fn max_samples_evicts_oldest() {
		let mut path = Path::new(Some(2));
		for x in 0..5 {
			path.push(sample(x as f32, 0.0, true));
		}
		assert_eq!(path.len(), 2);
		let xs: Vec<_> = path.iter().map(|s| s.x()).collect();
		assert_eq!(xs, [3.0, 4.0]);
	}

	#[test]
	fn bounds_cover_samples() {
		assert!(Path::default().bounds().is_empty());
		let path = path_of([
			sample(4.0, -1.0, false),
			sample(-2.0, 3.0, true),
			sample(1.0, 7.0, true),
		]);
		let bounds = path.bounds();
		assert_eq!(bounds.min(), vec2(-2.0, -1.0));
		assert_eq!(bounds.max(), vec2(4.0, 7.0));
	}

	#[test]
	fn builder_follows_config() {
		let config = StrokeConfig::builder()
			.smoothing_window(3)
			.activation_threshold(0.5)
			.max_samples(4)
			.build();
		let mut builder = StrokePathBuilder::new(config);
		assert_eq!(builder.config().smoothing_window, 3);
		assert_eq!(builder.smoothing.window(), 3);
		assert_eq!(builder.classifier.activation_threshold(), 0.5);

		// ratio = 0.64 / 1.0, pinched at the default threshold but not at 0.5
		let hand = pinch_hand(vec2(0.0, 0.0), vec2(0.8, 0.0), vec2(0.0, 1.0));
		assert!(!builder.append_frame(&hand).activated);
		for _ in 0..5 {
			builder.append_frame(&hand);
		}
		assert_eq!(builder.path().len(), 4);
	}

	#[test]
	fn end_to_end_pinch() {
		let mut builder = StrokePathBuilder::default();
		let hand = pinch_hand(vec2(10.0, 10.0), vec2(10.0, 10.0), vec2(10.0, 15.0));
		let sample = builder.append_frame(&hand);
		assert!(sample.activated);
		assert_eq!(sample.position, vec2(10.0, 10.0));
		assert_eq!(builder.path().len(), 1);
	}

	#[test]
	fn zero_window_is_raw() {
		let config = StrokeConfig::builder().smoothing_window(0).build();
		let mut builder = StrokePathBuilder::new(config);
		builder.append_frame(&pinch_hand(vec2(0.0, 0.0), vec2(100.0, 0.0), vec2(0.0, 5.0)));
		let sample = builder.append_frame(&pinch_hand(vec2(0.0, 0.0), vec2(20.0, 0.0), vec2(0.0, 5.0)));
		assert!(!sample.activated);
		assert_eq!(sample.position, vec2(20.0, 0.0));
	}

	#[test]
	fn moving_average_over_stored_samples() {
		let config = StrokeConfig::builder().smoothing_window(2).build();
		let mut builder = StrokePathBuilder::new(config);
		let index_tips = [0.0, 30.0, 60.0, 90.0];
		let mut stored = Vec::new();
		for x in index_tips {
			let hand = pinch_hand(vec2(0.0, 100.0), vec2(x, 0.0), vec2(0.0, 105.0));
			stored.push(builder.append_frame(&hand).x());
		}
		assert_relative_eq!(stored[0], 0.0);
		assert_relative_eq!(stored[1], (0.0 + 30.0) / 2.0);
		assert_relative_eq!(stored[2], (stored[0] + stored[1] + 60.0) / 3.0);
		assert_relative_eq!(stored[3], (stored[1] + stored[2] + 90.0) / 3.0);
	}

	#[test]
	fn smoothing_does_not_change_activation() {
		let mut builder = StrokePathBuilder::default();
		for _ in 0..5 {
			builder.append_frame(&pinch_hand(vec2(0.0, 0.0), vec2(200.0, 0.0), vec2(0.0, 5.0)));
		}
		// Smoothed position lags far behind, but the pinch itself is raw.
		let sample = builder.append_frame(&pinch_hand(vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(0.0, 5.0)));
		assert!(sample.activated);
		assert!(sample.x() > 100.0);
	}

	#[test]
	fn path_grows_by_one_per_frame() {
		fastrand::seed(0x13371337);
		let mut builder = StrokePathBuilder::default();
		for m in 1..=50 {
			builder.append_frame(&random_hand());
			assert_eq!(builder.path().len(), m);
		}
	}

	#[test]
	fn reset_clears_path() {
		let mut builder = StrokePathBuilder::default();
		builder.append_frame(&pinch_hand(vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(0.0, 5.0)));
		builder.reset();
		assert!(builder.path().is_empty());
		let sample = builder.append_frame(&pinch_hand(vec2(0.0, 0.0), vec2(20.0, 0.0), vec2(0.0, 5.0)));
		assert_eq!(sample.position, vec2(20.0, 0.0));
	}

	#[test]
	fn sample_carries_style() {
		let style = PointerStyle::new("#00ff00", 7.0).unwrap();
		let mut builder = StrokePathBuilder::new(StrokeConfig::builder().style(style).build());
		let sample = builder.append_frame(&pinch_hand(vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(0.0, 5.0)));
		assert_eq!(sample.line_width, 7.0);
		assert_eq!(sample.color.to_rgba8(), [0, 255, 0, 255]);
	}
}
