use crate::config::{ConfigError, StrokeConfig};
use crate::engine::hand::{Hand, Handedness, KeypointError, RawHand};
use crate::engine::stroke::{PointerSample, StrokePathBuilder};
use crate::render::{draw_pointer, Renderer2D};
use crate::util::ResultExt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Supplies video frames, one per call. Returns `None` once the stream ends.
pub trait VideoSource {
	type Frame;

	fn next_frame(&mut self) -> Option<Self::Frame>;
}

/// The hand-landmark model. Any error is treated as fatal for the estimator,
/// which is then dropped for the rest of the session.
pub trait PoseEstimator<F> {
	fn estimate_hands(&mut self, frame: &F) -> impl Future<Output = anyhow::Result<Vec<RawHand>>>;
}

/// Chooses which of the detected hands drives the pen.
pub trait HandSelector {
	fn select<'a>(&self, hands: &'a [RawHand]) -> Option<&'a RawHand>;
}

/// Uses the first detected hand and ignores the rest.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstHand;

impl HandSelector for FirstHand {
	fn select<'a>(&self, hands: &'a [RawHand]) -> Option<&'a RawHand> {
		hands.first()
	}
}

/// Uses the first hand with the given handedness, falling back to the first
/// detected hand.
#[derive(Clone, Copy, Debug)]
pub struct PreferHandedness(pub Handedness);

impl HandSelector for PreferHandedness {
	fn select<'a>(&self, hands: &'a [RawHand]) -> Option<&'a RawHand> {
		hands
			.iter()
			.find(|h| h.handedness == self.0)
			.or_else(|| hands.first())
	}
}

/// Cooperative cancellation for [`Session::run`]. Clones share the same flag.
#[derive(Clone, Debug, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn stop(&self) {
		self.0.store(true, Ordering::Relaxed);
	}

	pub fn is_stopped(&self) -> bool {
		self.0.load(Ordering::Relaxed)
	}
}

#[derive(Clone, Debug)]
pub enum FrameOutcome {
	EndOfStream,
	/// No hand this frame; the path is left as it was.
	NoHand,
	Drawn(PointerSample),
	/// The selected hand had malformed keypoints and the frame was skipped.
	Rejected(KeypointError),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
	pub frames: u64,
	pub drawn: u64,
	pub no_hand: u64,
	pub rejected: u64,
}

/// Everything one drawing session needs, passed explicitly through the frame
/// loop.
pub struct Session<V, P, S = FirstHand> {
	video: V,
	estimator: Option<P>,
	selector: S,
	builder: StrokePathBuilder,
	stats: SessionStats,
}

impl<V, P> Session<V, P, FirstHand>
where
	V: VideoSource,
	P: PoseEstimator<V::Frame>,
{
	pub fn new(video: V, estimator: P, config: StrokeConfig) -> Result<Self, ConfigError> {
		config.validate()?;
		Ok(Self {
			video,
			estimator: Some(estimator),
			selector: FirstHand,
			builder: StrokePathBuilder::new(config),
			stats: SessionStats::default(),
		})
	}
}

impl<V, P, S> Session<V, P, S>
where
	V: VideoSource,
	P: PoseEstimator<V::Frame>,
	S: HandSelector,
{
	pub fn with_selector<T: HandSelector>(self, selector: T) -> Session<V, P, T> {
		Session {
			video: self.video,
			estimator: self.estimator,
			selector,
			builder: self.builder,
			stats: self.stats,
		}
	}

	pub fn builder(&self) -> &StrokePathBuilder {
		&self.builder
	}

	pub fn stats(&self) -> SessionStats {
		self.stats
	}

	pub fn has_estimator(&self) -> bool {
		self.estimator.is_some()
	}

	pub fn reset_path(&mut self) {
		self.builder.reset();
	}

	async fn estimate(&mut self, frame: &V::Frame) -> Vec<RawHand> {
		let Some(estimator) = self.estimator.as_mut() else {
			return Vec::new();
		};
		let estimate = estimator.estimate_hands(frame).await;
		match estimate.ok_or_log() {
			Some(hands) => hands,
			None => {
				tracing::warn!("disposing pose estimator");
				self.estimator = None;
				Vec::new()
			}
		}
	}

	/// Runs classify, smooth, append and render for the next video frame.
	pub async fn process_frame(&mut self, renderer: &mut impl Renderer2D) -> FrameOutcome {
		let Some(frame) = self.video.next_frame() else {
			return FrameOutcome::EndOfStream;
		};
		self.stats.frames += 1;

		let hands = self.estimate(&frame).await;
		renderer.clear();

		let outcome = match self.selector.select(&hands).map(Hand::try_from) {
			None => {
				self.stats.no_hand += 1;
				FrameOutcome::NoHand
			}
			Some(Err(error)) => {
				tracing::warn!(%error, frame = self.stats.frames, "skipping frame");
				self.stats.rejected += 1;
				FrameOutcome::Rejected(error)
			}
			Some(Ok(hand)) => {
				let sample = self.builder.append_frame(&hand);
				draw_pointer(&sample, renderer);
				self.stats.drawn += 1;
				FrameOutcome::Drawn(sample)
			}
		};

		self.builder.render(renderer);
		outcome
	}

	/// Processes frames until the video ends or `stop` is raised. The flag is
	/// checked before each frame is scheduled.
	#[tracing::instrument(skip_all)]
	pub async fn run(&mut self, renderer: &mut impl Renderer2D, stop: &StopFlag) -> SessionStats {
		tracing::info!("starting session");
		loop {
			if stop.is_stopped() {
				tracing::info!("session stopped");
				break;
			}
			if let FrameOutcome::EndOfStream = self.process_frame(renderer).await {
				tracing::info!("end of video stream");
				break;
			}
		}
		let stats = self.stats;
		tracing::info!(
			frames = stats.frames,
			drawn = stats.drawn,
			no_hand = stats.no_hand,
			rejected = stats.rejected,
			samples = self.builder.path().len(),
			"session finished"
		);
		stats
	}
}
