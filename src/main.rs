use glam::{vec2, Vec2};
use pinchpen::*;

fn configure_tracing() -> anyhow::Result<()> {
	let max_level = if cfg!(debug_assertions) {
		tracing::Level::TRACE
	} else {
		tracing::Level::INFO
	};
	tracing::subscriber::set_global_default(
		tracing_subscriber::FmtSubscriber::builder()
			.with_max_level(max_level)
			// stdout carries the drawing.
			.with_writer(std::io::stderr)
			.finish(),
	)?;
	Ok(())
}

fn configure_logging() -> anyhow::Result<()> {
	configure_tracing()?;

	// Redirect `log` to `tracing`, for dependencies that still log through it.
	#[cfg(feature = "log")]
	tracing_log::LogTracer::init()?;

	Ok(())
}

const FRAMES: u32 = 120;

/// Stands in for a camera: frames are just their index.
struct FrameCounter {
	next: u32,
	end: u32,
}

impl VideoSource for FrameCounter {
	type Frame = u32;

	fn next_frame(&mut self) -> Option<u32> {
		(self.next < self.end).then(|| {
			self.next += 1;
			self.next - 1
		})
	}
}

/// Replays a scripted gesture: a pinched square, a release, a short dropout
/// and a pinched diagonal, with a little landmark jitter.
struct ScriptedHand;

impl ScriptedHand {
	fn pose(frame: u32) -> Option<(Vec2, bool)> {
		let center = vec2(200.0, 200.0);
		match frame {
			0..=59 => {
				let t = frame as f32 / 60.0 * 4.0;
				let side = t.floor();
				let s = t - side;
				let corners = [vec2(-1.0, -1.0), vec2(1.0, -1.0), vec2(1.0, 1.0), vec2(-1.0, 1.0)];
				let a = corners[side as usize % 4];
				let b = corners[(side as usize + 1) % 4];
				Some((center + 80.0 * a.lerp(b, s), true))
			}
			60..=69 => Some((center.lerp(vec2(400.0, 150.0), (frame - 60) as f32 / 10.0), false)),
			70..=74 => None,
			75..=114 => {
				let s = (frame - 75) as f32 / 40.0;
				Some((vec2(400.0, 150.0).lerp(vec2(520.0, 330.0), s), true))
			}
			_ => Some((vec2(520.0, 330.0), false)),
		}
	}

	fn keypoints(pointer: Vec2, pinched: bool) -> Vec<Keypoint> {
		let jitter = || vec2(fastrand::f32() - 0.5, fastrand::f32() - 0.5) * 3.0;
		let wrist = pointer + vec2(0.0, 200.0);
		let (thumb_tip, index_tip) = if pinched {
			(pointer - vec2(3.0, 0.0), pointer + vec2(3.0, 0.0))
		} else {
			(pointer + vec2(-60.0, 40.0), pointer)
		};
		let mut keypoints = vec![wrist];
		for finger in Finger::ALL {
			let tip = match finger {
				Finger::Thumb => thumb_tip,
				Finger::Index => index_tip,
				Finger::Middle => pointer + vec2(30.0, 10.0),
				Finger::Ring => pointer + vec2(55.0, 25.0),
				Finger::Pinky => pointer + vec2(75.0, 50.0),
			};
			for joint in 1..=4 {
				keypoints.push(wrist.lerp(tip, joint as f32 / 4.0));
			}
		}
		if pinched {
			keypoints[Finger::Thumb.joints()[3]] = thumb_tip + vec2(-20.0, 20.0);
		}
		keypoints
			.into_iter()
			.map(|p| Keypoint::from(p + jitter()))
			.collect()
	}
}

impl PoseEstimator<u32> for ScriptedHand {
	async fn estimate_hands(&mut self, frame: &u32) -> anyhow::Result<Vec<RawHand>> {
		Ok(Self::pose(*frame)
			.map(|(pointer, pinched)| RawHand {
				keypoints: Self::keypoints(pointer, pinched),
				handedness: Handedness::Right,
				score: Some(0.95),
			})
			.into_iter()
			.collect())
	}
}

async fn run() -> anyhow::Result<()> {
	fastrand::seed(7);
	let config = StrokeConfig::builder()
		.style(PointerStyle::new(config::DEFAULT_COLOR, config::DEFAULT_LINE_WIDTH)?)
		.build();
	let video = FrameCounter {
		next: 0,
		end: FRAMES,
	};
	let mut session = Session::new(video, ScriptedHand, config)?;
	let mut svg = SvgRenderer::new().with_background(&csscolorparser::parse("black")?);
	session.run(&mut svg, &StopFlag::new()).await;
	let bounds = session.builder().path().bounds();
	tracing::info!(min = ?bounds.min(), max = ?bounds.max(), "drawing bounds");
	print!("{}", svg.finish(20.0));
	Ok(())
}

fn main() {
	if let Err(error) = configure_logging() {
		// We can technically continue without logging.
		tracing::error!(error = error.to_string());
	}

	if let Err(error) = futures::executor::block_on(run()) {
		tracing::error!("{error:#}");
		std::process::exit(1);
	}
}
