use glam::Vec2;
use thiserror::Error;

/// Number of landmarks the pose estimator reports for each hand.
pub const KEYPOINT_COUNT: usize = 21;

pub const WRIST: usize = 0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Keypoint {
	pub x: f32,
	pub y: f32,
	pub z: Option<f32>,
	pub score: Option<f32>,
}

impl Keypoint {
	pub fn new(x: f32, y: f32) -> Self {
		Self {
			x,
			y,
			..Default::default()
		}
	}

	pub fn position(&self) -> Vec2 {
		Vec2::new(self.x, self.y)
	}

	pub fn distance_squared(&self, other: &Keypoint) -> f32 {
		self.position().distance_squared(other.position())
	}
}

impl From<Vec2> for Keypoint {
	fn from(position: Vec2) -> Self {
		Self::new(position.x, position.y)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Handedness {
	Left,
	Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Finger {
	Thumb,
	Index,
	Middle,
	Ring,
	Pinky,
}

impl Finger {
	pub const ALL: [Finger; 5] = [
		Finger::Thumb,
		Finger::Index,
		Finger::Middle,
		Finger::Ring,
		Finger::Pinky,
	];

	/// Keypoint indices from the wrist out to the fingertip.
	pub fn joints(self) -> [usize; 5] {
		let base = 1 + 4 * self as usize;
		[WRIST, base, base + 1, base + 2, base + 3]
	}

	pub fn tip(self) -> usize {
		self.joints()[4]
	}
}

/// Bones of the hand skeleton as (parent, child) keypoint indices.
pub const CONNECTIONS: [(usize, usize); 20] = {
	let mut connections = [(0, 0); 20];
	let mut finger = 0;
	while finger < 5 {
		let base = 1 + 4 * finger;
		connections[4 * finger] = (WRIST, base);
		let mut joint = 1;
		while joint < 4 {
			connections[4 * finger + joint] = (base + joint - 1, base + joint);
			joint += 1;
		}
		finger += 1;
	}
	connections
};

#[derive(Clone, Debug, PartialEq, Error)]
pub enum KeypointError {
	#[error("expected 21 keypoints, got {0}")]
	WrongCount(usize),

	#[error("keypoint {index} has non-finite coordinates ({x}, {y})")]
	NonFinite { index: usize, x: f32, y: f32 },
}

static_assertions::assert_impl_all!(KeypointError: std::error::Error, Send, Sync);

/// One detected hand. Only constructible from a well-formed set of keypoints.
#[derive(Clone, Debug, PartialEq)]
pub struct Hand {
	keypoints: [Keypoint; KEYPOINT_COUNT],
	handedness: Handedness,
	score: Option<f32>,
}

impl Hand {
	pub fn new(
		keypoints: impl IntoIterator<Item = Keypoint>,
		handedness: Handedness,
	) -> Result<Self, KeypointError> {
		use KeypointError::*;
		let keypoints: Vec<Keypoint> = keypoints.into_iter().collect();
		let count = keypoints.len();
		let keypoints: [Keypoint; KEYPOINT_COUNT] =
			keypoints.try_into().map_err(|_| WrongCount(count))?;
		if let Some((index, k)) = keypoints
			.iter()
			.enumerate()
			.find(|(_, k)| !(k.x.is_finite() && k.y.is_finite()))
		{
			Err(NonFinite {
				index,
				x: k.x,
				y: k.y,
			})?;
		}
		Ok(Self {
			keypoints,
			handedness,
			score: None,
		})
	}

	pub fn with_score(self, score: f32) -> Self {
		Self {
			score: Some(score),
			..self
		}
	}

	pub fn keypoints(&self) -> &[Keypoint; KEYPOINT_COUNT] {
		&self.keypoints
	}

	pub fn keypoint(&self, index: usize) -> &Keypoint {
		&self.keypoints[index]
	}

	pub fn handedness(&self) -> Handedness {
		self.handedness
	}

	pub fn score(&self) -> Option<f32> {
		self.score
	}

	pub fn bones(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
		CONNECTIONS
			.iter()
			.map(|&(a, b)| (self.keypoints[a].position(), self.keypoints[b].position()))
	}
}

/// A hand as reported by the pose estimator, before any validation.
#[derive(Clone, Debug, PartialEq)]
pub struct RawHand {
	pub keypoints: Vec<Keypoint>,
	pub handedness: Handedness,
	pub score: Option<f32>,
}

impl TryFrom<&RawHand> for Hand {
	type Error = KeypointError;

	fn try_from(raw: &RawHand) -> Result<Self, Self::Error> {
		let hand = Hand::new(raw.keypoints.iter().copied(), raw.handedness)?;
		Ok(match raw.score {
			Some(score) => hand.with_score(score),
			None => hand,
		})
	}
}
