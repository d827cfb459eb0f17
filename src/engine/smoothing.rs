use glam::Vec2;

/// Causal simple moving average over the last `window` positions plus the
/// current one, all weighted equally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovingAverage {
	window: usize,
}

impl MovingAverage {
	pub fn new(window: usize) -> Self {
		Self { window }
	}

	pub fn window(&self) -> usize {
		self.window
	}

	/// `history` is ordered oldest first; only its tail is read.
	pub fn apply<I>(&self, history: I, raw: Vec2) -> Vec2
	where
		I: IntoIterator<Item = Vec2>,
		I::IntoIter: DoubleEndedIterator,
	{
		let (sum, count) = history
			.into_iter()
			.rev()
			.take(self.window)
			.fold((raw, 1usize), |(sum, count), p| (sum + p, count + 1));
		sum / count as f32
	}
}
