use glam::Vec2;

pub fn midpoint(a: Vec2, b: Vec2) -> Vec2 {
	(a + b) * 0.5
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AABox {
	min: Vec2,
	max: Vec2,
}

impl Default for AABox {
	fn default() -> Self {
		Self::empty()
	}
}

impl AABox {
	pub fn new(min: Vec2, max: Vec2) -> Self {
		Self { min, max }
	}

	pub fn empty() -> Self {
		Self::new(Vec2::MAX, Vec2::MIN)
	}

	pub fn is_empty(&self) -> bool {
		self.min.x > self.max.x && self.min.y > self.max.y
	}

	pub fn min(&self) -> Vec2 {
		self.min
	}

	pub fn max(&self) -> Vec2 {
		self.max
	}

	pub fn size(&self) -> Vec2 {
		if self.is_empty() {
			Vec2::ZERO
		} else {
			self.max - self.min
		}
	}

	pub fn expanded_to_contain(self, point: Vec2) -> Self {
		Self::new(self.min.min(point), self.max.max(point))
	}

	pub fn padded(self, margin: f32) -> Self {
		if self.is_empty() {
			return self;
		}
		Self::new(self.min - Vec2::splat(margin), self.max + Vec2::splat(margin))
	}

	pub fn containing(points: impl Iterator<Item = Vec2>) -> Self {
		points.fold(Self::empty(), |b, p| b.expanded_to_contain(p))
	}

	pub fn contains(&self, point: Vec2) -> bool {
		point.x < self.max.x
			&& point.y < self.max.y
			&& !(point.x < self.min.x)
			&& !(point.y < self.min.y)
	}
}
