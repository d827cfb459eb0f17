use super::{PointerMarker, Renderer2D};
use crate::config::color_hex;
use glam::Vec2;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
	BeginPath,
	MoveTo(Vec2),
	LineTo(Vec2),
	ClosePath,
	Stroke { color: String, line_width: f32 },
	Marker { center: Vec2, radius: f32, filled: bool },
}

/// Keeps a log of every draw call instead of rasterizing anything.
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
	ops: Vec<DrawOp>,
}

impl RecordingRenderer {
	pub fn ops(&self) -> &[DrawOp] {
		&self.ops
	}
}

impl Renderer2D for RecordingRenderer {
	fn clear(&mut self) {
		self.ops.clear();
	}

	fn begin_path(&mut self) {
		self.ops.push(DrawOp::BeginPath);
	}

	fn move_to(&mut self, point: Vec2) {
		self.ops.push(DrawOp::MoveTo(point));
	}

	fn line_to(&mut self, point: Vec2) {
		self.ops.push(DrawOp::LineTo(point));
	}

	fn close_path(&mut self) {
		self.ops.push(DrawOp::ClosePath);
	}

	fn stroke(&mut self, color: &csscolorparser::Color, line_width: f32) {
		self.ops.push(DrawOp::Stroke {
			color: color_hex(color),
			line_width,
		});
	}

	fn draw_marker(&mut self, marker: &PointerMarker) {
		self.ops.push(DrawOp::Marker {
			center: marker.center,
			radius: marker.radius,
			filled: marker.filled,
		});
	}
}
