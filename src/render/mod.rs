use crate::engine::stroke::{Path, PathCommand, PointerSample};
use glam::Vec2;

mod recording;
pub use recording::*;

mod svg;
pub use svg::*;

pub const POINTER_RADIUS: f32 = 5.0;

/// Drawing surface the pen path is traced onto. Implementations only need the
/// handful of primitives a 2D canvas context offers.
pub trait Renderer2D {
	/// Wipes everything drawn so far, ready for the next frame.
	fn clear(&mut self);
	fn begin_path(&mut self);
	fn move_to(&mut self, point: Vec2);
	fn line_to(&mut self, point: Vec2);
	fn close_path(&mut self);
	fn stroke(&mut self, color: &csscolorparser::Color, line_width: f32);
	fn draw_marker(&mut self, marker: &PointerMarker);
}

/// The circle drawn at the current pointer: solid while pinched, an outline
/// otherwise.
#[derive(Clone, Debug)]
pub struct PointerMarker {
	pub center: Vec2,
	pub radius: f32,
	pub filled: bool,
	pub color: csscolorparser::Color,
	pub line_width: f32,
}

impl From<&PointerSample> for PointerMarker {
	fn from(sample: &PointerSample) -> Self {
		Self {
			center: sample.position,
			radius: POINTER_RADIUS,
			filled: sample.activated,
			color: sample.color.clone(),
			line_width: sample.line_width,
		}
	}
}

pub fn draw_pointer(sample: &PointerSample, renderer: &mut impl Renderer2D) {
	renderer.draw_marker(&PointerMarker::from(sample))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
	pub close_path: bool,
}

/// Traces `path` as a single sub-path and strokes it with the style of the
/// most recent sample. Reads the path only, so repeated calls draw the same
/// thing.
pub fn render_path(path: &Path, renderer: &mut impl Renderer2D, options: RenderOptions) {
	let Some(last) = path.last() else {
		return;
	};
	renderer.begin_path();
	for command in path.commands() {
		match command {
			PathCommand::MoveTo(p) => renderer.move_to(p),
			PathCommand::LineTo(p) => renderer.line_to(p),
		}
	}
	if options.close_path {
		renderer.close_path();
	}
	renderer.stroke(&last.color, last.line_width);
}
