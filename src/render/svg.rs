use super::{PointerMarker, Renderer2D};
use crate::config::color_hex;
use crate::geom::AABox;
use glam::Vec2;
use itertools::Itertools;
use std::fmt::Write;

/// Builds a standalone SVG document from draw calls.
#[derive(Clone, Debug, Default)]
pub struct SvgRenderer {
	background: Option<String>,
	elements: Vec<String>,
	commands: Vec<String>,
	bounds: AABox,
}

impl SvgRenderer {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_background(self, color: &csscolorparser::Color) -> Self {
		Self {
			background: Some(color_hex(color)),
			..self
		}
	}

	fn extend_bounds(&mut self, point: Vec2, radius: f32) {
		self.bounds = self
			.bounds
			.expanded_to_contain(point - Vec2::splat(radius))
			.expanded_to_contain(point + Vec2::splat(radius));
	}

	pub fn elements(&self) -> &[String] {
		&self.elements
	}

	pub fn finish(self, margin: f32) -> String {
		let bounds = self.bounds.padded(margin);
		let (min, size) = if bounds.is_empty() {
			(Vec2::ZERO, Vec2::ZERO)
		} else {
			(bounds.min(), bounds.size())
		};

		let mut out = String::new();
		// Writing to a `String` cannot fail.
		let _ = writeln!(
			out,
			r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
			min.x, min.y, size.x, size.y
		);
		if let Some(background) = &self.background {
			let _ = writeln!(
				out,
				r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{background}"/>"#,
				min.x, min.y, size.x, size.y
			);
		}
		for element in &self.elements {
			let _ = writeln!(out, "{element}");
		}
		out.push_str("</svg>\n");
		out
	}
}

impl Renderer2D for SvgRenderer {
	fn clear(&mut self) {
		self.elements.clear();
		self.commands.clear();
		self.bounds = AABox::empty();
	}

	fn begin_path(&mut self) {
		self.commands.clear();
	}

	fn move_to(&mut self, point: Vec2) {
		self.extend_bounds(point, 0.0);
		self.commands.push(format!("M {} {}", point.x, point.y));
	}

	fn line_to(&mut self, point: Vec2) {
		self.extend_bounds(point, 0.0);
		self.commands.push(format!("L {} {}", point.x, point.y));
	}

	fn close_path(&mut self) {
		self.commands.push("Z".to_owned());
	}

	fn stroke(&mut self, color: &csscolorparser::Color, line_width: f32) {
		if self.commands.is_empty() {
			return;
		}
		let d = self.commands.iter().join(" ");
		self.elements.push(format!(
			r#"<path d="{d}" fill="none" stroke="{}" stroke-width="{line_width}" stroke-linecap="round" stroke-linejoin="round"/>"#,
			color_hex(color)
		));
	}

	fn draw_marker(&mut self, marker: &PointerMarker) {
		self.extend_bounds(marker.center, marker.radius);
		let color = color_hex(&marker.color);
		let paint = if marker.filled {
			format!(r#"fill="{color}""#)
		} else {
			format!(
				r#"fill="none" stroke="{color}" stroke-width="{}""#,
				marker.line_width
			)
		};
		self.elements.push(format!(
			r#"<circle cx="{}" cy="{}" r="{}" {paint}/>"#,
			marker.center.x, marker.center.y, marker.radius
		));
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::PointerStyle;
	use crate::engine::stroke::PointerSample;
	use crate::render::{draw_pointer, render_path, RenderOptions};
	use glam::vec2;

	#[test]
	fn stroke_path_data() {
		let style = PointerStyle::default();
		let mut svg = SvgRenderer::new();
		svg.begin_path();
		svg.move_to(vec2(0.0, 0.0));
		svg.line_to(vec2(1.0, 1.0));
		svg.move_to(vec2(5.0, 5.0));
		svg.stroke(style.color(), style.line_width());
		assert_eq!(svg.elements().len(), 1);
		assert!(svg.elements()[0]
			.starts_with(r##"<path d="M 0 0 L 1 1 M 5 5" fill="none" stroke="#ffffff""##));
	}

	#[test]
	fn markers() {
		let style = PointerStyle::new("red", 2.0).unwrap();
		let mut svg = SvgRenderer::new();
		draw_pointer(&PointerSample::new(vec2(10.0, 20.0), true, &style), &mut svg);
		draw_pointer(&PointerSample::new(vec2(30.0, 20.0), false, &style), &mut svg);
		assert_eq!(
			svg.elements(),
			[
				r##"<circle cx="10" cy="20" r="5" fill="#ff0000"/>"##.to_owned(),
				r##"<circle cx="30" cy="20" r="5" fill="none" stroke="#ff0000" stroke-width="2"/>"##.to_owned(),
			]
		);
	}

	#[test]
	fn document_view_box() {
		let style = PointerStyle::default();
		let mut svg = SvgRenderer::new().with_background(&csscolorparser::Color::new(0.0, 0.0, 0.0, 1.0));
		draw_pointer(&PointerSample::new(vec2(10.0, 10.0), false, &style), &mut svg);
		let document = svg.finish(1.0);
		assert!(document.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="4 4 12 12">"#));
		assert!(document.contains(r##"fill="#000000""##));
		assert!(document.ends_with("</svg>\n"));
	}

	#[test]
	fn clear_discards_drawing() {
		let style = PointerStyle::default();
		let mut svg = SvgRenderer::new();
		draw_pointer(&PointerSample::new(vec2(10.0, 10.0), false, &style), &mut svg);
		svg.clear();
		assert!(svg.elements().is_empty());
		assert!(svg.finish(0.0).contains(r#"viewBox="0 0 0 0""#));
	}

	#[test]
	fn empty_document() {
		let mut svg = SvgRenderer::new();
		render_path(&Default::default(), &mut svg, RenderOptions::default());
		assert_eq!(
			svg.finish(0.0),
			"<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 0 0\">\n</svg>\n"
		);
	}
}
