use crate::engine::gesture::DEFAULT_ACTIVATION_THRESHOLD;
use bon::Builder;
use thiserror::Error;

pub const DEFAULT_SMOOTHING_WINDOW: usize = 5;
pub const DEFAULT_LINE_WIDTH: f32 = 3.0;
pub const DEFAULT_COLOR: &str = "White";

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("invalid pointer color {0:?}")]
	InvalidColor(String, #[source] csscolorparser::ParseColorError),

	#[error("line width must be positive and finite, got {0}")]
	InvalidLineWidth(f32),

	#[error("activation threshold must be positive and finite, got {0}")]
	InvalidActivationThreshold(f32),

	#[error("max samples must be at least 1 when set")]
	InvalidMaxSamples,
}

static_assertions::assert_impl_all!(ConfigError: std::error::Error, Send, Sync);

/// `#rrggbb`, or `#rrggbbaa` when not fully opaque.
pub fn color_hex(color: &csscolorparser::Color) -> String {
	let [r, g, b, a] = color.to_rgba8();
	if a == u8::MAX {
		format!("#{r:02x}{g:02x}{b:02x}")
	} else {
		format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
	}
}

#[derive(Clone, Debug)]
pub struct PointerStyle {
	color: csscolorparser::Color,
	line_width: f32,
}

impl PointerStyle {
	pub fn new(color: &str, line_width: f32) -> Result<Self, ConfigError> {
		use ConfigError::*;
		let color = csscolorparser::parse(color).map_err(|e| InvalidColor(color.to_owned(), e))?;
		if !(line_width.is_finite() && line_width > 0.0) {
			Err(InvalidLineWidth(line_width))?;
		}
		Ok(Self { color, line_width })
	}

	pub fn color(&self) -> &csscolorparser::Color {
		&self.color
	}

	pub fn color_hex(&self) -> String {
		color_hex(&self.color)
	}

	pub fn line_width(&self) -> f32 {
		self.line_width
	}
}

impl Default for PointerStyle {
	fn default() -> Self {
		Self {
			color: csscolorparser::Color::new(1.0, 1.0, 1.0, 1.0),
			line_width: DEFAULT_LINE_WIDTH,
		}
	}
}

#[derive(Clone, Debug, Builder)]
pub struct StrokeConfig {
	/// Number of previous samples averaged with the current raw position. Zero
	/// disables smoothing.
	#[builder(default = DEFAULT_SMOOTHING_WINDOW)]
	pub smoothing_window: usize,

	#[builder(default = DEFAULT_ACTIVATION_THRESHOLD)]
	pub activation_threshold: f32,

	#[builder(default)]
	pub style: PointerStyle,

	/// Oldest samples are evicted once the path holds this many. Unbounded when
	/// `None`.
	pub max_samples: Option<usize>,
}

impl Default for StrokeConfig {
	fn default() -> Self {
		Self::builder().build()
	}
}

impl StrokeConfig {
	pub fn validate(&self) -> Result<(), ConfigError> {
		let threshold = self.activation_threshold;
		if !(threshold.is_finite() && threshold > 0.0) {
			Err(ConfigError::InvalidActivationThreshold(threshold))?;
		}
		if self.max_samples == Some(0) {
			Err(ConfigError::InvalidMaxSamples)?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults() {
		let config = StrokeConfig::default();
		assert_eq!(config.smoothing_window, 5);
		assert_eq!(config.activation_threshold, 1.1);
		assert_eq!(config.max_samples, None);
		assert_eq!(config.style.color_hex(), "#ffffff");
		assert_eq!(config.style.line_width(), DEFAULT_LINE_WIDTH);
		assert!(config.validate().is_ok());
	}

	#[test]
	fn builder() {
		let config = StrokeConfig::builder()
			.smoothing_window(0)
			.max_samples(10)
			.style(PointerStyle::new("red", 1.5).unwrap())
			.build();
		assert_eq!(config.smoothing_window, 0);
		assert_eq!(config.max_samples, Some(10));
		assert_eq!(config.style.color_hex(), "#ff0000");
	}

	#[test]
	fn named_color_matches_default() {
		let style = PointerStyle::new(DEFAULT_COLOR, DEFAULT_LINE_WIDTH).unwrap();
		assert_eq!(style.color_hex(), PointerStyle::default().color_hex());
	}

	#[test]
	fn invalid_style() {
		assert!(matches!(
			PointerStyle::new("not a color", 1.0),
			Err(ConfigError::InvalidColor(..))
		));
		assert!(matches!(
			PointerStyle::new("white", 0.0),
			Err(ConfigError::InvalidLineWidth(_))
		));
		assert!(matches!(
			PointerStyle::new("white", f32::NAN),
			Err(ConfigError::InvalidLineWidth(_))
		));
	}

	#[test]
	fn invalid_threshold() {
		let config = StrokeConfig::builder().activation_threshold(-1.0).build();
		assert!(config.validate().is_err());
	}

	#[test]
	fn zero_max_samples() {
		let config = StrokeConfig::builder().max_samples(0).build();
		assert!(matches!(config.validate(), Err(ConfigError::InvalidMaxSamples)));
		let config = StrokeConfig::builder().max_samples(1).build();
		assert!(config.validate().is_ok());
	}
}
