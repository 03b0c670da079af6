//! Core data models for the hand-writing widget.
//! Coordinates are canvas-local and expressed in logical (pre device-pixel-ratio) units.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation towards `other`; `t = 0` yields `self`.
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

/// Euclidean distance between two samples. An empty reference point yields 0.
pub fn euclidean(a: Point, b: Option<Point>) -> f64 {
    match b {
        Some(b) => (a.x - b.x).hypot(a.y - b.y),
        None => 0.0,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Screen-space rectangle of the drawing surface (what `getBoundingClientRect` reports).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Speed-responsive variable-width ink built from filled disks.
    #[default]
    #[serde(alias = "handWriting", alias = "hand-writing")]
    Handwriting,
    /// Constant-width stroked path.
    Linear,
}

/// A CSS colour, kept both as the source string (for canvas styles) and as RGBA bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    css: String,
    rgba: [u8; 4],
}

impl Color {
    pub fn parse(css: &str) -> Result<Self, Error> {
        let parsed =
            csscolorparser::parse(css).map_err(|_| Error::InvalidColor(css.to_string()))?;
        Ok(Self {
            css: css.trim().to_string(),
            rgba: parsed.to_rgba8(),
        })
    }

    pub fn transparent() -> Self {
        Self {
            css: "transparent".to_string(),
            rgba: [0, 0, 0, 0],
        }
    }

    pub fn css(&self) -> &str {
        &self.css
    }

    pub fn rgba(&self) -> [u8; 4] {
        self.rgba
    }

    pub fn is_transparent(&self) -> bool {
        self.rgba[3] == 0
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.css
    }
}

/// Resolved drawing configuration of one widget instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DrawConfig {
    pub paint_color: Color,
    /// May be transparent.
    pub background_color: Color,
    pub mode: Mode,
    /// Lower bound of the stroke diameter in hand-writing mode.
    pub min_width: f64,
    /// Upper bound of the stroke diameter in hand-writing mode.
    pub max_width: f64,
    /// Distance per sample (px) at and above which a stroke is drawn at `min_width`.
    pub write_speed: f64,
    /// Stroke width for linear mode; the mean of the width bounds when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            paint_color: Color {
                css: "#f00".to_string(),
                rgba: [255, 0, 0, 255],
            },
            background_color: Color::transparent(),
            mode: Mode::Handwriting,
            min_width: 6.0,
            max_width: 21.0,
            write_speed: 30.0,
            line_width: None,
        }
    }
}

impl DrawConfig {
    pub fn from_json(raw: &str) -> Result<Self, Error> {
        let config: DrawConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |name: &'static str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::NotPositive { name, value })
            }
        };
        positive("minWidth", self.min_width)?;
        positive("maxWidth", self.max_width)?;
        positive("writeSpeed", self.write_speed)?;
        if let Some(width) = self.line_width {
            positive("lineWidth", width)?;
        }
        if self.min_width > self.max_width {
            return Err(ConfigError::WidthRange {
                min: self.min_width,
                max: self.max_width,
            });
        }
        Ok(())
    }

    pub fn min_radius(&self) -> f64 {
        self.min_width / 2.0
    }

    pub fn max_radius(&self) -> f64 {
        self.max_width / 2.0
    }

    pub fn linear_width(&self) -> f64 {
        self.line_width
            .unwrap_or((self.min_width + self.max_width) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        let p = Point::new(3.5, -7.25);
        assert_eq!(euclidean(p, Some(p)), 0.0);
    }

    #[test]
    fn distance_to_empty_point_is_zero() {
        assert_eq!(euclidean(Point::new(100.0, 100.0), None), 0.0);
    }

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(euclidean(Point::new(0.0, 0.0), Some(Point::new(3.0, 4.0))), 5.0);
    }

    #[test]
    fn default_config_is_valid() {
        let config = DrawConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.paint_color, Color::parse("#f00").unwrap());
    }

    #[test]
    fn rejects_inverted_widths() {
        let config = DrawConfig {
            min_width: 10.0,
            max_width: 4.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::WidthRange { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_write_speed() {
        for speed in [0.0, -1.0, f64::NAN] {
            let config = DrawConfig {
                write_speed: speed,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::NotPositive { name: "writeSpeed", .. })
            ));
        }
    }

    #[test]
    fn parses_camel_case_json_with_defaults() {
        let config = DrawConfig::from_json(
            r#"{"mode":"linear","minWidth":4,"maxWidth":4,"paintColor":"rgb(0, 0, 255)"}"#,
        )
        .unwrap();
        assert_eq!(config.mode, Mode::Linear);
        assert_eq!(config.min_width, 4.0);
        assert_eq!(config.write_speed, 30.0);
        assert_eq!(config.paint_color.rgba(), [0, 0, 255, 255]);
        assert!(config.background_color.is_transparent());
    }

    #[test]
    fn from_json_validates() {
        let err = DrawConfig::from_json(r#"{"minWidth":8,"maxWidth":2}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(ConfigError::WidthRange { .. })));
    }

    #[test]
    fn rejects_unknown_color() {
        assert!(matches!(
            Color::parse("not-a-colour"),
            Err(Error::InvalidColor(_))
        ));
        assert!(DrawConfig::from_json(r#"{"paintColor":"nope"}"#).is_err());
    }

    #[test]
    fn linear_width_falls_back_to_mean() {
        let config = DrawConfig {
            min_width: 2.0,
            max_width: 6.0,
            ..Default::default()
        };
        assert_eq!(config.linear_width(), 4.0);
        let config = DrawConfig {
            line_width: Some(3.0),
            ..config
        };
        assert_eq!(config.linear_width(), 3.0);
    }
}
