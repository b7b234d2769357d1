//! Pixel / simulation-unit conversion
//!
//! Every distance-valued option accepts either a bare number, already in
//! simulation units, or a pixel literal such as `"32px"` which is divided by
//! the world's draw ratio.

use crate::error::{PhysicsError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A distance given either in simulation units or as a pixel string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Length {
    /// Already in simulation units
    Units(f32),
    /// Pixel literal, e.g. `"12.5px"`
    Pixels(String),
}

impl Length {
    /// Pixel length from a number
    pub fn px(pixels: f32) -> Self {
        Self::Pixels(format!("{}px", pixels))
    }
}

impl Default for Length {
    fn default() -> Self {
        Self::Units(0.0)
    }
}

impl From<f32> for Length {
    fn from(units: f32) -> Self {
        Self::Units(units)
    }
}

impl From<&str> for Length {
    fn from(s: &str) -> Self {
        Self::Pixels(s.to_owned())
    }
}

impl From<String> for Length {
    fn from(s: String) -> Self {
        Self::Pixels(s)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Units(v) => write!(f, "{}", v),
            Self::Pixels(s) => f.write_str(s),
        }
    }
}

/// Pixels per simulation unit. Always finite and positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRatio(f32);

impl DrawRatio {
    /// Validate a raw ratio
    pub fn new(ratio: f32) -> Result<Self> {
        if ratio.is_finite() && ratio > 0.0 {
            Ok(Self(ratio))
        } else {
            Err(PhysicsError::InvalidConfig(format!(
                "draw ratio must be a positive finite number, got {}",
                ratio
            )))
        }
    }

    /// Raw ratio value
    pub fn get(&self) -> f32 {
        self.0
    }

    /// Convert to simulation units.
    ///
    /// Strings must start with a pixel literal (`^\s*[-+]?[0-9]*\.?[0-9]+\s*px`,
    /// case-insensitive); anything else yields `NaN`. Callers validate the
    /// result themselves, see [`DrawRatio::resolve`].
    pub fn pixels_to_units(&self, value: &Length) -> f32 {
        match value {
            Length::Units(v) => *v,
            Length::Pixels(s) => match parse_pixel_literal(s) {
                Some(px) => px / self.0,
                None => f32::NAN,
            },
        }
    }

    /// Convert to pixels.
    ///
    /// Strings have every `px` (any case) removed before parsing, which is
    /// looser than [`DrawRatio::pixels_to_units`]. Unparseable input yields `NaN`.
    pub fn units_to_pixels(&self, value: &Length) -> f32 {
        let units = match value {
            Length::Units(v) => *v,
            Length::Pixels(s) => strip_px(s)
                .and_then(|rest| rest.trim().parse::<f32>().ok())
                .unwrap_or(f32::NAN),
        };
        units * self.0
    }

    /// Strict conversion used when building bodies: `NaN` becomes an error
    pub fn resolve(&self, field: &str, value: &Length) -> Result<f32> {
        let units = self.pixels_to_units(value);
        if units.is_nan() {
            return Err(PhysicsError::InvalidLength {
                field: field.to_owned(),
                value: value.to_string(),
            });
        }
        Ok(units)
    }
}

impl Default for DrawRatio {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Leading pixel literal, e.g. `" -2.5 PX"`
static PIXEL_LITERAL: OnceLock<Option<Regex>> = OnceLock::new();

/// Any `px`, for the lenient direction
static PX_SUFFIX: OnceLock<Option<Regex>> = OnceLock::new();

/// Parse the leading pixel literal of `s`, ignoring anything after `px`
fn parse_pixel_literal(s: &str) -> Option<f32> {
    PIXEL_LITERAL
        .get_or_init(|| Regex::new(r"(?i)^\s*([-+]?[0-9]*\.?[0-9]+)\s*px").ok())
        .as_ref()?
        .captures(s)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f32>().ok())
}

/// Remove every case-insensitive `px` occurrence
fn strip_px(s: &str) -> Option<String> {
    PX_SUFFIX
        .get_or_init(|| Regex::new("(?i)px").ok())
        .as_ref()
        .map(|re| re.replace_all(s, "").into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pixel_literal_forms() {
        assert_eq!(parse_pixel_literal("10px"), Some(10.0));
        assert_eq!(parse_pixel_literal("  -2.5 PX"), Some(-2.5));
        assert_eq!(parse_pixel_literal("+.5px"), Some(0.5));
        assert_eq!(parse_pixel_literal("7pxs and more"), Some(7.0));
        assert_eq!(parse_pixel_literal("10"), None);
        assert_eq!(parse_pixel_literal("10.px"), None);
        assert_eq!(parse_pixel_literal("px"), None);
        assert_eq!(parse_pixel_literal("ten px"), None);
        assert_eq!(parse_pixel_literal("1e3px"), None);
        assert_eq!(parse_pixel_literal("\u{000B}5px"), Some(5.0));
        assert_eq!(parse_pixel_literal("5\u{00A0}px"), Some(5.0));
        assert_eq!(parse_pixel_literal("\u{00A0}10px"), Some(10.0));
    }

    #[test]
    fn test_pixels_to_units_divides_by_ratio() {
        let ratio = DrawRatio::new(30.0).unwrap();
        assert_relative_eq!(ratio.pixels_to_units(&"60px".into()), 2.0);
        assert_relative_eq!(ratio.pixels_to_units(&Length::Units(4.0)), 4.0);
        assert!(ratio.pixels_to_units(&"60".into()).is_nan());
    }

    #[test]
    fn test_units_to_pixels_is_lenient() {
        let ratio = DrawRatio::new(10.0).unwrap();
        assert_relative_eq!(ratio.units_to_pixels(&Length::Units(1.5)), 15.0);
        assert_relative_eq!(ratio.units_to_pixels(&"3".into()), 30.0);
        assert_relative_eq!(ratio.units_to_pixels(&"1px5".into()), 150.0);
        assert_relative_eq!(ratio.pixels_to_units(&"1px5".into()), 0.1);
        assert_relative_eq!(ratio.units_to_pixels(&"2 Px".into()), 20.0);
        assert!(ratio.units_to_pixels(&"abc".into()).is_nan());
        // Only "px" is removed; other trailing text still fails
        assert!(ratio.units_to_pixels(&"12px;".into()).is_nan());
    }

    #[test]
    fn test_round_trip_across_ratios() {
        for r in [0.5_f32, 1.0, 30.0, 64.0] {
            let ratio = DrawRatio::new(r).unwrap();
            for n in [-120.0_f32, 0.0, 1.0, 33.25, 480.0] {
                let units = ratio.pixels_to_units(&Length::px(n));
                assert_relative_eq!(units, n / r, max_relative = 1e-6);
                assert_relative_eq!(ratio.units_to_pixels(&Length::Units(units)), n, max_relative = 1e-5);
            }
        }
    }

    #[test]
    fn test_resolve_rejects_non_pixel_strings() {
        let ratio = DrawRatio::default();
        let err = ratio.resolve("width", &"wide".into()).unwrap_err();
        assert!(matches!(err, PhysicsError::InvalidLength { ref field, .. } if field == "width"));
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_draw_ratio_validation() {
        assert!(DrawRatio::new(0.0).is_err());
        assert!(DrawRatio::new(-1.0).is_err());
        assert!(DrawRatio::new(f32::INFINITY).is_err());
        assert!(DrawRatio::new(f32::NAN).is_err());
    }
}
