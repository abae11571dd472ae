//! # Tooltip Configuration
//!
//! Every presentation setting of a tooltip lives in [`TooltipConfig`].
//! Configs can be built in code or loaded from TOML; missing keys fall back
//! to the defaults below.
//!
//! ```toml
//! text = "Save the document"
//! placement = "top"
//! fallback_placements = ["bottom", "right"]
//! show_delay_ms = 300
//! background_color = "#202124"
//!
//! [margins]
//! left = 10
//! top = 6
//! right = 10
//! bottom = 6
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::animation::Easing;
use crate::error::{ConfigError, ConfigResult};
use crate::layout::Margins;
use crate::placement::{Offsets, Placement};
use crate::style::Color;
use crate::text::Font;
use crate::visibility::VisibilityTimings;

/// Upper bound for the drop-shadow strength.
pub const MAX_DROP_SHADOW_STRENGTH: f32 = 100.0;

/// Presentation settings of one tooltip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    /// Text shown in the body.
    pub text: String,
    /// Text font.
    pub font: Font,
    /// Space between the text and the body edge.
    pub margins: Margins,
    /// Maximum overlay width, shadow and triangle included.
    pub max_width: Option<i32>,
    /// Maximum body height.
    pub max_height: Option<i32>,
    /// Corner radius of the body.
    pub border_radius: i32,
    /// Border width, used only when `border_enabled` is set.
    pub border_width: i32,
    /// Draw a border around the body.
    pub border_enabled: bool,
    /// Body fill.
    pub background_color: Color,
    /// Text color.
    pub text_color: Color,
    /// Border color.
    pub border_color: Color,
    /// Draw the pointer triangle.
    pub triangle_enabled: bool,
    /// Depth of the pointer triangle.
    pub triangle_size: i32,
    /// Draw the layered drop shadow.
    pub drop_shadow_enabled: bool,
    /// Shadow darkness multiplier.
    pub drop_shadow_strength: f32,
    /// Delay before a delayed show starts fading in.
    pub show_delay_ms: u64,
    /// Delay before a delayed hide starts fading out.
    pub hide_delay_ms: u64,
    /// Fade-in length.
    pub fade_in_duration_ms: u64,
    /// Fade-out length.
    pub fade_out_duration_ms: u64,
    /// Fade-in curve.
    pub fade_in_easing: Easing,
    /// Fade-out curve.
    pub fade_out_easing: Easing,
    /// Center the text inside the body.
    pub text_centering_enabled: bool,
    /// Auto-hide after being fully visible this long; 0 disables.
    pub duration_ms: u64,
    /// Show on hover even when the anchor is disabled.
    pub show_on_disabled: bool,
    /// Show and hide on anchor focus changes.
    pub show_on_focus: bool,
    /// Requested placement.
    pub placement: Placement,
    /// Placements tried in order when the requested one does not fit.
    pub fallback_placements: Vec<Placement>,
    /// Per-placement offsets.
    pub offsets: Offsets,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        let timings = VisibilityTimings::default();
        Self {
            text: String::new(),
            font: Font::default(),
            margins: Margins::new(12, 8, 12, 7),
            max_width: None,
            max_height: None,
            border_radius: 2,
            border_width: 1,
            border_enabled: false,
            background_color: Color::hex_rgb(0x11_1214),
            text_color: Color::hex_rgb(0xCF_D2D5),
            border_color: Color::hex_rgb(0x40_3E41),
            triangle_enabled: true,
            triangle_size: 5,
            drop_shadow_enabled: true,
            drop_shadow_strength: 2.0,
            show_delay_ms: timings.show_delay_ms,
            hide_delay_ms: timings.hide_delay_ms,
            fade_in_duration_ms: timings.fade_in_ms,
            fade_out_duration_ms: timings.fade_out_ms,
            fade_in_easing: timings.fade_in_easing,
            fade_out_easing: timings.fade_out_easing,
            text_centering_enabled: true,
            duration_ms: timings.duration_ms,
            show_on_disabled: false,
            show_on_focus: false,
            placement: Placement::Auto,
            fallback_placements: Vec::new(),
            offsets: Offsets::default(),
        }
    }
}

impl TooltipConfig {
    /// Default config with the given text.
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or bad colors and
    /// [`ConfigError::InvalidValue`] for out-of-range values.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise
    /// the errors of [`Self::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Serializes to TOML.
    ///
    /// # Errors
    ///
    /// Fails only if a value cannot be represented in TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Checks every value against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> ConfigResult<()> {
        let sizes = [
            ("margins.left", self.margins.left),
            ("margins.top", self.margins.top),
            ("margins.right", self.margins.right),
            ("margins.bottom", self.margins.bottom),
            ("border_radius", self.border_radius),
            ("border_width", self.border_width),
            ("triangle_size", self.triangle_size),
            ("max_width", self.max_width.unwrap_or(0)),
            ("max_height", self.max_height.unwrap_or(0)),
        ];
        for (field, value) in sizes {
            if value < 0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("must not be negative, got {value}"),
                });
            }
        }

        if !(0.0..=MAX_DROP_SHADOW_STRENGTH).contains(&self.drop_shadow_strength) {
            return Err(ConfigError::InvalidValue {
                field: "drop_shadow_strength",
                reason: format!(
                    "must be within 0..={MAX_DROP_SHADOW_STRENGTH}, got {}",
                    self.drop_shadow_strength
                ),
            });
        }

        if self.font.point_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "font.point_size",
                reason: "must be positive".to_owned(),
            });
        }

        Ok(())
    }

    /// Timer and fade settings for the visibility machine.
    #[must_use]
    pub fn timings(&self) -> VisibilityTimings {
        VisibilityTimings {
            show_delay_ms: self.show_delay_ms,
            hide_delay_ms: self.hide_delay_ms,
            fade_in_ms: self.fade_in_duration_ms,
            fade_out_ms: self.fade_out_duration_ms,
            fade_in_easing: self.fade_in_easing,
            fade_out_easing: self.fade_out_easing,
            duration_ms: self.duration_ms,
        }
    }

    /// Border width that actually applies, 0 when the border is off.
    #[must_use]
    pub fn effective_border_width(&self) -> i32 {
        if self.border_enabled {
            self.border_width
        } else {
            0
        }
    }

    /// Triangle depth that actually applies, 0 when the triangle is off.
    #[must_use]
    pub fn effective_triangle_size(&self) -> i32 {
        if self.triangle_enabled {
            self.triangle_size
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Point;

    #[test]
    fn test_defaults() {
        let config = TooltipConfig::default();

        assert_eq!(config.text, "");
        assert_eq!(config.duration_ms, 0);
        assert_eq!(config.placement, Placement::Auto);
        assert!(config.fallback_placements.is_empty());
        assert!(config.triangle_enabled);
        assert_eq!(config.triangle_size, 5);
        assert_eq!(config.offsets, Offsets::default());
        assert_eq!(config.show_delay_ms, 50);
        assert_eq!(config.hide_delay_ms, 50);
        assert_eq!(config.fade_in_duration_ms, 150);
        assert_eq!(config.fade_out_duration_ms, 150);
        assert_eq!(config.fade_in_easing, Easing::Linear);
        assert!(config.text_centering_enabled);
        assert_eq!(config.border_radius, 2);
        assert!(!config.border_enabled);
        assert_eq!(config.background_color.to_string(), "#111214");
        assert_eq!(config.text_color.to_string(), "#CFD2D5");
        assert_eq!(config.border_color.to_string(), "#403E41");
        assert_eq!(config.font, Font::new("Arial", 9, true));
        assert_eq!(config.margins, Margins::new(12, 8, 12, 7));
        assert!(config.drop_shadow_enabled);
        assert!((config.drop_shadow_strength - 2.0).abs() < f32::EPSILON);
        assert!(!config.show_on_disabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = TooltipConfig::from_toml_str(
            r##"
            text = "Save"
            placement = "top"
            fallback_placements = ["bottom", "right"]
            background_color = "#202124"
            fade_in_easing = "out_cubic"

            [offsets.top]
            x = 0
            y = -4
            "##,
        )
        .unwrap();

        assert_eq!(config.text, "Save");
        assert_eq!(config.placement, Placement::Top);
        assert_eq!(config.fallback_placements, vec![Placement::Bottom, Placement::Right]);
        assert_eq!(config.background_color, Color::hex_rgb(0x20_2124));
        assert_eq!(config.fade_in_easing, Easing::OutCubic);
        assert_eq!(config.offsets.get(Placement::Top), Point::new(0, -4));
        assert_eq!(config.show_delay_ms, 50);
        assert_eq!(config.margins, Margins::new(12, 8, 12, 7));
    }

    #[test]
    fn test_bad_color_is_rejected() {
        let err = TooltipConfig::from_toml_str(r##"text_color = "red""##).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "{err}");
    }

    #[test]
    fn test_negative_values_are_rejected() {
        let err = TooltipConfig::from_toml_str("triangle_size = -1").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "triangle_size", .. }));

        let err = TooltipConfig::from_toml_str("drop_shadow_strength = -0.5").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "drop_shadow_strength", .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = TooltipConfig::from_toml_file("/nonexistent/hovertip.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = TooltipConfig::with_text("Round trip");
        config.max_width = Some(150);
        config.fallback_placements = vec![Placement::Left];

        let text = config.to_toml_string().unwrap();
        assert_eq!(TooltipConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_effective_sizes() {
        let mut config = TooltipConfig::default();
        assert_eq!(config.effective_border_width(), 0);
        assert_eq!(config.effective_triangle_size(), 5);

        config.border_enabled = true;
        config.triangle_enabled = false;
        assert_eq!(config.effective_border_width(), 1);
        assert_eq!(config.effective_triangle_size(), 0);
    }
}
