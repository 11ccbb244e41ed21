//! Tunable parameters of icon generation.

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use super::color::Color;
use super::error::ConfigError;
use super::planar::PlaneRounding;

/// Parameters of the icon compositor.
///
/// Every field has a default, so a TOML document only needs to name the
/// fields it changes:
///
/// ```
/// let config = iconmask::IconConfig::from_toml_str(r##"
///     inner_padding = 64
///     background_color = "#202020"
/// "##).unwrap();
/// assert_eq!(config.output_size, 1024);
/// assert_eq!(config.icon_area(), 1024 - 2 * 64);
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct IconConfig {
    /// Width and height of the generated icon, in pixels.
    pub output_size: u32,
    /// Margin between the canvas edge and the icon area, on every side.
    pub inner_padding: u32,
    /// Fraction of the icon area that art with transparency is shrunk into.
    pub scale_factor: f32,
    /// Color of the opaque canvas the art is placed on.
    pub background_color: Color,
    /// Resampling filter used when scaling the art.
    pub resize_filter: ResizeFilter,
    /// Sample lookup used when interleaving JPEG 2000 planes.
    pub plane_rounding: PlaneRounding,
    /// Corner radius of the built-in rounded-square stencil.
    pub corner_radius: u32,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            output_size: 1024,
            inner_padding: 100,
            scale_factor: 0.9,
            background_color: Color::WHITE,
            resize_filter: ResizeFilter::Triangle,
            plane_rounding: PlaneRounding::Nearest,
            corner_radius: 185,
        }
    }
}

impl IconConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(input: &str) -> Result<IconConfig, ConfigError> {
        let config: IconConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the parameters describe a drawable icon.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_size == 0 {
            return Err(ConfigError::Invalid("output_size must be positive"
                .to_string()));
        }
        if u64::from(self.inner_padding) * 2 >= u64::from(self.output_size) {
            return Err(ConfigError::Invalid(format!(
                "inner_padding {} leaves no room in a {}px icon",
                self.inner_padding, self.output_size
            )));
        }
        if !self.scale_factor.is_finite() ||
           self.scale_factor <= 0.0 ||
           self.scale_factor > 1.0 {
            return Err(ConfigError::Invalid(format!(
                "scale_factor must be in (0, 1], got {}",
                self.scale_factor
            )));
        }
        if u64::from(self.corner_radius) * 2 > u64::from(self.icon_area()) {
            return Err(ConfigError::Invalid(format!(
                "corner_radius {} is larger than half the {}px icon area",
                self.corner_radius,
                self.icon_area()
            )));
        }
        Ok(())
    }

    /// Side length of the square the art is placed in: the output size minus
    /// the padding on both sides.
    pub fn icon_area(&self) -> u32 {
        self.output_size.saturating_sub(self.inner_padding.saturating_mul(2))
    }

    /// Side length art with transparency is shrunk to fit within.
    pub fn shrunk_area(&self) -> u32 {
        ((self.icon_area() as f32 * self.scale_factor).round() as u32).max(1)
    }
}

/// Resampling filters, named as they appear in configuration files.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq,
         Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    /// Nearest neighbor.
    Nearest,
    /// Linear filter.
    #[default]
    Triangle,
    /// Cubic filter.
    CatmullRom,
    /// Gaussian filter.
    Gaussian,
    /// Lanczos with window 3.
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> FilterType {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}
