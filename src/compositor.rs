//! Turns arbitrary source art into a masked, rounded icon.
//!
//! Art that is fully opaque (a photo, a screenshot) is scaled to cover the
//! whole icon area so no background shows through.  Art that carries
//! transparency (a logo with its own shape) is shrunk a little and centered
//! so the background frames it.  Either way, the art is placed on an opaque
//! background canvas and clipped with a [`StencilMask`].

use image::imageops::FilterType;

use super::config::IconConfig;
use super::error::{IconError, UnsupportedMask};
use super::mask::StencilMask;
use super::raster::{RasterImage, ResizePolicy};
use super::source::{self, SourceKind};

/// How source art is scaled into the icon area.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CompositionPolicy {
    /// Fit entirely within `width` x `height`, preserving aspect ratio.
    ShrinkToFit(u32, u32),
    /// Cover exactly `width` x `height`, cropping the overflow.
    FillAndCrop(u32, u32),
}

impl CompositionPolicy {
    /// Chooses the policy for `source`: art with any transparency is shrunk to
    /// the scaled icon area, opaque art fills the whole icon area.
    pub fn for_source(source: &RasterImage, config: &IconConfig)
                      -> CompositionPolicy {
        if source.has_alpha() {
            let side = config.shrunk_area();
            CompositionPolicy::ShrinkToFit(side, side)
        } else {
            let side = config.icon_area();
            CompositionPolicy::FillAndCrop(side, side)
        }
    }

    /// Scales `source` according to the policy.
    pub fn apply(self, source: &RasterImage, filter: FilterType) -> RasterImage {
        match self {
            CompositionPolicy::ShrinkToFit(width, height) => {
                source.resize_with_filter(width,
                                          height,
                                          ResizePolicy::ShrinkToFit,
                                          filter)
            }
            CompositionPolicy::FillAndCrop(width, height) => {
                source.resize_with_filter(width,
                                          height,
                                          ResizePolicy::FillAndCrop,
                                          filter)
            }
        }
    }
}

/// Composes already-decoded art into an icon.
pub struct Compositor<'a> {
    config: &'a IconConfig,
    mask: &'a StencilMask,
}

impl<'a> Compositor<'a> {
    /// Creates a compositor.  Fails if the configuration is invalid or the
    /// mask does not match the configured output size.
    pub fn new(config: &'a IconConfig, mask: &'a StencilMask)
               -> Result<Compositor<'a>, IconError> {
        config.validate()?;
        let size = config.output_size;
        if (mask.width(), mask.height()) != (size, size) {
            return Err(IconError::Mask(UnsupportedMask {
                mask_width: mask.width(),
                mask_height: mask.height(),
                canvas_width: size,
                canvas_height: size,
            }));
        }
        Ok(Compositor { config, mask })
    }

    /// Scales, centers and places `source` on the background canvas, then
    /// clips the canvas with the mask.
    ///
    /// Pixels outside the stencil come out transparent black, not the
    /// background color; the background only shows inside the stencil.
    pub fn compose(&self, source: &RasterImage)
                   -> Result<RasterImage, IconError> {
        let config = self.config;
        let policy = CompositionPolicy::for_source(source, config);
        let scaled = policy.apply(source, config.resize_filter.into());

        // Shrunk art is centered in the icon area; filled art already covers it.
        let area = config.icon_area();
        let (offset_x, offset_y) = match policy {
            CompositionPolicy::ShrinkToFit(..) => {
                (area.saturating_sub(scaled.width()) / 2,
                 area.saturating_sub(scaled.height()) / 2)
            }
            CompositionPolicy::FillAndCrop(..) => (0, 0),
        };
        let x = i64::from(config.inner_padding) + i64::from(offset_x);
        let y = i64::from(config.inner_padding) + i64::from(offset_y);

        let mut canvas = RasterImage::filled(config.output_size,
                                             config.output_size,
                                             config.background_color);
        canvas.composite(&scaled, x, y);
        self.mask.apply(&mut canvas)?;

        log::info!("composed {}x{} source with {:?} into {}x{} icon at ({}, {})",
                   source.width(),
                   source.height(),
                   policy,
                   canvas.width(),
                   canvas.height(),
                   x,
                   y);
        Ok(canvas)
    }
}

/// Decodes `data` as source art of the given kind and composes it into an
/// icon.  Any decoding failure aborts generation; nothing partial is
/// returned.
pub fn generate_icon(data: &[u8],
                     kind: SourceKind,
                     config: &IconConfig,
                     mask: &StencilMask)
                     -> Result<RasterImage, IconError> {
    let compositor = Compositor::new(config, mask)?;
    let source = source::decode_source(data, kind, config.plane_rounding)?;
    compositor.compose(&source)
}

/// Like [`generate_icon`] for a container source, but if the container is
/// malformed, holds no raster image, or its selected image cannot be decoded,
/// the art is taken from `fallback` (of kind `fallback_kind`) instead.
pub fn generate_icon_with_fallback(container: &[u8],
                                   fallback: &[u8],
                                   fallback_kind: SourceKind,
                                   config: &IconConfig,
                                   mask: &StencilMask)
                                   -> Result<RasterImage, IconError> {
    let compositor = Compositor::new(config, mask)?;
    let source = match source::decode_source(container,
                                             SourceKind::Container,
                                             config.plane_rounding) {
        Ok(image) => image,
        Err(error @ IconError::Container(_)) |
        Err(error @ IconError::NoImageEntry) |
        Err(error @ IconError::Decode(_)) => {
            log::warn!("falling back to alternate source: {}", error);
            source::decode_source(fallback, fallback_kind, config.plane_rounding)?
        }
        Err(error) => return Err(error),
    };
    compositor.compose(&source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    const RED: Color = Color::from_rgba(255, 0, 0, 255);

    fn small_config() -> IconConfig {
        IconConfig {
            output_size: 100,
            inner_padding: 10,
            scale_factor: 0.5,
            corner_radius: 0,
            ..IconConfig::default()
        }
    }

    #[test]
    fn opaque_source_fills_icon_area() {
        let config = small_config();
        let source = RasterImage::filled(40, 20, RED);
        assert_eq!(CompositionPolicy::for_source(&source, &config),
                   CompositionPolicy::FillAndCrop(80, 80));
        let mask = StencilMask::for_config(&config);
        let compositor = Compositor::new(&config, &mask).unwrap();
        let icon = compositor.compose(&source).unwrap();
        assert_eq!((icon.width(), icon.height()), (100, 100));
        assert_eq!(icon.get_pixel(10, 10), Ok(RED));
        assert_eq!(icon.get_pixel(89, 89), Ok(RED));
        assert_eq!(icon.get_pixel(9, 50), Ok(Color::TRANSPARENT));
        assert_eq!(icon.get_pixel(90, 50), Ok(Color::TRANSPARENT));
    }

    #[test]
    fn transparent_source_is_shrunk_and_centered() {
        let config = small_config();
        let mut source = RasterImage::filled(20, 20, RED);
        source.set_pixel(0, 0, Color::TRANSPARENT).unwrap();
        assert_eq!(CompositionPolicy::for_source(&source, &config),
                   CompositionPolicy::ShrinkToFit(40, 40));
        let mask = StencilMask::for_config(&config);
        let compositor = Compositor::new(&config, &mask).unwrap();
        let icon = compositor.compose(&source).unwrap();
        // Art spans 30..70 on both axes; the rest of the icon area is background.
        assert_eq!(icon.get_pixel(10, 10), Ok(Color::WHITE));
        assert_eq!(icon.get_pixel(29, 50), Ok(Color::WHITE));
        assert_eq!(icon.get_pixel(50, 50), Ok(RED));
        assert_eq!(icon.get_pixel(69, 50), Ok(RED));
        assert_eq!(icon.get_pixel(70, 50), Ok(Color::WHITE));
        assert_eq!(icon.get_pixel(5, 5), Ok(Color::TRANSPARENT));
    }

    #[test]
    fn wide_transparent_source_centered_vertically() {
        let config = small_config();
        let source = RasterImage::new(40, 10);
        let policy = CompositionPolicy::for_source(&source, &config);
        let scaled = policy.apply(&source, FilterType::Triangle);
        assert_eq!((scaled.width(), scaled.height()), (40, 10));

        // The fully transparent art overwrites columns 30..70, rows 45..55.
        let mask = StencilMask::for_config(&config);
        let icon = Compositor::new(&config, &mask)
            .unwrap()
            .compose(&source)
            .unwrap();
        assert_eq!(icon.get_pixel(50, 44), Ok(Color::WHITE));
        assert_eq!(icon.get_pixel(50, 45), Ok(Color::TRANSPARENT));
        assert_eq!(icon.get_pixel(50, 54), Ok(Color::TRANSPARENT));
        assert_eq!(icon.get_pixel(50, 55), Ok(Color::WHITE));
        assert_eq!(icon.get_pixel(29, 50), Ok(Color::WHITE));
        assert_eq!(icon.get_pixel(30, 50), Ok(Color::TRANSPARENT));
        assert_eq!(icon.get_pixel(69, 50), Ok(Color::TRANSPARENT));
        assert_eq!(icon.get_pixel(70, 50), Ok(Color::WHITE));
    }

    #[test]
    fn mask_must_match_output_size() {
        let config = small_config();
        let mask = StencilMask::rounded_square(64, 0, 0);
        assert!(matches!(Compositor::new(&config, &mask),
                         Err(IconError::Mask(_))));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = IconConfig { scale_factor: 2.0, ..small_config() };
        let mask = StencilMask::rounded_square(100, 10, 0);
        assert!(matches!(Compositor::new(&config, &mask),
                         Err(IconError::Config(_))));
    }

    #[test]
    fn undecodable_source_aborts() {
        let config = small_config();
        let mask = StencilMask::for_config(&config);
        let result = generate_icon(b"\x89PNG\r\n\x1a\nshort",
                                   SourceKind::Png,
                                   &config,
                                   &mask);
        assert!(matches!(result, Err(IconError::Decode(_))));
    }
}
