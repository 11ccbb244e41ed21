//! Binary stencil masks that clip a composed canvas to the icon shape.
//!
//! A mask is applied with a bitwise AND of each packed RGBA mask pixel and
//! the canvas pixel beneath it.  This is only a clip when every mask pixel is
//! either all ones (`0xffffffff`, keep) or all zeros (`0x00000000`, drop):
//! a graded mask would corrupt colors channel by channel instead of blending
//! them.  Masks built by [`StencilMask::rounded_square`] are binary by
//! construction; images handed to [`StencilMask::from_image`] are trusted to
//! be.

use super::color::Color;
use super::config::IconConfig;
use super::error::UnsupportedMask;
use super::raster::RasterImage;

/// A binary stencil; see the [module documentation](self).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StencilMask {
    image: RasterImage,
}

impl StencilMask {
    /// Wraps an existing mask asset.  Every pixel must be `0x00000000` or
    /// `0xffffffff`; this is not checked.
    pub fn from_image(image: RasterImage) -> StencilMask {
        StencilMask { image }
    }

    /// Builds a `size` x `size` stencil that keeps a square inset by `inset`
    /// pixels on every side, with corners rounded to `radius`.  A pixel is
    /// kept when its center lies inside the rounded square.
    pub fn rounded_square(size: u32, inset: u32, radius: u32) -> StencilMask {
        let mut image = RasterImage::new(size, size);
        let low = f64::from(inset);
        let high = f64::from(size) - f64::from(inset);
        let radius = f64::from(radius).min((high - low) / 2.0).max(0.0);
        for y in inset..size.saturating_sub(inset) {
            for x in inset..size.saturating_sub(inset) {
                let (px, py) = (f64::from(x) + 0.5, f64::from(y) + 0.5);
                // Distance to the nearest point of the square shrunk by the
                // radius; within the radius means inside the rounded square.
                let dx = px - px.clamp(low + radius, high - radius);
                let dy = py - py.clamp(low + radius, high - radius);
                if dx * dx + dy * dy <= radius * radius {
                    image.data_mut()[pixel_offset(size, x, y)..][..4]
                        .copy_from_slice(&Color::WHITE.to_rgba());
                }
            }
        }
        StencilMask { image }
    }

    /// Builds the rounded-square stencil matching a configuration: the full
    /// output size, inset by the inner padding, rounded to the corner radius.
    pub fn for_config(config: &IconConfig) -> StencilMask {
        StencilMask::rounded_square(config.output_size,
                                    config.inner_padding,
                                    config.corner_radius)
    }

    /// Returns the mask image.
    pub fn image(&self) -> &RasterImage {
        &self.image
    }

    /// Returns the width of the mask, in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Returns the height of the mask, in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Replaces every canvas pixel with `mask AND canvas`.  Fails if the
    /// mask and canvas differ in size.
    pub fn apply(&self, canvas: &mut RasterImage) -> Result<(), UnsupportedMask> {
        if (self.width(), self.height()) != (canvas.width(), canvas.height()) {
            return Err(UnsupportedMask {
                mask_width: self.width(),
                mask_height: self.height(),
                canvas_width: canvas.width(),
                canvas_height: canvas.height(),
            });
        }
        let pixels = canvas.data_mut().chunks_exact_mut(4);
        for (pixel, mask) in pixels.zip(self.image.data().chunks_exact(4)) {
            let masked = packed(pixel) & packed(mask);
            pixel.copy_from_slice(&masked.to_be_bytes());
        }
        Ok(())
    }
}

fn packed(channels: &[u8]) -> u32 {
    u32::from_be_bytes([channels[0], channels[1], channels[2], channels[3]])
}

fn pixel_offset(width: u32, x: u32, y: u32) -> usize {
    (y as usize * width as usize + x as usize) * 4
}
