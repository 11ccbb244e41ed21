use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use super::color::Color;
use super::error::OutOfBounds;

/// A decoded RGBA image: one packed 4-channel pixel per position, row-major.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RasterImage {
    buffer: RgbaImage,
}

/// How [`RasterImage::resize`] treats a target whose aspect ratio differs
/// from the source.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ResizePolicy {
    /// Scale so the whole image fits within the target; one side may come
    /// out shorter than requested.
    ShrinkToFit,
    /// Scale so the image covers the whole target, then crop the overflow
    /// around the center; the result is exactly the target size.
    FillAndCrop,
}

impl RasterImage {
    /// Creates a new, fully transparent image.
    pub fn new(width: u32, height: u32) -> RasterImage {
        RasterImage::filled(width, height, Color::TRANSPARENT)
    }

    /// Creates a new image with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Color) -> RasterImage {
        assert!(width > 0 && height > 0, "image dimensions must be positive");
        RasterImage {
            buffer: RgbaImage::from_pixel(width, height, Rgba(color.to_rgba())),
        }
    }

    /// Wraps interleaved RGBA bytes.  Returns `None` if either dimension is
    /// zero or `data` is not exactly `width * height * 4` bytes long.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>)
                     -> Option<RasterImage> {
        if width == 0 || height == 0 {
            return None;
        }
        RgbaImage::from_raw(width, height, data)
            .filter(|buffer| buffer.len() == buffer_len(width, height))
            .map(|buffer| RasterImage { buffer })
    }

    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    /// Returns the height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Returns the interleaved RGBA bytes of the image.
    pub fn data(&self) -> &[u8] {
        self.buffer.as_raw()
    }

    /// Returns a mutable reference to the interleaved RGBA bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    /// Returns the pixel at `(x, y)`.
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<Color, OutOfBounds> {
        self.check_bounds(x, y)?;
        let Rgba(channels) = *self.buffer.get_pixel(x, y);
        Ok(Color(u32::from_be_bytes(channels)))
    }

    /// Overwrites the pixel at `(x, y)`.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color)
                     -> Result<(), OutOfBounds> {
        self.check_bounds(x, y)?;
        self.buffer.put_pixel(x, y, Rgba(color.to_rgba()));
        Ok(())
    }

    /// Returns true if any pixel is less than fully opaque.
    pub fn has_alpha(&self) -> bool {
        self.buffer.pixels().any(|&Rgba([_, _, _, alpha])| alpha != u8::MAX)
    }

    /// Resizes the image with a triangle (bilinear) filter.  See
    /// [`resize_with_filter`](#method.resize_with_filter).
    pub fn resize(&self, width: u32, height: u32, policy: ResizePolicy)
                  -> RasterImage {
        self.resize_with_filter(width, height, policy, FilterType::Triangle)
    }

    /// Resizes the image toward `width` x `height`, preserving its aspect
    /// ratio according to `policy`.
    pub fn resize_with_filter(&self,
                              width: u32,
                              height: u32,
                              policy: ResizePolicy,
                              filter: FilterType)
                              -> RasterImage {
        let fill = policy == ResizePolicy::FillAndCrop;
        let (scaled_width, scaled_height) =
            fitted_size(self.width(), self.height(), width, height, fill);
        let unchanged = (scaled_width, scaled_height) == self.buffer.dimensions();
        let scaled = if unchanged {
            self.buffer.clone()
        } else {
            imageops::resize(&self.buffer, scaled_width, scaled_height, filter)
        };
        if !fill {
            return RasterImage { buffer: scaled };
        }
        let crop_x = (scaled_width - width) / 2;
        let crop_y = (scaled_height - height) / 2;
        RasterImage {
            buffer: imageops::crop_imm(&scaled, crop_x, crop_y, width, height)
                .to_image(),
        }
    }

    /// Pastes `overlay` onto this image with its top-left corner at `(x, y)`.
    /// Overlay pixels replace the pixels beneath them outright (no alpha
    /// blending); whatever falls outside this image is dropped.
    pub fn composite(&mut self, overlay: &RasterImage, x: i64, y: i64) {
        imageops::replace(&mut self.buffer, &overlay.buffer, x, y);
    }

    /// Borrows the underlying `image` buffer.
    pub fn as_rgba_image(&self) -> &RgbaImage {
        &self.buffer
    }

    fn check_bounds(&self, x: u32, y: u32) -> Result<(), OutOfBounds> {
        if x < self.width() && y < self.height() {
            Ok(())
        } else {
            Err(OutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            })
        }
    }
}

/// Computes the aspect-preserving size a `width` x `height` image takes when
/// scaled toward `target_width` x `target_height`.  With `fill` set the
/// result covers the target on both axes; otherwise it fits within it.  Each
/// side is rounded to the nearest pixel and is never less than one.
pub fn fitted_size(width: u32,
                   height: u32,
                   target_width: u32,
                   target_height: u32,
                   fill: bool)
                   -> (u32, u32) {
    let width_ratio = f64::from(target_width) / f64::from(width);
    let height_ratio = f64::from(target_height) / f64::from(height);
    let ratio = if fill {
        width_ratio.max(height_ratio)
    } else {
        width_ratio.min(height_ratio)
    };
    let scale = |side: u32, target: u32, exact: bool| -> u32 {
        if exact {
            target
        } else {
            ((f64::from(side) * ratio).round() as u32).max(1)
        }
    };
    // The side that determined the ratio lands exactly on its target.
    let width_exact = ratio == width_ratio;
    let new_width = scale(width, target_width, width_exact);
    let new_height = scale(height, target_height, !width_exact);
    if fill {
        (new_width.max(target_width), new_height.max(target_height))
    } else {
        (new_width.min(target_width), new_height.min(target_height))
    }
}

fn buffer_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}
