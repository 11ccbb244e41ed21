//! Planar sample buffers and their conversion to interleaved RGBA.

use serde::{Deserialize, Serialize};

use super::raster::RasterImage;

/// Number of planes in a [`PlanarBuffer`]: red, green, blue, alpha.
pub const NUM_PLANES: usize = 4;

/// Decoded samples stored as four equal-length planes (R, G, B, A) placed
/// back to back, rather than interleaved per pixel.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlanarBuffer {
    width: u32,
    height: u32,
    data: Box<[u8]>,
}

impl PlanarBuffer {
    /// Wraps a buffer holding four back-to-back planes.  Returns `None` if a
    /// dimension is zero or `data` is not `width * height * 4` bytes long.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Option<PlanarBuffer> {
        if width == 0 || height == 0 ||
           data.len() != plane_len(width, height) * NUM_PLANES {
            return None;
        }
        Some(PlanarBuffer {
            width,
            height,
            data: data.into_boxed_slice(),
        })
    }

    /// Builds a planar buffer from per-plane sample slices.  Planes shorter
    /// than `width * height` are padded with zero samples, and longer ones
    /// are truncated.
    pub fn from_planes(width: u32, height: u32, planes: [&[u8]; NUM_PLANES])
                       -> PlanarBuffer {
        assert!(width > 0 && height > 0, "image dimensions must be positive");
        let len = plane_len(width, height);
        let mut data = vec![0u8; len * NUM_PLANES];
        for (dest, src) in data.chunks_exact_mut(len).zip(planes.iter()) {
            let count = src.len().min(len);
            dest[..count].copy_from_slice(&src[..count]);
        }
        PlanarBuffer {
            width,
            height,
            data: data.into_boxed_slice(),
        }
    }

    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns all four planes, back to back.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the samples of one plane (0 = red ... 3 = alpha).
    ///
    /// # Panics
    ///
    /// Panics if `index` is not less than [`NUM_PLANES`].
    pub fn plane(&self, index: usize) -> &[u8] {
        assert!(index < NUM_PLANES,
                "plane index {} out of range (must be less than {})",
                index,
                NUM_PLANES);
        let len = plane_len(self.width, self.height);
        &self.data[(index * len)..((index + 1) * len)]
    }

    /// Interleaves the planes into an RGBA image, locating each sample with
    /// the given rounding rule.
    pub fn to_interleaved(&self, rounding: PlaneRounding) -> RasterImage {
        let mut rgba = vec![0u8; self.data.len()];
        for (index, sample) in rgba.iter_mut().enumerate() {
            let plane = self.plane(index % NUM_PLANES);
            let offset = rounding.sample_offset(index);
            *sample = plane.get(offset).copied().unwrap_or(0);
        }
        match RasterImage::from_rgba(self.width, self.height, rgba) {
            Some(image) => image,
            None => unreachable!("planar length is checked on construction"),
        }
    }
}

/// How an interleaved output index `i` is mapped to a sample offset within
/// plane `i % 4`.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq,
         Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaneRounding {
    /// `offset = round(i / 4)`, with halves rounded up.  The blue and alpha
    /// channels therefore read the sample of the *next* pixel, and the last
    /// pixel's blue and alpha come out as zero.  This reproduces, byte for
    /// byte, icons produced by the legacy decoder; it is a compatibility shim
    /// and not a general rounding rule.
    #[default]
    Nearest,
    /// `offset = floor(i / 4)`: conventional deinterleaving.
    Floor,
}

impl PlaneRounding {
    /// Returns the plane offset read for interleaved output index `index`.
    pub fn sample_offset(self, index: usize) -> usize {
        match self {
            PlaneRounding::Nearest => (index + NUM_PLANES / 2) / NUM_PLANES,
            PlaneRounding::Floor => index / NUM_PLANES,
        }
    }
}

/// Converts a planar buffer to interleaved RGBA using the legacy
/// ([`PlaneRounding::Nearest`]) index mapping.
pub fn convert_planar_to_interleaved(planar: &PlanarBuffer) -> RasterImage {
    planar.to_interleaved(PlaneRounding::Nearest)
}

fn plane_len(width: u32, height: u32) -> usize {
    width as usize * height as usize
}
