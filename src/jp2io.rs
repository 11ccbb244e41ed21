use hayro_jpeg2000::ColorSpace;

use super::error::DecodeError;
use super::planar::PlanarBuffer;
use super::source::CodecVariant;

/// Decodes a JPEG 2000 stream into four sample planes (R, G, B, A).
///
/// Grayscale streams are replicated into the red, green and blue planes, and
/// streams without an alpha channel get a fully opaque alpha plane.  If the
/// codec yields fewer samples than its header promises, the missing samples
/// are zero rather than an error.
pub fn decode_planar_codec(input: &[u8], variant: CodecVariant)
                           -> Result<PlanarBuffer, DecodeError> {
    if CodecVariant::detect(input) != Some(variant) {
        return Err(DecodeError::UnsupportedVariant {
            expected: variant.name(),
        });
    }
    let image = hayro_jpeg2000::Image::new(
        input,
        &hayro_jpeg2000::DecodeSettings {
            resolve_palette_indices: true,
            strict: false,
            target_resolution: None,
        },
    )
    .map_err(|e| malformed(variant, e))?;

    let gray = match image.color_space() {
        ColorSpace::Gray => true,
        ColorSpace::RGB => false,
        ColorSpace::CMYK => {
            return Err(DecodeError::UnsupportedColorSpace("CMYK".to_string()));
        }
        ColorSpace::Unknown { num_channels } => {
            return Err(DecodeError::UnsupportedColorSpace(format!(
                "unknown ({num_channels}-channel)"
            )));
        }
        ColorSpace::Icc { .. } => {
            return Err(DecodeError::UnsupportedColorSpace(
                "ICC profile".to_string(),
            ));
        }
    };
    let has_alpha = image.has_alpha();
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage { width, height });
    }
    let samples = image.decode().map_err(|e| malformed(variant, e))?;
    log::debug!("decoded {} {}x{} ({}, alpha: {}, {} samples)",
                variant.name(),
                width,
                height,
                if gray { "gray" } else { "rgb" },
                has_alpha,
                samples.len());
    Ok(split_planes(width, height, &samples, gray, has_alpha))
}

/// Splits interleaved codec samples into R, G, B, A planes.
fn split_planes(width: u32,
                height: u32,
                samples: &[u8],
                gray: bool,
                has_alpha: bool)
                -> PlanarBuffer {
    let color_channels = if gray { 1 } else { 3 };
    let channels = color_channels + usize::from(has_alpha);
    let num_pixels = width as usize * height as usize;
    if samples.len() < num_pixels * channels {
        log::warn!("codec produced {} of {} samples; padding with zeros",
                   samples.len(),
                   num_pixels * channels);
    }
    let sample = |pixel: usize, channel: usize| -> u8 {
        samples.get(pixel * channels + channel).copied().unwrap_or(0)
    };
    let mut planes = vec![Vec::with_capacity(num_pixels); 4];
    for pixel in 0..num_pixels {
        for (index, plane) in planes.iter_mut().take(3).enumerate() {
            plane.push(sample(pixel, if gray { 0 } else { index }));
        }
        planes[3].push(if has_alpha {
            sample(pixel, color_channels)
        } else {
            u8::MAX
        });
    }
    PlanarBuffer::from_planes(width,
                              height,
                              [planes[0].as_slice(),
                               planes[1].as_slice(),
                               planes[2].as_slice(),
                               planes[3].as_slice()])
}

fn malformed<E: std::fmt::Display>(variant: CodecVariant, error: E)
                                   -> DecodeError {
    DecodeError::Malformed {
        format: variant.name(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_rgb_without_alpha() {
        let planar = split_planes(2, 1, &[1, 2, 3, 4, 5, 6], false, false);
        assert_eq!(planar.data(), &[1, 4, 2, 5, 3, 6, 255, 255]);
    }

    #[test]
    fn split_gray_with_alpha() {
        let planar = split_planes(2, 1, &[10, 20, 30, 40], true, true);
        assert_eq!(planar.data(), &[10, 30, 10, 30, 10, 30, 20, 40]);
    }

    #[test]
    fn split_truncated_samples_default_to_zero() {
        let planar = split_planes(2, 1, &[1, 2, 3, 4, 5], false, true);
        assert_eq!(planar.data(), &[1, 5, 2, 0, 3, 0, 4, 0]);
    }

    const GRAY_ALPHA_J2K: &[u8] = include_bytes!("../tests/jp2/gray_alpha.j2k");
    const RGB_JP2: &[u8] = include_bytes!("../tests/jp2/rgb.jp2");

    #[test]
    fn decode_gray_alpha_codestream() {
        // 2x2, an 8-bit gray component and a 4-bit alpha component, both at
        // their DC level (128 and 8, the latter scaled to 136).
        let planar = decode_planar_codec(GRAY_ALPHA_J2K, CodecVariant::J2k)
            .unwrap();
        assert_eq!((planar.width(), planar.height()), (2, 2));
        assert_eq!(planar.plane(0), &[128; 4]);
        assert_eq!(planar.plane(1), &[128; 4]);
        assert_eq!(planar.plane(2), &[128; 4]);
        assert_eq!(planar.plane(3), &[136; 4]);
    }

    #[test]
    fn decode_rgb_jp2_without_alpha() {
        // 2x1 sRGB with 8-, 4- and 2-bit components at their DC level.
        let planar = decode_planar_codec(RGB_JP2, CodecVariant::Jp2).unwrap();
        assert_eq!((planar.width(), planar.height()), (2, 1));
        assert_eq!(planar.data(), &[128, 128, 136, 136, 170, 170, 255, 255]);
    }

    #[test]
    fn wrong_variant_is_rejected() {
        let result = decode_planar_codec(b"\xff\x4f\xff\x51\0\0",
                                         CodecVariant::Jp2);
        assert!(matches!(result,
                         Err(DecodeError::UnsupportedVariant { .. })));
    }

    #[test]
    fn garbage_codestream_is_malformed() {
        let result = decode_planar_codec(b"\xff\x4f\xff\x51\0\0",
                                         CodecVariant::J2k);
        assert!(matches!(result, Err(DecodeError::Malformed { .. })));
    }
}
