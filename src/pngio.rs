use std::io::{self, BufRead, Seek, Write};

use super::error::DecodeError;
use super::raster::RasterImage;

impl RasterImage {
    /// Reads an image from a PNG file.  Every 8-bit color type (and every
    /// other bit depth, after expansion) is converted to RGBA.
    pub fn read_png<R: BufRead + Seek>(input: R)
                                       -> Result<RasterImage, DecodeError> {
        let mut decoder = png::Decoder::new(input);
        decoder.set_transformations(
            png::Transformations::STRIP_16 | png::Transformations::EXPAND,
        );
        let info = decoder.read_header_info().map_err(malformed)?;
        let (width, height) = (info.width, info.height);
        if width == 0 || height == 0 {
            return Err(DecodeError::EmptyImage { width, height });
        }
        let mut reader = decoder.read_info().map_err(malformed)?;

        let (color_type, bit_depth) = reader.output_color_type();
        assert!(bit_depth == png::BitDepth::Eight);
        let buffer_size = reader.output_buffer_size().ok_or_else(|| {
            DecodeError::Malformed {
                format: "PNG",
                message: format!("{}x{} image is too large", width, height),
            }
        })?;
        let mut data = vec![0u8; buffer_size];
        reader.next_frame(&mut data).map_err(malformed)?;
        reader.finish().map_err(malformed)?;

        let rgba = match color_type {
            png::ColorType::Rgba => data,
            png::ColorType::Rgb => rgb_to_rgba(&data),
            png::ColorType::GrayscaleAlpha => gray_alpha_to_rgba(&data),
            png::ColorType::Grayscale => gray_to_rgba(&data),
            // EXPAND prevents paletted output
            png::ColorType::Indexed => unreachable!(),
        };
        log::debug!("decoded PNG {}x{} ({:?})", width, height, color_type);
        RasterImage::from_rgba(width, height, rgba).ok_or_else(|| {
            DecodeError::Malformed {
                format: "PNG",
                message: "decoded pixel data has the wrong length".to_string(),
            }
        })
    }

    /// Writes the image to a PNG file.
    pub fn write_png<W: Write>(&self, output: W) -> io::Result<()> {
        let mut encoder = png::Encoder::new(output, self.width(), self.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(self.data())?;
        writer.finish()?;
        Ok(())
    }

    /// Encodes the image as an in-memory PNG file.
    pub fn to_png_bytes(&self) -> io::Result<Vec<u8>> {
        let mut output = Vec::new();
        self.write_png(&mut output)?;
        Ok(output)
    }
}

fn malformed(error: png::DecodingError) -> DecodeError {
    DecodeError::Malformed {
        format: "PNG",
        message: error.to_string(),
    }
}

/// Converts RGB image data into RGBA.
fn rgb_to_rgba(rgb: &[u8]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(rgb.len() / 3 * 4);
    for pixel in rgb.chunks_exact(3) {
        rgba.extend_from_slice(pixel);
        rgba.push(u8::MAX);
    }
    rgba
}

/// Converts grayscale-with-alpha image data into RGBA.
fn gray_alpha_to_rgba(gray_alpha: &[u8]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(gray_alpha.len() * 2);
    for pixel in gray_alpha.chunks_exact(2) {
        rgba.extend_from_slice(&[pixel[0], pixel[0], pixel[0], pixel[1]]);
    }
    rgba
}

/// Converts grayscale image data into RGBA.
fn gray_to_rgba(gray: &[u8]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(gray.len() * 4);
    for &value in gray {
        rgba.extend_from_slice(&[value, value, value, u8::MAX]);
    }
    rgba
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use std::io::Cursor;

    #[test]
    fn png_round_trip() {
        let mut image = RasterImage::filled(5, 3, Color::WHITE);
        image.set_pixel(4, 2, Color::from_rgba(1, 2, 3, 4)).unwrap();
        let bytes = image.to_png_bytes().expect("write failed");
        let decoded = RasterImage::read_png(Cursor::new(&bytes))
            .expect("read failed");
        assert_eq!(decoded, image);
    }

    #[test]
    fn gray_png_expands_to_rgba() {
        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, 2, 1);
            encoder.set_color(png::ColorType::Grayscale);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[7, 200]).unwrap();
            writer.finish().unwrap();
        }
        let image = RasterImage::read_png(Cursor::new(&bytes)).unwrap();
        assert_eq!(image.data(), &[7, 7, 7, 255, 200, 200, 200, 255]);
    }

    #[test]
    fn truncated_png_is_malformed() {
        let bytes = RasterImage::new(4, 4).to_png_bytes().unwrap();
        let result = RasterImage::read_png(Cursor::new(&bytes[..bytes.len() / 2]));
        assert!(matches!(result, Err(DecodeError::Malformed { format: "PNG", .. })));
    }
}
