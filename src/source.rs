//! Recognising and decoding the kinds of source art the pipeline accepts.

use std::io::Cursor;

use super::error::{DecodeError, IconError};
use super::family::IconFamily;
use super::raster::RasterImage;
use super::planar::PlaneRounding;

/// The first eight bytes of a PNG file.
const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";
/// The signature box that opens a JPEG 2000 (JP2) file.
const JP2_SIGNATURE: &[u8; 12] = b"\0\0\0\x0cjP  \r\n\x87\n";
/// SOC followed by SIZ: the start of a raw JPEG 2000 codestream.
const J2K_SIGNATURE: &[u8; 4] = b"\xff\x4f\xff\x51";
/// The first four bytes of an ICNS file.
const ICNS_SIGNATURE: &[u8; 4] = b"icns";

/// Variants of the JPEG 2000 codec.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CodecVariant {
    /// A JP2 file: the codestream wrapped in signature and header boxes.
    Jp2,
    /// A bare codestream with no file wrapper.
    J2k,
}

impl CodecVariant {
    /// Returns the variant whose signature `data` starts with, if any.
    pub fn detect(data: &[u8]) -> Option<CodecVariant> {
        if data.starts_with(JP2_SIGNATURE) {
            Some(CodecVariant::Jp2)
        } else if data.starts_with(J2K_SIGNATURE) {
            Some(CodecVariant::J2k)
        } else {
            None
        }
    }

    /// Returns a human-readable name for the variant.
    pub fn name(self) -> &'static str {
        match self {
            CodecVariant::Jp2 => "JPEG 2000 (JP2)",
            CodecVariant::J2k => "JPEG 2000 codestream",
        }
    }
}

/// The encodings of source art accepted by the pipeline.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SourceKind {
    /// A PNG file.
    Png,
    /// A JPEG 2000 stream of the given variant.
    Jpeg2000(CodecVariant),
    /// An ICNS icon container; its largest raster entry is used.
    Container,
}

impl SourceKind {
    /// Identifies the kind of `data` from its leading signature.
    pub fn detect(data: &[u8]) -> Option<SourceKind> {
        if data.starts_with(PNG_SIGNATURE) {
            Some(SourceKind::Png)
        } else if data.starts_with(ICNS_SIGNATURE) {
            Some(SourceKind::Container)
        } else {
            CodecVariant::detect(data).map(SourceKind::Jpeg2000)
        }
    }
}

/// Decodes a single raster image (PNG or JPEG 2000) into RGBA, identifying
/// the format from its signature.  Containers are rejected.
pub fn decode_raster(data: &[u8], rounding: PlaneRounding)
                     -> Result<RasterImage, DecodeError> {
    match SourceKind::detect(data) {
        Some(SourceKind::Png) => decode_png(data),
        Some(SourceKind::Jpeg2000(variant)) => {
            decode_jpeg2000(data, variant, rounding)
        }
        Some(SourceKind::Container) | None => Err(DecodeError::UnsupportedFormat),
    }
}

/// Decodes source art of the given kind.  For a container, the largest raster
/// entry is selected and decoded; a container with no such entry is reported
/// as [`IconError::NoImageEntry`].
pub fn decode_source(data: &[u8], kind: SourceKind, rounding: PlaneRounding)
                     -> Result<RasterImage, IconError> {
    match kind {
        SourceKind::Png => Ok(decode_png(data)?),
        SourceKind::Jpeg2000(variant) => {
            Ok(decode_jpeg2000(data, variant, rounding)?)
        }
        SourceKind::Container => {
            let family = IconFamily::read(Cursor::new(data))?;
            let element = family.largest_image().ok_or(IconError::NoImageEntry)?;
            Ok(element.decode_image(rounding)?)
        }
    }
}

#[cfg(feature = "pngio")]
fn decode_png(data: &[u8]) -> Result<RasterImage, DecodeError> {
    RasterImage::read_png(Cursor::new(data))
}

#[cfg(not(feature = "pngio"))]
fn decode_png(_data: &[u8]) -> Result<RasterImage, DecodeError> {
    Err(DecodeError::UnsupportedFormat)
}

#[cfg(feature = "jp2io")]
fn decode_jpeg2000(data: &[u8], variant: CodecVariant, rounding: PlaneRounding)
                   -> Result<RasterImage, DecodeError> {
    let planar = super::jp2io::decode_planar_codec(data, variant)?;
    Ok(planar.to_interleaved(rounding))
}

#[cfg(not(feature = "jp2io"))]
fn decode_jpeg2000(_data: &[u8], _variant: CodecVariant, _rounding: PlaneRounding)
                   -> Result<RasterImage, DecodeError> {
    Err(DecodeError::UnsupportedFormat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_signatures() {
        assert_eq!(SourceKind::detect(b"\x89PNG\r\n\x1a\n\0\0\0\x0dIHDR"),
                   Some(SourceKind::Png));
        assert_eq!(SourceKind::detect(b"icns\0\0\0\x08"),
                   Some(SourceKind::Container));
        assert_eq!(SourceKind::detect(b"\0\0\0\x0cjP  \r\n\x87\n\0\0\0\x14ftyp"),
                   Some(SourceKind::Jpeg2000(CodecVariant::Jp2)));
        assert_eq!(SourceKind::detect(b"\xff\x4f\xff\x51\0\x2f"),
                   Some(SourceKind::Jpeg2000(CodecVariant::J2k)));
        assert_eq!(SourceKind::detect(b"GIF89a"), None);
        assert_eq!(SourceKind::detect(b""), None);
    }

    #[test]
    fn decode_raster_rejects_unknown_bytes() {
        let result = decode_raster(b"not an image", PlaneRounding::Nearest);
        assert!(matches!(result, Err(DecodeError::UnsupportedFormat)));
    }

    #[test]
    fn empty_container_has_no_image_entry() {
        let result = decode_source(b"icns\0\0\0\x08",
                                   SourceKind::Container,
                                   PlaneRounding::Nearest);
        assert!(matches!(result, Err(IconError::NoImageEntry)));
    }

    #[test]
    fn truncated_container_is_a_parse_error() {
        let result = decode_source(b"icns\0\0\0\x20ic08\0\0",
                                   SourceKind::Container,
                                   PlaneRounding::Nearest);
        assert!(matches!(result, Err(IconError::Container(_))));
    }
}
