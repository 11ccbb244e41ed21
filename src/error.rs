//! Error types for every stage of the icon pipeline.
//!
//! Each stage reports its own error type so callers can match on the failure
//! they care about (for example, falling back to another source when a
//! container cannot be parsed).  [`IconError`] wraps all of them for the
//! top-level entry points.

use std::io;

use super::icontype::OSType;

/// A compressed or raster image stream could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The stream is truncated or otherwise malformed.
    #[error("malformed {format} data: {message}")]
    Malformed {
        /// The format being decoded (e.g. `"PNG"`).
        format: &'static str,
        /// Decoder-supplied description of the problem.
        message: String,
    },

    /// The stream does not carry the signature of the requested codec variant.
    #[error("stream is not a {expected} stream")]
    UnsupportedVariant {
        /// Name of the variant the caller asked for.
        expected: &'static str,
    },

    /// The codec decoded the stream, but its color space cannot be mapped to
    /// RGBA.
    #[error("unsupported color space: {0}")]
    UnsupportedColorSpace(String),

    /// The bytes do not start with any signature this library understands, or
    /// support for the format was not compiled in.
    #[error("unrecognized or unsupported image format")]
    UnsupportedFormat,

    /// The stream decoded to an image with a zero dimension.
    #[error("decoded image is empty ({width}x{height})")]
    EmptyImage {
        /// Decoded width.
        width: u32,
        /// Decoded height.
        height: u32,
    },
}

/// The framing of an icon container is malformed.
#[derive(Debug, thiserror::Error)]
pub enum ContainerParseError {
    /// The first four bytes are not the container magic literal.
    #[error("not an icns file (wrong magic literal)")]
    BadMagic,

    /// An element declares a length shorter than its own header.
    #[error("invalid length {length} for '{ostype}' element")]
    InvalidElementLength {
        /// Tag of the offending element.
        ostype: OSType,
        /// Declared element length, header included.
        length: u32,
    },

    /// An element extends past the length declared in the file header.
    #[error("'{ostype}' element overruns the declared file length \
             ({end} > {file_length})")]
    Overrun {
        /// Tag of the offending element.
        ostype: OSType,
        /// Offset at which the element ends.
        end: u64,
        /// File length declared by the container header.
        file_length: u32,
    },

    /// The underlying reader failed (usually an unexpected end of file).
    #[error("failed to read container: {0}")]
    Io(#[from] io::Error),
}

/// A pixel coordinate lies outside the image.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("pixel ({x}, {y}) is outside a {width}x{height} image")]
pub struct OutOfBounds {
    /// Requested column.
    pub x: u32,
    /// Requested row.
    pub y: u32,
    /// Width of the image that was accessed.
    pub width: u32,
    /// Height of the image that was accessed.
    pub height: u32,
}

/// A stencil mask does not have the same dimensions as the canvas it gates.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("mask is {mask_width}x{mask_height} but canvas is \
         {canvas_width}x{canvas_height}")]
pub struct UnsupportedMask {
    /// Width of the mask.
    pub mask_width: u32,
    /// Height of the mask.
    pub mask_height: u32,
    /// Width of the canvas.
    pub canvas_width: u32,
    /// Height of the canvas.
    pub canvas_height: u32,
}

/// An [`IconConfig`](crate::IconConfig) could not be parsed or is out of
/// range.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML document could not be deserialized.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field holds a value the pipeline cannot work with.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Any failure of the icon generation pipeline.
#[derive(Debug, thiserror::Error)]
pub enum IconError {
    /// The source (or the selected container entry) could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The container framing is malformed.
    #[error(transparent)]
    Container(#[from] ContainerParseError),

    /// The container parsed, but holds no recognized raster image entry.
    #[error("the container holds no raster image entry")]
    NoImageEntry,

    /// The stencil mask does not match the output canvas.
    #[error(transparent)]
    Mask(#[from] UnsupportedMask),

    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
