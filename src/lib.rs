//! Library for turning source art into masked, rounded application icons.
//!
//! Source art may be a PNG file, a JPEG 2000 stream, or an Apple Icon Image
//! (.icns) container, in which case the largest raster entry is used.  See
//! https://en.wikipedia.org/wiki/Apple_Icon_Image_format for more information
//! about the container format.
//!
//! The pipeline is pure and synchronous: bytes go in, a [`RasterImage`] comes
//! out, and nothing is shared between calls, so independent icons may be
//! generated on separate threads.
//!
//! ```no_run
//! use iconmask::{generate_icon, IconConfig, SourceKind, StencilMask};
//!
//! let config = IconConfig::default();
//! let mask = StencilMask::for_config(&config);
//! let data = std::fs::read("App.icns").unwrap();
//! let icon = generate_icon(&data, SourceKind::Container, &config, &mask)
//!     .unwrap();
//! icon.write_png(std::fs::File::create("icon.png").unwrap()).unwrap();
//! ```

#![warn(missing_docs)]

mod color;
mod compositor;
mod config;
mod element;
mod error;
mod family;
mod icontype;
#[cfg(feature = "jp2io")]
mod jp2io;
mod mask;
mod planar;
#[cfg(feature = "pngio")]
mod pngio;
mod raster;
mod source;

pub use color::Color;
pub use compositor::{generate_icon, generate_icon_with_fallback,
                     CompositionPolicy, Compositor};
pub use config::{IconConfig, ResizeFilter};
pub use element::IconElement;
pub use error::{ConfigError, ContainerParseError, DecodeError, IconError,
                OutOfBounds, UnsupportedMask};
pub use family::{extract_container_image, IconFamily};
pub use icontype::{IconType, OSType, RASTER_ICON_TYPES};
#[cfg(feature = "jp2io")]
pub use jp2io::decode_planar_codec;
pub use mask::StencilMask;
pub use planar::{convert_planar_to_interleaved, PlanarBuffer, PlaneRounding};
pub use raster::{fitted_size, RasterImage, ResizePolicy};
pub use source::{decode_raster, decode_source, CodecVariant, SourceKind};
