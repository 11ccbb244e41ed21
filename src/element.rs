use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

use super::error::{ContainerParseError, DecodeError};
use super::icontype::{IconType, OSType};
use super::planar::PlaneRounding;
use super::raster::RasterImage;
use super::source;

/// The length of an icon element header, in bytes:
pub const ICON_ELEMENT_HEADER_LENGTH: u32 = 8;

/// One entry in an ICNS file: a four-byte type tag and its raw payload.
/// Depending on the tag, the payload may be a complete image, part of one
/// (such as an alpha mask), or metadata.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IconElement {
    /// The OSType for this element (e.g. `ic10` or `TOC `).
    pub ostype: OSType,
    /// The raw data payload for this element.
    pub data: Vec<u8>,
}

impl IconElement {
    /// Creates an icon element with the given OSType and data payload.
    pub fn new(ostype: OSType, data: Vec<u8>) -> IconElement {
        IconElement { ostype, data }
    }

    /// Encodes the image as a PNG payload under the given icon type.  Returns
    /// an error if the image has the wrong dimensions for that type.
    #[cfg(feature = "pngio")]
    pub fn encode_image_with_type(image: &RasterImage, icon_type: IconType)
                                  -> io::Result<IconElement> {
        let width = icon_type.pixel_width();
        let height = icon_type.pixel_height();
        if image.width() != width || image.height() != height {
            let msg = format!("image has wrong dimensions for {} ({}x{} \
                               instead of {}x{})",
                              icon_type.ostype(),
                              image.width(),
                              image.height(),
                              width,
                              height);
            return Err(io::Error::new(io::ErrorKind::InvalidInput, msg));
        }
        Ok(IconElement::new(icon_type.ostype(), image.to_png_bytes()?))
    }

    /// Decodes the element's payload, which must be a complete PNG or JPEG
    /// 2000 file.  The format is detected from the payload itself rather than
    /// from the tag.
    pub fn decode_image(&self, rounding: PlaneRounding)
                        -> Result<RasterImage, DecodeError> {
        source::decode_raster(&self.data, rounding)
    }

    /// Returns the type of icon encoded by this element, or `None` if this
    /// element is not a recognized raster image.
    pub fn icon_type(&self) -> Option<IconType> {
        IconType::from_ostype(self.ostype)
    }

    /// Returns the encoded length of the element, in bytes, including the
    /// length of the header.
    pub fn total_length(&self) -> u32 {
        ICON_ELEMENT_HEADER_LENGTH + (self.data.len() as u32)
    }

    /// Reads an icon element from within an ICNS file.
    pub fn read<R: Read>(mut reader: R)
                         -> Result<IconElement, ContainerParseError> {
        let mut raw_ostype = [0u8; 4];
        reader.read_exact(&mut raw_ostype)?;
        let ostype = OSType(raw_ostype);
        let element_length = reader.read_u32::<BigEndian>()?;
        if element_length < ICON_ELEMENT_HEADER_LENGTH {
            return Err(ContainerParseError::InvalidElementLength {
                ostype,
                length: element_length,
            });
        }
        let data_length = element_length - ICON_ELEMENT_HEADER_LENGTH;
        let mut data = Vec::new();
        reader.by_ref().take(u64::from(data_length)).read_to_end(&mut data)?;
        if data.len() as u64 != u64::from(data_length) {
            return Err(ContainerParseError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("'{}' element payload is truncated ({} of {} bytes)",
                        ostype,
                        data.len(),
                        data_length),
            )));
        }
        Ok(IconElement::new(ostype, data))
    }

    /// Writes the icon element to within an ICNS file.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let OSType(ref raw_ostype) = self.ostype;
        writer.write_all(raw_ostype)?;
        writer.write_u32::<BigEndian>(self.total_length())?;
        writer.write_all(&self.data)?;
        Ok(())
    }
}
