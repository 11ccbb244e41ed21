use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Cursor, Read, Write};

use super::element::IconElement;
use super::error::ContainerParseError;
use super::icontype::IconType;
#[cfg(feature = "pngio")]
use super::raster::RasterImage;

/// The first four bytes of an ICNS file:
const ICNS_MAGIC_LITERAL: &[u8; 4] = b"icns";

/// The length of an icon family header, in bytes:
const ICON_FAMILY_HEADER_LENGTH: u32 = 8;

/// A set of icons stored in a single ICNS file.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IconFamily {
    /// The icon elements stored in the ICNS file, in file order.
    pub elements: Vec<IconElement>,
}

impl IconFamily {
    /// Creates a new, empty icon family.
    pub fn new() -> IconFamily {
        IconFamily { elements: Vec::new() }
    }

    /// Returns true if the icon family contains no icons nor any other
    /// elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Encodes the image into the family as a PNG payload, automatically
    /// choosing an icon type based on the dimensions of the image.  Returns an
    /// error if there is no supported icon type matching the image dimensions.
    #[cfg(feature = "pngio")]
    pub fn add_icon(&mut self, image: &RasterImage) -> io::Result<()> {
        if let Some(icon_type) = IconType::from_pixel_size(image.width(),
                                                           image.height()) {
            self.add_icon_with_type(image, icon_type)
        } else {
            let msg = format!("no supported icon type has dimensions {}x{}",
                              image.width(),
                              image.height());
            Err(io::Error::new(io::ErrorKind::InvalidInput, msg))
        }
    }

    /// Encodes the image into the family using the given icon type.  Returns
    /// an error if the image has the wrong dimensions for the selected type.
    #[cfg(feature = "pngio")]
    pub fn add_icon_with_type(&mut self,
                              image: &RasterImage,
                              icon_type: IconType)
                              -> io::Result<()> {
        self.elements
            .push(IconElement::encode_image_with_type(image, icon_type)?);
        Ok(())
    }

    /// Returns the elements whose tags denote a recognized raster image, in
    /// file order.
    pub fn image_elements(&self) -> impl Iterator<Item = &IconElement> {
        self.elements.iter().filter(|el| el.ostype.is_raster_image())
    }

    /// Returns the first element with the given icon type, if any.
    pub fn find_element(&self, icon_type: IconType) -> Option<&IconElement> {
        let ostype = icon_type.ostype();
        self.elements.iter().find(|el| el.ostype == ostype)
    }

    /// Picks the raster image element with the largest payload, as a proxy
    /// for the highest resolution.  Among equally large payloads the first in
    /// file order wins.  Returns `None` if the family holds no raster image.
    pub fn largest_image(&self) -> Option<&IconElement> {
        let mut best: Option<&IconElement> = None;
        for element in self.image_elements() {
            if best.map_or(true, |b| element.data.len() > b.data.len()) {
                best = Some(element);
            }
        }
        if let Some(element) = best {
            log::debug!("selected '{}' element ({} byte payload) out of {} \
                         element(s)",
                        element.ostype,
                        element.data.len(),
                        self.elements.len());
        }
        best
    }

    /// Reads an icon family from an ICNS file.
    pub fn read<R: Read>(mut reader: R)
                         -> Result<IconFamily, ContainerParseError> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if magic != *ICNS_MAGIC_LITERAL {
            return Err(ContainerParseError::BadMagic);
        }
        let file_length = reader.read_u32::<BigEndian>()?;
        let mut file_position = u64::from(ICON_FAMILY_HEADER_LENGTH);
        let mut family = IconFamily::new();
        while file_position < u64::from(file_length) {
            let element = IconElement::read(reader.by_ref())?;
            file_position += u64::from(element.total_length());
            if file_position > u64::from(file_length) {
                return Err(ContainerParseError::Overrun {
                    ostype: element.ostype,
                    end: file_position,
                    file_length,
                });
            }
            family.elements.push(element);
        }
        Ok(family)
    }

    /// Writes the icon family to an ICNS file.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(ICNS_MAGIC_LITERAL)?;
        writer.write_u32::<BigEndian>(self.total_length())?;
        for element in &self.elements {
            element.write(writer.by_ref())?;
        }
        Ok(())
    }

    /// Returns the encoded length of the file, in bytes, including the
    /// length of the header.
    pub fn total_length(&self) -> u32 {
        let mut length = ICON_FAMILY_HEADER_LENGTH;
        for element in &self.elements {
            length += element.total_length();
        }
        length
    }
}

/// Parses an ICNS container and returns its largest raster image element.
/// Returns `Ok(None)` if the container is well formed but holds no raster
/// image; the caller then has to supply an image from elsewhere.
pub fn extract_container_image(
    data: &[u8])
    -> Result<Option<IconElement>, ContainerParseError> {
    let family = IconFamily::read(Cursor::new(data))?;
    Ok(family.largest_image().cloned())
}
