use serde::{Deserialize, Serialize};
use std::fmt;

/// A packed 32-bit RGBA color: red in the most significant byte, alpha in
/// the least significant byte.
///
/// In configuration files a color is written as `"#RRGGBB"` (opaque) or
/// `"#RRGGBBAA"`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub u32);

impl Color {
    /// Fully transparent black; every bit clear.
    pub const TRANSPARENT: Color = Color(0);
    /// Opaque white; every bit set.
    pub const WHITE: Color = Color(u32::MAX);
    /// Opaque black.
    pub const BLACK: Color = Color::from_rgba(0, 0, 0, u8::MAX);

    /// Packs four channel values into a color.
    pub const fn from_rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Color {
        Color(u32::from_be_bytes([red, green, blue, alpha]))
    }

    /// Returns the channels in R, G, B, A order.
    pub fn to_rgba(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Returns the alpha channel.
    pub fn alpha(self) -> u8 {
        self.to_rgba()[3]
    }

    /// Returns true if the alpha channel is fully opaque.
    pub fn is_opaque(self) -> bool {
        self.alpha() == u8::MAX
    }
}

impl fmt::Display for Color {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        write!(out, "#{:08x}", self.0)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(input: String) -> Result<Color, String> {
        let hex = input.trim().trim_start_matches('#');
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("invalid color '{}'", input));
        }
        let value = u32::from_str_radix(hex, 16)
            .map_err(|_| format!("invalid color '{}'", input))?;
        match hex.len() {
            6 => Ok(Color((value << 8) | 0xff)),
            8 => Ok(Color(value)),
            _ => Err(format!("color '{}' must be #RRGGBB or #RRGGBBAA", input)),
        }
    }
}

impl From<Color> for String {
    fn from(color: Color) -> String {
        color.to_string()
    }
}
