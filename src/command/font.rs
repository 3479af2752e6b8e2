extern crate serde;

use serde::{Serialize, Deserialize};

/// Common fonts used in thermal printers
///
/// Serialized with the single letter used in receipt jobs (`"A"`, `"B"`, `"C"`).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Font {
    #[serde(rename = "A")]
    FontA,
    #[serde(rename = "B")]
    FontB,
    #[serde(rename = "C")]
    FontC
}

impl Font {
    /// Parses the canonical receipt spelling. Matching is case sensitive.
    ///
    /// ```rust
    /// use escpos_receipt::command::Font;
    /// assert_eq!(Some(Font::FontB), Font::from_name("B"));
    /// assert_eq!(None, Font::from_name("b"));
    /// ```
    pub fn from_name(name: &str) -> Option<Font> {
        match name {
            "A" => Some(Font::FontA),
            "B" => Some(Font::FontB),
            "C" => Some(Font::FontC),
            _ => None
        }
    }

    /// Byte representation of each font.
    pub fn as_bytes(&self) -> Vec<u8> {
        match self {
            Font::FontA => vec![0x00],
            Font::FontB => vec![0x01],
            Font::FontC => vec![0x02]
        }
    }
}
