extern crate serde;

use serde::{Serialize, Deserialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Justification {
    Left,
    Center,
    Right
}

impl Justification {
    /// Parses the canonical receipt spelling (`left`, `right`, `center`). Matching is case sensitive.
    pub fn from_name(name: &str) -> Option<Justification> {
        match name {
            "left" => Some(Justification::Left),
            "center" => Some(Justification::Center),
            "right" => Some(Justification::Right),
            _ => None
        }
    }

    /// Parameter for `ESC a`
    pub fn as_byte(&self) -> u8 {
        match self {
            Justification::Left => 0x00,
            Justification::Center => 0x01,
            Justification::Right => 0x02
        }
    }
}
