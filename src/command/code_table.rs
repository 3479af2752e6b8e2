extern crate serde;

use serde::{Serialize, Deserialize};

/// Character code tables selectable with `ESC t`
///
/// Text is always encoded to code page 437 before being sent, so `Pc437` is what the printer gets initialized with.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodeTable {
    /// USA, standard Europe
    Pc437
}

impl CodeTable {
    /// Table number sent after `ESC t`
    pub fn as_bytes(&self) -> Vec<u8> {
        match self {
            CodeTable::Pc437 => vec![0x00]
        }
    }
}
