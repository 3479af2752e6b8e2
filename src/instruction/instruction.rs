extern crate serde;

use crate::{
    DecodeError,
    command::{Font, BarcodeSystem}
};
use serde::Serialize;
use super::{Justification, DitherMode, decode};

/// One element of a receipt
///
/// Every variant carries all of its own formatting, nothing is inherited from the previous instruction. The serialized form is the canonical receipt payload, so a serialized instruction decodes back to itself.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Instruction {
    /// A single line of text, terminated with a line feed
    Line {
        content: String,
        #[serde(rename = "font-size")]
        font_size: i64,
        font: Font,
        #[serde(rename = "alignment")]
        justification: Justification,
        underline: bool
    },
    /// Text that may contain its own line breaks. No line feed is appended
    Text {
        content: String,
        #[serde(rename = "font-size")]
        font_size: i64,
        font: Font,
        #[serde(rename = "alignment")]
        justification: Justification,
        underline: bool
    },
    /// Advances the paper `lines` lines
    Feed {
        lines: u32
    },
    /// Barcode, always centered
    Barcode {
        code: String,
        #[serde(rename = "barcode-type")]
        system: BarcodeSystem
    },
    /// QR code, always centered. `size` is the module size in dots, the printer accepts 1 to 16
    #[serde(rename = "qr")]
    QrCode {
        code: String,
        size: i64
    },
    /// Base64 encoded png
    Image {
        data: String,
        #[serde(rename = "alignment")]
        justification: Justification,
        #[serde(rename = "dither-mode")]
        dither: DitherMode
    }
}

impl Instruction {
    /// Single line of text with the default size and no underline.
    pub fn line<A: Into<String>>(content: A, font: Font, justification: Justification) -> Instruction {
        Instruction::Line {
            content: content.into(),
            font_size: 1,
            font,
            justification,
            underline: false
        }
    }

    /// Free text with the default size and no underline.
    pub fn text<A: Into<String>>(content: A, font: Font, justification: Justification) -> Instruction {
        Instruction::Text {
            content: content.into(),
            font_size: 1,
            font,
            justification,
            underline: false
        }
    }

    /// Moves the paper a certain amount of lines
    pub fn feed(lines: u32) -> Instruction {
        Instruction::Feed{lines}
    }

    pub fn barcode<A: Into<String>>(code: A, system: BarcodeSystem) -> Instruction {
        Instruction::Barcode {
            code: code.into(),
            system
        }
    }

    pub fn qr_code<A: Into<String>>(code: A, size: i64) -> Instruction {
        Instruction::QrCode {
            code: code.into(),
            size
        }
    }

    /// Base64 encoded png, printed with the given justification
    pub fn image<A: Into<String>>(data: A, justification: Justification, dither: DitherMode) -> Instruction {
        Instruction::Image {
            data: data.into(),
            justification,
            dither
        }
    }

    /// Name of the `type` discriminator for this instruction
    pub fn kind(&self) -> &'static str {
        match self {
            Instruction::Line{..} => "line",
            Instruction::Text{..} => "text",
            Instruction::Feed{..} => "feed",
            Instruction::Barcode{..} => "barcode",
            Instruction::QrCode{..} => "qr",
            Instruction::Image{..} => "image"
        }
    }
}

/// An ordered, validated list of instructions for one print
///
/// Jobs cannot be modified once built. They serialize as `{"receipt": [...]}`.
///
/// ```rust
/// use escpos_receipt::Job;
///
/// let job = Job::from_json(r#"{"receipt": [{"type": "feed", "lines": 2}]}"#).unwrap();
/// assert_eq!(1, job.len());
/// assert_eq!("feed", job.instructions()[0].kind());
/// ```
#[derive(Serialize, Clone, Debug, PartialEq, Default)]
pub struct Job {
    receipt: Vec<Instruction>
}

impl Job {
    pub fn new(instructions: Vec<Instruction>) -> Job {
        Job {
            receipt: instructions
        }
    }

    /// Decodes a job from its json text
    pub fn from_json<A: AsRef<str>>(source: A) -> Result<Job, DecodeError> {
        let value: serde_json::Value = serde_json::from_str(source.as_ref())
            .map_err(|e| DecodeError::job("receipt", format!("invalid json, {}", e)))?;
        Job::from_value(&value)
    }

    /// Decodes a job from an already parsed json value
    pub fn from_value(value: &serde_json::Value) -> Result<Job, DecodeError> {
        let items = value.get("receipt").ok_or_else(|| DecodeError::job("receipt", "missing"))?;
        let items = items.as_array().ok_or_else(|| DecodeError::job("receipt", "must be a list"))?;
        decode::decode_items(items).map(Job::new)
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.receipt
    }

    pub fn len(&self) -> usize {
        self.receipt.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receipt.is_empty()
    }
}

impl std::iter::FromIterator<Instruction> for Job {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Job {
        Job::new(iter.into_iter().collect())
    }
}

impl std::str::FromStr for Job {
    type Err = DecodeError;

    fn from_str(source: &str) -> Result<Job, DecodeError> {
        Job::from_json(source)
    }
}
