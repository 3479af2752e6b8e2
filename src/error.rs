use crate::command::BarcodeSystem;
use thiserror::Error;

/// Errors that this crate throws while rendering or talking to the printer.
#[derive(Debug, Error)]
pub enum Error {
    /// Error related to rusb
    #[error("rusb error: {0}")]
    Usb(#[from] rusb::Error),
    /// Writing to a device file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Error regarding image treatment
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    /// The image payload is not valid base64
    #[error("Image data is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The qr code content could not be encoded
    #[error("QR code error: {0}")]
    Qr(#[from] qrcode::types::QrError),
    /// The code does not fit the requested symbology
    #[error("Invalid {system} barcode {code:?}: {reason}")]
    Barcode {
        system: BarcodeSystem,
        code: String,
        reason: &'static str
    },
    /// An instruction of a job could not be turned into printer bytes
    #[error("Cannot render item {index} ({kind}): {source}")]
    Render {
        index: usize,
        kind: &'static str,
        #[source]
        source: Box<Error>
    },
    /// An unsupported utf-8 character was found when passing to cp437
    #[error("Text cannot be encoded in code page 437: {0:?}")]
    Encoding(String),
    /// This means no bulk endpoint could be found
    #[error("No bulk endpoint could be found")]
    NoBulkEndpoint,
    /// The device accepted fewer bytes than it was given
    #[error("The device accepted {written} of {expected} bytes")]
    ShortWrite {
        written: usize,
        expected: usize
    },
    /// Indicates that a builder method was called on the wrong printer connection
    #[error("The called method does not work with the current printer connection")]
    UnsupportedForPrinterConnection
}

/// A receipt job that could not be decoded
///
/// Carries the position of the offending item (if the failure is not at the top level), the `type` value that was read from it, the field that failed, and a human readable reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeError {
    pub(crate) index: Option<usize>,
    pub(crate) kind: Option<String>,
    pub(crate) field: String,
    pub(crate) reason: String
}

impl DecodeError {
    pub(crate) fn job<A: Into<String>, B: Into<String>>(field: A, reason: B) -> DecodeError {
        DecodeError {
            index: None,
            kind: None,
            field: field.into(),
            reason: reason.into()
        }
    }

    pub(crate) fn item<A: Into<String>, B: Into<String>>(index: usize, kind: Option<&str>, field: A, reason: B) -> DecodeError {
        DecodeError {
            index: Some(index),
            kind: kind.map(String::from),
            field: field.into(),
            reason: reason.into()
        }
    }

    /// Position of the failing item in the `receipt` list
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Value of the `type` discriminator of the failing item, if one was read
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// Name of the field that failed
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        match (self.index, &self.kind) {
            (Some(index), Some(kind)) => write!(formatter, "item {} ({}), ", index, kind)?,
            (Some(index), None) => write!(formatter, "item {}, ", index)?,
            _ => ()
        }
        write!(formatter, "field \"{}\": {}", self.field, self.reason)
    }
}

impl std::error::Error for DecodeError{}
