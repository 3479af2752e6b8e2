use super::{Font, CodeTable, BarcodeSystem, ImageMode};
use crate::Justification;

/// Raw esc/pos commands issued while printing a receipt
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Feeds to the cutter and cuts the paper. Equivalent to GS V 65 0x96
    Cut,
    /// Clears the print buffer and resets the modes. Equivalent to ESC @
    Reset,
    /// Selects a different code table, Equivalent to ESC t
    SelectCodeTable {
        code_table: CodeTable
    },
    /// Turns smoothing of enlarged characters on or off. Equivalent to GS b
    Smoothing {
        enabled: bool
    },
    /// Sets up a font. Equivalent to ESC M
    SelectFont {
        font: Font
    },
    /// Equivalent to ESC a
    SelectJustification {
        justification: Justification
    },
    /// Character magnification, both values in 1..=8. Equivalent to GS !
    CharacterSize {
        width: u8,
        height: u8
    },
    UnderlineOff,
    Underline1Dot,
    /// Prints the buffer and feeds `lines` lines. Equivalent to ESC d
    Feed {
        lines: u8
    },
    /// Human readable text goes below the barcode. Equivalent to GS H 2
    BarcodeHriBelow,
    /// Equivalent to GS k m n d1...dn
    Barcode {
        system: BarcodeSystem,
        payload: Vec<u8>
    },
    /// Selects QR model 2. Equivalent to GS ( k, fn 65
    QrModel2,
    /// Module size in dots, 1..=16. Equivalent to GS ( k, fn 67
    QrModuleSize {
        size: u8
    },
    /// Error correction level M. Equivalent to GS ( k, fn 69
    QrErrorCorrectionM,
    /// Stores the symbol data. Equivalent to GS ( k, fn 80
    QrStore {
        data: Vec<u8>
    },
    /// Prints the stored symbol. Equivalent to GS ( k, fn 81
    QrPrint,
    /// Raster bit image header, followed by `width_bytes * height` bytes. Equivalent to GS v 0
    RasterImage {
        width_bytes: u16,
        height: u16
    },
    /// Bit image header, followed by `nL nH` and the column data. Equivalent to ESC *
    Bitmap {
        image_mode: ImageMode
    },
    /// Change line size
    NoLine,
    ResetLine
}

impl Command {
    pub fn as_bytes(&self) -> Vec<u8> {
        match self {
            Command::Cut => vec![0x1d, 0x56, 0x41, 0x96],
            Command::Reset => vec![0x1b, 0x40],
            Command::SelectCodeTable{code_table} => {
                let mut res = vec![0x1b, 0x74];
                res.append(&mut code_table.as_bytes());
                res
            },
            Command::Smoothing{enabled} => vec![0x1d, 0x62, *enabled as u8],
            Command::SelectFont{font} => {
                let mut res = vec![0x1b, 0x4d];
                res.append(&mut font.as_bytes());
                res
            },
            Command::SelectJustification{justification} => vec![0x1b, 0x61, justification.as_byte()],
            Command::CharacterSize{width, height} => {
                let width = (*width).max(1).min(8) - 1;
                let height = (*height).max(1).min(8) - 1;
                vec![0x1d, 0x21, (width << 4) | height]
            },
            Command::UnderlineOff => vec![0x1b, 0x2d, 0x00],
            Command::Underline1Dot => vec![0x1b, 0x2d, 0x01],
            Command::Feed{lines} => vec![0x1b, 0x64, *lines],
            Command::BarcodeHriBelow => vec![0x1d, 0x48, 0x02],
            Command::Barcode{system, payload} => {
                let mut res = vec![0x1d, 0x6b, system.as_byte(), payload.len() as u8];
                res.extend_from_slice(payload);
                res
            },
            Command::QrModel2 => vec![0x1d, 0x28, 0x6b, 0x04, 0x00, 0x31, 0x41, 0x32, 0x00],
            Command::QrModuleSize{size} => vec![0x1d, 0x28, 0x6b, 0x03, 0x00, 0x31, 0x43, (*size).max(1).min(16)],
            Command::QrErrorCorrectionM => vec![0x1d, 0x28, 0x6b, 0x03, 0x00, 0x31, 0x45, 0x31],
            Command::QrStore{data} => {
                // pL + pH * 256 counts cn, fn and m as well
                let len = data.len() + 3;
                let mut res = vec![0x1d, 0x28, 0x6b, (len % 256) as u8, (len / 256) as u8, 0x31, 0x50, 0x30];
                res.extend_from_slice(data);
                res
            },
            Command::QrPrint => vec![0x1d, 0x28, 0x6b, 0x03, 0x00, 0x31, 0x51, 0x30],
            Command::RasterImage{width_bytes, height} => vec![
                0x1d, 0x76, 0x30, ImageMode::Raster.as_byte(),
                (width_bytes % 256) as u8, (width_bytes / 256) as u8,
                (height % 256) as u8, (height / 256) as u8
            ],
            Command::Bitmap{image_mode} => vec![0x1b, 0x2a, image_mode.as_byte()],
            Command::NoLine => vec![0x1b, 0x33, 0x00],
            Command::ResetLine => vec![0x1b, 0x32]
        }
    }
}
