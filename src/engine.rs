//! Runs receipt jobs against a printer
//!
//! Every instruction of the job is turned into printer bytes first. Only when all of them rendered, the bytes are written, in order, followed by a cut. A broken image or barcode therefore rejects the whole job before the paper moves, and the only failures that can leave a partial receipt come from the device itself.

extern crate codepage_437;
extern crate log;

use codepage_437::{IntoCp437, CP437_CONTROL};
use log::{debug, info};
use qrcode::types::QrError;
use crate::{
    Error, Instruction, Job, Justification, Printer, PrinterProfile, EscposImage,
    command::Command,
    escpos_image
};

/// Largest payload the native qr command takes: version 40, byte mode, error correction level M
const QR_MAX_PAYLOAD: usize = 2331;

/// Prints a whole job, then cuts the paper.
///
/// An empty job still cuts. Nothing is retried: the first device error stops the job and is returned.
///
/// ```rust
/// use escpos_receipt::{engine, Job, Printer, PrinterProfile};
///
/// let mut printer = Printer::with_device(PrinterProfile::file_builder("unused").build(), Vec::new());
/// let job = Job::from_json(r#"{"receipt": [{"type": "feed", "lines": 0}]}"#).unwrap();
/// engine::execute(&mut printer, &job)?;
/// # Ok::<(), escpos_receipt::Error>(())
/// ```
pub fn execute(printer: &mut Printer, job: &Job) -> Result<(), Error> {
    let blocks = job.instructions().iter().enumerate().map(|(index, instruction)| {
        render(instruction, printer.profile()).map_err(|e| Error::Render {
            index,
            kind: instruction.kind(),
            source: Box::new(e)
        })
    }).collect::<Result<Vec<_>, _>>()?;

    info!("Printing job with {} items", blocks.len());
    for (index, (instruction, block)) in job.instructions().iter().zip(blocks.iter()).enumerate() {
        debug!("Item {} ({}), {} bytes", index, instruction.kind(), block.len());
        printer.raw(block)?;
    }
    printer.cut()?;
    info!("Job printed");
    Ok(())
}

/// Builds the printer bytes for one instruction.
///
/// Text sets its font, justification, size and underline every time. Barcodes and qr codes are always centered.
pub fn render(instruction: &Instruction, printer_profile: &PrinterProfile) -> Result<Vec<u8>, Error> {
    let mut target = Vec::new();
    match instruction {
        Instruction::Line{content, font_size, font, justification, underline} |
        Instruction::Text{content, font_size, font, justification, underline} => {
            let size = (*font_size).max(1).min(8) as u8;
            let underline = if *underline {Command::Underline1Dot} else {Command::UnderlineOff};
            target.append(&mut Command::SelectFont{font: *font}.as_bytes());
            target.append(&mut Command::SelectJustification{justification: *justification}.as_bytes());
            target.append(&mut Command::CharacterSize{width: size, height: size}.as_bytes());
            target.append(&mut underline.as_bytes());
            target.append(&mut content.clone().into_cp437(&CP437_CONTROL).map_err(|e| Error::Encoding(e.into_string()))?);
            if let Instruction::Line{..} = instruction {
                target.push(b'\n');
            }
        },
        Instruction::Feed{lines} => {
            let mut remaining = *lines;
            while remaining > 0 {
                let chunk = remaining.min(255);
                target.append(&mut Command::Feed{lines: chunk as u8}.as_bytes());
                remaining -= chunk;
            }
        },
        Instruction::Barcode{code, system} => {
            let payload = system.payload(code)?;
            target.append(&mut Command::SelectJustification{justification: Justification::Center}.as_bytes());
            target.append(&mut Command::BarcodeHriBelow.as_bytes());
            target.append(&mut Command::Barcode{system: *system, payload}.as_bytes());
        },
        Instruction::QrCode{code, size} => {
            let size = (*size).max(1).min(16) as u8;
            target.append(&mut Command::SelectJustification{justification: Justification::Center}.as_bytes());
            if printer_profile.native_qr() {
                if code.is_empty() || code.len() > QR_MAX_PAYLOAD {
                    return Err(Error::Qr(QrError::DataTooLong));
                }
                target.append(&mut Command::QrModel2.as_bytes());
                target.append(&mut Command::QrModuleSize{size}.as_bytes());
                target.append(&mut Command::QrErrorCorrectionM.as_bytes());
                target.append(&mut Command::QrStore{data: code.as_bytes().to_vec()}.as_bytes());
                target.append(&mut Command::QrPrint.as_bytes());
            } else {
                let bitmap = escpos_image::qr_bitmap(code, size, printer_profile.width())?;
                target.append(&mut escpos_image::feed(&bitmap, printer_profile.image_mode()));
            }
        },
        Instruction::Image{data, justification, dither} => {
            let image = EscposImage::new(data, *dither, printer_profile.width())?;
            target.append(&mut Command::SelectJustification{justification: *justification}.as_bytes());
            target.append(&mut image.feed(printer_profile.image_mode()));
        }
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{command::{Font, BarcodeSystem}, DitherMode};
    use pretty_assertions::assert_eq;

    fn profile() -> PrinterProfile {
        PrinterProfile::file_builder("unused").build()
    }

    #[test]
    fn test_line_sets_everything_then_prints() {
        let instruction = Instruction::Line {
            content: "Hi".into(),
            font_size: 2,
            font: Font::FontB,
            justification: Justification::Right,
            underline: true
        };
        assert_eq!(vec![
            0x1b, 0x4d, 0x01,
            0x1b, 0x61, 0x02,
            0x1d, 0x21, 0x11,
            0x1b, 0x2d, 0x01,
            b'H', b'i', b'\n'
        ], render(&instruction, &profile()).unwrap());
    }

    #[test]
    fn test_text_has_no_trailing_feed() {
        let bytes = render(&Instruction::text("a\nb", Font::FontA, Justification::Left), &profile()).unwrap();
        assert!(bytes.ends_with(&[0x1b, 0x2d, 0x00, b'a', b'\n', b'b']));
    }

    #[test]
    fn test_text_outside_cp437() {
        let result = render(&Instruction::text("\u{1f600}", Font::FontA, Justification::Left), &profile());
        assert!(matches!(result, Err(Error::Encoding(_))));
    }

    #[test]
    fn test_feed_chunks() {
        assert_eq!(Vec::<u8>::new(), render(&Instruction::feed(0), &profile()).unwrap());
        assert_eq!(vec![0x1b, 0x64, 3], render(&Instruction::feed(3), &profile()).unwrap());
        assert_eq!(vec![0x1b, 0x64, 255, 0x1b, 0x64, 45], render(&Instruction::feed(300), &profile()).unwrap());
    }

    #[test]
    fn test_barcode_is_centered() {
        let bytes = render(&Instruction::barcode("123456789012", BarcodeSystem::CODE128), &profile()).unwrap();
        assert_eq!(&[0x1b, 0x61, 0x01, 0x1d, 0x48, 0x02, 0x1d, 0x6b, 73, 14], &bytes[..10]);
        assert_eq!(b"{B123456789012", &bytes[10..]);
    }

    #[test]
    fn test_native_qr() {
        let bytes = render(&Instruction::qr_code("abc", 40), &profile()).unwrap();
        assert_eq!(&[0x1b, 0x61, 0x01], &bytes[..3]);
        // Module size clamped to 16
        assert!(bytes.windows(8).any(|w| w == [0x1d, 0x28, 0x6b, 0x03, 0x00, 0x31, 0x43, 16]));
        assert!(bytes.ends_with(&[0x1d, 0x28, 0x6b, 0x03, 0x00, 0x31, 0x51, 0x30]));
    }

    #[test]
    fn test_native_qr_capacity() {
        let largest = "a".repeat(QR_MAX_PAYLOAD);
        let bytes = render(&Instruction::qr_code(largest.as_str(), 4), &profile()).unwrap();
        // Store command length is the payload plus 3
        let store_len = QR_MAX_PAYLOAD + 3;
        assert!(bytes.windows(5).any(|w| w == [0x1d, 0x28, 0x6b, (store_len % 256) as u8, (store_len / 256) as u8]));
        let too_large = "a".repeat(QR_MAX_PAYLOAD + 1);
        assert!(matches!(render(&Instruction::qr_code(too_large, 4), &profile()), Err(Error::Qr(QrError::DataTooLong))));
        assert!(matches!(render(&Instruction::qr_code("", 4), &profile()), Err(Error::Qr(QrError::DataTooLong))));
    }

    #[test]
    fn test_raster_qr() {
        let profile = PrinterProfile::file_builder("unused").with_native_qr(false).build();
        let bytes = render(&Instruction::qr_code("abc", 4), &profile).unwrap();
        // Version 1 is 21 modules, plus 8 of quiet zone, 4 dots each
        assert_eq!(&[0x1b, 0x61, 0x01, 0x1d, 0x76, 0x30, 0x00, 15, 0, 116, 0], &bytes[..11]);
    }

    #[test]
    fn test_broken_image() {
        let result = render(&Instruction::image("%%%", Justification::Center, DitherMode::None), &profile());
        assert!(matches!(result, Err(Error::Base64(_))));
    }
}
