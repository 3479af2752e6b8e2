use super::dither::{self, Bitmap, DitherMode};
use crate::{Error, command::{Command, ImageMode}};
use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use qrcode::{QrCode, EcLevel, Color, types::QrError};

use base64::{Engine, engine::general_purpose::STANDARD};

/// Rows sent per `GS v 0` command, to stay under the input buffer of small printers
const RASTER_BAND: u32 = 256;
/// White modules around a rendered qr code
const QR_QUIET_ZONE: u32 = 4;

/// Image adapted to the printer.
///
/// The EscposImage keeps the decoded picture as 8-bit grayscale, already narrowed to fit the printer, together with the dithering that was asked for. The black and white reduction happens when the printer bytes are built.
#[derive(Clone, Debug)]
pub struct EscposImage {
    /// Grayscale source, transparency flattened over white
    gray: GrayImage,
    dither: DitherMode
}

impl EscposImage {
    /// Creates a new EscposImage from the base64 text of a png.
    ///
    /// A `data:image/png;base64,` prefix is accepted. Images wider than `max_width` dots get scaled down keeping their aspect ratio, narrower ones are left as they are.
    pub fn new<A: AsRef<str>>(data: A, dither: DitherMode, max_width: u16) -> Result<EscposImage, Error> {
        let content = STANDARD.decode(strip_data_url(data.as_ref()).trim())?;
        let dynamic_image = image::load_from_memory_with_format(&content, ImageFormat::Png)?;
        Ok(EscposImage::from_dynamic_image(&dynamic_image, dither, max_width))
    }

    /// Creates a new EscposImage from a [DynamicImage](https://docs.rs/image/0.24/image/enum.DynamicImage.html)
    pub fn from_dynamic_image(dynamic_image: &DynamicImage, dither: DitherMode, max_width: u16) -> EscposImage {
        let luma_alpha = dynamic_image.to_luma_alpha8();
        let (im_width, im_height) = luma_alpha.dimensions();
        let mut gray = GrayImage::from_fn(im_width, im_height, |x, y| {
            let [luma, alpha] = luma_alpha.get_pixel(x, y).0;
            // Over a white background
            let (luma, alpha) = (luma as u32, alpha as u32);
            Luma([((luma * alpha + 255 * (255 - alpha)) / 255) as u8])
        });

        let max_width = max_width.max(1) as u32;
        if im_width > max_width {
            let sc_height = ((im_height as u64 * max_width as u64) / im_width as u64).max(1) as u32;
            gray = image::imageops::resize(&gray, max_width, sc_height, image::imageops::FilterType::Triangle);
        }

        EscposImage {
            gray,
            dither
        }
    }

    /// Width and height, in dots, once fitted to the printer
    pub fn dimensions(&self) -> (u32, u32) {
        self.gray.dimensions()
    }

    pub fn dither_mode(&self) -> DitherMode {
        self.dither
    }

    /// The monochrome version that goes to the print head
    pub fn bitmap(&self) -> Bitmap {
        match self.dither {
            DitherMode::None => dither::threshold(&self.gray),
            DitherMode::FloydSteinberg => dither::floyd_steinberg(&self.gray)
        }
    }

    /// Printer bytes for this image in the given mode
    pub fn feed(&self, image_mode: ImageMode) -> Vec<u8> {
        feed(&self.bitmap(), image_mode)
    }
}

/// Removes a `data:<mime>;base64,` prefix, if any
fn strip_data_url(data: &str) -> &str {
    if data.starts_with("data:") {
        if let Some(idx) = data.find(',') {
            return &data[idx + 1..];
        }
    }
    data
}

/// Builds the printer bytes for a monochrome bitmap.
///
/// ```rust
/// use escpos_receipt::{dither::Bitmap, escpos_image::feed, command::ImageMode};
///
/// let bitmap = Bitmap::new(16, 2);
/// let bytes = feed(&bitmap, ImageMode::Raster);
/// // GS v 0, 2 bytes per row, 2 rows, then the rows
/// assert_eq!(vec![0x1d, 0x76, 0x30, 0x00, 2, 0, 2, 0, 0, 0, 0, 0], bytes);
/// ```
pub fn feed(bitmap: &Bitmap, image_mode: ImageMode) -> Vec<u8> {
    let mut feed = Vec::new();
    let (width, height) = (bitmap.width(), bitmap.height());

    match image_mode {
        ImageMode::Raster => {
            let mut y = 0;
            while y < height {
                let band_height = RASTER_BAND.min(height - y);
                feed.extend_from_slice(&Command::RasterImage {
                    width_bytes: bitmap.width_bytes() as u16,
                    height: band_height as u16
                }.as_bytes());
                for row in y..(y + band_height) {
                    feed.extend_from_slice(bitmap.row(row));
                }
                y += band_height;
            }
        },
        ImageMode::TwentyfourDotDoubleDensity => {
            feed.extend_from_slice(&Command::NoLine.as_bytes());
            let mut y = 0;
            while y < height {
                // We first, declare a bitmap mode
                feed.extend_from_slice(&Command::Bitmap{image_mode}.as_bytes());
                // The formula on how many pixels we will do, is nL + nH * 256
                feed.push((width % 256) as u8); // nL
                feed.push((width / 256) as u8); // nH
                for x in 0..width {
                    // Three bytes per column, top dot in the most significant bit
                    for slice in 0..3 {
                        let mut column = 0u8;
                        for bit in 0..8 {
                            let row = y + slice * 8 + bit;
                            if row < height && bitmap.get(x, row) {
                                column |= 0x80 >> bit;
                            }
                        }
                        feed.push(column);
                    }
                }
                feed.push(b'\n'); // Line feed and print
                y += 24;
            }
            feed.extend_from_slice(&Command::ResetLine.as_bytes());
        }
    }

    feed
}

/// Draws a qr code as a bitmap, for printers without the native qr command.
///
/// Each module is `module_size` dots wide (1 to 16). The module size shrinks if the symbol would not fit in `max_width`.
pub fn qr_bitmap(content: &str, module_size: u8, max_width: u16) -> Result<Bitmap, Error> {
    let code = QrCode::with_error_correction_level(content.as_bytes(), EcLevel::M)?;
    let modules = code.width() as u32;
    let span = modules + 2 * QR_QUIET_ZONE;
    let module_size = (module_size.max(1).min(16) as u32).min(max_width as u32 / span);
    if module_size == 0 {
        return Err(Error::Qr(QrError::DataTooLong));
    }

    let side = span * module_size;
    let mut bitmap = Bitmap::new(side, side);
    for (idx, color) in code.to_colors().into_iter().enumerate() {
        if color != Color::Dark {
            continue;
        }
        let mx = idx as u32 % modules + QR_QUIET_ZONE;
        let my = idx as u32 / modules + QR_QUIET_ZONE;
        for dy in 0..module_size {
            for dx in 0..module_size {
                bitmap.set(mx * module_size + dx, my * module_size + dy, true);
            }
        }
    }
    Ok(bitmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, LumaA, Rgba, RgbaImage};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn png_base64(image: &DynamicImage) -> String {
        let mut content = Cursor::new(Vec::new());
        image.write_to(&mut content, ImageFormat::Png).unwrap();
        STANDARD.encode(content.into_inner())
    }

    #[test]
    fn test_decode_and_threshold() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_fn(8, 2, |x, _| {
            if x < 4 {Rgba([0, 0, 0, 255])} else {Rgba([255, 255, 255, 255])}
        }));
        let escpos_image = EscposImage::new(png_base64(&image), DitherMode::None, 384).unwrap();
        assert_eq!((8, 2), escpos_image.dimensions());
        assert_eq!(&[0xf0, 0xf0], escpos_image.bitmap().data());
    }

    #[test]
    fn test_data_url_prefix() {
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(3, 3, Luma([0])));
        let data = format!("data:image/png;base64,{}", png_base64(&image));
        assert!(EscposImage::new(data, DitherMode::FloydSteinberg, 384).is_ok());
    }

    #[test]
    fn test_transparent_is_white() {
        let image = DynamicImage::ImageLumaA8(ImageBuffer::from_pixel(8, 1, LumaA([0u8, 0u8])));
        let escpos_image = EscposImage::from_dynamic_image(&image, DitherMode::None, 384);
        assert_eq!(&[0x00], escpos_image.bitmap().data());
    }

    #[test]
    fn test_wide_images_shrink() {
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(768, 100, Luma([0])));
        let escpos_image = EscposImage::from_dynamic_image(&image, DitherMode::None, 384);
        assert_eq!((384, 50), escpos_image.dimensions());
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(100, 100, Luma([0])));
        assert_eq!((100, 100), EscposImage::from_dynamic_image(&image, DitherMode::None, 384).dimensions());
    }

    #[test]
    fn test_bad_payloads() {
        assert!(matches!(EscposImage::new("not base64!", DitherMode::None, 384), Err(Error::Base64(_))));
        let not_png = STANDARD.encode(b"GIF89a");
        assert!(matches!(EscposImage::new(not_png, DitherMode::None, 384), Err(Error::Image(_))));
    }

    #[test]
    fn test_raster_bands() {
        let bitmap = Bitmap::new(8, 300);
        let bytes = feed(&bitmap, ImageMode::Raster);
        assert_eq!(8 + 256 + 8 + 44, bytes.len());
        assert_eq!(&[0x1d, 0x76, 0x30, 0x00, 1, 0, 0, 1], &bytes[..8]);
        assert_eq!(&[0x1d, 0x76, 0x30, 0x00, 1, 0, 44, 0], &bytes[264..272]);
    }

    #[test]
    fn test_bit_image_columns() {
        let mut bitmap = Bitmap::new(2, 24);
        bitmap.set(0, 0, true);
        bitmap.set(1, 23, true);
        let bytes = feed(&bitmap, ImageMode::TwentyfourDotDoubleDensity);
        assert_eq!(vec![
            0x1b, 0x33, 0x00,
            0x1b, 0x2a, 0x21, 2, 0,
            0x80, 0x00, 0x00,
            0x00, 0x00, 0x01,
            b'\n',
            0x1b, 0x32
        ], bytes);
    }

    #[test]
    fn test_qr_bitmap() {
        let bitmap = qr_bitmap("https://example.com", 4, 384).unwrap();
        // Version 2 is 25 modules, plus the quiet zone
        assert_eq!((25 + 8) * 4, bitmap.width());
        assert!(!bitmap.get(0, 0));
        assert!(bitmap.get(4 * 4, 4 * 4));
        // Too large for the width, the modules shrink
        assert_eq!(33 * 2, qr_bitmap("https://example.com", 16, 70).unwrap().width());
    }
}
