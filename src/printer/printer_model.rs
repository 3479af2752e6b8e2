use super::{PrinterProfile, PrinterConnectionData};
use crate::command::ImageMode;

/// Printer presets
///
/// Each model knows its usb ids, its bulk endpoint and what it can print.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrinterModel {
    /// ZKTeco 58mm mini printer. No native qr codes
    ZKTeco,
    /// Epson TM-T20, 80mm
    TMT20
}

impl PrinterModel {
    /// Usb vendor and product id
    pub fn vp_id(&self) -> (u16, u16) {
        match self {
            PrinterModel::ZKTeco => (0x6868, 0x0200),
            PrinterModel::TMT20 => (0x04b8, 0x0e15)
        }
    }

    /// Ready to use profile for the model
    ///
    /// ```rust
    /// use escpos_receipt::PrinterModel;
    /// assert_eq!(576, PrinterModel::TMT20.usb_profile().width());
    /// assert!(!PrinterModel::ZKTeco.usb_profile().native_qr());
    /// ```
    pub fn usb_profile(&self) -> PrinterProfile {
        let (vendor_id, product_id) = self.vp_id();
        let (endpoint, width, image_mode, native_qr) = match self {
            PrinterModel::ZKTeco => (0x02, 384, ImageMode::TwentyfourDotDoubleDensity, false),
            PrinterModel::TMT20 => (0x01, 576, ImageMode::Raster, true)
        };
        PrinterProfile {
            printer_connection_data: PrinterConnectionData::Usb {
                vendor_id,
                product_id,
                endpoint: Some(endpoint),
                timeout: std::time::Duration::from_secs(2)
            },
            width,
            image_mode,
            native_qr
        }
    }
}
