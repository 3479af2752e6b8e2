use std::path::PathBuf;
use std::time::Duration;
use crate::{
    Error,
    command::ImageMode
};

/// Write timeout used when none is given
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// How the bytes reach the printer
///
/// Prefer the [usb_builder](PrinterProfile::usb_builder) and [file_builder](PrinterProfile::file_builder) constructors over building this by hand.
#[derive(Clone, Debug)]
pub enum PrinterConnectionData {
    /// Bulk transfers over usb
    Usb {
        vendor_id: u16,
        product_id: u16,
        /// Bulk out endpoint, detected when not set
        endpoint: Option<u8>,
        /// How long a single bulk write may take
        timeout: Duration
    },
    /// Character device exposed by the kernel driver, like `/dev/usb/lp0`
    File {
        path: PathBuf,
        /// How long a write may go without progress
        timeout: Duration
    }
}

/// Everything the crate needs to know about a printer
///
/// Only the connection is mandatory. The width, in dots, is used to fit images, and defaults to 384 (58mm paper).
#[derive(Clone, Debug)]
pub struct PrinterProfile {
    pub (crate) printer_connection_data: PrinterConnectionData,
    /// Printable width in dots
    pub (crate) width: u16,
    /// How images get sent
    pub (crate) image_mode: ImageMode,
    /// If the printer understands `GS ( k`. Otherwise, qr codes are drawn and sent as images
    pub (crate) native_qr: bool
}

impl PrinterProfile {
    /// Starts a [PrinterProfileBuilder](crate::PrinterProfileBuilder) for a usb printer, same as [new_usb](crate::PrinterProfileBuilder::new_usb).
    ///
    /// ```rust
    /// use escpos_receipt::PrinterProfile;
    ///
    /// let printer_profile = PrinterProfile::usb_builder(0x0416, 0x5011).build();
    /// assert_eq!(384, printer_profile.width());
    /// ```
    pub fn usb_builder(vendor_id: u16, product_id: u16) -> PrinterProfileBuilder {
        PrinterProfileBuilder::new_usb(vendor_id, product_id)
    }

    /// Starts a [PrinterProfileBuilder](crate::PrinterProfileBuilder) that writes to a device file
    ///
    /// ```rust
    /// use escpos_receipt::PrinterProfile;
    /// let printer_profile = PrinterProfile::file_builder("/dev/usb/lp0").build();
    /// ```
    pub fn file_builder<P: Into<PathBuf>>(path: P) -> PrinterProfileBuilder {
        PrinterProfileBuilder::new_file(path)
    }

    pub fn connection_data(&self) -> &PrinterConnectionData {
        &self.printer_connection_data
    }

    /// Printable width, in dots
    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn image_mode(&self) -> ImageMode {
        self.image_mode
    }

    pub fn native_qr(&self) -> bool {
        self.native_qr
    }
}

/// Builder for the [PrinterProfile](crate::PrinterProfile) structure
pub struct PrinterProfileBuilder {
    connection: PrinterConnectionData,
    width: u16,
    image_mode: ImageMode,
    native_qr: bool
}

impl PrinterProfileBuilder {
    fn with_connection(connection: PrinterConnectionData) -> PrinterProfileBuilder {
        PrinterProfileBuilder {
            connection,
            width: 384,
            image_mode: ImageMode::Raster,
            native_qr: true
        }
    }

    /// Starts a profile for a usb printer
    ///
    /// Unless [with_endpoint](PrinterProfileBuilder::with_endpoint) is used, the [Printer](crate::Printer) looks for a bulk out endpoint when connecting.
    ///
    /// Defaults: 384 dots, raster images, native qr codes, 2 seconds per bulk write.
    pub fn new_usb(vendor_id: u16, product_id: u16) -> PrinterProfileBuilder {
        PrinterProfileBuilder::with_connection(PrinterConnectionData::Usb {
            vendor_id,
            product_id,
            endpoint: None,
            timeout: DEFAULT_TIMEOUT
        })
    }

    /// Starts a profile for a printer reached through a device file
    ///
    /// Defaults are the same as for usb, including the 2 second write timeout.
    pub fn new_file<P: Into<PathBuf>>(path: P) -> PrinterProfileBuilder {
        PrinterProfileBuilder::with_connection(PrinterConnectionData::File {
            path: path.into(),
            timeout: DEFAULT_TIMEOUT
        })
    }

    /// Fixes the usb endpoint bytes are written to.
    ///
    /// ```rust
    /// use escpos_receipt::PrinterProfileBuilder;
    ///
    /// let printer_profile = PrinterProfileBuilder::new_usb(0x0416, 0x5011)
    ///     .with_endpoint(0x02).unwrap()
    ///     .build();
    /// assert!(PrinterProfileBuilder::new_file("/dev/usb/lp0").with_endpoint(0x02).is_err());
    /// ```
    pub fn with_endpoint(mut self, endpoint: u8) -> Result<PrinterProfileBuilder, Error> {
        match &mut self.connection {
            PrinterConnectionData::Usb{endpoint: usb_endpoint, ..} => {
                *usb_endpoint = Some(endpoint);
                Ok(self)
            },
            PrinterConnectionData::File{..} => Err(Error::UnsupportedForPrinterConnection)
        }
    }

    /// Printable width in dots, used to shrink images. 58mm printers have 384, 80mm ones 576.
    pub fn with_width(mut self, width: u16) -> PrinterProfileBuilder {
        self.width = width;
        self
    }

    /// Picks how images are sent. Defaults to [ImageMode::Raster](crate::command::ImageMode::Raster)
    pub fn with_image_mode(mut self, image_mode: ImageMode) -> PrinterProfileBuilder {
        self.image_mode = image_mode;
        self
    }

    /// Indicates if the printer understands the native qr command. When disabled, qr codes are drawn and printed as images.
    pub fn with_native_qr(mut self, native_qr: bool) -> PrinterProfileBuilder {
        self.native_qr = native_qr;
        self
    }

    /// Sets how long a write may go without the printer taking any bytes
    ///
    /// A printer out of paper stops accepting data. Past the timeout, the write fails instead of hanging the job.
    /// ```rust
    /// use escpos_receipt::PrinterProfileBuilder;
    ///
    /// let printer_profile = PrinterProfileBuilder::new_file("/dev/usb/lp0")
    ///     .with_timeout(std::time::Duration::from_secs(5))
    ///     .build();
    /// ```
    pub fn with_timeout(mut self, timeout: Duration) -> PrinterProfileBuilder {
        match &mut self.connection {
            PrinterConnectionData::Usb{timeout: write_timeout, ..} |
            PrinterConnectionData::File{timeout: write_timeout, ..} => *write_timeout = timeout
        }
        self
    }

    pub fn build(self) -> PrinterProfile {
        PrinterProfile {
            printer_connection_data: self.connection,
            width: self.width,
            image_mode: self.image_mode,
            native_qr: self.native_qr
        }
    }
}
