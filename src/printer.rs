pub use self::printer_profile::{PrinterProfile, PrinterConnectionData, PrinterProfileBuilder};
pub use self::printer_model::PrinterModel;
pub use self::device::{Device, FileDevice};
pub use self::usb_device::UsbDevice;

mod printer_profile;
mod printer_model;
mod device;
mod usb_device;

use crate::{
    Instruction,
    Error,
    command::{Command, CodeTable},
    engine
};

/// Main escpos-receipt structure
///
/// The printer represents the thermal printer connected to the computer: the profile that describes it, and the device bytes get written to.
/// ```rust,no_run
/// use escpos_receipt::{Printer, PrinterModel};
///
/// let printer = match Printer::new(PrinterModel::TMT20.usb_profile()) {
///     Ok(maybe_printer) => match maybe_printer {
///         Some(printer) => printer,
///         None => panic!("No printer was found :(")
///     },
///     Err(e) => panic!("Error: {}", e)
/// };
/// // Now we have a printer
/// ```
pub struct Printer {
    printer_profile: PrinterProfile,
    /// Actual connection to the printer
    device: Box<dyn Device>
}

impl Printer {
    /// Creates a new printer
    ///
    /// Connects to the printer described by the profile. For usb printers, `None` is returned if no device with the vendor and product id is connected.
    pub fn new(printer_profile: PrinterProfile) -> Result<Option<Printer>, Error> {
        let device: Box<dyn Device> = match &printer_profile.printer_connection_data {
            PrinterConnectionData::Usb{vendor_id, product_id, endpoint, timeout} => {
                match UsbDevice::open(*vendor_id, *product_id, *endpoint, *timeout)? {
                    Some(usb_device) => Box::new(usb_device),
                    None => return Ok(None)
                }
            },
            PrinterConnectionData::File{path, timeout} => Box::new(FileDevice::open(path, *timeout)?)
        };
        Ok(Some(Printer {
            printer_profile,
            device
        }))
    }

    /// Creates a printer on top of an already opened device
    ///
    /// The connection data of the profile is ignored.
    /// ```rust
    /// use escpos_receipt::{Printer, PrinterProfile};
    ///
    /// let mut printer = Printer::with_device(PrinterProfile::file_builder("unused").build(), Vec::new());
    /// printer.cut()?;
    /// # Ok::<(), escpos_receipt::Error>(())
    /// ```
    pub fn with_device<D: Device + 'static>(printer_profile: PrinterProfile, device: D) -> Printer {
        Printer {
            printer_profile,
            device: Box::new(device)
        }
    }

    pub fn profile(&self) -> &PrinterProfile {
        &self.printer_profile
    }

    /// Resets the printer, selects code page 437 and turns character smoothing on
    pub fn init(&mut self) -> Result<(), Error> {
        let mut feed = Command::Reset.as_bytes();
        feed.append(&mut Command::SelectCodeTable{code_table: CodeTable::Pc437}.as_bytes());
        feed.append(&mut Command::Smoothing{enabled: true}.as_bytes());
        self.raw(&feed)
    }

    /// Print a single instruction
    pub fn instruction(&mut self, instruction: &Instruction) -> Result<(), Error> {
        let content = engine::render(instruction, &self.printer_profile)?;
        self.raw(&content)
    }

    /// Cuts the paper, in case the instruction is supported by the printer
    pub fn cut(&mut self) -> Result<(), Error> {
        self.raw(&Command::Cut.as_bytes())
    }

    /// Sends raw information to the printer
    ///
    /// As simple as it sounds
    /// ```rust
    /// use escpos_receipt::{Printer, PrinterProfile};
    /// let mut printer = Printer::with_device(PrinterProfile::file_builder("unused").build(), Vec::new());
    /// printer.raw(&[0x01, 0x02])?;
    /// # Ok::<(), escpos_receipt::Error>(())
    /// ```
    pub fn raw<A: AsRef<[u8]>>(&mut self, bytes: A) -> Result<(), Error> {
        self.device.write_all(bytes.as_ref())
    }
}

impl std::fmt::Debug for Printer {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.debug_struct("Printer")
            .field("printer_profile", &self.printer_profile)
            .finish()
    }
}
