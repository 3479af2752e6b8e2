//! Library for printing json receipts on esc/pos thermal printers
//!
//! A receipt arrives as json, is decoded into a [Job](crate::Job), and is printed on the single printer owned by an [Arbiter](crate::Arbiter). Only one job prints at a time, the others are turned away as [Busy](crate::Outcome::Busy).
//!
//! ```rust,no_run
//! use escpos_receipt::{Arbiter, Outcome, Printer, PrinterModel};
//!
//! let mut printer = match Printer::new(PrinterModel::TMT20.usb_profile()) {
//!     Ok(maybe_printer) => match maybe_printer {
//!         Some(printer) => printer,
//!         None => panic!("No printer was found :(")
//!     },
//!     Err(e) => panic!("Error: {}", e)
//! };
//! printer.init().unwrap();
//! let arbiter = Arbiter::new(printer);
//! // We print simple text
//! match arbiter.print_json(r#"{"receipt": [
//!     {"type": "line", "content": "Hello, world!", "font-size": 1, "font": "A", "alignment": "center", "underline": false}
//! ]}"#) {
//!     Outcome::Success => (),
//!     other => println!("Could not print: {:?}", other)
//! }
//! ```
//!
//! ## Printer Details
//!
//! In order to print, some data about the printer must be known. The [PrinterProfile](crate::PrinterProfile) structure fulfills this purpose.
//!
//! Usb printers are found by their vendor and product id. If you are running linux, one way to get these values is by executing the `lsusb` command. Printers that already have a kernel driver (like `/dev/usb/lp0`) can be opened as a file instead.
//!
//! Printing to a `Vec<u8>` is also possible, which is useful to look at the bytes a receipt produces.
//!
//! ```rust
//! use escpos_receipt::{engine, Job, Printer, PrinterProfile};
//!
//! let job = Job::from_json(r#"{"receipt": [{"type": "feed", "lines": 2}]}"#).unwrap();
//! let mut printer = Printer::with_device(PrinterProfile::file_builder("unused").build(), Vec::new());
//! engine::execute(&mut printer, &job).unwrap();
//! ```
//!
//! ### Instructions
//!
//! Each element of the `receipt` list is one [Instruction](crate::Instruction): a line or a text fragment, a paper feed, a barcode, a qr code or a picture. Every instruction carries all of its formatting, nothing carries over to the next one.
//!
//! Instructions implement Serialize from [serde](https://docs.rs/serde), and the serialized form decodes back to the same instruction.

pub use printer::{Printer, PrinterProfile, PrinterProfileBuilder, PrinterModel, PrinterConnectionData, Device, FileDevice, UsbDevice};
pub use instruction::{Instruction, Job, Justification, EscposImage, Bitmap, DitherMode, coerce, decode, dither, escpos_image};
pub use error::{Error, DecodeError};
pub use arbiter::{Arbiter, Outcome, Busy, PrinterGuard};

/// Contains raw esc/pos commands
pub mod command;
/// Turns jobs into printer bytes
pub mod engine;

mod printer;
mod instruction;
mod error;
mod arbiter;
