use escpos_receipt::{Arbiter, Outcome, Printer, PrinterModel, PrinterProfile};

/// Usage: print_receipt <job.json> [/dev/usb/lp0]
fn main() {
    let mut args = std::env::args().skip(1);
    let job_path = match args.next() {
        Some(job_path) => job_path,
        None => panic!("Usage: print_receipt <job.json> [device file]")
    };
    let source = match std::fs::read_to_string(&job_path) {
        Ok(source) => source,
        Err(e) => panic!("Could not read {}: {}", job_path, e)
    };

    // Without a device file, we look for a TM-T20 on the usb bus
    let printer_profile = match args.next() {
        Some(device_path) => PrinterProfile::file_builder(device_path).build(),
        None => PrinterModel::TMT20.usb_profile()
    };
    let mut printer = match Printer::new(printer_profile) {
        Ok(maybe_printer) => match maybe_printer {
            Some(printer) => printer,
            None => panic!("No printer was found :(")
        },
        Err(e) => panic!("Error: {}", e)
    };
    if let Err(e) = printer.init() {
        panic!("Could not initialize the printer: {}", e);
    }

    let arbiter = Arbiter::new(printer);
    match arbiter.print_json(&source) {
        Outcome::Success => println!("Printed {}", job_path),
        Outcome::DecodeError(e) => println!("Invalid receipt: {}", e),
        Outcome::Busy => println!("Printer is busy"),
        Outcome::DeviceError(e) => println!("Error: {}", e)
    }
}
