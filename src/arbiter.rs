//! Exclusive access to a single printer
//!
//! Only one job may talk to the printer at a time. A job arriving while another one prints is turned away right away with [Outcome::Busy], it never waits in line.

extern crate log;

use log::{error, info, warn};
use std::sync::{Mutex, MutexGuard, TryLockError};
use crate::{DecodeError, Error, Job, Printer, engine};

/// What happened to a submitted job
#[derive(Debug)]
pub enum Outcome {
    /// Every instruction was printed and the paper was cut
    Success,
    /// The job was rejected before touching the printer. Fix the request before sending it again
    DecodeError(DecodeError),
    /// Another job is printing. Nothing changed, try again later
    Busy,
    /// Rendering or writing failed. Nothing is retried
    DeviceError(Error)
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        match self {
            Outcome::Success => true,
            _ => false
        }
    }
}

/// The printer is in use by another job
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Busy;

impl std::fmt::Display for Busy {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(formatter, "Another print job is currently in progress")
    }
}

impl std::error::Error for Busy{}

/// Owner of the printer, handing it to one job at a time
///
/// Share it between threads with an `Arc`.
/// ```rust
/// use escpos_receipt::{Arbiter, Outcome, Printer, PrinterProfile};
///
/// let printer = Printer::with_device(PrinterProfile::file_builder("unused").build(), Vec::new());
/// let arbiter = Arbiter::new(printer);
///
/// let guard = arbiter.try_acquire().unwrap();
/// // While the guard lives, everybody else is turned away
/// assert!(matches!(arbiter.print_json(r#"{"receipt": []}"#), Outcome::Busy));
/// drop(guard);
/// assert!(arbiter.print_json(r#"{"receipt": []}"#).is_success());
/// ```
#[derive(Debug)]
pub struct Arbiter {
    printer: Mutex<Printer>
}

/// Exclusive access to the printer, released when dropped
pub struct PrinterGuard<'a> {
    guard: MutexGuard<'a, Printer>
}

impl<'a> std::fmt::Debug for PrinterGuard<'a> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.debug_tuple("PrinterGuard").field(&*self.guard).finish()
    }
}

impl<'a> std::ops::Deref for PrinterGuard<'a> {
    type Target = Printer;

    fn deref(&self) -> &Printer {
        &self.guard
    }
}

impl<'a> std::ops::DerefMut for PrinterGuard<'a> {
    fn deref_mut(&mut self) -> &mut Printer {
        &mut self.guard
    }
}

impl Arbiter {
    pub fn new(printer: Printer) -> Arbiter {
        Arbiter {
            printer: Mutex::new(printer)
        }
    }

    /// Takes the printer if nobody else has it. Never blocks.
    ///
    /// A job that panicked while holding the printer does not lock it forever, the next caller gets it.
    pub fn try_acquire(&self) -> Result<PrinterGuard<'_>, Busy> {
        match self.printer.try_lock() {
            Ok(guard) => Ok(PrinterGuard{guard}),
            Err(TryLockError::Poisoned(poisoned)) => {
                warn!("A previous job panicked while printing, taking the printer anyway");
                Ok(PrinterGuard{guard: poisoned.into_inner()})
            },
            Err(TryLockError::WouldBlock) => Err(Busy)
        }
    }

    /// Prints an already decoded job
    pub fn submit(&self, job: &Job) -> Outcome {
        let mut printer = match self.try_acquire() {
            Ok(printer) => printer,
            Err(Busy) => {
                warn!("Printer is busy, rejecting job with {} items", job.len());
                return Outcome::Busy;
            }
        };
        match engine::execute(&mut printer, job) {
            Ok(()) => Outcome::Success,
            Err(e) => {
                error!("Print failed: {}", e);
                Outcome::DeviceError(e)
            }
        }
    }

    /// Decodes a json job and prints it
    ///
    /// Decoding happens first, so a malformed job is reported as such even while the printer is busy.
    pub fn print_json<A: AsRef<str>>(&self, source: A) -> Outcome {
        self.decoded(Job::from_json(source))
    }

    /// Same as [print_json](Arbiter::print_json), from an already parsed value
    pub fn print_value(&self, value: &serde_json::Value) -> Outcome {
        self.decoded(Job::from_value(value))
    }

    fn decoded(&self, job: Result<Job, DecodeError>) -> Outcome {
        match job {
            Ok(job) => {
                info!("Received job with {} items", job.len());
                self.submit(&job)
            },
            Err(e) => {
                warn!("Rejecting job: {}", e);
                Outcome::DecodeError(e)
            }
        }
    }

    /// Gives the printer back
    pub fn into_inner(self) -> Printer {
        match self.printer.into_inner() {
            Ok(printer) => printer,
            Err(poisoned) => poisoned.into_inner()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PrinterProfile;

    fn arbiter() -> Arbiter {
        Arbiter::new(Printer::with_device(PrinterProfile::file_builder("unused").build(), Vec::new()))
    }

    #[test]
    fn test_busy_while_held() {
        let arbiter = arbiter();
        let guard = arbiter.try_acquire().unwrap();
        assert!(matches!(arbiter.try_acquire(), Err(Busy)));
        assert!(format!("{:?}", guard).starts_with("PrinterGuard"));
        drop(guard);
        assert!(arbiter.try_acquire().is_ok());
    }

    #[test]
    fn test_decode_error_comes_first() {
        let arbiter = arbiter();
        let _guard = arbiter.try_acquire().unwrap();
        match arbiter.print_json(r#"{"receipt": [{"type": "poem"}]}"#) {
            Outcome::DecodeError(e) => assert_eq!(Some(0), e.index()),
            other => panic!("unexpected {:?}", other)
        }
    }

    #[test]
    fn test_released_after_panic() {
        let arbiter = arbiter();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = arbiter.try_acquire().unwrap();
            panic!("paper jam");
        }));
        assert!(result.is_err());
        assert!(arbiter.try_acquire().is_ok());
        assert!(arbiter.print_json(r#"{"receipt": []}"#).is_success());
    }
}
