use std::{fs::File, io::Write, path::Path, time::{Duration, Instant}};
use crate::Error;

/// Byte sink behind a [Printer](crate::Printer)
///
/// Implementations must write every byte they are given or fail. They are expected to give up after a while instead of blocking forever on a stalled printer.
pub trait Device: Send {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), Error>;
}

/// Collects everything in memory. Handy for previews and tests.
impl Device for Vec<u8> {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

impl<D: Device + ?Sized> Device for Box<D> {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), Error> {
        (**self).write_all(bytes)
    }
}

/// Character device exposed by a kernel printer driver (`usblp`, serial ports...)
///
/// On unix the file is opened non-blocking, and a write that makes no progress within the timeout fails with [TimedOut](std::io::ErrorKind::TimedOut).
#[derive(Debug)]
pub struct FileDevice {
    file: File,
    timeout: Duration
}

impl FileDevice {
    #[cfg(unix)]
    pub fn open<P: AsRef<Path>>(path: P, timeout: Duration) -> Result<FileDevice, Error> {
        use std::os::unix::fs::OpenOptionsExt;

        let file = std::fs::OpenOptions::new()
            .write(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(path)?;
        Ok(FileDevice{file, timeout})
    }

    #[cfg(not(unix))]
    pub fn open<P: AsRef<Path>>(path: P, timeout: Duration) -> Result<FileDevice, Error> {
        let file = std::fs::OpenOptions::new().write(true).open(path)?;
        Ok(FileDevice{file, timeout})
    }

    /// Waits until the device accepts more bytes, or the deadline passes
    #[cfg(unix)]
    fn wait_writable(&self, deadline: Instant) -> Result<(), Error> {
        use std::os::unix::io::AsRawFd;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining == Duration::from_millis(0) {
                return Err(std::io::Error::from(std::io::ErrorKind::TimedOut).into());
            }
            let mut pollfd = libc::pollfd {
                fd: self.file.as_raw_fd(),
                events: libc::POLLOUT,
                revents: 0
            };
            let millis = remaining.as_millis().max(1).min(libc::c_int::MAX as u128) as libc::c_int;
            let result = unsafe { libc::poll(&mut pollfd, 1, millis) };
            if result > 0 {
                return Ok(());
            }
            if result < 0 {
                let error = std::io::Error::last_os_error();
                if error.kind() != std::io::ErrorKind::Interrupted {
                    return Err(error.into());
                }
            }
        }
    }

    #[cfg(not(unix))]
    fn wait_writable(&self, _deadline: Instant) -> Result<(), Error> {
        Ok(())
    }
}

impl Device for FileDevice {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let mut written = 0;
        // The deadline moves forward every time the device takes some bytes
        let mut deadline = Instant::now() + self.timeout;
        while written < bytes.len() {
            match self.file.write(&bytes[written..]) {
                Ok(0) => return Err(Error::ShortWrite{written, expected: bytes.len()}),
                Ok(sent) => {
                    written += sent;
                    deadline = Instant::now() + self.timeout;
                },
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => self.wait_writable(deadline)?,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => (),
                Err(e) => return Err(e.into())
            }
        }
        self.file.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("escpos-receipt-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_file_device_writes_through() {
        let path = temp_path("out.bin");
        File::create(&path).unwrap();
        let mut device = FileDevice::open(&path, Duration::from_secs(2)).unwrap();
        device.write_all(&[0x1b, 0x40]).unwrap();
        assert_eq!(vec![0x1b, 0x40], std::fs::read(&path).unwrap());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(FileDevice::open("/nonexistent/escpos/lp0", Duration::from_secs(2)), Err(Error::Io(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_stalled_device_times_out() {
        use std::os::unix::fs::OpenOptionsExt;

        let path = temp_path("stalled.fifo");
        let _ = std::fs::remove_file(&path);
        let c_path = std::ffi::CString::new(path.to_str().unwrap()).unwrap();
        assert_eq!(0, unsafe { libc::mkfifo(c_path.as_ptr(), 0o600) });
        // A reader that never reads, so the pipe fills up
        let _reader = std::fs::OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(&path)
            .unwrap();

        let mut device = FileDevice::open(&path, Duration::from_millis(200)).unwrap();
        let started = Instant::now();
        match device.write_all(&vec![b'x'; 1 << 20]) {
            Err(Error::Io(e)) => assert_eq!(std::io::ErrorKind::TimedOut, e.kind()),
            other => panic!("unexpected {:?}", other)
        }
        assert!(started.elapsed() < Duration::from_secs(5));
        std::fs::remove_file(&path).unwrap();
    }
}
