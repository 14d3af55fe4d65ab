//! Reads with a deadline for streams that have no native read timeout.
//!
//! Synchronous Windows named pipes block in `ReadFile` forever, so reads
//! wait on `PeekNamedPipe` until data arrives or the deadline passes.

use std::io::{self, Read, Write};
use std::thread;
use std::time::{Duration, Instant};

const POLL_STEP: Duration = Duration::from_millis(10);

/// A stream that can report how many bytes are ready to read.
pub(crate) trait Available: Read + Write + Send {
    fn available(&self) -> io::Result<u32>;
}

pub(crate) struct BoundedRead<S> {
    inner: S,
    timeout: Duration,
}

impl<S: Available> BoundedRead<S> {
    pub(crate) fn new(inner: S, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

impl<S: Available> Read for BoundedRead<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let deadline = Instant::now() + self.timeout;
        while self.inner.available()? == 0 {
            if Instant::now() >= deadline {
                return Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    "no data from Discord before the read timeout",
                ));
            }
            thread::sleep(POLL_STEP);
        }
        self.inner.read(buf)
    }
}

impl<S: Available> Write for BoundedRead<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(windows)]
impl Available for std::fs::File {
    #[allow(unsafe_code, reason = "PeekNamedPipe on a handle owned by this File")]
    fn available(&self) -> io::Result<u32> {
        use std::os::windows::io::AsRawHandle;
        use windows_sys::Win32::System::Pipes::PeekNamedPipe;

        let mut available = 0u32;
        let ok = unsafe {
            PeekNamedPipe(
                self.as_raw_handle(),
                std::ptr::null_mut(),
                0,
                std::ptr::null_mut(),
                &mut available,
                std::ptr::null_mut(),
            )
        };
        if ok == 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(available)
    }
}
