//! Nonblocking hidraw reads driven by the tokio reactor.
//!
//! A pending read is only a readiness registration, so cancelling
//! [`crate::session::Session::run`] (Ctrl-C) returns at once even when an idle
//! pad sends nothing.

use std::fs::{File, OpenOptions};
use std::io::{self, Read};
use std::os::fd::AsRawFd;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;
use std::pin::Pin;
use std::task::{Context, Poll, ready};
use tokio::io::unix::AsyncFd;
use tokio::io::{AsyncRead, ReadBuf};

pub struct HidrawReader<T: AsRawFd = File> {
    fd: AsyncFd<T>,
}

impl HidrawReader<File> {
    /// Opens a hidraw node with `O_NONBLOCK`.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(path)?;
        Self::new(file)
    }
}

impl<T: AsRawFd> HidrawReader<T> {
    /// `inner` must already be in nonblocking mode.
    pub fn new(inner: T) -> io::Result<Self> {
        Ok(Self {
            fd: AsyncFd::new(inner)?,
        })
    }
}

impl<T> AsyncRead for HidrawReader<T>
where
    T: AsRawFd + Unpin,
    for<'a> &'a T: Read,
{
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        loop {
            let mut guard = ready!(self.fd.poll_read_ready(cx))?;
            let unfilled = buf.initialize_unfilled();
            match guard.try_io(|inner| {
                let mut source: &T = inner.get_ref();
                source.read(unfilled)
            }) {
                Ok(Ok(len)) => {
                    buf.advance(len);
                    return Poll::Ready(Ok(()));
                }
                Ok(Err(err)) => return Poll::Ready(Err(err)),
                Err(_would_block) => continue,
            }
        }
    }
}
