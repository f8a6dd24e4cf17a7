use std::fs::{File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::Path;

use crate::copier::base::{CopyError, Result, Sink};
use crate::copier::source::read_full;

#[cfg(test)]
mod tests;

//-------------------------------------

/// A plain sink over a single file or device handle.  Reads, writes and
/// seeks share the one cursor.
pub struct FileSink {
    file: File,
}

impl FileSink {
    pub fn new(file: File) -> Self {
        Self { file }
    }

    /// Opens (creating if necessary) for read + write; the copy engine
    /// needs to read existing content back when comparing blocks.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;
        Ok(Self::new(file))
    }
}

impl Sink for FileSink {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        read_full(&mut self.file, buf).map_err(CopyError::DestRead)
    }

    // A single write attempt, retrying on interrupt.  Short writes are
    // reported to the caller rather than completed here; the copy engine
    // treats them as fatal.
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        loop {
            match self.file.write(buf) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(CopyError::DestWrite(e)),
            }
        }
    }

    fn seek_to(&mut self, offset: u64) -> Result<()> {
        self.file
            .seek(SeekFrom::Start(offset))
            .map_err(CopyError::DestSeek)?;
        Ok(())
    }

    fn position(&mut self) -> Result<u64> {
        self.file.stream_position().map_err(CopyError::DestSeek)
    }

    fn flush(&mut self) -> Result<()> {
        self.file.sync_all().map_err(CopyError::Flush)
    }
}

//-------------------------------------

/// Decorates a sink with an optional byte limit and periodic durability
/// flushes.  Used for flash volumes, where writing past the declared
/// size must never happen and long stretches of unflushed data are
/// dangerous across a power cut.
pub struct BoundedSink<S> {
    inner: S,
    limit: Option<u64>,
    flush_interval: u64,
    unflushed: u64,
    flush_failures: u64,
    last_flush_error: Option<CopyError>,
}

impl<S: Sink> BoundedSink<S> {
    /// A `flush_interval` of 0 disables periodic flushing.
    pub fn new(inner: S, limit: Option<u64>, flush_interval: u64) -> Self {
        Self {
            inner,
            limit,
            flush_interval,
            unflushed: 0,
            flush_failures: 0,
            last_flush_error: None,
        }
    }

    /// Number of periodic flushes that failed.  Failed flushes don't
    /// fail the writes that triggered them; the caller is expected to
    /// check this and warn.
    pub fn flush_failures(&self) -> u64 {
        self.flush_failures
    }

    pub fn last_flush_error(&self) -> Option<&CopyError> {
        self.last_flush_error.as_ref()
    }

    pub fn unflushed(&self) -> u64 {
        self.unflushed
    }
}

impl<S: Sink> Sink for BoundedSink<S> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.inner.read(buf)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        let offset = self.inner.position()?;
        if let Some(limit) = self.limit {
            if offset + buf.len() as u64 > limit {
                // Rejected before anything reaches the medium.
                return Err(CopyError::LimitExceeded {
                    offset,
                    requested: buf.len(),
                    limit,
                });
            }
        }

        let written = self.inner.write(buf)?;

        if self.flush_interval != 0 {
            self.unflushed += written as u64;
            if self.unflushed >= self.flush_interval {
                if let Err(e) = self.inner.flush() {
                    self.flush_failures += 1;
                    self.last_flush_error = Some(e);
                }
                self.unflushed = 0;
            }
        }

        Ok(written)
    }

    fn seek_to(&mut self, offset: u64) -> Result<()> {
        self.inner.seek_to(offset)
    }

    fn position(&mut self) -> Result<u64> {
        self.inner.position()
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        self.unflushed = 0;
        Ok(())
    }
}

//-------------------------------------
