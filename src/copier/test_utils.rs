use std::io;

use crate::copier::base::{CopyError, Result, Sink, Source};

//------------------------------------------

/// An in-memory sink standing in for a file or device.  Supports fault
/// injection for the write and flush paths.
pub struct MemSink {
    pub data: Vec<u8>,
    pos: u64,
    pub nr_writes: u64,
    pub nr_flushes: u64,

    /// Cap every write at this many bytes, simulating a device that
    /// takes partial writes.  Some(0) simulates a dead device.
    pub short_write: Option<usize>,
    pub fail_flush: bool,
}

impl MemSink {
    pub fn new() -> Self {
        Self::with_data(Vec::new())
    }

    pub fn with_data(data: Vec<u8>) -> Self {
        Self {
            data,
            pos: 0,
            nr_writes: 0,
            nr_flushes: 0,
            short_write: None,
            fail_flush: false,
        }
    }
}

impl Sink for MemSink {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let pos = self.pos as usize;
        let n = std::cmp::min(buf.len(), self.data.len().saturating_sub(pos));
        buf[..n].copy_from_slice(&self.data[pos..pos + n]);
        self.pos += n as u64;
        Ok(n)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.nr_writes += 1;
        let n = match self.short_write {
            Some(cap) => std::cmp::min(cap, buf.len()),
            None => buf.len(),
        };

        let pos = self.pos as usize;
        if self.data.len() < pos + n {
            self.data.resize(pos + n, 0);
        }
        self.data[pos..pos + n].copy_from_slice(&buf[..n]);
        self.pos += n as u64;
        Ok(n)
    }

    fn seek_to(&mut self, offset: u64) -> Result<()> {
        self.pos = offset;
        Ok(())
    }

    fn position(&mut self) -> Result<u64> {
        Ok(self.pos)
    }

    fn flush(&mut self) -> Result<()> {
        if self.fail_flush {
            return Err(CopyError::Flush(io::Error::other("injected flush failure")));
        }
        self.nr_flushes += 1;
        Ok(())
    }
}

//------------------------------------------

/// A source that hands out data in fixed-size chunks, so positions need
/// not land on block boundaries.
pub struct ChunkedSource {
    data: Vec<u8>,
    pos: usize,
    chunk: usize,
}

impl ChunkedSource {
    pub fn new(data: Vec<u8>, chunk: usize) -> Self {
        assert!(chunk > 0);
        Self {
            data,
            pos: 0,
            chunk,
        }
    }
}

impl Source for ChunkedSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self
            .chunk
            .min(buf.len())
            .min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }

    fn position(&mut self) -> io::Result<u64> {
        Ok(self.pos as u64)
    }
}

//------------------------------------------
