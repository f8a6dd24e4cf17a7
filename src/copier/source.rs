use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek};
use std::path::Path;

use crate::copier::base::Source;


//-------------------------------------

// Reads until the buffer is full or the reader is exhausted, retrying
// on interrupt.  The copy engine relies on short reads meaning
// end-of-data, which a raw read() on a pipe doesn't guarantee.
pub(crate) fn read_full<R: Read>(r: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

//-------------------------------------

/// A seekable source; the position is the underlying file offset.
pub struct FileSource {
    file: File,
}

impl FileSource {
    pub fn new(file: File) -> Self {
        Self { file }
    }

    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = OpenOptions::new().read(true).open(path)?;
        Ok(Self::new(file))
    }
}

impl Source for FileSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        read_full(&mut self.file, buf)
    }

    fn position(&mut self) -> io::Result<u64> {
        self.file.stream_position()
    }
}

//-------------------------------------

/// A source for continuous streams (pipes, stdin).  The underlying
/// medium has no addressable offset, so the position is a running count
/// of the bytes consumed so far.
pub struct StreamSource<R> {
    inner: R,
    consumed: u64,
}

impl<R: Read> StreamSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, consumed: 0 }
    }
}

impl<R: Read> Source for StreamSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = read_full(&mut self.inner, buf)?;
        self.consumed += n as u64;
        Ok(n)
    }

    fn position(&mut self) -> io::Result<u64> {
        Ok(self.consumed)
    }
}

//-------------------------------------
