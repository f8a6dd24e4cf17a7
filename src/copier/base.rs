use std::io;
use thiserror::Error;

//-------------------------------------

/// Blocks are read, compared and written in units of this size unless
/// the caller chooses otherwise.  The final block of a transfer may be
/// shorter.
pub const DEFAULT_BLOCK_SIZE: usize = 1024 * 1024; // bytes

//-------------------------------------

#[derive(Debug, Error)]
pub enum CopyError {
    #[error("failed to read from the source")]
    SourceRead(#[source] io::Error),

    #[error("failed to query the source position")]
    SourcePosition(#[source] io::Error),

    #[error("failed to seek on the destination")]
    DestSeek(#[source] io::Error),

    #[error("failed to read back the destination")]
    DestRead(#[source] io::Error),

    #[error("failed to write to the destination")]
    DestWrite(#[source] io::Error),

    #[error("failed to flush data to the destination")]
    Flush(#[source] io::Error),

    #[error("write of {requested} bytes at offset {offset} exceeds the volume limit of {limit} bytes")]
    LimitExceeded {
        offset: u64,
        requested: usize,
        limit: u64,
    },

    #[error("source ended after {processed} bytes, the volume expects {expected}")]
    SourceTooShort { processed: u64, expected: u64 },

    #[error("source holds more than the {expected} bytes declared for the volume")]
    SourceTooBig { expected: u64 },

    #[error("zero write when copying data")]
    ZeroWrite,

    #[error("short write when copying data ({written} of {requested} bytes)")]
    ShortWrite { written: usize, requested: usize },

    #[error("source returned {returned} bytes for a {requested} byte read; this is a bug in the source")]
    SourceOverrun { returned: usize, requested: usize },

    #[error("no input size given and the source size cannot be determined")]
    UnknownSize,
}

pub type Result<T> = std::result::Result<T, CopyError>;

//-------------------------------------

/// Something blocks can be pulled from: a file, a device, or an
/// unseekable stream such as stdin.
pub trait Source {
    /// Reads up to `buf.len()` bytes.  Returns 0 only at genuine end of
    /// data; short reads from the OS are accumulated by implementations,
    /// so anything less than a full buffer means the source is exhausted.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Logical offset of the next byte to be read.  Never decreases.
    fn position(&mut self) -> io::Result<u64>;
}

/// The destination of a copy.  Always addressable; the comparison read
/// and the subsequent write share one cursor, serialized with seek_to().
pub trait Sink {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;
    fn write(&mut self, buf: &[u8]) -> Result<usize>;
    fn seek_to(&mut self, offset: u64) -> Result<()>;
    fn position(&mut self) -> Result<u64>;

    /// Durability flush; forces written data down to stable storage.
    fn flush(&mut self) -> Result<()>;
}

//-------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub blocks_written: u64,
    pub blocks_omitted: u64,
    pub bytes_written: u64,
    pub bytes_total: u64,
}

impl CopyStats {
    pub fn reset(&mut self) {
        *self = CopyStats::default();
    }
}

//-------------------------------------

pub trait CopyProgress {
    fn update(&self, stats: &CopyStats);
}

#[derive(Default)]
pub struct IgnoreProgress {}

impl CopyProgress for IgnoreProgress {
    fn update(&self, _: &CopyStats) {}
}

//-------------------------------------
