pub mod base;
pub mod block_copier;
pub mod sink;
pub mod source;

pub use crate::copier::base::*;
pub use crate::copier::block_copier::BlockCopier;
pub use crate::copier::sink::{BoundedSink, FileSink};
pub use crate::copier::source::{FileSource, StreamSource};

#[cfg(test)]
pub mod test_utils;
