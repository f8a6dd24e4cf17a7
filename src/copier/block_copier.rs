use crate::copier::base::*;


//-------------------------------------

/// Streams fixed-size blocks from a source to a sink, optionally
/// skipping the write when the destination already holds identical
/// content.  Flash cells have a finite number of erase cycles, so
/// rewriting a block that hasn't changed is pure wear.
///
/// The statistics survive a failed copy, so callers can report how far
/// the transfer got.
pub struct BlockCopier {
    block_size: usize,
    volume_size: Option<u64>,
    optimized: bool,
    stats: CopyStats,
}

impl BlockCopier {
    pub fn new(block_size: usize) -> Self {
        assert!(block_size > 0);
        Self {
            block_size,
            volume_size: None,
            optimized: false,
            stats: CopyStats::default(),
        }
    }

    /// Exact number of bytes the destination must receive.  With a
    /// volume size set, a source that ends early or holds extra data
    /// fails the copy; this is not a truncation bound.
    pub fn volume_size(mut self, size: Option<u64>) -> Self {
        self.volume_size = size;
        self
    }

    pub fn optimized(mut self, optimized: bool) -> Self {
        self.optimized = optimized;
        self
    }

    pub fn stats(&self) -> &CopyStats {
        &self.stats
    }

    /// Runs a single transfer.  The source is expected to be positioned
    /// at its start; the destination receives the data at the same
    /// offsets the source reports.
    pub fn copy(
        &mut self,
        src: &mut dyn Source,
        dest: &mut dyn Sink,
        progress: &dyn CopyProgress,
    ) -> Result<()> {
        self.stats.reset();

        let mut data = vec![0u8; self.block_size];
        let mut existing = vec![0u8; self.block_size];

        loop {
            let position = src.position().map_err(CopyError::SourcePosition)?;

            let n = src.read(&mut data).map_err(CopyError::SourceRead)?;
            if n == 0 {
                if let Some(size) = self.volume_size {
                    if position < size {
                        return Err(CopyError::SourceTooShort {
                            processed: position,
                            expected: size,
                        });
                    }
                }
                return Ok(());
            }
            if n > data.len() {
                return Err(CopyError::SourceOverrun {
                    returned: n,
                    requested: data.len(),
                });
            }
            if let Some(size) = self.volume_size {
                // Checked before the write, so nothing past the declared
                // size ever reaches the destination.
                if position + n as u64 > size {
                    return Err(CopyError::SourceTooBig { expected: size });
                }
            }

            let block = &data[..n];
            dest.seek_to(position)?;

            if self.optimized {
                if Self::matches_destination(dest, block, &mut existing[..n]) {
                    self.stats.blocks_omitted += 1;
                    self.stats.bytes_total += n as u64;
                    progress.update(&self.stats);
                    continue;
                }

                // The comparison read advanced the shared cursor.
                dest.seek_to(position)?;
            }

            let written = dest.write(block)?;
            if written == 0 {
                return Err(CopyError::ZeroWrite);
            }
            if written < n {
                return Err(CopyError::ShortWrite {
                    written,
                    requested: n,
                });
            }

            self.stats.blocks_written += 1;
            self.stats.bytes_written += written as u64;
            self.stats.bytes_total += n as u64;
            progress.update(&self.stats);
        }
    }

    // A failed or short comparison read just means the block has to be
    // written; it happens on every copy onto a shorter or empty
    // destination.
    fn matches_destination(dest: &mut dyn Sink, block: &[u8], existing: &mut [u8]) -> bool {
        match dest.read(existing) {
            Ok(n) if n == block.len() => existing[..n] == *block,
            _ => false,
        }
    }
}

//-------------------------------------
