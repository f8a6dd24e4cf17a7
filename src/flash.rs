use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;

use crate::copier::{
    BlockCopier, BoundedSink, CopyError, CopyProgress, CopyStats, FileSink, FileSource, Sink,
    Source, StreamSource, DEFAULT_BLOCK_SIZE,
};
use crate::file_utils;
use crate::report::Report;
use crate::ubi;

//---------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Stdin,
    Path(PathBuf),
}

pub struct FlashCopyOptions {
    pub input: Input,
    pub output: PathBuf,

    /// Bytes to copy.  Needed when the input size can't be discovered
    /// (stdin); when the destination is a UBI volume this is the size
    /// declared to it.
    pub input_size: Option<u64>,

    /// Flush to stable storage each time this many bytes have been
    /// written; 0 disables periodic flushing.
    pub fsync_interval: u64,

    /// Skip writing blocks whose destination content already matches.
    /// Forced off for UBI volumes.
    pub optimized: bool,

    pub ubi_major: u32,
    pub report: Arc<Report>,
}

//---------------------------------

struct ReportProgress {
    report: Arc<Report>,
    total_bytes: u64,
}

impl CopyProgress for ReportProgress {
    fn update(&self, stats: &CopyStats) {
        if self.total_bytes > 0 {
            let percent = (stats.bytes_total * 100 / self.total_bytes).min(100);
            self.report.progress(percent as u8);
        }
    }
}

//---------------------------------

// The number of bytes the destination will receive, decided before any
// data moves.
fn resolve_size(opts: &FlashCopyOptions) -> Result<u64> {
    if let Some(size) = opts.input_size.filter(|&size| size != 0) {
        return Ok(size);
    }

    match &opts.input {
        Input::Path(path) => {
            let size = file_utils::file_size(path)
                .with_context(|| format!("failed to get the size of '{}'", path.display()))?;
            if size == 0 {
                return Err(CopyError::UnknownSize.into());
            }
            Ok(size)
        }
        Input::Stdin => Err(CopyError::UnknownSize.into()),
    }
}

fn mk_source(input: &Input) -> Result<Box<dyn Source>> {
    match input {
        Input::Stdin => Ok(Box::new(StreamSource::new(std::io::stdin()))),
        Input::Path(path) => {
            let src = FileSource::open(path)
                .with_context(|| format!("failed to open '{}' for reading", path.display()))?;
            Ok(Box::new(src))
        }
    }
}

fn print_stats(report: &Report, stats: &CopyStats) {
    report.to_stdout("================ STATISTICS ================");
    report.to_stdout(&format!("Blocks written: {:>12}", stats.blocks_written));
    report.to_stdout(&format!("Blocks omitted: {:>12}", stats.blocks_omitted));
    report.to_stdout(&format!("Bytes written:  {:>12}", stats.bytes_written));
    report.to_stdout(&format!("Total bytes:    {:>12}", stats.bytes_total));
    report.to_stdout("============================================");
}

//---------------------------------

pub fn copy(opts: FlashCopyOptions) -> Result<()> {
    let report = opts.report.clone();

    let mut source = mk_source(&opts.input)?;
    let volume_size = resolve_size(&opts)?;

    let is_ubi = ubi::is_ubi_volume(&opts.output, opts.ubi_major)
        .with_context(|| format!("failed to examine '{}'", opts.output.display()))?;

    let dest = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .open(&opts.output)
        .with_context(|| format!("failed to open '{}' for writing", opts.output.display()))?;

    let mut optimized = opts.optimized;
    let mut limit = None;
    if is_ubi {
        ubi::declare_volume_size(&dest, volume_size)
            .with_context(|| format!("failed to set up UBI volume '{}'", opts.output.display()))?;
        report.info(&format!(
            "declared {} bytes to UBI volume '{}'",
            volume_size,
            opts.output.display()
        ));

        // The volume forgets its old contents once the update starts,
        // so there is nothing meaningful to compare against, and writes
        // past the declared size must never reach it.
        optimized = false;
        limit = Some(volume_size);
    }

    let mut sink = BoundedSink::new(FileSink::new(dest), limit, opts.fsync_interval);

    let mut copier = BlockCopier::new(DEFAULT_BLOCK_SIZE)
        .volume_size(Some(volume_size))
        .optimized(optimized);

    report.set_title(&match &opts.input {
        Input::Stdin => format!("Copying stdin to '{}'", opts.output.display()),
        Input::Path(path) => {
            format!("Copying '{}' to '{}'", path.display(), opts.output.display())
        }
    });

    let progress = ReportProgress {
        report: report.clone(),
        total_bytes: volume_size,
    };
    let result = copier.copy(source.as_mut(), &mut sink, &progress);

    if result.is_ok() && opts.fsync_interval != 0 && sink.unflushed() > 0 {
        if let Err(e) = sink.flush() {
            report.warn(&format!(
                "failed to flush data to '{}': {}",
                opts.output.display(),
                e
            ));
        }
    }

    if sink.flush_failures() > 0 {
        report.warn(&format!(
            "{} periodic flush(es) to '{}' failed",
            sink.flush_failures(),
            opts.output.display()
        ));
    }

    report.complete();

    // The statistics are reported even when the copy failed, so the
    // caller can see how far it got.
    print_stats(&report, copier.stats());

    result.context("failed to copy data")
}

//---------------------------------
