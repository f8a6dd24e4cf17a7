use std::fs::File;
use std::io;
use std::os::unix::fs::{FileTypeExt, MetadataExt};
use std::os::unix::io::AsRawFd;
use std::path::Path;

use crate::ioctl::{request_code_write, RequestType};

//---------------------------------------

/// Device major number of UBI volumes on a stock Linux kernel.  Some
/// systems assign UBI a dynamic major, hence this is only a default.
pub const DEFAULT_UBI_MAJOR: u32 = 10;

// UBI_IOCVOLUP from <mtd/ubi-user.h>: _IOW('O', 0, int64_t)
const UBI_IOCVOLUP: RequestType = request_code_write(b'O', 0, std::mem::size_of::<i64>());

//---------------------------------------

/// Is the path a UBI volume?  Paths that don't exist yet are ordinary
/// file destinations about to be created, not volumes.
pub fn is_ubi_volume<P: AsRef<Path>>(path: P, ubi_major: u32) -> io::Result<bool> {
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };

    if !metadata.file_type().is_block_device() {
        return Ok(false);
    }

    let major = unsafe { libc::major(metadata.rdev()) };
    Ok(major == ubi_major)
}

/// Announces the total number of bytes that are about to be written to
/// the volume.  Must be issued once, before the first write; the volume
/// then holds the copy to exactly that size.
pub fn declare_volume_size(vol: &File, nr_bytes: u64) -> io::Result<()> {
    let nr_bytes = nr_bytes as i64;
    let r = unsafe { libc::ioctl(vol.as_raw_fd(), UBI_IOCVOLUP, &nr_bytes) };
    if r < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

//---------------------------------------


//---------------------------------------
