use std::fs::{self, File};
use std::io;
use std::os::unix::fs::FileTypeExt;
use std::os::unix::io::AsRawFd;
use std::path::Path;

use crate::ioctl::{request_code_read, RequestType};

//---------------------------------------

pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
    fs::metadata(path).is_ok()
}

pub fn is_file_or_blk<P: AsRef<Path>>(path: P) -> io::Result<bool> {
    let ft = fs::metadata(path)?.file_type();
    Ok(ft.is_file() || ft.is_block_device())
}

//---------------------------------------

// BLKGETSIZE64 from <linux/fs.h>: _IOR(0x12, 114, size_t)
const BLKGETSIZE64: RequestType = request_code_read(0x12, 114, std::mem::size_of::<libc::size_t>());

fn block_device_size(file: &File) -> io::Result<u64> {
    let mut size: u64 = 0;
    let r = unsafe { libc::ioctl(file.as_raw_fd(), BLKGETSIZE64, &mut size) };
    if r < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(size)
}

/// Size in bytes of a regular file, or the capacity of a block device.
pub fn file_size<P: AsRef<Path>>(path: P) -> io::Result<u64> {
    let metadata = fs::metadata(&path)?;
    if metadata.file_type().is_block_device() {
        let file = File::open(&path)?;
        block_device_size(&file)
    } else if metadata.is_file() {
        Ok(metadata.len())
    } else {
        Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file or block device",
        ))
    }
}

//---------------------------------------


//---------------------------------------
