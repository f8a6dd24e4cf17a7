use super::*;

//------------------------------------------

// Expected values taken from the C headers on the matching targets.

#[cfg(target_pointer_width = "64")]
mod expected {
    use super::RequestType;
    pub const BLKGETSIZE64: RequestType = 0x8008_1272u32 as RequestType;
    pub const UBI_IOCVOLUP: RequestType = 0x4008_4f00u32 as RequestType;
}

#[cfg(target_pointer_width = "32")]
mod expected {
    use super::RequestType;
    pub const BLKGETSIZE64: RequestType = 0x8004_1272u32 as RequestType;
    pub const UBI_IOCVOLUP: RequestType = 0x4008_4f00u32 as RequestType;
}

#[test]
fn blkgetsize64_matches_the_header() {
    assert_eq!(
        request_code_read(0x12, 114, std::mem::size_of::<libc::size_t>()),
        expected::BLKGETSIZE64
    );
}

#[test]
fn ubi_iocvolup_matches_the_header() {
    assert_eq!(
        request_code_write(b'O', 0, std::mem::size_of::<i64>()),
        expected::UBI_IOCVOLUP
    );
}

//------------------------------------------
