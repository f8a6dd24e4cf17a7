pub mod commands;
pub mod copier;
pub mod file_utils;
pub mod flash;
pub mod ioctl;
pub mod report;
pub mod ubi;
