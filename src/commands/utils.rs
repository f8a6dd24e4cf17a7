use anyhow::Result;
use atty::Stream;
use std::path::Path;
use std::process::exit;
use std::sync::Arc;

use crate::copier::CopyError;
use crate::file_utils;
use crate::report::*;

//---------------------------------------

pub fn check_input_file(input_file: &Path, report: &Report) {
    if !file_utils::file_exists(input_file) {
        report.fatal(&format!(
            "Couldn't find input file '{}'.",
            input_file.display()
        ));
        exit(1);
    }

    match file_utils::is_file_or_blk(input_file) {
        Ok(true) => {}
        Ok(false) => {
            report.fatal(&format!(
                "Not a block device or regular file '{}'.",
                input_file.display()
            ));
            exit(1);
        }
        Err(e) => {
            report.fatal(&format!("{}", e));
            exit(1);
        }
    }
}

pub fn mk_report(quiet: bool) -> Arc<Report> {
    if quiet {
        Arc::new(mk_quiet_report())
    } else if atty::is(Stream::Stdout) {
        Arc::new(mk_progress_bar_report())
    } else {
        Arc::new(mk_simple_report())
    }
}

pub fn to_exit_code<T>(report: &Arc<Report>, result: Result<T>) -> exitcode::ExitCode {
    match result {
        Ok(_) => exitcode::OK,
        Err(e) => {
            report.fatal(&format!("{:#}", e));
            match e.downcast_ref::<CopyError>() {
                Some(CopyError::UnknownSize) => exitcode::USAGE,
                _ => exitcode::IOERR,
            }
        }
    }
}

//---------------------------------------
