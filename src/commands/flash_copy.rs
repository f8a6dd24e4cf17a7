use clap::{value_parser, Arg, ArgAction, ArgMatches};
use std::path::PathBuf;

use crate::commands::utils::*;
use crate::commands::Command;
use crate::copier::DEFAULT_BLOCK_SIZE;
use crate::flash;
use crate::ubi::DEFAULT_UBI_MAJOR;

//----------------------------------------------------------

pub struct FlashCopyCommand;

impl FlashCopyCommand {
    fn cli(&self) -> clap::Command {
        clap::Command::new(self.name())
            .next_display_order(None)
            .version(env!("CARGO_PKG_VERSION"))
            .about("Copy an image to a file, block device or UBI volume, skipping writes of unchanged blocks.")
            .arg(
                Arg::new("QUIET")
                    .help("Suppress output messages, return only exit code.")
                    .short('q')
                    .long("quiet")
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("NO-WRITE-OPTIMIZE")
                    .help("Always write blocks, even when the destination content already matches")
                    .long("no-write-optimize")
                    .action(ArgAction::SetTrue),
            )
            // options
            .arg(
                Arg::new("INPUT")
                    .help("Specify the input file, or '-' for standard input")
                    .short('i')
                    .long("input")
                    .value_name("INPUT")
                    .required(true),
            )
            .arg(
                Arg::new("OUTPUT")
                    .help("Specify the output file, device or volume")
                    .short('o')
                    .long("output")
                    .value_name("OUTPUT")
                    .required(true),
            )
            .arg(
                Arg::new("INPUT-SIZE")
                    .help("Number of bytes to copy, when it cannot be determined from the input")
                    .short('s')
                    .long("input-size")
                    .value_name("BYTES")
                    .value_parser(value_parser!(u64)),
            )
            .arg(
                Arg::new("FSYNC-INTERVAL")
                    .help("Flush to disk each time this many bytes have been written; 0 disables periodic flushing")
                    .short('f')
                    .long("fsync-interval")
                    .value_name("BYTES")
                    .value_parser(value_parser!(u64)),
            )
            .arg(
                Arg::new("UBI-MAJOR")
                    .help("Device major number identifying UBI volumes")
                    .long("ubi-major")
                    .value_name("MAJOR")
                    .value_parser(value_parser!(u32)),
            )
    }
}

fn get_input(matches: &ArgMatches) -> flash::Input {
    let arg = matches.get_one::<String>("INPUT").unwrap();
    if arg == "-" {
        flash::Input::Stdin
    } else {
        flash::Input::Path(PathBuf::from(arg))
    }
}

impl<'a> Command<'a> for FlashCopyCommand {
    fn name(&self) -> &'a str {
        "flash_copy"
    }

    fn run(&self, args: &mut dyn Iterator<Item = std::ffi::OsString>) -> exitcode::ExitCode {
        let matches = self.cli().get_matches_from(args);

        let report = mk_report(matches.get_flag("QUIET"));

        let input = get_input(&matches);
        if let flash::Input::Path(path) = &input {
            check_input_file(path, &report);
        }

        let opts = flash::FlashCopyOptions {
            input,
            output: PathBuf::from(matches.get_one::<String>("OUTPUT").unwrap()),
            input_size: matches.get_one::<u64>("INPUT-SIZE").copied(),
            fsync_interval: matches
                .get_one::<u64>("FSYNC-INTERVAL")
                .copied()
                .unwrap_or(DEFAULT_BLOCK_SIZE as u64),
            optimized: !matches.get_flag("NO-WRITE-OPTIMIZE"),
            ubi_major: matches
                .get_one::<u32>("UBI-MAJOR")
                .copied()
                .unwrap_or(DEFAULT_UBI_MAJOR),
            report: report.clone(),
        };

        to_exit_code(&report, flash::copy(opts))
    }
}

//----------------------------------------------------------
