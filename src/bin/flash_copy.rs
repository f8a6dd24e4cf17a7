use std::process::exit;

use flashcopy::commands::flash_copy::FlashCopyCommand;
use flashcopy::commands::Command;

fn main() {
    let cmd = FlashCopyCommand;
    exit(cmd.run(&mut std::env::args_os()))
}
