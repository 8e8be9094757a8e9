//! Inkan - document draft assembler

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = inkan::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
