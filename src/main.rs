//! dt - domaintree command-line entry point

use std::process::ExitCode;

fn main() -> ExitCode {
    match domaintree::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            domaintree::ui::output::error(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
