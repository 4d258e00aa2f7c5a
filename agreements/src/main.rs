use std::process::ExitCode;

use erm_agreements::core::CoreApp;

fn main() -> ExitCode {
    match CoreApp::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\nError: {:#}\n", e);
            ExitCode::FAILURE
        }
    }
}
