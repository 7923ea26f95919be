//! `vss` binary entry point

use std::process::ExitCode;

fn main() -> ExitCode {
    match vss_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e.exit_code();
            eprintln!("error: {:#}", anyhow::Error::from(e));
            ExitCode::from(code)
        }
    }
}
