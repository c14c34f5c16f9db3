use std::process::ExitCode;

use framefold::FramefoldError;
use framefold::output as out;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = framefold::cli::parse();
    match app::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // The single user-facing report of a fatal error.
            out::print_error(&e.to_string());
            match e.downcast_ref::<FramefoldError>() {
                Some(FramefoldError::Interrupted) => ExitCode::from(130),
                _ => ExitCode::FAILURE,
            }
        }
    }
}
