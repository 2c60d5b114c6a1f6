use std::process::ExitCode;

use microplate::ui::output;

fn main() -> ExitCode {
    match microplate::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
