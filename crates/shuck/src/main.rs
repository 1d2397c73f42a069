use std::process::ExitCode;

use clap::Parser;

mod cli;
mod config;

fn main() -> ExitCode {
    let app = match cli::App::try_parse() {
        Ok(app) => app,
        Err(err) => {
            let _ = err.print();
            // clap would exit 2 here; every failure of this tool is exit 1.
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match cli::run(app, &config::RunConfig::from_constants()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
