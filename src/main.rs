use laplace2d::cli::Args;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::cli_setup();
    match args.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
