use std::process::ExitCode;

fn main() -> ExitCode {
    getbody::cli::run()
}
