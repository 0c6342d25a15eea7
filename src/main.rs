use clap::Parser;
use tachart::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
