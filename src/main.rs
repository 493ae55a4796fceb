//! Textel - command-line tool for tile-grid ASCII/ANSI art documents

use std::process::ExitCode;

use textel::cli;

fn main() -> ExitCode {
    cli::run()
}
