//! # Shopfront Console Entry Point
//!
//! Starts one cart session in the terminal. The setup lives in `lib.rs`
//! so it can be tested.

use std::process::ExitCode;

use clap::Parser;
use shopfront_console_lib::{run, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("shopfront-console: {}", e);
            ExitCode::FAILURE
        }
    }
}
