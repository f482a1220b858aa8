//! rtc - Entry Point
//!
//! Binary entry point for the `rtc` command line tool. Lives in the `rtc`
//! facade crate next to the library it drives.

// Force-link rtc-providers to ensure linkme registrations are included
extern crate rtc_providers;

use clap::Parser;
use rtc::cli::{Cli, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli, &mut std::io::stdout()).await
}
