//! # HMxml Tool
//!
//! Command-line access to HMxml reconstruction parameter files.
//!
//! ## Usage
//!
//! ```bash
//! # Check a settings file before launching a reconstruction
//! hmxml validate settings.xml
//!
//! # Show the key parameters
//! hmxml info settings.xml
//!
//! # Store a chosen centre of rotation
//! hmxml set-centre settings.xml 1279.5
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
