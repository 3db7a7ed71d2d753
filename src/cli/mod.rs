use anyhow::Result;
use clap::{Parser, Subcommand};
use log::debug;
use std::path::PathBuf;

use hmxml::codec::CodecConfig;
use hmxml::registry::Registry;

mod centre;
mod config;
mod info;
mod normalize;
mod validate;

pub use config::Config;

/// HMxml - Tomography reconstruction parameter files
#[derive(Parser)]
#[command(name = "hmxml")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Load codec settings from a TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Reject elements and attributes outside the schema
    #[arg(long, global = true)]
    strict: bool,

    /// Target namespace of the schema elements
    #[arg(long, value_name = "URI", global = true)]
    namespace: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a settings file for missing and inconsistent values
    Validate {
        /// Input settings file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Display the key reconstruction parameters of a settings file
    Info {
        /// Input settings file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the whole document as JSON
        #[arg(long)]
        json: bool,
    },

    /// Re-write a settings file in canonical layout
    Normalize {
        /// Input settings file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (defaults to standard output)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Store the centre of rotation (FBP/Backprojection/ImageCentre)
    SetCentre {
        /// Settings file to update
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Centre of rotation in pixels
        #[arg(value_name = "VALUE", allow_hyphen_values = true)]
        value: String,

        /// Write to this file instead of updating FILE in place
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }

    /// Codec settings: config file first, then command-line overrides.
    fn codec_config(&self) -> Result<CodecConfig> {
        let mut codec = match &self.config {
            Some(path) => Config::from_file(path)?.codec,
            None => CodecConfig::default(),
        };
        if self.strict {
            codec.strict = true;
        }
        if let Some(namespace) = &self.namespace {
            codec.target_namespace = Some(namespace.clone());
        }
        debug!("Codec config: {:?}", codec);
        Ok(codec)
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let registry = Registry::new(cli.codec_config()?);
    match cli.command {
        Commands::Validate { file } => validate::run(&registry, file),
        Commands::Info { file, json } => info::run(&registry, file, json),
        Commands::Normalize { input, output } => normalize::run(&registry, input, output),
        Commands::SetCentre {
            file,
            value,
            output,
        } => centre::run(&registry, file, &value, output),
    }
}
