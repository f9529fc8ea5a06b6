// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use lenient_json::{Deserializer, DeserializerConfig, ParseError};

/// Deserialize a lenient JSON file and dump the resulting value tree.
#[derive(Parser, Debug)]
#[command(name = "lenient-dump", version)]
struct Args {
    /// File to read
    file: PathBuf,

    /// Maximum input length, in characters
    #[arg(long, default_value_t = DeserializerConfig::DEFAULT_MAX_INPUT_LENGTH)]
    max_length: usize,

    /// Maximum nesting depth
    #[arg(long, default_value_t = DeserializerConfig::DEFAULT_MAX_RECURSION_DEPTH)]
    max_depth: usize,

    /// Maximum members in a single object
    #[arg(long, default_value_t = DeserializerConfig::DEFAULT_MAX_MEMBERS)]
    max_members: usize,
}

fn build_deserializer(args: &Args) -> Result<Deserializer, ParseError> {
    let config = DeserializerConfig::new(args.max_length, args.max_depth)?
        .with_max_members(args.max_members)?;
    Ok(Deserializer::with_config(config))
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let text = match fs::read_to_string(&args.file) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: Unable to read file '{}': {}", args.file.display(), e);
            return ExitCode::FAILURE;
        }
    };
    log::info!("read {} bytes from {}", text.len(), args.file.display());

    let deserializer = match build_deserializer(&args) {
        Ok(deserializer) => deserializer,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match deserializer.deserialize(&text) {
        Ok(value) => {
            println!("{:#?}", value);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: JSON parsing failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
