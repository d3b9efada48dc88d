//! `mapgl-document`: render the embedded map page.
//!
//! Usage:
//!   mapgl-document [--sdk <sdk.js>] [--config <bridge.toml>] [--init]
//!
//! Writes the HTML document to stdout, with the SDK inlined from `--sdk` or
//! loaded from the configured `sdkUrl`. With `--init`, writes the `init`
//! command the host would send for this config instead.

use mapgl_bridge::cli::{init_logging, init_message, load_config, render_document, CliError};
use std::io::{self, Write};
use std::path::PathBuf;

fn run() -> Result<String, CliError> {
    let args: Vec<String> = std::env::args().collect();
    let mut sdk: Option<PathBuf> = None;
    let mut config: Option<PathBuf> = None;
    let mut init = false;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--sdk" => {
                i += 1;
                sdk = args.get(i).map(PathBuf::from);
            }
            "--config" => {
                i += 1;
                config = args.get(i).map(PathBuf::from);
            }
            "--init" => init = true,
            other => return Err(CliError::Usage(format!("unexpected argument {other}"))),
        }
        i += 1;
    }

    let config = load_config(config.as_deref())?;
    if init {
        return init_message(&config);
    }
    render_document(&config, sdk.as_deref())
}

fn main() {
    init_logging();
    match run() {
        Ok(output) => {
            let mut stdout = io::stdout();
            if let Err(e) = stdout.write_all(output.as_bytes()).and_then(|_| stdout.write_all(b"\n")) {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
