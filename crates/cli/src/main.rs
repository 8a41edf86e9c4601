//! `level3`: converts hypermedia documents between HAL+JSON and HAL+XML.

use std::io::Write;

use clap::Parser;
use level3_cli::{CliConfig, Command, decode, encode, init_logging, read_input};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    let format = config.format()?;
    info!(format = %format, pretty = config.pretty, command = ?config.command, "Starting level3");

    let mut stdout = std::io::stdout().lock();
    match &config.command {
        Command::Encode { file } => {
            let body = read_input(file.as_deref())?;
            let output = encode(&body, format, config.pretty)?;
            stdout.write_all(&output)?;
        }
        Command::Decode { file } => {
            let body = read_input(file.as_deref())?;
            writeln!(stdout, "{}", decode(&body, format, config.pretty)?)?;
        }
        Command::ContentType => {
            writeln!(stdout, "{}", format.mime_type())?;
        }
    }

    Ok(())
}
