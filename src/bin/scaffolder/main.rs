use std::io::Read;

use anyhow::{Context as _, Result};
use camino::Utf8Path;
use clap::Parser;
use tracing::{span, Level};
use tracing_subscriber::EnvFilter;

mod args;
use args::{Command, CommandLineArgs};
use scaffolder::{
    config::Config, filesystem::DiskFilesystem, scaffold, template, ScaffoldRequest,
};

/// Environment variable taking precedence over `-v` for log filtering
const LOG_VARIABLE: &str = "SCAFFOLDER_LOG";

fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_env(LOG_VARIABLE)
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .without_time()
        .init();
}

fn main() -> Result<()> {
    let CommandLineArgs {
        command,
        config,
        verbose,
    } = CommandLineArgs::parse();

    init_logger(verbose);

    let request = match command {
        Command::Template => {
            println!("{}", template());
            return Ok(());
        }
        Command::Apply {
            target,
            prompt_file,
            mode,
            overwrite,
            dry_run,
        } => ScaffoldRequest {
            prompt: read_input(prompt_file.as_deref())?,
            target_path: target,
            mode,
            overwrite,
            dry_run,
        },
        Command::Request { request_file } => {
            let text = read_input(request_file.as_deref())?;
            serde_json::from_str(&text).context("Invalid request")?
        }
    };

    let config = match config {
        Some(path) => Config::load(&path),
        None => Config::from_env(),
    }
    .context("Loading configuration")?;

    let span = span!(Level::DEBUG, "scaffold", target = request.target_path.as_str());
    let _guard = span.enter();

    let mut fs = DiskFilesystem::new();
    let result = scaffold(&config, &request, &mut fs)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn read_input(path: Option<&Utf8Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("Reading {path}")),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Reading standard input")?;
            Ok(text)
        }
    }
}
