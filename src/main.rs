use anyhow::{Context, Result};
use clap::Parser;
use img_tinify::cli::Args;
use img_tinify::logger::{self, Verbosity};
use img_tinify::{stdin_prompt, Browser, TinifyClient, TinifyConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    logger::init(Verbosity::from_flags(args.quiet, args.verbose));

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            img_tinify::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = TinifyConfig::new(args.key, args.endpoint, args.timeout)
        .context("Invalid configuration")?;
    img_tinify::verbose!("Using TinyPNG endpoint {}", config.endpoint);

    let client = TinifyClient::new(config).context("Failed to create TinyPNG client")?;

    let summary = Browser::new(&client, stdin_prompt())
        .run(args.path)
        .context("Compression session failed")?;
    img_tinify::verbose!(
        "Session finished: {} compressed, {} skipped",
        summary.compressed,
        summary.skipped
    );

    Ok(())
}
