use crate::constants::{API_KEY_ENV, ENDPOINT_ENV};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "img-tinify",
    about = "Compress PNG/JPG images in place with the TinyPNG service",
    long_about = "img-tinify sends images to the TinyPNG web service and overwrites each file \
                  with the compressed result. Point it at a file to compress it directly, or at \
                  a directory to browse it interactively and pick what to compress.",
    version,
    after_help = "EXAMPLES:\n  \
    img-tinify joy.png -k YOUR_API_KEY\n  \
    TINIFY_API_KEY=YOUR_API_KEY img-tinify ./images\n  \
    img-tinify            (prompts for a path)"
)]
pub struct Args {
    #[arg(
        help = "Image file or directory to browse",
        long_help = "Image file to compress, or directory to browse. Relative and absolute paths \
                     are accepted. When omitted, the path is read from standard input."
    )]
    pub path: Option<PathBuf>,

    #[arg(
        short = 'k',
        long,
        env = API_KEY_ENV,
        hide_env_values = true,
        help = "TinyPNG API key",
        long_help = "API key for the TinyPNG service. Get one at https://tinypng.com/developers."
    )]
    pub key: Option<String>,

    #[arg(
        long,
        env = ENDPOINT_ENV,
        help = "Service base URL (default: https://api.tinify.com)"
    )]
    pub endpoint: Option<String>,

    #[arg(
        short = 't',
        long,
        help = "Request timeout in seconds (default: 120)"
    )]
    pub timeout: Option<u64>,

    #[arg(short = 'q', long, help = "Only print errors")]
    pub quiet: bool,

    #[arg(short = 'v', long, help = "Print request details and skipped entries")]
    pub verbose: bool,
}
