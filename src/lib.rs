pub mod browser;
pub mod cli;
pub mod compress;
pub mod config;
pub mod constants;
pub mod error;
pub mod logger;
pub mod prompt;
pub mod tinify;
pub mod utils;

pub use browser::{Browser, BrowserState, MenuChoice, SelectionError, SessionSummary};
pub use compress::{compress_file, CompressOutcome};
pub use config::TinifyConfig;
pub use error::{CompressionError, Result};
pub use prompt::{stdin_prompt, LinePrompt, Prompt, TerminalPrompt};
pub use tinify::{CompressionService, TinifyClient};
pub use utils::is_allowed_image;
