//! Interactive directory browser.
//!
//! Navigation is a loop over [`BrowserState`]: every step consumes the current
//! state and returns the next one, ending in [`BrowserState::Terminated`].

use crate::compress::{compress_file, CompressOutcome};
use crate::constants::{
    LISTING_SEPARATOR, LISTING_SEPARATOR_REPEAT, MENU_ALL, MENU_BACK, MENU_LEGEND, MENU_PROMPT,
    MENU_QUIT, PATH_PROMPT,
};
use crate::error::{CompressionError, Result};
use crate::prompt::Prompt;
use crate::tinify::CompressionService;
use crate::utils::{calculate_compression_ratio, format_file_size};
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserState {
    /// No path yet; ask the user for one.
    AwaitingInput,
    /// Resolve a path and show it (a file moves on to `Compressing`).
    Listing(PathBuf),
    Compressing(PathBuf),
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    All,
    Back,
    Quit,
    Index(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("'{0}' is not a valid choice; enter a, b, q or an index")]
    NotANumber(String),

    #[error("negative index {0} is not supported; indices start at 0")]
    NegativeIndex(String),

    #[error("index {index} is out of range; this directory has {len} entries")]
    OutOfRange { index: usize, len: usize },
}

impl MenuChoice {
    /// Parse one line of menu input against a listing of `len` entries.
    /// Empty input quits.
    pub fn parse(input: &str, len: usize) -> std::result::Result<Self, SelectionError> {
        let input = input.trim();
        match input {
            "" | MENU_QUIT => Ok(MenuChoice::Quit),
            MENU_ALL => Ok(MenuChoice::All),
            MENU_BACK => Ok(MenuChoice::Back),
            other => {
                if other.parse::<i64>().is_ok_and(|n| n < 0) {
                    return Err(SelectionError::NegativeIndex(other.to_string()));
                }
                let index: usize = other
                    .parse()
                    .map_err(|_| SelectionError::NotANumber(other.to_string()))?;
                if index >= len {
                    return Err(SelectionError::OutOfRange { index, len });
                }
                Ok(MenuChoice::Index(index))
            }
        }
    }
}

/// Totals for everything the compressor saw during one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub compressed: usize,
    pub skipped: usize,
    pub bytes_before: u64,
    pub bytes_after: u64,
}

impl SessionSummary {
    pub fn record(&mut self, outcome: CompressOutcome) {
        match outcome {
            CompressOutcome::Skipped => self.skipped += 1,
            CompressOutcome::Compressed {
                original_size,
                compressed_size,
            } => {
                self.compressed += 1;
                self.bytes_before += original_size;
                self.bytes_after += compressed_size;
            }
        }
    }

    pub fn print(&self) {
        crate::info!("\n📊 Compression Summary:");
        crate::info!("  📁 Files compressed: {}", self.compressed);
        crate::info!("  ⏭️  Entries skipped: {}", self.skipped);
        crate::info!(
            "  📦 Total size: {} -> {}",
            format_file_size(self.bytes_before),
            format_file_size(self.bytes_after)
        );
        crate::info!(
            "  🎯 Overall reduction: {:.1}%",
            calculate_compression_ratio(self.bytes_before, self.bytes_after)
        );
    }
}

/// Turn user input into an absolute path. An empty path means the current directory.
///
/// Symlinks are kept as typed, so the parent of a linked directory is the
/// directory holding the link.
pub fn resolve_path(input: &Path) -> Result<PathBuf> {
    let candidate = if input.as_os_str().is_empty() {
        std::env::current_dir()?
    } else {
        std::path::absolute(input)?
    };
    let candidate = normalize_lexically(&candidate);

    if !candidate.exists() {
        return Err(CompressionError::PathNotFound(candidate));
    }

    Ok(candidate)
}

/// Drop `.` and fold `..` into the preceding component without touching the filesystem.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Immediate children of `dir`, in the order the filesystem returns them.
pub fn list_entries(dir: &Path) -> Result<Vec<OsString>> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        entries.push(entry?.file_name().to_os_string());
    }
    Ok(entries)
}

/// The parent directory; the root is its own parent.
pub fn parent_dir(dir: &Path) -> PathBuf {
    dir.parent().unwrap_or(dir).to_path_buf()
}

pub struct Browser<S, P> {
    service: S,
    prompt: P,
    summary: SessionSummary,
}

impl<S: CompressionService, P: Prompt> Browser<S, P> {
    pub fn new(service: S, prompt: P) -> Self {
        Self {
            service,
            prompt,
            summary: SessionSummary::default(),
        }
    }

    /// Browse from `start` (or ask for a path) until the user is done.
    pub fn run(mut self, start: Option<PathBuf>) -> Result<SessionSummary> {
        let mut state = match start {
            Some(path) => BrowserState::Listing(path),
            None => BrowserState::AwaitingInput,
        };

        while state != BrowserState::Terminated {
            state = self.step(state)?;
        }

        Ok(self.summary)
    }

    pub fn step(&mut self, state: BrowserState) -> Result<BrowserState> {
        match state {
            BrowserState::AwaitingInput => self.await_path(),
            BrowserState::Listing(path) => self.list(&path),
            BrowserState::Compressing(path) => {
                let outcome = compress_file(&self.service, &path)?;
                self.summary.record(outcome);
                Ok(BrowserState::Terminated)
            }
            BrowserState::Terminated => Ok(BrowserState::Terminated),
        }
    }

    fn await_path(&mut self) -> Result<BrowserState> {
        match self.prompt.read_line(PATH_PROMPT)? {
            Some(answer) => Ok(BrowserState::Listing(PathBuf::from(answer.trim()))),
            None => Ok(BrowserState::Terminated),
        }
    }

    fn list(&mut self, path: &Path) -> Result<BrowserState> {
        let dir = resolve_path(path)?;
        if dir.is_file() {
            return Ok(BrowserState::Compressing(dir));
        }

        let entries = list_entries(&dir)?;
        print_listing(&dir, &entries);

        loop {
            let Some(answer) = self.prompt.read_line(MENU_PROMPT)? else {
                return Ok(BrowserState::Terminated);
            };

            match MenuChoice::parse(&answer, entries.len()) {
                Ok(MenuChoice::All) => {
                    self.compress_all(&dir, &entries)?;
                    return Ok(BrowserState::Terminated);
                }
                Ok(MenuChoice::Back) => return Ok(BrowserState::Listing(parent_dir(&dir))),
                Ok(MenuChoice::Quit) => return Ok(BrowserState::Terminated),
                Ok(MenuChoice::Index(index)) => {
                    let selected = dir.join(&entries[index]);
                    crate::info!("👉 Selected: {}", selected.display());
                    return Ok(BrowserState::Listing(selected));
                }
                Err(e) => crate::warn!("{}", e),
            }
        }
    }

    fn compress_all(&mut self, dir: &Path, entries: &[OsString]) -> Result<()> {
        let start_time = Instant::now();
        crate::info!("🚀 Compressing every image in {}", dir.display());

        for name in entries {
            let outcome = compress_file(&self.service, &dir.join(name))?;
            self.summary.record(outcome);
        }

        self.summary.print();
        crate::info!("  ⏱️  Total time: {:?}", start_time.elapsed());
        Ok(())
    }
}

fn print_listing(dir: &Path, entries: &[OsString]) {
    crate::info!("\n{}", LISTING_SEPARATOR.repeat(LISTING_SEPARATOR_REPEAT));
    crate::info!("📁 Current directory: {}", dir.display());
    for (n, name) in entries.iter().enumerate() {
        crate::info!("{}:{}", n, name.to_string_lossy());
    }
    crate::info!("\n{}", MENU_LEGEND);
}
