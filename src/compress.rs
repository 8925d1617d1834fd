use crate::error::Result;
use crate::tinify::CompressionService;
use crate::utils::{create_progress_spinner, is_allowed_image, print_compression_result};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressOutcome {
    /// Extension not on the allow-list; the file was not touched.
    Skipped,
    Compressed {
        original_size: u64,
        compressed_size: u64,
    },
}

/// Compresses one file in place through `service`.
///
/// Files whose extension is not allow-listed are skipped without being read.
/// Otherwise the original bytes are replaced by the service response; there is
/// no backup copy.
///
/// # Returns
/// * `Ok(CompressOutcome)` - Whether the file was skipped or rewritten
/// * `Err(CompressionError)` - Read, service or write failure
pub fn compress_file<S: CompressionService + ?Sized>(
    service: &S,
    path: &Path,
) -> Result<CompressOutcome> {
    if !is_allowed_image(path) {
        crate::verbose!("Skipping non-image entry: {}", path.display());
        return Ok(CompressOutcome::Skipped);
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir_name = path.parent().unwrap_or_else(|| Path::new(""));

    crate::info!("🗜️  Compressing: {}", path.display());
    crate::verbose!("File {} in {}", file_name, dir_name.display());

    let original = fs::read(path)?;

    let spinner = (!crate::logger::is_quiet())
        .then(|| create_progress_spinner(&format!("Uploading {}...", file_name)));
    let result = service.shrink(&original);
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let compressed = result?;

    fs::write(path, &compressed)?;

    crate::info!("✅ Compression finished, saved to: {}", path.display());
    print_compression_result(original.len() as u64, compressed.len() as u64);

    Ok(CompressOutcome::Compressed {
        original_size: original.len() as u64,
        compressed_size: compressed.len() as u64,
    })
}
