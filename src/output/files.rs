//! Local file output for downloaded documents

use crate::ScraperError;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Characters that are not allowed in common filesystem path segments
const INVALID_FILENAME_CHARS: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Replaces filesystem-hostile characters in a label with underscores
///
/// Each of `\ / * ? : " < > |` becomes `_`; every other character is kept,
/// so the result has exactly as many characters as the input.
///
/// # Examples
///
/// ```
/// use council_docs::sanitize_filename;
///
/// assert_eq!(sanitize_filename("Minutes 3/15/25: Regular?.pdf"), "Minutes 3_15_25_ Regular_.pdf");
/// ```
pub fn sanitize_filename(label: &str) -> String {
    label
        .chars()
        .map(|c| if INVALID_FILENAME_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// Returns true if a sanitized name can be used as a file inside a directory
///
/// Empty names and the `.`/`..` segments would resolve to a directory.
pub fn is_usable_filename(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".."
}

/// Creates the output directory (and any missing parents) if needed
pub async fn ensure_output_dir(dir: &Path) -> Result<(), ScraperError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| ScraperError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })
}

/// Writes a document into the output directory, replacing any existing file
///
/// The bytes go to a short-named temporary file in the same directory and are
/// then persisted under the final name, so a failed write never leaves a
/// truncated document behind. The temporary name does not grow with the
/// label, so any name the filesystem accepts can be written.
///
/// # Returns
///
/// The path of the written file
pub async fn write_document(
    dir: &Path,
    file_name: &str,
    contents: &[u8],
) -> Result<PathBuf, ScraperError> {
    let final_path = dir.join(file_name);

    let dir = dir.to_path_buf();
    let target = final_path.clone();
    let contents = contents.to_vec();

    let written = tokio::task::spawn_blocking(move || -> std::io::Result<()> {
        let mut partial = NamedTempFile::new_in(&dir)?;
        partial.write_all(&contents)?;
        partial.persist(&target).map_err(|e| e.error)?;
        Ok(())
    })
    .await;

    match written {
        Ok(Ok(())) => Ok(final_path),
        Ok(Err(source)) => Err(ScraperError::WriteFile {
            path: final_path,
            source,
        }),
        Err(join_error) => Err(ScraperError::WriteFile {
            path: final_path,
            source: std::io::Error::new(std::io::ErrorKind::Other, join_error),
        }),
    }
}
