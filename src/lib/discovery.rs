//! Input discovery: turn a path argument into the list of files to sort.
//!
//! A file path passes through untouched, whatever its extension. A directory
//! is scanned for names ending in one of the expected extensions (ignoring
//! the name's case), optionally recursing into subdirectories. The walk
//! carries a file-count guard so a circular symlink farm fails fast instead
//! of spinning.

use crate::errors::{FqsortError, Result};
use std::path::{Path, PathBuf};

/// Extensions searched for when the input is a directory.
pub const FASTQ_EXTENSIONS: &[&str] = &["fastq", "fastq.gz"];

/// Abort a directory walk after this many files unless overridden.
pub const DEFAULT_MAX_FILES: usize = 1000;

/// Resolve `path` to the files to process.
///
/// Directories yield their matching files in sorted order; an empty match is
/// an error, as is a path that is neither file nor directory. `max_files`
/// bounds the walk.
pub fn find_files(
    path: &Path,
    extensions: &[&str],
    recursive: bool,
    max_files: usize,
) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(FqsortError::Io {
            path: path.display().to_string(),
            reason: "not a file or directory".to_string(),
        });
    }
    let mut files = Vec::new();
    search_dir(path, extensions, recursive, max_files, &mut files)?;
    if files.is_empty() {
        return Err(FqsortError::Io {
            path: path.display().to_string(),
            reason: format!("no files with extensions {extensions:?} found"),
        });
    }
    files.sort();
    Ok(files)
}

fn search_dir(
    dir: &Path,
    extensions: &[&str],
    recursive: bool,
    max_files: usize,
    files: &mut Vec<PathBuf>,
) -> Result<()> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| FqsortError::io(dir.display().to_string(), &e))?;
    for entry in entries {
        let entry = entry.map_err(|e| FqsortError::io(dir.display().to_string(), &e))?;
        let path = entry.path();
        if path.is_file() {
            if has_extension(&entry.file_name().to_string_lossy(), extensions) {
                files.push(path);
                if files.len() > max_files {
                    return Err(FqsortError::Io {
                        path: dir.display().to_string(),
                        reason: format!(
                            "found more than {max_files} files; assuming circular links"
                        ),
                    });
                }
            }
        } else if recursive && path.is_dir() {
            search_dir(&path, extensions, recursive, max_files, files)?;
        }
    }
    Ok(())
}

/// Suffix match of the lowercased name against a list of extensions, which
/// are expected in lowercase: `reads.fastq.gz` matches both `fastq.gz` and
/// `gz`, and so does `READS.FASTQ.GZ`.
fn has_extension(name: &str, extensions: &[&str]) -> bool {
    let lower = name.to_ascii_lowercase();
    extensions.iter().any(|ext| lower.ends_with(ext))
}
