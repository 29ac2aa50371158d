//! Derived-path construction for batch and output files.
//!
//! Every artifact the sorter writes (the `_batchN` temporaries and the final
//! `_sorted` file) gets its location from [`derive`], a pure function of the
//! input path and the run's parameters. The rules:
//!
//! - the directory part is everything up to the last `/` (or `\`),
//! - the file name runs from there to the first `.`,
//! - the extension is the rest, except a trailing `.gz` which is tracked
//!   separately,
//! - the suffix is inserted between name and extension,
//! - an output directory, when given, replaces the directory part,
//! - the `.gz` tail can be forced on or off independently of the input.
//!
//! The index arithmetic is deliberately spelled out; downstream tooling
//! matches these names byte for byte, so "almost the same" is not the same.
//!
//! # Examples
//!
//! ```
//! use fqsort_lib::pathname::derive;
//!
//! assert_eq!(derive("a/b.fastq.gz", "_sorted", None, None, None), "a/b_sorted.fastq.gz");
//! assert_eq!(derive("b.txt", "_batch1", Some("out/"), None, None), "out/b_batch1.txt");
//! assert_eq!(derive("a/b.fastq.gz", "_sorted", None, None, Some(false)), "a/b_sorted.fastq");
//! ```

/// Build a sibling path by inserting `suffix` between the file name and its
/// extension.
///
/// - `output_dir`: replaces the directory part. `None`, empty or
///   whitespace-only keeps the input's directory. At most one trailing
///   separator is stripped before joining with `/`.
/// - `extension`: replaces the copied extension (a leading `.` is added if
///   missing). `None` keeps the input's extension.
/// - `gzip`: `Some(true)` forces a `.gz` tail, `Some(false)` strips it,
///   `None` keeps whatever the input had.
///
/// A leading `~` in the result is expanded to the home directory.
#[must_use]
pub fn derive(
    path: &str,
    suffix: &str,
    output_dir: Option<&str>,
    extension: Option<&str>,
    gzip: Option<bool>,
) -> String {
    // The file name starts after the last '/'; failing that, the last '\'.
    let name_start = match path.rfind('/').or_else(|| path.rfind('\\')) {
        Some(sep) => sep + 1,
        None => 0,
    };
    // The extension starts at the first '.' at or after the name.
    let dot_index = match path[name_start..].find('.') {
        Some(i) => name_start + i,
        None => path.len(),
    };
    // A trailing ".gz" is not part of the extension proper. Byte comparison,
    // so a multi-byte character at the end cannot split a char boundary.
    let has_gz = path.len() >= 3 && path.as_bytes()[path.len() - 3..].eq_ignore_ascii_case(b".gz");
    let ext_end = if has_gz { path.len() - 3 } else { path.len() };
    let gz_bit = match gzip {
        Some(true) => ".gz",
        Some(false) => "",
        None if has_gz => ".gz",
        None => "",
    };

    let mut result = match output_dir.filter(|dir| !dir.trim().is_empty()) {
        None => path[..dot_index].to_string(),
        Some(dir) => {
            // Strip at most one trailing separator; the join adds it back.
            let dir = dir.strip_suffix('/').or_else(|| dir.strip_suffix('\\')).unwrap_or(dir);
            format!("{}/{}", dir, &path[name_start..dot_index])
        }
    };
    result.push_str(suffix);
    match extension {
        None => {
            if dot_index < ext_end {
                result.push_str(&path[dot_index..ext_end]);
            }
        }
        Some(ext) => {
            if !ext.starts_with('.') {
                result.push('.');
            }
            result.push_str(ext);
        }
    }
    result.push_str(gz_bit);
    expand_home(result)
}

/// Expand a leading `~` to `$HOME`. `~user` forms and paths without a home
/// directory available are returned unchanged.
fn expand_home(path: String) -> String {
    if path != "~" && !path.starts_with("~/") {
        return path;
    }
    match std::env::var("HOME") {
        Ok(home) if !home.is_empty() => format!("{}{}", home, &path[1..]),
        _ => path,
    }
}
