//! External merge-sort of FASTQ files by read name.
//!
//! Sorts files larger than available RAM by spilling sorted batches to
//! sibling `_batchN` files, then merging them in one streaming pass.
//!
//! # Algorithm
//!
//! 1. **Batch phase**: read records into memory until `batch_size` is reached
//! 2. **Spill phase**: stable-sort the batch by name, write it to `_batchN`
//! 3. **Merge phase**: k-way merge of all batches into the `_sorted` file
//! 4. **Cleanup phase**: delete batch files once the output is closed
//!
//! Inputs that fit in a single batch are sorted in memory and written
//! straight to the `_sorted` file; no temporaries are ever created. Every
//! derived path forces the gzip tail off, so sorting `x.fastq.gz` produces a
//! plain `x_sorted.fastq`.
//!
//! A sorter runs once. After a run, successful or not, further calls to
//! [`FastqSorter::sort`] fail with
//! [`InvalidState`](crate::errors::FqsortError::InvalidState); a failed run
//! leaves any completed batch files on disk for inspection.

use crate::errors::{FqsortError, Result};
use crate::fastq::{FastqSink, FastqSource, QualityScale};
use crate::logging::format_count;
use crate::pathname;
use crate::progress::ProgressTracker;
use crate::record::{FastqRecord, RecordSink, RecordSource};
use crate::sort::batch::write_batch;
use crate::sort::merge::KWayMerge;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Default maximum number of records held in memory at once.
pub const DEFAULT_BATCH_SIZE: usize = 1_000_000;

/// Suffix of the final output file.
const SORTED_SUFFIX: &str = "_sorted";

/// Lifecycle of a [`FastqSorter`]. One sorter performs at most one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortState {
    /// Not yet run.
    Idle,
    /// A run is in progress.
    Sorting,
    /// The run completed and the output file is in place.
    Finished,
    /// The run failed; batch files may remain on disk.
    Failed,
}

/// Statistics from a completed sort.
#[derive(Debug, Default)]
pub struct SortStats {
    /// Records read from the input (and written to the output).
    pub records: u64,
    /// Batch files spilled; 0 when the input fit in one batch.
    pub batches: usize,
    /// Path of the sorted output file.
    pub output: PathBuf,
}

/// External sorter for a single FASTQ file.
pub struct FastqSorter {
    /// File to sort.
    input: PathBuf,
    /// Directory for derived files; defaults to the input's directory.
    output_dir: Option<PathBuf>,
    /// Maximum records held in memory at once.
    batch_size: usize,
    /// Quality encoding the input is validated against.
    quality_scale: QualityScale,
    /// Lifecycle state.
    state: SortState,
    /// Batch files written so far.
    batch_count: usize,
}

impl FastqSorter {
    /// Create a sorter for `input` with default settings.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(input: P) -> Self {
        Self {
            input: input.into(),
            output_dir: None,
            batch_size: DEFAULT_BATCH_SIZE,
            quality_scale: QualityScale::default(),
            state: SortState::Idle,
            batch_count: 0,
        }
    }

    /// Redirect derived files (batches and output) to `dir`.
    #[must_use]
    pub fn output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Set the maximum records per batch. Values below 1 are clamped to 1.
    #[must_use]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Set the quality encoding the input is validated against.
    #[must_use]
    pub fn quality_scale(mut self, quality_scale: QualityScale) -> Self {
        self.quality_scale = quality_scale;
        self
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SortState {
        self.state
    }

    /// Batch files written so far.
    #[must_use]
    pub fn batch_count(&self) -> usize {
        self.batch_count
    }

    /// Sort the input file, returning statistics on success.
    ///
    /// Fails with [`FqsortError::InvalidState`] if this sorter has already
    /// run. On failure the state moves to [`SortState::Failed`] and any
    /// batch files already written are left on disk.
    pub fn sort(&mut self) -> Result<SortStats> {
        if self.state != SortState::Idle {
            return Err(FqsortError::InvalidState { path: self.input.display().to_string() });
        }
        self.state = SortState::Sorting;
        match self.run() {
            Ok(stats) => {
                self.state = SortState::Finished;
                Ok(stats)
            }
            Err(e) => {
                self.state = SortState::Failed;
                Err(e)
            }
        }
    }

    fn run(&mut self) -> Result<SortStats> {
        let input = utf8_path(&self.input)?.to_string();
        let output_dir = match &self.output_dir {
            Some(dir) => Some(utf8_path(dir)?.to_string()),
            None => None,
        };
        info!("Sorting {} (batch size {})", input, format_count(self.batch_size as u64));
        let source = FastqSource::open(&self.input, self.quality_scale)?;
        self.run_from(source, &input, output_dir.as_deref())
    }

    /// The run loop, generic over the record source.
    fn run_from<S: RecordSource>(
        &mut self,
        mut source: S,
        input: &str,
        output_dir: Option<&str>,
    ) -> Result<SortStats> {
        let mut buffer: Vec<FastqRecord> = Vec::with_capacity(self.batch_size);
        let tracker = ProgressTracker::new("records read");
        let mut total: u64 = 0;

        while let Some(record) = source.next_record()? {
            buffer.push(record);
            total += 1;
            tracker.log_if_needed(1);
            if buffer.len() >= self.batch_size {
                self.batch_count += 1;
                let path = self.batch_path(input, output_dir, self.batch_count);
                debug!("Writing batch {} ({} records) to {}", self.batch_count, buffer.len(), path);
                write_batch(&mut buffer, &path)?;
                buffer.clear();
            }
        }
        tracker.log_final();

        let sorted_path = pathname::derive(input, SORTED_SUFFIX, output_dir, None, Some(false));
        if self.batch_count == 0 {
            // Everything fit in one batch, including the empty-input case:
            // an empty sorted file is still written.
            info!("All records fit in one batch; sorting in memory");
            write_batch(&mut buffer, &sorted_path)?;
        } else {
            if !buffer.is_empty() {
                self.batch_count += 1;
                let path = self.batch_path(input, output_dir, self.batch_count);
                debug!(
                    "Writing final batch {} ({} records) to {}",
                    self.batch_count,
                    buffer.len(),
                    path
                );
                write_batch(&mut buffer, &path)?;
                buffer.clear();
            }
            info!("Merging {} batches into {}", self.batch_count, sorted_path);
            self.merge_batches(input, output_dir, &sorted_path)?;
            self.remove_batches(input, output_dir)?;
        }
        info!("Sort complete: {} records", format_count(total));
        Ok(SortStats { records: total, batches: self.batch_count, output: PathBuf::from(sorted_path) })
    }

    /// Path of batch number `n` (1-based).
    fn batch_path(&self, input: &str, output_dir: Option<&str>, n: usize) -> String {
        pathname::derive(input, &format!("_batch{n}"), output_dir, None, Some(false))
    }

    /// Merge batches `1..=batch_count` into the output file. The output is
    /// flushed and closed before this returns, so cleanup is safe afterward.
    fn merge_batches(&self, input: &str, output_dir: Option<&str>, sorted_path: &str) -> Result<()> {
        let mut sources = Vec::with_capacity(self.batch_count);
        for n in 1..=self.batch_count {
            let path = self.batch_path(input, output_dir, n);
            sources.push(FastqSource::open(path, self.quality_scale)?);
        }
        let merge = KWayMerge::new(sources)?;
        let mut sink = FastqSink::create(sorted_path)?;
        for result in merge {
            sink.write_record(&result?)?;
        }
        sink.finish()
    }

    /// Delete batch files `1..=batch_count`. Only called after the merged
    /// output is complete; a deletion failure is still an error, but the
    /// sorted file is already in place.
    fn remove_batches(&self, input: &str, output_dir: Option<&str>) -> Result<()> {
        for n in 1..=self.batch_count {
            let path = self.batch_path(input, output_dir, n);
            std::fs::remove_file(&path).map_err(|e| FqsortError::io(path, &e))?;
        }
        Ok(())
    }
}

/// Sort one FASTQ file with default quality validation, returning the path
/// of the sorted output.
pub fn sort_file<P: AsRef<Path>>(
    input: P,
    output_dir: Option<&Path>,
    batch_size: Option<usize>,
) -> Result<PathBuf> {
    let mut sorter = FastqSorter::new(input.as_ref());
    if let Some(dir) = output_dir {
        sorter = sorter.output_dir(dir);
    }
    if let Some(n) = batch_size {
        sorter = sorter.batch_size(n);
    }
    let stats = sorter.sort()?;
    Ok(stats.output)
}

fn utf8_path(path: &Path) -> Result<&str> {
    path.to_str().ok_or_else(|| FqsortError::Io {
        path: path.display().to_string(),
        reason: "path is not valid UTF-8".to_string(),
    })
}
