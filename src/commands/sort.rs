//! Sort FASTQ files by read name.
//!
//! External merge-sort: records are buffered up to the batch size, each full
//! batch is stable-sorted and spilled to a `_batchN` sibling file, and the
//! batches are k-way merged into `<name>_sorted.<ext>`. Inputs that fit in
//! one batch are sorted in memory with no temporaries.
//!
//! Accepts a single file or a directory; directories are searched for
//! `.fastq` / `.fastq.gz` files, optionally recursively, and sorted one
//! after another. Gzipped inputs are decompressed on the fly and always
//! produce plain output.

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use fqsort_lib::discovery::{self, DEFAULT_MAX_FILES, FASTQ_EXTENSIONS};
use fqsort_lib::fastq::QualityScale;
use fqsort_lib::logging::{OperationTimer, format_count};
use fqsort_lib::sort::{DEFAULT_BATCH_SIZE, FastqSorter};
use log::info;
use std::path::PathBuf;

use crate::commands::command::Command;

/// Quality-string encoding of the input.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum QualityScaleArg {
    /// Phred+33 (Sanger)
    Phred,
    /// Solexa+64
    Solexa,
    /// Solexa+64, pre-1.3 pipeline
    SolexaOld,
}

impl From<QualityScaleArg> for QualityScale {
    fn from(arg: QualityScaleArg) -> Self {
        match arg {
            QualityScaleArg::Phred => QualityScale::Phred,
            QualityScaleArg::Solexa => QualityScale::Solexa,
            QualityScaleArg::SolexaOld => QualityScale::SolexaOld,
        }
    }
}

/// Sort FASTQ files by read name.
#[derive(Debug, Parser)]
#[command(
    name = "sort",
    about = "\x1b[38;5;72m[FASTQ]\x1b[0m  \x1b[36mSort FASTQ files by read name using external merge-sort\x1b[0m",
    long_about = r#"
Sort FASTQ files by read name using external merge-sort.

Records are read into memory up to the batch size; each full batch is
stable-sorted and written to a numbered temporary next to the output
(reads_batch1.fastq, reads_batch2.fastq, ...). The batches are then merged
in a single streaming pass into reads_sorted.fastq and the temporaries are
deleted. Memory use is bounded by the batch size however large the input.

Names compare lexicographically as bytes, on the full header line. Records
sharing a name keep their input order within a batch; across batches they
come out in batch order.

Gzipped inputs (detected by content, not name) are decompressed on the fly.
Output and temporaries are always written uncompressed: sorting reads.fastq.gz
produces reads_sorted.fastq.

EXAMPLES:

  # Sort a single file; output lands next to the input
  fqsort sort reads.fastq

  # Sort into a separate directory with a smaller memory footprint
  fqsort sort reads.fastq.gz -o sorted/ --batch-size 250000

  # Sort every FASTQ file under a directory tree
  fqsort sort data/ --recursive -o sorted/

  # Solexa-scaled qualities
  fqsort sort old_reads.fastq -q solexa
"#
)]
pub struct Sort {
    /// Input FASTQ file, or a directory to search for FASTQ files.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory for sorted output and batch temporaries.
    ///
    /// Defaults to each input file's own directory. Must already exist.
    #[arg(short = 'o', long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// Maximum records held in memory at once.
    ///
    /// Larger batches sort faster but use more memory; smaller batches
    /// spill more temporaries.
    #[arg(
        short = 'b',
        long = "batch-size",
        default_value_t = DEFAULT_BATCH_SIZE as u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub batch_size: u64,

    /// Quality scale the input is validated against.
    #[arg(short = 'q', long = "qual-scale", value_enum, default_value = "phred")]
    pub qual_scale: QualityScaleArg,

    /// Search subdirectories when INPUT is a directory.
    #[arg(long = "recursive")]
    pub recursive: bool,

    /// Abort a directory search after this many files.
    ///
    /// Guards against circular symlinks during recursive searches.
    #[arg(
        long = "max-files",
        default_value_t = DEFAULT_MAX_FILES as u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub max_files: u64,
}

impl Command for Sort {
    fn execute(&self) -> Result<()> {
        if let Some(dir) = &self.output_dir {
            if !dir.is_dir() {
                bail!("Output directory '{}' does not exist", dir.display());
            }
        }

        let files = discovery::find_files(
            &self.input,
            FASTQ_EXTENSIONS,
            self.recursive,
            self.max_files as usize,
        )?;

        let timer = OperationTimer::new("Sorting FASTQ");
        info!("Input: {}", self.input.display());
        if let Some(dir) = &self.output_dir {
            info!("Output dir: {}", dir.display());
        }
        info!("Batch size: {}", format_count(self.batch_size));
        info!("Quality scale: {}", QualityScale::from(self.qual_scale));
        if files.len() > 1 {
            info!("Found {} FASTQ files", files.len());
        }

        let mut total_records: u64 = 0;
        let mut total_batches: usize = 0;
        for file in &files {
            let mut sorter = FastqSorter::new(file)
                .batch_size(self.batch_size as usize)
                .quality_scale(self.qual_scale.into());
            if let Some(dir) = &self.output_dir {
                sorter = sorter.output_dir(dir);
            }
            let stats = sorter.sort()?;
            info!("Wrote {}", stats.output.display());
            total_records += stats.records;
            total_batches += stats.batches;
        }

        info!("=== Summary ===");
        info!("Files sorted: {}", files.len());
        info!("Records: {}", format_count(total_records));
        if total_batches > 0 {
            info!("Batches spilled: {total_batches}");
        }

        timer.log_completion(total_records);
        Ok(())
    }
}
