//! External merge-sort of FASTQ records by read name.
//!
//! The sort runs in bounded memory whatever the input size:
//!
//! 1. **Batch phase**: stream records into a buffer of at most `batch_size`
//! 2. **Spill phase**: stable-sort each full batch, write it to a `_batchN`
//!    sibling file
//! 3. **Merge phase**: k-way merge of all batches into the `_sorted` output
//! 4. **Cleanup phase**: delete the batch files once the output is closed
//!
//! Inputs that fit in one batch are sorted in memory and written directly.
//! Equal names keep their arrival order within a batch; across batches they
//! follow batch order, the merge tie-break being `(name, batch index)`.

pub mod batch;
pub mod external;
pub mod merge;

pub use external::{DEFAULT_BATCH_SIZE, FastqSorter, SortState, SortStats, sort_file};
pub use merge::KWayMerge;
