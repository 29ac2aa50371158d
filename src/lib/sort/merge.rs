//! K-way streaming merge of sorted record sources.
//!
//! The merge keeps one record per source in a min-heap, so memory stays
//! O(k) however large the sources are. Ties break by `(name, source index)`,
//! both ascending: when the same name appears in several sources, the
//! lower-numbered source drains first. With sources numbered by batch, equal
//! names come out in batch order.

use crate::errors::Result;
use crate::record::{FastqRecord, RecordSource};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Entry in the merge heap.
struct HeapEntry {
    record: FastqRecord,
    source_idx: usize,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.record.name() == other.record.name() && self.source_idx == other.source_idx
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.record.cmp_by_name(&other.record).then_with(|| self.source_idx.cmp(&other.source_idx))
    }
}

/// Merge iterator over any number of sorted sources.
///
/// Yields `Result<FastqRecord>` in non-decreasing name order, assuming each
/// source is itself sorted. After yielding an error the iterator is fused:
/// the merge cannot continue past a broken source.
pub struct KWayMerge<S> {
    sources: Vec<S>,
    heap: BinaryHeap<Reverse<HeapEntry>>,
    failed: bool,
}

impl<S: RecordSource> KWayMerge<S> {
    /// Seed the heap with the first record of every non-empty source.
    pub fn new(mut sources: Vec<S>) -> Result<Self> {
        let mut heap = BinaryHeap::with_capacity(sources.len());
        for (source_idx, source) in sources.iter_mut().enumerate() {
            if let Some(record) = source.next_record()? {
                heap.push(Reverse(HeapEntry { record, source_idx }));
            }
        }
        Ok(Self { sources, heap, failed: false })
    }
}

impl<S: RecordSource> Iterator for KWayMerge<S> {
    type Item = Result<FastqRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let Reverse(entry) = self.heap.pop()?;
        match self.sources[entry.source_idx].next_record() {
            Ok(Some(record)) => {
                self.heap.push(Reverse(HeapEntry { record, source_idx: entry.source_idx }));
            }
            Ok(None) => {}
            Err(e) => {
                self.failed = true;
                return Some(Err(e));
            }
        }
        Some(Ok(entry.record))
    }
}
