//! Record model and the source/sink contracts the sort engine works over.
//!
//! A [`FastqRecord`] owns its bytes, so records survive past the reader that
//! produced them and can sit in a batch buffer or a merge heap. The sort key
//! is the full header line (identifier plus description, without the leading
//! `@`), compared lexicographically as bytes. Payload bytes never influence
//! ordering.
//!
//! [`RecordSource`] and [`RecordSink`] are the seams between the engine and
//! concrete FASTQ I/O; the merge and the run loop are generic over them, so
//! tests can drive the engine from in-memory vectors.

use crate::errors::Result;
use std::cmp::Ordering;

/// A single FASTQ record held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastqRecord {
    head: Vec<u8>,
    seq: Vec<u8>,
    qual: Vec<u8>,
}

impl FastqRecord {
    /// Create a record from its three components. `head` excludes the
    /// leading `@`.
    #[must_use]
    pub fn new(head: Vec<u8>, seq: Vec<u8>, qual: Vec<u8>) -> Self {
        Self { head, seq, qual }
    }

    /// The full header line, which is also the sort key.
    #[must_use]
    pub fn name(&self) -> &[u8] {
        &self.head
    }

    /// The sequence bases.
    #[must_use]
    pub fn seq(&self) -> &[u8] {
        &self.seq
    }

    /// The quality string, one byte per base.
    #[must_use]
    pub fn qual(&self) -> &[u8] {
        &self.qual
    }

    /// Compare two records by name only.
    #[must_use]
    pub fn cmp_by_name(&self, other: &Self) -> Ordering {
        self.head.cmp(&other.head)
    }
}

/// A pull-based stream of records.
pub trait RecordSource {
    /// Return the next record, `Ok(None)` once the stream is exhausted.
    fn next_record(&mut self) -> Result<Option<FastqRecord>>;
}

/// A destination for records.
pub trait RecordSink {
    /// Append one record.
    fn write_record(&mut self, record: &FastqRecord) -> Result<()>;

    /// Flush and close the destination. Nothing is guaranteed durable until
    /// this returns `Ok`.
    fn finish(self) -> Result<()>
    where
        Self: Sized;
}
