//! Batch persistence: sort one buffer of records and write it out.

use crate::errors::Result;
use crate::fastq::FastqSink;
use crate::record::{FastqRecord, RecordSink};
use std::path::Path;

/// Sort `records` by name and write them to `path`, replacing any existing
/// file. The sort is stable, so records with equal names keep the order they
/// arrived in.
pub fn write_batch<P: AsRef<Path>>(records: &mut [FastqRecord], path: P) -> Result<()> {
    records.sort_by(|a, b| a.cmp_by_name(b));
    let mut sink = FastqSink::create(path)?;
    for record in records.iter() {
        sink.write_record(record)?;
    }
    sink.finish()
}
