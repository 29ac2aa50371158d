//! FASTQ reading and writing with transparent gzip handling.
//!
//! [`FastqSource`] parses four-line FASTQ records and validates quality
//! strings against the configured [`QualityScale`]. Compression is detected
//! from the file's magic bytes, not its name, so a gzipped file with a plain
//! name still decompresses. [`FastqSink`] writes four-line records, gzipping
//! when the target path ends in `.gz`, and finalizes the stream on
//! [`finish`](crate::record::RecordSink::finish).
//!
//! Parse failures surface as [`FqsortError::Format`]; everything the OS
//! refuses surfaces as [`FqsortError::Io`] with a diagnostic reason.

use crate::errors::{FqsortError, Result};
use crate::record::{FastqRecord, RecordSink, RecordSource};
use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use seq_io::fastq::Reader as FastqReader;
use seq_io::fastq::Record;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

const BUFFER_SIZE: usize = 1024 * 1024;

/// Quality-string encoding, named as the original tool named them.
///
/// `solexa` and `solexa-old` share a byte range: scores start at -5, encoded
/// from `;` (59). `phred` starts at 0, encoded from `!` (33). All scales top
/// out at `~` (126).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QualityScale {
    /// Phred+33 (Sanger)
    #[default]
    Phred,
    /// Solexa+64
    Solexa,
    /// Solexa+64, pre-1.3 pipeline
    SolexaOld,
}

impl QualityScale {
    fn min_byte(self) -> u8 {
        match self {
            QualityScale::Phred => b'!',
            QualityScale::Solexa | QualityScale::SolexaOld => b';',
        }
    }

    /// First quality byte outside this scale's range, if any.
    fn check(self, qual: &[u8]) -> Option<(usize, u8)> {
        let min = self.min_byte();
        qual.iter().enumerate().find(|&(_, &b)| b < min || b > b'~').map(|(i, &b)| (i, b))
    }
}

impl std::fmt::Display for QualityScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            QualityScale::Phred => "phred",
            QualityScale::Solexa => "solexa",
            QualityScale::SolexaOld => "solexa-old",
        };
        write!(f, "{name}")
    }
}

/// Compression format detected from file content
#[derive(Debug, Clone, Copy, PartialEq)]
enum CompressionFormat {
    /// Gzip (including BGZF, which decodes as concatenated gzip members)
    Gzip,
    /// Uncompressed file
    Plain,
}

/// Detect compression by the gzip magic number (0x1f 0x8b). Files shorter
/// than two bytes are plain.
fn detect_compression_format(path: &Path) -> Result<CompressionFormat> {
    let mut file = File::open(path).map_err(|e| open_error(path, &e))?;
    let mut header = [0u8; 2];
    // On Linux a directory opens read-only without complaint and the failure
    // only surfaces on the first read, so that error is sharpened too.
    let bytes_read = file.read(&mut header).map_err(|e| open_error(path, &e))?;
    if bytes_read == 2 && header[0] == 0x1f && header[1] == 0x8b {
        Ok(CompressionFormat::Gzip)
    } else {
        Ok(CompressionFormat::Plain)
    }
}

/// Open a FASTQ file for reading, decompressing gzip content transparently.
fn open_fastq_reader(path: &Path) -> Result<Box<dyn BufRead + Send>> {
    let format = detect_compression_format(path)?;
    let file = File::open(path).map_err(|e| open_error(path, &e))?;
    match format {
        CompressionFormat::Gzip => {
            Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, MultiGzDecoder::new(file))))
        }
        CompressionFormat::Plain => Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, file))),
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

fn open_error(path: &Path, err: &std::io::Error) -> FqsortError {
    let reason = if path.is_dir() {
        "is a directory; expected a file".to_string()
    } else {
        err.to_string()
    };
    FqsortError::Io { path: display(path), reason }
}

/// Sharpen the reason for a failed file creation: directory in the way,
/// missing parent, or a permissions problem.
fn create_error(path: &Path, err: &std::io::Error) -> FqsortError {
    let reason = if path.is_dir() {
        "is a directory; expected a file path".to_string()
    } else {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        if !parent.is_dir() {
            format!("parent directory '{}' does not exist", parent.display())
        } else if err.kind() == ErrorKind::PermissionDenied {
            format!("permission denied (check write permissions for '{}')", parent.display())
        } else {
            err.to_string()
        }
    };
    FqsortError::Io { path: display(path), reason }
}

/// A FASTQ file opened for reading.
pub struct FastqSource {
    path: String,
    reader: FastqReader<Box<dyn BufRead + Send>>,
    quality_scale: QualityScale,
}

impl FastqSource {
    /// Open `path`, sniffing for gzip compression.
    pub fn open<P: AsRef<Path>>(path: P, quality_scale: QualityScale) -> Result<Self> {
        let path = path.as_ref();
        let reader = FastqReader::with_capacity(open_fastq_reader(path)?, BUFFER_SIZE);
        Ok(Self { path: display(path), reader, quality_scale })
    }
}

impl RecordSource for FastqSource {
    fn next_record(&mut self) -> Result<Option<FastqRecord>> {
        let Some(result) = self.reader.next() else {
            return Ok(None);
        };
        match result {
            Ok(rec) => {
                if let Some((pos, byte)) = self.quality_scale.check(rec.qual()) {
                    return Err(FqsortError::Format {
                        path: self.path.clone(),
                        reason: format!(
                            "quality byte {byte:#04x} at position {pos} is outside the {} scale in record '{}'",
                            self.quality_scale,
                            String::from_utf8_lossy(rec.head()),
                        ),
                    });
                }
                Ok(Some(FastqRecord::new(
                    rec.head().to_vec(),
                    rec.seq().to_vec(),
                    rec.qual().to_vec(),
                )))
            }
            Err(seq_io::fastq::Error::Io(e)) => Err(FqsortError::io(self.path.clone(), &e)),
            Err(e) => Err(FqsortError::Format { path: self.path.clone(), reason: e.to_string() }),
        }
    }
}

enum SinkInner {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl SinkInner {
    fn writer(&mut self) -> &mut dyn Write {
        match self {
            SinkInner::Plain(w) => w,
            SinkInner::Gzip(w) => w,
        }
    }
}

/// A FASTQ file opened for writing. Replaces any existing file at the path.
pub struct FastqSink {
    path: String,
    inner: SinkInner,
}

impl FastqSink {
    /// Create (or truncate) `path`. A `.gz` target is written gzipped.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| create_error(path, &e))?;
        let writer = BufWriter::with_capacity(BUFFER_SIZE, file);
        let gz = path
            .extension()
            .is_some_and(|ext| ext.as_encoded_bytes().eq_ignore_ascii_case(b"gz"));
        let inner = if gz {
            SinkInner::Gzip(GzEncoder::new(writer, Compression::default()))
        } else {
            SinkInner::Plain(writer)
        };
        Ok(Self { path: display(path), inner })
    }
}

impl RecordSink for FastqSink {
    fn write_record(&mut self, record: &FastqRecord) -> Result<()> {
        let w = self.inner.writer();
        let io_result = (|| {
            w.write_all(b"@")?;
            w.write_all(record.name())?;
            w.write_all(b"\n")?;
            w.write_all(record.seq())?;
            w.write_all(b"\n+\n")?;
            w.write_all(record.qual())?;
            w.write_all(b"\n")
        })();
        io_result.map_err(|e| FqsortError::io(self.path.clone(), &e))
    }

    fn finish(self) -> Result<()> {
        let io_result = match self.inner {
            SinkInner::Plain(mut w) => w.flush(),
            SinkInner::Gzip(encoder) => encoder.finish().and_then(|mut w| w.flush()),
        };
        io_result.map_err(|e| FqsortError::io(self.path, &e))
    }
}
