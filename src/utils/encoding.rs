//! Binary sniffing and encoding-tolerant file reading

use chardetng::EncodingDetector;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Bytes inspected when classifying a file as binary vs text.
const SNIFF_BYTES: usize = 8 * 1024;

/// Fraction of suspicious bytes above which a file counts as binary.
const BINARY_RATIO: f64 = 0.30;

/// Classify a file as binary by sniffing its first bytes.
///
/// Empty files are text. A NUL byte anywhere in the sample means binary.
/// Otherwise the sample is binary when too large a share of its bytes are
/// control characters outside the usual text set (tab, LF, CR, FF, ESC).
pub fn is_binary_file(path: &Path) -> io::Result<bool> {
    let mut file = File::open(path)?;
    let mut buf = [0u8; SNIFF_BYTES];
    let mut read = 0;
    while read < buf.len() {
        let n = file.read(&mut buf[read..])?;
        if n == 0 {
            break;
        }
        read += n;
    }
    let sample = &buf[..read];

    if sample.is_empty() {
        return Ok(false);
    }
    if sample.contains(&0) {
        return Ok(true);
    }

    let suspicious = sample
        .iter()
        .filter(|&&b| b < 0x20 && !matches!(b, b'\t' | b'\n' | b'\r' | 0x0c | 0x1b))
        .count();
    Ok((suspicious as f64) / (sample.len() as f64) > BINARY_RATIO)
}

/// Read a file's full content as text, tolerating non-UTF-8 encodings.
///
/// Valid UTF-8 passes through untouched; anything else goes through charset
/// detection and is decoded lossily. Returns the content and the name of the
/// encoding used.
pub fn read_file_safe(path: &Path) -> io::Result<(String, &'static str)> {
    let bytes = std::fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(content) => Ok((content, "utf-8")),
        Err(err) => {
            let bytes = err.into_bytes();
            let mut detector = EncodingDetector::new();
            detector.feed(&bytes, true);
            let encoding = detector.guess(None, true);
            let (content, _, _) = encoding.decode(&bytes);
            Ok((content.into_owned(), encoding.name()))
        }
    }
}
