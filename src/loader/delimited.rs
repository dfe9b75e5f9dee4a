//! Delimited-text reading and delimiter detection.

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::schema::RawTable;

/// Delimiters tried when sniffing pasted text, in order of preference.
pub const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Detects the field delimiter of a block of delimited text.
///
/// A candidate qualifies when every non-blank line splits into the same
/// number of fields and that number is at least two. Among qualifying
/// candidates the one producing the most fields wins; ties go to the
/// earlier entry of [`CANDIDATE_DELIMITERS`].
///
/// # Examples
///
/// ```
/// use benefit_calculator::loader::detect_delimiter;
///
/// assert_eq!(detect_delimiter("periodo;valor\n2015;1000,50\n"), Some(b';'));
/// assert_eq!(detect_delimiter("periodo,valor\n2015,1000\n"), Some(b','));
/// assert_eq!(detect_delimiter("just one column\n"), None);
/// ```
pub fn detect_delimiter(text: &str) -> Option<u8> {
    let mut best: Option<(u8, usize)> = None;

    for &delimiter in CANDIDATE_DELIMITERS.iter() {
        if let Some(width) = consistent_width(text, delimiter) {
            if best.is_none_or(|(_, best_width)| width > best_width) {
                best = Some((delimiter, width));
            }
        }
    }

    if let Some((delimiter, width)) = best {
        debug!(delimiter = %(delimiter as char).escape_default(), width, "Detected delimiter");
    }
    best.map(|(delimiter, _)| delimiter)
}

/// Returns the common field count of all records, if there is one and it is at least two.
fn consistent_width(text: &str, delimiter: u8) -> Option<usize> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut width = None;
    for record in reader.records() {
        let len = record.ok()?.len();
        match width {
            None => width = Some(len),
            Some(w) if w != len => return None,
            Some(_) => {}
        }
    }

    width.filter(|w| *w >= 2)
}

/// Drops whitespace-only lines so they do not count as one-field records.
pub(crate) fn strip_blank_lines(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reads header and rows from delimited bytes with a known delimiter.
pub(crate) fn read_table(bytes: &[u8], delimiter: u8) -> EngineResult<RawTable> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(bytes);

    let header: Vec<String> = reader
        .headers()
        .map_err(|e| EngineError::Parse {
            message: format!("failed to read header row: {}", e),
        })?
        .iter()
        .map(str::to_string)
        .collect();

    if header.is_empty() {
        return Err(EngineError::Parse {
            message: "no header row found".to_string(),
        });
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| EngineError::Parse {
            message: e.to_string(),
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable { header, rows })
}
