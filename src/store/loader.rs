//! Loading records from JSON files.
//!
//! Two layouts are accepted. A `.jsonl` / `.ndjson` file holds one record
//! object per line:
//!
//! ```jsonl
//! {"id": "1", "title": "Rust Programming", "tags": ["rust"], "status": "published"}
//! {"id": "2", "title": "Python Basics"}
//! ```
//!
//! Any other file must contain a JSON array of record objects.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use log::warn;

use crate::content::ContentRecord;
use crate::error::Result;

/// Load records from `path`, choosing the layout by file extension.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<ContentRecord>> {
    let path = path.as_ref();
    let is_lines = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jsonl") || ext.eq_ignore_ascii_case("ndjson"));

    let file = File::open(path)?;
    if is_lines {
        parse_records_jsonl(BufReader::new(file))
    } else {
        let mut text = String::new();
        BufReader::new(file).read_to_string(&mut text)?;
        parse_records_json(&text)
    }
}

/// Parse a JSON array of records.
pub fn parse_records_json(text: &str) -> Result<Vec<ContentRecord>> {
    Ok(serde_json::from_str(text)?)
}

/// Parse JSON Lines. Blank lines are skipped; lines that are not a valid
/// record are logged and skipped.
pub fn parse_records_jsonl<R: BufRead>(reader: R) -> Result<Vec<ContentRecord>> {
    let mut records = Vec::new();
    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<ContentRecord>(line) {
            Ok(record) => records.push(record),
            Err(e) => warn!("skipping line {}: {e}", line_num + 1),
        }
    }
    Ok(records)
}
