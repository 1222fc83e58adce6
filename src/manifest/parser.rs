//! Manifest text parsing
//!
//! Manifests are newline-delimited (CR-LF tolerated), tab-separated lists.
//! Blank lines are skipped. Launcher lists use `path, size, fingerprint`;
//! game lists use `path, fingerprint, size[, location]`.

use crate::error::ParseError;
use crate::manifest::record::{GamePatchFile, LauncherPatchFile, PatchLocation};
use std::borrow::Cow;
use tracing::{debug, instrument};

/// Decode raw manifest bytes. Invalid UTF-8 is replaced rather than rejected.
pub fn decode(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

/// Parse a launcher list into records, in line order.
#[instrument(skip(text), fields(bytes = text.len()))]
pub fn parse_launcher_list(text: &str) -> Result<Vec<LauncherPatchFile>, ParseError> {
    let mut records = Vec::new();
    for (line, fields) in rows(text) {
        if fields.len() != 3 {
            return Err(ParseError::FieldCount {
                line,
                expected: "3",
                found: fields.len(),
            });
        }
        records.push(LauncherPatchFile {
            path: fields[0].to_string(),
            size: parse_size(line, fields[1])?,
            fingerprint: fields[2].to_string(),
        });
    }
    debug!(records = records.len(), "Parsed launcher list");
    Ok(records)
}

/// Parse a game patch list into records, in line order.
#[instrument(skip(text), fields(bytes = text.len()))]
pub fn parse_game_list(text: &str) -> Result<Vec<GamePatchFile>, ParseError> {
    let mut records = Vec::new();
    for (line, fields) in rows(text) {
        if !(3..=4).contains(&fields.len()) {
            return Err(ParseError::FieldCount {
                line,
                expected: "3 or 4",
                found: fields.len(),
            });
        }
        records.push(GamePatchFile {
            path: fields[0].to_string(),
            fingerprint: fields[1].to_string(),
            size: parse_size(line, fields[2])?,
            location: PatchLocation::from_flag(fields.get(3).copied()),
        });
    }
    debug!(records = records.len(), "Parsed game list");
    Ok(records)
}

/// Non-blank lines with their 1-based line numbers, split into fields.
/// Lines holding only whitespace count as blank.
fn rows(text: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    text.split('\n')
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.strip_suffix('\r').unwrap_or(line)))
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(line_no, line)| (line_no, line.split('\t').collect()))
}

fn parse_size(line: usize, value: &str) -> Result<u64, ParseError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ParseError::InvalidSize {
            line,
            value: value.to_string(),
        })
}
