//! Management document parsing
//!
//! The management document is a `key=value` list naming the repository
//! locations every manifest and content fetch is resolved against.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Repository base URLs announced by the management document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repositories {
    pub master: Option<String>,
    pub patch: Option<String>,
    pub master_backup: Option<String>,
    pub patch_backup: Option<String>,
}

impl Repositories {
    /// Build from a parsed management document
    pub fn from_management(entries: &HashMap<String, String>) -> Self {
        Self {
            master: entries.get("MasterURL").cloned(),
            patch: entries.get("PatchURL").cloned(),
            master_backup: entries.get("BackupMasterURL").cloned(),
            patch_backup: entries.get("BackupPatchURL").cloned(),
        }
    }
}

/// Parse `key=value` lines. Later keys override earlier ones; lines without `=` are ignored.
pub fn parse_management(text: &str) -> HashMap<String, String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
