//! CLI presentation: text and json formatters per command.

use crate::content::ContentRequest;
use crate::error::ApiError;
use crate::listing::{format_size, EntryKind, ListingRow};
use crate::manifest::PatchFile;
use crate::tree::node::FileSystemEntry;
use comfy_table::Table;
use owo_colors::OwoColorize;

pub fn format_listing_text(rows: &[ListingRow], color: bool) -> String {
    if rows.is_empty() {
        return "Nothing here.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Name", "Size", "Fingerprint"]);
    for row in rows {
        let name = match (row.kind, color) {
            (EntryKind::Directory, true) => format!("{}/", row.name.blue().bold()),
            (EntryKind::Directory, false) => format!("{}/", row.name),
            (EntryKind::File, _) => row.name.clone(),
        };
        let fingerprint = row.fingerprint.clone().unwrap_or_else(|| "-".to_string());
        table.add_row(vec![name, format_size(row.size), fingerprint]);
    }
    table.to_string()
}

pub fn format_listing_json(rows: &[ListingRow]) -> Result<String, ApiError> {
    serde_json::to_string_pretty(rows).map_err(|e| ApiError::Output(e.to_string()))
}

/// Indented tree, directories first as stored. `depth` limits how many
/// levels below `level` are expanded.
pub fn format_tree_text<F: PatchFile>(level: &[FileSystemEntry<F>], depth: Option<usize>) -> String {
    let mut lines = Vec::new();
    push_tree_lines(level, 0, depth, &mut lines);
    if lines.is_empty() {
        return "Nothing here.".to_string();
    }
    lines.join("\n")
}

fn push_tree_lines<F: PatchFile>(
    level: &[FileSystemEntry<F>],
    indent: usize,
    depth: Option<usize>,
    lines: &mut Vec<String>,
) {
    for entry in level {
        let pad = "  ".repeat(indent);
        match entry {
            FileSystemEntry::Directory(dir) => {
                lines.push(format!("{}{}/", pad, dir.segment));
                if depth.map_or(true, |max| indent + 1 < max) {
                    push_tree_lines(&dir.children, indent + 1, depth, lines);
                }
            }
            FileSystemEntry::File(file) => {
                lines.push(format!("{}{} ({})", pad, file.path(), format_size(file.size())));
            }
        }
    }
}

pub fn format_size_summary(location: &str, bytes: u64) -> String {
    let location = if location.is_empty() { "/" } else { location };
    format!("{}: {} ({} bytes)", location, format_size(bytes), bytes)
}

pub fn format_routes(routes: &[String]) -> String {
    if routes.is_empty() {
        return "No directories.".to_string();
    }
    routes.join("\n")
}

/// Summary for content that is not printed as text
pub fn format_show_summary(request: &ContentRequest, fetched: usize) -> String {
    let viewer = match request.viewer() {
        Some(viewer) => format!("{:?}", viewer).to_lowercase(),
        None => "none (download only)".to_string(),
    };
    format!(
        "{}\n  Path: {}\n  Repository: {}\n  Size: {}\n  Fetched: {} bytes\n  Viewer: {}",
        request.display_name(),
        request.full_path(),
        request.location().name(),
        format_size(request.size()),
        fetched,
        viewer
    )
}
