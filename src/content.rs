//! File content retrieval
//!
//! Content is addressed by the file's full original path, size-checked
//! before any fetch, and routed to the repository the record names.

use crate::error::{ApiError, ContentError};
use crate::manifest::{GamePatchFile, PatchFile, PatchLocation, Repositories};
use crate::transport::{fetch_with_backup, ManifestTransport};
use crate::tree::filter;
use crate::tree::node::{Directory, FileSystemEntry};
use crate::tree::path;
use serde::Serialize;
use tracing::{debug, instrument};

/// Marker preceding the trailing version suffix of stored file names
const VERSION_MARKER: &str = ".pat";

/// Viewer able to present a file's content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewer {
    Text,
    Script,
    Bitmap,
}

impl Viewer {
    /// Whether the content is meant to be read as text
    pub fn is_textual(&self) -> bool {
        matches!(self, Viewer::Text | Viewer::Script)
    }
}

/// Viewer for an extension; `None` means download only
pub fn viewer_for(extension: &str) -> Option<Viewer> {
    match extension {
        "txt" => Some(Viewer::Text),
        "pso2" => Some(Viewer::Script),
        "bmp" => Some(Viewer::Bitmap),
        _ => None,
    }
}

/// Strip everything from the last version marker on.
///
/// Names without the marker are returned whole.
pub fn strip_version_marker(name: &str) -> &str {
    match name.rfind(VERSION_MARKER) {
        Some(index) => &name[..index],
        None => name,
    }
}

/// Extension of a stored file name: the text after the final `.` once the
/// version marker is stripped. `None` when no `.` remains.
pub fn file_extension(name: &str) -> Option<&str> {
    let stripped = strip_version_marker(name);
    stripped.rfind('.').map(|index| &stripped[index + 1..])
}

/// A size-checked request for one file's content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRequest {
    full_path: String,
    size: u64,
    location: PatchLocation,
}

impl ContentRequest {
    /// Refuse files larger than `limit` before anything is fetched
    pub fn new(full_path: impl Into<String>, size: u64, limit: u64) -> Result<Self, ContentError> {
        let full_path = full_path.into();
        if size > limit {
            return Err(ContentError::TooLarge {
                path: full_path,
                size,
                limit,
            });
        }
        Ok(Self {
            full_path,
            size,
            location: PatchLocation::Patch,
        })
    }

    /// Read from the given repository instead of the patch repository
    pub fn with_location(mut self, location: PatchLocation) -> Self {
        self.location = location;
        self
    }

    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn location(&self) -> PatchLocation {
        self.location
    }

    /// Last path segment
    pub fn file_name(&self) -> &str {
        self.full_path
            .rsplit(path::SEPARATOR)
            .next()
            .unwrap_or(&self.full_path)
    }

    /// File name with the version suffix removed
    pub fn display_name(&self) -> &str {
        strip_version_marker(self.file_name())
    }

    pub fn file_extension(&self) -> Option<&str> {
        file_extension(self.file_name())
    }

    pub fn viewer(&self) -> Option<Viewer> {
        self.file_extension().and_then(viewer_for)
    }
}

/// Records that know which repository holds their content
pub trait ContentSource: PatchFile {
    fn location(&self) -> PatchLocation {
        PatchLocation::Patch
    }
}

impl ContentSource for crate::manifest::LauncherPatchFile {}

impl ContentSource for GamePatchFile {
    fn location(&self) -> PatchLocation {
        self.location
    }
}

impl ContentSource for crate::catalog::CatalogFile {
    fn location(&self) -> PatchLocation {
        match self {
            crate::catalog::CatalogFile::Launcher(file) => file.location(),
            crate::catalog::CatalogFile::Game(file) => file.location(),
        }
    }
}

/// Find a file by its full path
pub fn locate<'a, F: PatchFile>(fs: &'a Directory<F>, full_path: &str) -> Result<&'a F, ContentError> {
    let segments = path::split_segments(full_path);
    let not_found = || ContentError::NotFound(full_path.to_string());
    let (leaf, parents) = segments.split_last().ok_or_else(not_found)?;
    filter::filter(fs, parents)
        .iter()
        .find_map(|entry| match entry {
            FileSystemEntry::File(file) if file.path() == *leaf => Some(file),
            _ => None,
        })
        .ok_or_else(not_found)
}

/// Build a request for the file at `full_path`, enforcing `limit`
pub fn request_for<F: ContentSource>(
    fs: &Directory<F>,
    full_path: &str,
    limit: u64,
) -> Result<ContentRequest, ContentError> {
    let file = locate(fs, full_path)?;
    let full_path = path::join_segments(&path::split_segments(full_path));
    Ok(ContentRequest::new(full_path, file.size(), limit)?.with_location(file.location()))
}

/// Fetch a file's bytes from its repository, primary then backup
#[instrument(skip(transport, repositories), fields(path = request.full_path()))]
pub async fn fetch_content<T: ManifestTransport + ?Sized>(
    transport: &T,
    repositories: &Repositories,
    request: &ContentRequest,
) -> Result<Vec<u8>, ApiError> {
    let (primary, backup) = match request.location() {
        PatchLocation::Patch => (&repositories.patch, &repositories.patch_backup),
        PatchLocation::Master => (&repositories.master, &repositories.master_backup),
    };
    let bytes = fetch_with_backup(
        transport,
        request.full_path(),
        primary.as_deref(),
        backup.as_deref(),
    )
    .await?;
    debug!(bytes = bytes.len(), "Content fetched");
    Ok(bytes)
}
