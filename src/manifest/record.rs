//! Flat file records produced by manifest parsing

use serde::{Deserialize, Serialize};

/// Common surface of every manifest record kind.
///
/// Tree operations are generic over this trait; only the path is rewritten
/// while a record is peeled into its directory chain.
pub trait PatchFile: Clone {
    /// Path as currently stored (full path before expansion, leaf segment after)
    fn path(&self) -> &str;

    /// Replace the stored path
    fn set_path(&mut self, path: String);

    /// Size in bytes
    fn size(&self) -> u64;

    /// Opaque content hash
    fn fingerprint(&self) -> &str;
}

/// Upstream repository holding a game file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchLocation {
    /// Master repository (`m`, the default)
    Master,
    /// Patch repository (`p`)
    Patch,
}

impl PatchLocation {
    /// Map a manifest flag to a location. Only `p` selects the patch repository.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("p") => PatchLocation::Patch,
            _ => PatchLocation::Master,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PatchLocation::Master => "master",
            PatchLocation::Patch => "patch",
        }
    }
}

/// Record from the launcher list (base kind)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LauncherPatchFile {
    pub path: String,
    pub size: u64,
    pub fingerprint: String,
}

/// Record from a game patch list (extended kind)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamePatchFile {
    pub path: String,
    pub size: u64,
    pub fingerprint: String,
    pub location: PatchLocation,
}

impl PatchFile for LauncherPatchFile {
    fn path(&self) -> &str {
        &self.path
    }

    fn set_path(&mut self, path: String) {
        self.path = path;
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

impl PatchFile for GamePatchFile {
    fn path(&self) -> &str {
        &self.path
    }

    fn set_path(&mut self, path: String) {
        self.path = path;
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}
