//! Shared test utilities for integration tests
//!
//! Record constructors, tree inspection helpers and an on-disk mirror of a
//! patch repository.

use patchtree::manifest::{GamePatchFile, LauncherPatchFile, PatchFile, PatchLocation};
use patchtree::tree::node::{self, FileSystem, FileSystemEntry};
use std::path::Path;
use tempfile::TempDir;

pub fn launcher(path: &str, size: u64) -> LauncherPatchFile {
    LauncherPatchFile {
        path: path.to_string(),
        size,
        fingerprint: format!("L-{}", path),
    }
}

pub fn game(path: &str, size: u64, location: PatchLocation) -> GamePatchFile {
    GamePatchFile {
        path: path.to_string(),
        size,
        fingerprint: format!("G-{}", path),
        location,
    }
}

/// Full paths of every file, depth-first
pub fn full_paths<F: PatchFile>(fs: &FileSystem<F>) -> Vec<String> {
    node::flatten(fs)
        .into_iter()
        .map(|f| f.path().to_string())
        .collect()
}

/// Names at one level, in stored order
pub fn names<F: PatchFile>(level: &[FileSystemEntry<F>]) -> Vec<String> {
    level.iter().map(|e| e.name().to_string()).collect()
}

pub const MANAGEMENT_URL: &str = "http://patch.example/patch_prod/patches/management_beta.txt";

/// A mirror directory laid out the way the relay would serve it:
/// management document at its URL path, manifests under `patch/`
pub struct MirrorFixture {
    pub dir: TempDir,
}

impl MirrorFixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "patch_prod/patches/management_beta.txt",
            "MasterURL=http://patch.example/master/\r\n\
             PatchURL=http://patch.example/patch/\r\n\
             BackupMasterURL=http://backup.example/master/\r\n\
             BackupPatchURL=http://backup.example/patch/\r\n",
        );
        write(
            dir.path(),
            "patch/launcherlist.txt",
            "launcher/readme.txt.pat\t12\tAAAA\r\nlauncher/bin/app.exe.pat\t2048\tBBBB\r\n",
        );
        write(
            dir.path(),
            "patch/patchlist_classic.txt",
            "data/win32/0001\tC1\t100\tm\ndata/license.txt.pat\tC2\t20\tp\n",
        );
        write(
            dir.path(),
            "patch/patchlist_reboot.txt",
            "data/win32reboot/00/0002\tR1\t300\tp\ndata/win32/0003\tR2\t5\n",
        );
        write(dir.path(), "patch/launcher/readme.txt.pat", "hello from the launcher");
        write(dir.path(), "master/data/win32/0001", "master-bytes");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn overwrite(&self, relative: &str, content: &str) {
        write(self.dir.path(), relative, content);
    }
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}
