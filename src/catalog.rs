//! Patch Catalog
//!
//! Owns the launcher and game file sets: fetches their manifests, builds and
//! merges trees, sorts them once and publishes the finished tree by swapping
//! an `Arc`. Readers take snapshots and never observe a tree mid-build.

use crate::error::{ApiError, TransportError};
use crate::manifest::{
    self, decode, parse_game_list, parse_launcher_list, parse_management, GamePatchFile,
    LauncherPatchFile, PatchFile, Repositories,
};
use crate::transport::{fetch_with_backup, ManifestTransport};
use crate::tree::node::{self, DirectoryEntry, FileSystem, FileSystemEntry};
use crate::tree::{Tree, TreeBuilder};
use parking_lot::RwLock;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, instrument, warn};

/// Retrieval state of one file set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchStatus {
    NotRetrieved,
    Updating,
    Updated,
    Error,
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FetchStatus::NotRetrieved => "not retrieved",
            FetchStatus::Updating => "updating",
            FetchStatus::Updated => "updated",
            FetchStatus::Error => "error",
        };
        f.write_str(label)
    }
}

/// Logical file set selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSet {
    Launcher,
    Game,
    All,
}

impl FileSet {
    pub fn name(&self) -> &'static str {
        match self {
            FileSet::Launcher => "launcher",
            FileSet::Game => "game",
            FileSet::All => "all",
        }
    }
}

impl FromStr for FileSet {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "launcher" => Ok(FileSet::Launcher),
            "game" => Ok(FileSet::Game),
            "all" => Ok(FileSet::All),
            other => Err(ApiError::UnknownFileSet(other.to_string())),
        }
    }
}

/// Published state of one file set
#[derive(Debug, Clone)]
pub struct PatchListing<F> {
    pub status: FetchStatus,
    pub repositories: Repositories,
    pub files: Arc<FileSystem<F>>,
    /// Message of the last failed refresh, cleared on success
    pub error: Option<String>,
}

impl<F> Default for PatchListing<F> {
    fn default() -> Self {
        Self {
            status: FetchStatus::NotRetrieved,
            repositories: Repositories::default(),
            files: Arc::new(Vec::new()),
            error: None,
        }
    }
}

/// Any record shown in the combined browse view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CatalogFile {
    Launcher(LauncherPatchFile),
    Game(GamePatchFile),
}

impl PatchFile for CatalogFile {
    fn path(&self) -> &str {
        match self {
            CatalogFile::Launcher(file) => file.path(),
            CatalogFile::Game(file) => file.path(),
        }
    }

    fn set_path(&mut self, path: String) {
        match self {
            CatalogFile::Launcher(file) => file.set_path(path),
            CatalogFile::Game(file) => file.set_path(path),
        }
    }

    fn size(&self) -> u64 {
        match self {
            CatalogFile::Launcher(file) => file.size(),
            CatalogFile::Game(file) => file.size(),
        }
    }

    fn fingerprint(&self) -> &str {
        match self {
            CatalogFile::Launcher(file) => file.fingerprint(),
            CatalogFile::Game(file) => file.fingerprint(),
        }
    }
}

/// One published slot plus its refresh generation counter
struct Slot<F> {
    name: &'static str,
    listing: RwLock<PatchListing<F>>,
    generation: AtomicU64,
}

impl<F> Slot<F> {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            listing: RwLock::new(PatchListing::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Take a generation ticket and mark the set as updating
    fn begin(&self) -> u64 {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.listing.write().status = FetchStatus::Updating;
        ticket
    }

    /// Publish a finished refresh, unless a newer one has started since.
    ///
    /// A failure keeps the previously published tree.
    fn publish(
        &self,
        ticket: u64,
        outcome: Result<(Repositories, FileSystem<F>), ApiError>,
    ) -> Result<Arc<FileSystem<F>>, ApiError> {
        let mut listing = self.listing.write();
        let current = self.generation.load(Ordering::SeqCst);
        if current != ticket {
            warn!(
                set = self.name,
                ticket,
                current,
                "Discarding superseded refresh"
            );
            return Err(ApiError::Superseded(self.name.to_string()));
        }

        match outcome {
            Ok((repositories, files)) => {
                let files = Arc::new(files);
                listing.status = FetchStatus::Updated;
                listing.repositories = repositories;
                listing.files = Arc::clone(&files);
                listing.error = None;
                Ok(files)
            }
            Err(e) => {
                error!(set = self.name, error = %e, "Refresh failed");
                listing.status = FetchStatus::Error;
                listing.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    fn snapshot(&self) -> PatchListing<F>
    where
        F: Clone,
    {
        self.listing.read().clone()
    }
}

/// Launcher and game file sets over one transport
pub struct PatchCatalog<T: ?Sized> {
    transport: Arc<T>,
    management_url: String,
    launcher: Slot<LauncherPatchFile>,
    game: Slot<GamePatchFile>,
}

impl<T: ManifestTransport + ?Sized> PatchCatalog<T> {
    pub fn new(transport: Arc<T>, management_url: impl Into<String>) -> Self {
        Self {
            transport,
            management_url: management_url.into(),
            launcher: Slot::new("launcher"),
            game: Slot::new("game"),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch and parse the management document
    pub async fn fetch_repositories(&self) -> Result<Repositories, ApiError> {
        let bytes = self.transport.fetch_url(&self.management_url).await?;
        let entries = parse_management(&decode(&bytes));
        let repositories = Repositories::from_management(&entries);
        if repositories.patch.is_none() && repositories.patch_backup.is_none() {
            return Err(TransportError::MissingLocation("PatchURL".to_string()).into());
        }
        Ok(repositories)
    }

    /// Rebuild the launcher set: management, launcher list, build, sort, publish
    #[instrument(skip(self))]
    pub async fn refresh_launcher(&self) -> Result<Arc<FileSystem<LauncherPatchFile>>, ApiError> {
        let ticket = self.launcher.begin();
        let start = Instant::now();
        let outcome = self.load_launcher().await;
        let published = self.launcher.publish(ticket, outcome)?;
        info!(
            files = node::file_count(&published),
            duration_ms = start.elapsed().as_millis(),
            "Launcher file set published"
        );
        Ok(published)
    }

    async fn load_launcher(&self) -> Result<(Repositories, FileSystem<LauncherPatchFile>), ApiError> {
        let repositories = self.fetch_repositories().await?;
        let bytes = fetch_with_backup(
            self.transport.as_ref(),
            manifest::LAUNCHER_LIST,
            repositories.patch.as_deref(),
            repositories.patch_backup.as_deref(),
        )
        .await?;
        let records = parse_launcher_list(&decode(&bytes)).map_err(|source| ApiError::Parse {
            manifest: manifest::LAUNCHER_LIST.to_string(),
            source,
        })?;
        let tree = TreeBuilder::from_records(records).build();
        Ok((repositories, tree.into_sorted()))
    }

    /// Rebuild the game set: classic and reboot lists are fetched and built
    /// concurrently, reboot is merged into classic, then sorted and published
    #[instrument(skip(self))]
    pub async fn refresh_game(&self) -> Result<Arc<FileSystem<GamePatchFile>>, ApiError> {
        let ticket = self.game.begin();
        let start = Instant::now();
        let outcome = self.load_game().await;
        let published = self.game.publish(ticket, outcome)?;
        info!(
            files = node::file_count(&published),
            duration_ms = start.elapsed().as_millis(),
            "Game file set published"
        );
        Ok(published)
    }

    async fn load_game(&self) -> Result<(Repositories, FileSystem<GamePatchFile>), ApiError> {
        let repositories = self.fetch_repositories().await?;
        let (mut classic, reboot) = futures::try_join!(
            self.load_game_list(manifest::GAME_LIST_CLASSIC, &repositories),
            self.load_game_list(manifest::GAME_LIST_REBOOT, &repositories),
        )?;
        classic.merge(&reboot)?;
        Ok((repositories, classic.into_sorted()))
    }

    async fn load_game_list(
        &self,
        list: &str,
        repositories: &Repositories,
    ) -> Result<Tree<GamePatchFile>, ApiError> {
        let bytes = fetch_with_backup(
            self.transport.as_ref(),
            list,
            repositories.patch.as_deref(),
            repositories.patch_backup.as_deref(),
        )
        .await?;
        let records = parse_game_list(&decode(&bytes)).map_err(|source| ApiError::Parse {
            manifest: list.to_string(),
            source,
        })?;
        Ok(TreeBuilder::from_records(records).build())
    }

    /// Refresh both sets concurrently. Both run to completion; the first
    /// failure is returned.
    pub async fn refresh_all(&self) -> Result<(), ApiError> {
        let (launcher, game) = futures::join!(self.refresh_launcher(), self.refresh_game());
        launcher?;
        game?;
        Ok(())
    }

    /// Refresh whichever sets `set` names
    pub async fn refresh(&self, set: FileSet) -> Result<(), ApiError> {
        match set {
            FileSet::Launcher => self.refresh_launcher().await.map(|_| ()),
            FileSet::Game => self.refresh_game().await.map(|_| ()),
            FileSet::All => self.refresh_all().await,
        }
    }
}

impl<T: ?Sized> PatchCatalog<T> {
    pub fn launcher_snapshot(&self) -> PatchListing<LauncherPatchFile> {
        self.launcher.snapshot()
    }

    pub fn game_snapshot(&self) -> PatchListing<GamePatchFile> {
        self.game.snapshot()
    }

    /// Synthetic root with `launcher` and `game` directories over the
    /// currently published trees
    pub fn combined_root(&self) -> FileSystem<CatalogFile> {
        let launcher = self.launcher.snapshot().files;
        let game = self.game.snapshot().files;
        vec![
            FileSystemEntry::Directory(DirectoryEntry::new(
                "launcher",
                node::map_files(&launcher, &|f: &LauncherPatchFile| CatalogFile::Launcher(f.clone())),
            )),
            FileSystemEntry::Directory(DirectoryEntry::new(
                "game",
                node::map_files(&game, &|f: &GamePatchFile| CatalogFile::Game(f.clone())),
            )),
        ]
    }

    /// Tree for one set, converted for uniform display
    pub fn file_set_root(&self, set: FileSet) -> FileSystem<CatalogFile> {
        match set {
            FileSet::Launcher => node::map_files(
                &self.launcher.snapshot().files,
                &|f: &LauncherPatchFile| CatalogFile::Launcher(f.clone()),
            ),
            FileSet::Game => node::map_files(&self.game.snapshot().files, &|f: &GamePatchFile| {
                CatalogFile::Game(f.clone())
            }),
            FileSet::All => self.combined_root(),
        }
    }

    /// Status of one set; `All` reports the less advanced of the two
    pub fn status(&self, set: FileSet) -> FetchStatus {
        match set {
            FileSet::Launcher => self.launcher.listing.read().status,
            FileSet::Game => self.game.listing.read().status,
            FileSet::All => {
                let launcher = self.launcher.listing.read().status;
                let game = self.game.listing.read().status;
                if launcher == game {
                    launcher
                } else if launcher == FetchStatus::Error || game == FetchStatus::Error {
                    FetchStatus::Error
                } else if launcher == FetchStatus::Updating || game == FetchStatus::Updating {
                    FetchStatus::Updating
                } else {
                    FetchStatus::NotRetrieved
                }
            }
        }
    }
}
