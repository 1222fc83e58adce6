//! CLI route: single route table and run context. Dispatches to the catalog and presentation.

use crate::catalog::{FetchStatus, FileSet, PatchCatalog};
use crate::config::{ConfigLoader, PatchTreeConfig};
use crate::content;
use crate::error::ApiError;
use crate::listing;
use crate::manifest::decode;
use crate::transport::{ManifestTransport, MirrorTransport, RelayTransport};
use crate::tree::{filter, path, size};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::cli::parse::Commands;
use crate::cli::presentation;

/// Runtime context for CLI execution: effective config and transport choice.
pub struct RunContext {
    config: PatchTreeConfig,
    mirror: Option<PathBuf>,
}

impl RunContext {
    /// Create run context from a working directory and optional config path.
    pub fn new(
        dir: PathBuf,
        config_path: Option<PathBuf>,
        mirror: Option<PathBuf>,
    ) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(ref cfg_path) => ConfigLoader::load_from_file(cfg_path)?,
            None => ConfigLoader::load(&dir)?,
        };
        Ok(Self {
            config: config.validated()?,
            mirror,
        })
    }

    /// Create run context from an already loaded configuration
    pub fn with_config(config: PatchTreeConfig, mirror: Option<PathBuf>) -> Self {
        Self { config, mirror }
    }

    pub fn config(&self) -> &PatchTreeConfig {
        &self.config
    }

    fn catalog(&self) -> Result<PatchCatalog<dyn ManifestTransport>, ApiError> {
        let transport: Arc<dyn ManifestTransport> = match &self.mirror {
            Some(root) => Arc::new(MirrorTransport::new(root.clone())),
            None => Arc::new(RelayTransport::new(&self.config.relay)?),
        };
        Ok(PatchCatalog::new(
            transport,
            self.config.relay.management_url.clone(),
        ))
    }

    /// Execute a CLI command via the single route table.
    pub async fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let result = self.execute_inner(command).await;
        info!(
            command = command.name(),
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis(),
            "Command finished"
        );
        result
    }

    async fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Ls { set, path, format } => {
                let set: FileSet = set.parse()?;
                let catalog = self.retrieve(set).await?;
                let root = catalog.file_set_root(set);
                let rows = listing::list_directory(filter::filter(&root, &segments(path)));
                if format == "json" {
                    presentation::format_listing_json(&rows)
                } else {
                    Ok(presentation::format_listing_text(
                        &rows,
                        std::io::stdout().is_terminal(),
                    ))
                }
            }
            Commands::Tree { set, path, depth } => {
                let set: FileSet = set.parse()?;
                let catalog = self.retrieve(set).await?;
                let root = catalog.file_set_root(set);
                let level = filter::filter(&root, &segments(path));
                Ok(presentation::format_tree_text(level, *depth))
            }
            Commands::Size { set, path } => {
                let set: FileSet = set.parse()?;
                let catalog = self.retrieve(set).await?;
                let root = catalog.file_set_root(set);
                let location = segments(path);
                let total = size::total_size(filter::filter(&root, &location));
                Ok(presentation::format_size_summary(
                    &path::join_segments(&location),
                    total,
                ))
            }
            Commands::Routes { set } => {
                let set: FileSet = set.parse()?;
                let catalog = self.retrieve(set).await?;
                let root = catalog.file_set_root(set);
                Ok(presentation::format_routes(&listing::directory_routes(&root)))
            }
            Commands::Show { path, set } => self.show(path, set).await,
            Commands::Config => ConfigLoader::render(&self.config),
        }
    }

    /// Refresh the sets `set` needs. For `all`, one failing set still lets
    /// the other be browsed.
    async fn retrieve(&self, set: FileSet) -> Result<PatchCatalog<dyn ManifestTransport>, ApiError> {
        let catalog = self.catalog()?;
        match catalog.refresh(set).await {
            Ok(()) => Ok(catalog),
            Err(e)
                if set == FileSet::All
                    && (catalog.status(FileSet::Launcher) == FetchStatus::Updated
                        || catalog.status(FileSet::Game) == FetchStatus::Updated) =>
            {
                warn!(error = %e, "Browsing with one file set unavailable");
                Ok(catalog)
            }
            Err(e) => Err(e),
        }
    }

    async fn show(&self, full_path: &str, set: &str) -> Result<String, ApiError> {
        let set: FileSet = set.parse()?;
        if set == FileSet::All {
            return Err(ApiError::UnknownFileSet(
                "all (show needs launcher or game)".to_string(),
            ));
        }
        let catalog = self.retrieve(set).await?;
        let root = catalog.file_set_root(set);
        let request = content::request_for(&root, full_path, self.config.content.max_bytes)?;
        let repositories = match set {
            FileSet::Game => catalog.game_snapshot().repositories,
            _ => catalog.launcher_snapshot().repositories,
        };

        let bytes = content::fetch_content(catalog.transport(), &repositories, &request).await?;
        match request.viewer() {
            Some(viewer) if viewer.is_textual() => Ok(decode(&bytes).into_owned()),
            _ => Ok(presentation::format_show_summary(&request, bytes.len())),
        }
    }
}

/// Flatten CLI path arguments into segments, so `data win32` and
/// `data/win32` name the same location
fn segments(args: &[String]) -> Vec<&str> {
    args.iter().flat_map(|arg| path::split_segments(arg)).collect()
}
