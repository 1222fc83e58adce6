//! Manifest parsing
//!
//! Turns raw manifest and management documents into flat records.

pub mod management;
pub mod parser;
pub mod record;

pub use management::{parse_management, Repositories};
pub use parser::{decode, parse_game_list, parse_launcher_list};
pub use record::{GamePatchFile, LauncherPatchFile, PatchFile, PatchLocation};

/// Launcher list resource name
pub const LAUNCHER_LIST: &str = "launcherlist.txt";

/// Classic game list resource name
pub const GAME_LIST_CLASSIC: &str = "patchlist_classic.txt";

/// Reboot game list resource name
pub const GAME_LIST_REBOOT: &str = "patchlist_reboot.txt";
