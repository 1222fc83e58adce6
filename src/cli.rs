//! CLI domain: parse, route, output, and presentation only.
//! No domain orchestration; single route table dispatches to the catalog.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_listing_json, format_listing_text, format_routes, format_show_summary,
    format_size_summary, format_tree_text,
};
pub use route::RunContext;
