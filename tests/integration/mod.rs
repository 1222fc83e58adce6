//! Integration tests for the patch tree pipeline

mod cli_routes;
mod merge_semantics;
mod test_utils;
mod tree_structure;
