//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

use crate::config::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_CONTENT_MAX_BYTES, DEFAULT_MANAGEMENT_URL,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};

/// Create a Config builder with merge policy defaults applied.
///
/// Later sources override earlier ones key by key; tables merge, scalars replace.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("relay.management_url", DEFAULT_MANAGEMENT_URL)?
        .set_default("relay.connect_timeout_secs", DEFAULT_CONNECT_TIMEOUT_SECS)?
        .set_default("relay.request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS)?
        .set_default("content.max_bytes", DEFAULT_CONTENT_MAX_BYTES)
}
