//! Environment source: PATCHTREE__SECTION__KEY variables

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

/// Add the environment override layer, e.g. `PATCHTREE__RELAY__PROXY_URL`.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("PATCHTREE")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    )
}
