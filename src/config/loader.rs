//! Configuration Loader
//!
//! Layers an optional configuration file (TOML, YAML or JSON, chosen by
//! extension) under `BATCH_UPDATE_*` environment overrides using the `config`
//! crate, then normalizes the result into [`BatchOptions`].
//!
//! Environment values are parsed by the `config` crate: booleans accept
//! `true`/`false` in any case, integers (`0` is false) and `yes`/`no`/`on`/`off`.

use super::error::{ConfigResult, ConfigurationError};
use super::BatchOptions;
use crate::constants::env;
use config::{Config, Environment, File, Map};
use std::path::Path;
use tracing::debug;

/// Load options from `path` (when given) with environment overrides on top
pub fn load_options(path: Option<&Path>) -> ConfigResult<BatchOptions> {
    load_layered(path, None)
}

/// Like [`load_options`], reading `BATCH_UPDATE_*` overrides from `vars`
/// instead of the process environment
pub fn load_options_from_vars<I, K, V>(path: Option<&Path>, vars: I) -> ConfigResult<BatchOptions>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let vars: Map<String, String> = vars
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect();
    load_layered(path, Some(vars))
}

fn load_layered(path: Option<&Path>, vars: Option<Map<String, String>>) -> ConfigResult<BatchOptions> {
    let mut builder = Config::builder();

    let source_name = match path {
        Some(path) => {
            debug!("Loading batch update options from {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
            path.display().to_string()
        }
        None => "environment".to_string(),
    };

    builder = builder.add_source(
        Environment::with_prefix(env::CONFIG_PREFIX)
            .try_parsing(true)
            .ignore_empty(true)
            .source(vars),
    );

    let options: BatchOptions = builder
        .build()
        .and_then(Config::try_deserialize)
        .map_err(|e| ConfigurationError::load_error(source_name.as_str(), e))?;

    debug!(
        once_max_count = options.once_max_count,
        show_log = options.show_log,
        auto_update_all_cols = options.auto_update_all_cols,
        raw_interpolation = options.raw_interpolation,
        source = %source_name,
        "Batch update options loaded"
    );

    Ok(options)
}
