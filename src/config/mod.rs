//! # Batch Update Configuration
//!
//! Options controlling how rows are batched and how statements are rendered.
//! Options can be built in code, applied one at a time with [`BatchOption`],
//! read from `BATCH_UPDATE_*` environment variables, or loaded from a file
//! through [`loader::load_options`].
//!
//! ## Usage
//!
//! ```rust
//! use batch_update_engine::config::{BatchOption, BatchOptions};
//!
//! let mut options = BatchOptions::default().with_show_log(true);
//! options.apply(BatchOption::OnceMaxCount(-1));
//!
//! // Non-positive batch sizes fall back to the default
//! assert_eq!(options.once_max_count, 500);
//! assert!(options.show_log);
//! ```

pub mod error;
pub mod loader;

use crate::constants::DEFAULT_MAX_UPDATE_COUNT;
use crate::query_builder::ValueInterpolation;
use crate::row::NameMapping;
use serde::{Deserialize, Deserializer, Serialize};

pub use error::{ConfigResult, ConfigurationError};
pub use loader::{load_options, load_options_from_vars};

/// Clamp a requested batch size, mapping non-positive values to the default
pub fn normalize_max_count(max_count: i64) -> usize {
    if max_count <= 0 {
        DEFAULT_MAX_UPDATE_COUNT
    } else {
        usize::try_from(max_count).unwrap_or(usize::MAX)
    }
}

/// Accept any integer for the batch size so that `0` or `-1` in a file or
/// environment variable means "use the default" instead of failing to parse
fn deserialize_max_count<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_json::Value;

    let value: Value = Deserialize::deserialize(deserializer)?;
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(normalize_max_count(i)),
            None => n
                .as_u64()
                .map(|u| usize::try_from(u).unwrap_or(usize::MAX))
                .ok_or_else(|| D::Error::custom("once_max_count must be an integer")),
        },
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(normalize_max_count)
            .map_err(|_| D::Error::custom(format!("once_max_count must be an integer, got '{s}'"))),
        _ => Err(D::Error::custom("once_max_count must be an integer")),
    }
}

/// Engine options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchOptions {
    /// Maximum rows per generated statement
    #[serde(deserialize_with = "deserialize_max_count")]
    pub once_max_count: usize,
    /// Log generated statements and failures
    pub show_log: bool,
    /// Update every mapped column when none were set explicitly
    pub auto_update_all_cols: bool,
    /// Write values between quotes without escaping
    pub raw_interpolation: bool,
    pub name_mapping: NameMapping,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            once_max_count: DEFAULT_MAX_UPDATE_COUNT,
            show_log: false,
            auto_update_all_cols: false,
            raw_interpolation: false,
            name_mapping: NameMapping::default(),
        }
    }
}

/// A single option override, applied in order by [`BatchOptions::apply_all`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOption {
    OnceMaxCount(i64),
    ShowLog(bool),
    AutoUpdateAllCols(bool),
    RawInterpolation(bool),
    NameMapping(NameMapping),
}

impl BatchOptions {
    pub fn apply(&mut self, option: BatchOption) {
        match option {
            BatchOption::OnceMaxCount(max_count) => {
                self.once_max_count = normalize_max_count(max_count)
            }
            BatchOption::ShowLog(show) => self.show_log = show,
            BatchOption::AutoUpdateAllCols(auto_all) => self.auto_update_all_cols = auto_all,
            BatchOption::RawInterpolation(raw) => self.raw_interpolation = raw,
            BatchOption::NameMapping(mapping) => self.name_mapping = mapping,
        }
    }

    pub fn apply_all<I: IntoIterator<Item = BatchOption>>(&mut self, options: I) {
        for option in options {
            self.apply(option);
        }
    }

    pub fn with_once_max_count(mut self, max_count: i64) -> Self {
        self.apply(BatchOption::OnceMaxCount(max_count));
        self
    }

    pub fn with_show_log(mut self, show: bool) -> Self {
        self.show_log = show;
        self
    }

    pub fn with_auto_update_all_cols(mut self, auto_all: bool) -> Self {
        self.auto_update_all_cols = auto_all;
        self
    }

    pub fn with_raw_interpolation(mut self, raw: bool) -> Self {
        self.raw_interpolation = raw;
        self
    }

    pub fn with_name_mapping(mut self, mapping: NameMapping) -> Self {
        self.name_mapping = mapping;
        self
    }

    pub fn interpolation(&self) -> ValueInterpolation {
        if self.raw_interpolation {
            ValueInterpolation::Raw
        } else {
            ValueInterpolation::Escaped
        }
    }

    /// Defaults overridden by any `BATCH_UPDATE_*` variables that are set
    ///
    /// Variables are named after the fields (`BATCH_UPDATE_ONCE_MAX_COUNT`,
    /// `BATCH_UPDATE_SHOW_LOG`, ...) and parsed exactly as
    /// [`loader::load_options`] parses them.
    pub fn from_env() -> ConfigResult<Self> {
        loader::load_options(None)
    }
}
