//! # System Constants
//!
//! Defaults and environment variable names shared by the configuration,
//! logging and database layers.

/// Maximum number of rows folded into one UPDATE statement
pub const DEFAULT_MAX_UPDATE_COUNT: usize = 500;

/// Environment variables recognized by [`crate::config::BatchOptions::from_env`]
pub mod env {
    pub const ONCE_MAX_COUNT: &str = "BATCH_UPDATE_ONCE_MAX_COUNT";
    pub const SHOW_LOG: &str = "BATCH_UPDATE_SHOW_LOG";
    pub const AUTO_UPDATE_ALL_COLS: &str = "BATCH_UPDATE_AUTO_UPDATE_ALL_COLS";
    pub const RAW_INTERPOLATION: &str = "BATCH_UPDATE_RAW_INTERPOLATION";
    pub const NAME_MAPPING: &str = "BATCH_UPDATE_NAME_MAPPING";

    /// Prefix used by the `config` crate environment source
    pub const CONFIG_PREFIX: &str = "BATCH_UPDATE";

    pub const ENVIRONMENT: &str = "BATCH_UPDATE_ENV";
    pub const LOG_FORMAT: &str = "BATCH_UPDATE_LOG_FORMAT";
    pub const DATABASE_URL: &str = "DATABASE_URL";
}

/// Connection string used when `DATABASE_URL` is absent
pub const DEFAULT_DATABASE_URL: &str = "postgresql://localhost/batch_update_development";
