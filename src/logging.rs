//! # Structured Logging Module
//!
//! Environment-aware structured logging for batch update diagnostics.

use crate::constants::env;
use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration
///
/// Safe to call more than once and safe to call when the host application has
/// already installed a global subscriber.
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let log_level = get_log_level(&environment);
        let json_output = std::env::var(env::LOG_FORMAT)
            .map(|format| format.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let filter = || {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level))
        };

        let console_layer = (!json_output).then(|| {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(true)
                .with_filter(filter())
        });
        let json_layer = json_output.then(|| {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(false)
                .json()
                .with_filter(filter())
        });

        let subscriber = tracing_subscriber::registry()
            .with(console_layer)
            .with(json_layer);

        if subscriber.try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::info!(
            environment = %environment,
            json = json_output,
            "Structured logging initialized"
        );
    });
}

/// Get current environment from environment variables
fn get_environment() -> String {
    std::env::var(env::ENVIRONMENT)
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> String {
    match environment {
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Log structured data for one executed (or failed) batch statement
pub fn log_batch_operation(
    operation: &str,
    table: Option<&str>,
    chunk_index: usize,
    rows: usize,
    status: &str,
    affected: Option<u64>,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        table = table,
        chunk_index = chunk_index,
        rows = rows,
        status = %status,
        affected = affected,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "BATCH_UPDATE_OPERATION"
    );
}

/// Log error with full context
pub fn log_error(component: &str, operation: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        timestamp = %Utc::now().to_rfc3339(),
        "BATCH_UPDATE_ERROR"
    );
}
