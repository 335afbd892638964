//! # Batch Splitting
//!
//! Cuts a row collection into bounded chunks, one chunk per generated UPDATE
//! statement.

pub mod splitter;

pub use splitter::RowBatcher;
