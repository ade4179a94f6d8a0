//! End-to-end tests for a full run
//!
//! - `output` - Chart files on disk and the stdout summary
