//! Property and scenario tests for the posterior sweep
//!
//! Tests are organized by topic:
//! - `properties` - Range, complement and boundary identities
//! - `reference` - Golden values and curve shape for the polygraph example
