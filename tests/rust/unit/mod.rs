//! Unit tests - Crate-level tests of the pure schema, matching and projection APIs
//!
//! None of these need a database.

mod matching_tests;
mod projection_tests;
mod subschema_tests;
