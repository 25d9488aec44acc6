//! Integration tests - records, schemas and frames working together
//!
//! These tests exercise reflection, alias binding, migration and the typed
//! frame wrapper without a running engine; a recording handle stands in for it.

mod config_tests;
mod schema_definition_tests;
mod typed_frame_tests;
