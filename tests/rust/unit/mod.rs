//! Unit tests - column algebra, rewriting and type mapping through the public API
//!
//! These tests need no engine; they check the expressions and descriptors the
//! crate hands over.

mod alias_qualifier_tests;
mod column_algebra_tests;
mod type_mapping_tests;
