//! Textual expression rewriting

pub mod alias_qualifier;

pub use alias_qualifier::{qualify_expression, AliasRewriteState};
