//! # Schema Error Types
//!
//! Every variant is fatal to construction: a record either reflects into a
//! complete schema or not at all. Messages are stable because callers match on
//! them.

use thiserror::Error;

use crate::expr::TypeMappingError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SchemaError {
    #[error("Fields are not supported in schema `{record}`; found plain field(s): {fields}")]
    NoFieldsAllowed { record: String, fields: String },

    #[error("Schema `{record}` is empty; declare at least one column member")]
    EmptySchema { record: String },

    #[error("Member `{member}` of schema `{record}` must be a column with a public getter and a private setter: {reason}")]
    InvalidMemberShape {
        record: String,
        member: String,
        reason: String,
    },

    #[error("Schema `{record}` declares field `{field}` more than once")]
    DuplicateField { record: String, field: String },

    #[error("Invalid type for member `{member}`: {source}")]
    TypeMapping {
        member: String,
        #[source]
        source: TypeMappingError,
    },

    #[error(transparent)]
    UnmappedType(#[from] TypeMappingError),

    #[error("Failed to read schema definition: {error}")]
    DefinitionRead { error: String },

    #[error("Failed to parse schema definition: {error}")]
    DefinitionParse { error: String },
}

impl SchemaError {
    pub fn invalid_member(record: &str, member: &str, reason: impl Into<String>) -> Self {
        SchemaError::InvalidMemberShape {
            record: record.to_string(),
            member: member.to_string(),
            reason: reason.into(),
        }
    }
}
