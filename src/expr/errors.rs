use thiserror::Error;

/// Failures raised while mapping a host data shape onto an engine type descriptor.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TypeMappingError {
    #[error("Type `{type_name}` has no corresponding engine type")]
    Unsupported { type_name: String },

    #[error("Type `{type_name}` is supported only outside of interop and cannot be sent to the engine")]
    InteropUnsupported { type_name: String },

    #[error("Malformed type name `{input}`: {reason}")]
    Malformed { input: String, reason: String },
}

impl TypeMappingError {
    pub fn unsupported(type_name: impl Into<String>) -> Self {
        TypeMappingError::Unsupported {
            type_name: type_name.into(),
        }
    }

    pub fn interop_unsupported(type_name: impl Into<String>) -> Self {
        TypeMappingError::InteropUnsupported {
            type_name: type_name.into(),
        }
    }

    pub(crate) fn malformed(input: &str, reason: impl Into<String>) -> Self {
        TypeMappingError::Malformed {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
