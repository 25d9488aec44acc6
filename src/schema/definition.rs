//! YAML record definitions
//!
//! A run-time counterpart to `record!`, used by the CLI and by adapters that
//! learn record shapes from configuration:
//!
//! ```yaml
//! name: Person
//! fields:
//!   - name: name
//!     column: Name        # optional engine field name
//!     type: string        # DDL type
//!   - name: tags
//!     type: array<string>
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::descriptor::{MemberDescriptor, MemberKind, RecordDescriptor, Visibility};
use super::errors::SchemaError;
use super::reflect::{reflect_shape, RecordShape};
use super::{Binding, BoundField, FieldBinder};
use crate::expr::DataType;

fn default_getter() -> Visibility {
    Visibility::Public
}

fn default_setter() -> Option<Visibility> {
    Some(Visibility::Private)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(default)]
    pub column: Option<String>,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default = "default_getter")]
    pub getter: Visibility,
    #[serde(default = "default_setter")]
    pub setter: Option<Visibility>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDefinition {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    /// Plain data fields; present only so invalid definitions can be reported
    #[serde(default)]
    pub plain_fields: Vec<String>,
}

impl RecordDefinition {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let contents = fs::read_to_string(path).map_err(|e| SchemaError::DefinitionRead {
            error: e.to_string(),
        })?;

        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, SchemaError> {
        serde_yaml::from_str(yaml).map_err(|e| SchemaError::DefinitionParse {
            error: e.to_string(),
        })
    }

    /// Descriptor with every DDL type resolved. Plain fields are rejected
    /// before any type is parsed.
    pub fn descriptor(&self) -> Result<RecordDescriptor, SchemaError> {
        if !self.plain_fields.is_empty() {
            return Err(SchemaError::NoFieldsAllowed {
                record: self.name.clone(),
                fields: self.plain_fields.join(", "),
            });
        }
        let mut descriptor = RecordDescriptor::new(&self.name);
        descriptor.plain_fields = self.plain_fields.clone();
        for field in &self.fields {
            let data_type =
                DataType::parse(&field.type_name).map_err(|source| SchemaError::TypeMapping {
                    member: field.name.clone(),
                    source,
                })?;
            descriptor.members.push(MemberDescriptor {
                name: field.name.clone(),
                field_name: field.column.clone().unwrap_or_else(|| field.name.clone()),
                getter: field.getter,
                setter: field.setter,
                kind: MemberKind::Column(data_type),
            });
        }
        Ok(descriptor)
    }

    pub fn shape(&self) -> Result<RecordShape, SchemaError> {
        reflect_shape(&self.descriptor()?)
    }

    /// Bind every field, qualified by `alias` when given
    pub fn bind(&self, alias: Option<&str>) -> Result<Vec<BoundField>, SchemaError> {
        let shape = self.shape()?;
        let binding = match alias {
            Some(alias) => Binding::Qualified(alias.to_string()),
            None => Binding::Unqualified,
        };
        let mut binder = FieldBinder::new(binding, shape.field_names());
        for field in &shape.fields {
            binder.bind_untyped(&field.name, field.data_type.clone());
        }
        Ok(binder.into_fields())
    }
}
