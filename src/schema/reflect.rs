//! Record shape validation
//!
//! Turns a [`RecordDescriptor`] into a [`RecordShape`]:
//!
//! 1. plain data fields reject the record
//! 2. the type-descriptor member is excluded; nothing left rejects the record
//! 3. every remaining member needs a public getter, a private setter and a
//!    column type
//! 4. each member becomes one struct field, in declaration order
//!
//! The first violation aborts the whole record; no partial shape is returned.

use std::collections::HashSet;

use log::debug;

use super::descriptor::{MemberKind, RecordDescriptor, Visibility};
use super::errors::SchemaError;
use crate::expr::{DataType, StructField};

/// Validated structural shape of a record type
#[derive(Debug, Clone, PartialEq)]
pub struct RecordShape {
    pub type_name: String,
    pub fields: Vec<StructField>,
}

impl RecordShape {
    pub fn data_type(&self) -> DataType {
        DataType::Struct(self.fields.clone())
    }

    pub fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }

    pub fn field(&self, name: &str) -> Option<&StructField> {
        self.fields.iter().find(|f| f.name.eq_ignore_ascii_case(name))
    }
}

pub fn reflect_shape(descriptor: &RecordDescriptor) -> Result<RecordShape, SchemaError> {
    let record = descriptor.type_name.as_str();

    if !descriptor.plain_fields.is_empty() {
        return Err(SchemaError::NoFieldsAllowed {
            record: record.to_string(),
            fields: descriptor.plain_fields.join(", "),
        });
    }

    let members: Vec<_> = descriptor
        .members
        .iter()
        .filter(|m| m.kind != MemberKind::TypeDescriptor)
        .collect();
    if members.is_empty() {
        return Err(SchemaError::EmptySchema {
            record: record.to_string(),
        });
    }

    let mut seen = HashSet::new();
    let mut fields = Vec::with_capacity(members.len());
    for member in members {
        if member.getter != Visibility::Public {
            return Err(SchemaError::invalid_member(record, &member.name, "getter is not public"));
        }
        match member.setter {
            None => {
                return Err(SchemaError::invalid_member(record, &member.name, "no setter"));
            }
            Some(Visibility::Public) => {
                return Err(SchemaError::invalid_member(record, &member.name, "setter is public"));
            }
            Some(Visibility::Private) => {}
        }
        let data_type = match &member.kind {
            MemberKind::Column(data_type) => data_type.clone(),
            MemberKind::Other(type_name) => {
                return Err(SchemaError::invalid_member(
                    record,
                    &member.name,
                    format!("`{}` is not a column type", type_name),
                ));
            }
            MemberKind::TypeDescriptor => continue,
        };
        if !seen.insert(member.field_name.to_ascii_lowercase()) {
            return Err(SchemaError::DuplicateField {
                record: record.to_string(),
                field: member.field_name.clone(),
            });
        }
        fields.push(StructField::new(member.field_name.clone(), data_type));
    }

    debug!("reflected `{}` into {} field(s)", record, fields.len());
    Ok(RecordShape {
        type_name: record.to_string(),
        fields,
    })
}
