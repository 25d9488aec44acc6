//! Introspectable description of a declarative record type.
//!
//! `record!` produces these at compile time; YAML definitions and hand-built
//! descriptors produce them at run time. All go through the same validation in
//! [`super::reflect`].

use serde::{Deserialize, Serialize};

use crate::expr::DataType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

/// What a member holds
#[derive(Debug, Clone, PartialEq)]
pub enum MemberKind {
    /// A typed column with this descriptor
    Column(DataType),
    /// The record's own structural descriptor; never a field
    TypeDescriptor,
    /// Anything else, named by its type
    Other(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberDescriptor {
    /// Member name in the declaring type
    pub name: String,
    /// Field name the engine sees; differs from `name` when overridden
    pub field_name: String,
    pub getter: Visibility,
    /// `None` when the member has no mutator at all
    pub setter: Option<Visibility>,
    pub kind: MemberKind,
}

impl MemberDescriptor {
    /// A well-formed column member: public getter, private setter
    pub fn column(name: &str, field_name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            field_name: field_name.to_string(),
            getter: Visibility::Public,
            setter: Some(Visibility::Private),
            kind: MemberKind::Column(data_type),
        }
    }

    pub fn type_descriptor(name: &str) -> Self {
        Self {
            name: name.to_string(),
            field_name: name.to_string(),
            getter: Visibility::Public,
            setter: None,
            kind: MemberKind::TypeDescriptor,
        }
    }

    pub fn with_setter(mut self, setter: Option<Visibility>) -> Self {
        self.setter = setter;
        self
    }

    pub fn with_getter(mut self, getter: Visibility) -> Self {
        self.getter = getter;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordDescriptor {
    pub type_name: String,
    pub members: Vec<MemberDescriptor>,
    /// Plain data fields (no accessor); any entry makes the record invalid
    pub plain_fields: Vec<String>,
}

impl RecordDescriptor {
    pub fn new(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            members: Vec::new(),
            plain_fields: Vec::new(),
        }
    }

    pub fn member(mut self, member: MemberDescriptor) -> Self {
        self.members.push(member);
        self
    }

    pub fn plain_field(mut self, name: &str) -> Self {
        self.plain_fields.push(name.to_string());
        self
    }
}
