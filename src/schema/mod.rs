//! Schema reflection
//!
//! A declarative record type (declared with [`record!`](crate::record)) is
//! reflected into a [`Schema`]: an ordered list of fields, the aggregated
//! struct descriptor, and an instance of the record whose members are column
//! references to those fields, either unqualified or qualified by a table alias.
//!
//! Shapes are validated once per record type and cached process-wide.

pub mod definition;
pub mod descriptor;
pub mod errors;
mod macros;
pub mod migration;
pub mod reflect;

use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::fmt::Debug;
use std::ops::Deref;
use std::sync::{Arc, RwLock};

use lazy_static::lazy_static;
use log::{debug, trace};

use crate::column::TypedColumn;
use crate::expr::{DataType, Expr};
use crate::rewrite::qualify_expression;

pub use definition::{FieldDefinition, RecordDefinition};
pub use descriptor::{MemberDescriptor, MemberKind, RecordDescriptor, Visibility};
pub use errors::SchemaError;
pub use migration::{plan_migration, MigrationPlan};
pub use reflect::{reflect_shape, RecordShape};

/// A declarative record type whose members are typed columns.
pub trait Record: Clone + Debug + Sized + 'static {
    /// Members and their shapes, for validation
    fn describe() -> RecordDescriptor;

    /// Build an instance with every member bound through `binder`
    fn bind(binder: &mut FieldBinder) -> Self;

    /// Member expressions in declaration order
    fn to_exprs(&self) -> Vec<Expr>;
}

/// How member columns are bound to their fields
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// `name`
    Unqualified,
    /// `alias.name`
    Qualified(String),
    /// `parent.name`, for members of a struct-valued expression
    Field(Expr),
}

/// A field bound to a column expression
#[derive(Debug, Clone, PartialEq)]
pub struct BoundField {
    pub name: String,
    pub data_type: DataType,
    pub expr: Expr,
}

/// Hands out member columns while a record is being bound.
#[derive(Debug)]
pub struct FieldBinder {
    binding: Binding,
    candidates: Vec<String>,
    bound: Vec<BoundField>,
}

impl FieldBinder {
    pub fn new(binding: Binding, candidates: Vec<String>) -> Self {
        Self {
            binding,
            candidates,
            bound: Vec::new(),
        }
    }

    /// Expression referencing `field_name` under this binder's binding
    pub fn reference(&self, field_name: &str) -> Expr {
        match &self.binding {
            Binding::Unqualified => Expr::column(field_name),
            Binding::Qualified(alias) => {
                let qualified = qualify_expression(field_name, alias, &self.candidates);
                if qualified == format!("{}.{}", alias, field_name) {
                    Expr::qualified(alias.as_str(), field_name)
                } else {
                    Expr::reference(&qualified)
                }
            }
            Binding::Field(parent) => parent.clone().field(field_name),
        }
    }

    pub fn bind_untyped(&mut self, field_name: &str, data_type: DataType) -> Expr {
        let expr = self.reference(field_name);
        trace!("bound `{}` to {}", field_name, expr);
        self.bound.push(BoundField {
            name: field_name.to_string(),
            data_type,
            expr: expr.clone(),
        });
        expr
    }

    pub fn bind<C: TypedColumn>(&mut self, field_name: &str) -> C {
        C::from_expr(self.bind_untyped(field_name, C::data_type()))
    }

    pub fn into_fields(self) -> Vec<BoundField> {
        self.bound
    }
}

lazy_static! {
    static ref SHAPES: RwLock<HashMap<TypeId, Arc<RecordShape>>> = RwLock::new(HashMap::new());
}

/// Validated shape of `R`, reflected on first use and cached afterwards.
///
/// Invalid records are not cached; every attempt reports the same error.
pub fn shape_of<R: Record>() -> Result<Arc<RecordShape>, SchemaError> {
    let key = TypeId::of::<R>();
    let cached = match SHAPES.read() {
        Ok(shapes) => shapes.get(&key).cloned(),
        Err(poisoned) => poisoned.into_inner().get(&key).cloned(),
    };
    if let Some(shape) = cached {
        trace!("shape cache hit for {}", type_name::<R>());
        return Ok(shape);
    }

    let shape = Arc::new(reflect_shape(&R::describe())?);
    debug!("caching shape of {}", type_name::<R>());
    let mut shapes = match SHAPES.write() {
        Ok(shapes) => shapes,
        Err(poisoned) => poisoned.into_inner(),
    };
    Ok(shapes.entry(key).or_insert(shape).clone())
}

/// Bind a fresh instance of `R`
pub(crate) fn bind_record<R: Record>(
    shape: &RecordShape,
    binding: Binding,
) -> (R, Vec<BoundField>) {
    let mut binder = FieldBinder::new(binding, shape.field_names());
    let record = R::bind(&mut binder);
    (record, binder.into_fields())
}

/// A reflected record: its shape plus an instance bound to the fields.
///
/// Dereferences to the record, so member accessors are available directly.
#[derive(Debug, Clone)]
pub struct Schema<R: Record> {
    record: R,
    shape: Arc<RecordShape>,
    alias: Option<String>,
    fields: Vec<BoundField>,
}

impl<R: Record> Schema<R> {
    /// Schema with unqualified field references
    pub fn new() -> Result<Self, SchemaError> {
        Ok(Self::build(shape_of::<R>()?, None))
    }

    /// Schema with field references qualified by `alias`
    pub fn aliased(alias: &str) -> Result<Self, SchemaError> {
        Ok(Self::build(shape_of::<R>()?, Some(alias.to_string())))
    }

    /// The same schema re-bound under another alias. The receiver is unchanged.
    pub fn with_alias(&self, alias: &str) -> Self {
        Self::build(self.shape.clone(), Some(alias.to_string()))
    }

    /// The same schema with unqualified references
    pub fn unaliased(&self) -> Self {
        Self::build(self.shape.clone(), None)
    }

    fn build(shape: Arc<RecordShape>, alias: Option<String>) -> Self {
        let binding = match &alias {
            Some(alias) => Binding::Qualified(alias.clone()),
            None => Binding::Unqualified,
        };
        let (record, fields) = bind_record::<R>(&shape, binding);
        Self {
            record,
            shape,
            alias,
            fields,
        }
    }

    pub fn record(&self) -> &R {
        &self.record
    }

    pub fn into_record(self) -> R {
        self.record
    }

    pub fn shape(&self) -> &RecordShape {
        &self.shape
    }

    pub fn fields(&self) -> &[BoundField] {
        &self.fields
    }

    pub fn field_names(&self) -> Vec<String> {
        self.shape.field_names()
    }

    pub fn data_type(&self) -> DataType {
        self.shape.data_type()
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Qualify free-form expression text against this schema's alias
    pub fn qualify(&self, raw: &str) -> String {
        match &self.alias {
            Some(alias) => qualify_expression(raw, alias, &self.field_names()),
            None => raw.to_string(),
        }
    }
}

impl<R: Record> Deref for Schema<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{IntegerColumn, OrderedExt, StringColumn};

    crate::record! {
        struct Person {
            name: StringColumn as "Name",
            age: IntegerColumn,
        }
    }

    crate::record! {
        struct Nothing {}
    }

    #[test]
    fn test_unqualified_schema() {
        let schema = Schema::<Person>::new().unwrap();
        assert_eq!(schema.field_names(), vec!["Name", "age"]);
        assert_eq!(schema.name().expr(), &Expr::column("Name"));
        assert_eq!(schema.age().gt(30).expr().to_string(), "(age > 30)");
        assert_eq!(schema.alias(), None);
        assert_eq!(
            schema.data_type().to_string(),
            "struct<Name:string,age:int>"
        );
    }

    #[test]
    fn test_aliased_schema_is_a_new_instance() {
        let plain = Schema::<Person>::new().unwrap();
        let aliased = plain.with_alias("p");
        assert_eq!(aliased.name().expr(), &Expr::qualified("p", "Name"));
        assert_eq!(aliased.fields()[1].expr.to_string(), "p.age");
        assert_eq!(plain.age().expr(), &Expr::column("age"));
        assert_eq!(aliased.unaliased().age().expr(), &Expr::column("age"));
    }

    #[test]
    fn test_qualify_free_text() {
        let schema = Schema::<Person>::aliased("p").unwrap();
        assert_eq!(schema.qualify("age > 3 AND name = 'x'"), "p.age > 3 AND p.name = 'x'");
    }

    #[test]
    fn test_empty_record_is_rejected() {
        let err = Schema::<Nothing>::new().unwrap_err();
        assert_eq!(
            err,
            SchemaError::EmptySchema {
                record: "Nothing".to_string()
            }
        );
    }

    #[test]
    fn test_shape_is_cached() {
        let first = shape_of::<Person>().unwrap();
        let second = shape_of::<Person>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
