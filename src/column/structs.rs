//! Struct columns: a struct-valued expression whose shape is a declared record.

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

use log::warn;

use super::{IntoColumn, TypedColumn};
use crate::expr::{DataType, Expr, Literal};
use crate::schema::migration::plan_migration;
use crate::schema::{bind_record, shape_of, Binding, FieldBinder, Record, SchemaError};

/// A struct column shaped like record `R`.
///
/// Members are projected through a bound instance of `R`, so a projection
/// always names an exact declared field.
pub struct StructColumn<R> {
    expr: Expr,
    _record: PhantomData<R>,
}

impl<R> Clone for StructColumn<R> {
    fn clone(&self) -> Self {
        Self {
            expr: self.expr.clone(),
            _record: PhantomData,
        }
    }
}

impl<R> PartialEq for StructColumn<R> {
    fn eq(&self, other: &Self) -> bool {
        self.expr == other.expr
    }
}

impl<R> fmt::Debug for StructColumn<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructColumn")
            .field("record", &type_name::<R>())
            .field("expr", &self.expr)
            .finish()
    }
}

impl<R: Record> TypedColumn for StructColumn<R> {
    fn data_type() -> DataType {
        match shape_of::<R>() {
            Ok(shape) => shape.data_type(),
            Err(e) => {
                warn!("struct column over an invalid record: {}", e);
                DataType::Struct(Vec::new())
            }
        }
    }

    fn from_expr(expr: Expr) -> Self {
        Self {
            expr,
            _record: PhantomData,
        }
    }

    fn expr(&self) -> &Expr {
        &self.expr
    }

    fn into_expr(self) -> Expr {
        self.expr
    }
}

fn named_struct(names: &[String], values: Vec<Expr>) -> Expr {
    let mut args = Vec::with_capacity(names.len() * 2);
    for (name, value) in names.iter().zip(values) {
        args.push(Expr::lit(Literal::String(name.clone())));
        args.push(value);
    }
    Expr::call("named_struct", args)
}

impl<R: Record> StructColumn<R> {
    /// Instance of `R` whose members reference this struct's fields
    pub fn fields(&self) -> R {
        let candidates = match shape_of::<R>() {
            Ok(shape) => shape.field_names(),
            Err(_) => Vec::new(),
        };
        let mut binder =
            FieldBinder::new(Binding::Field(self.expr.clone()), candidates);
        R::bind(&mut binder)
    }

    /// Project one member: `people.get(|p| p.age())`
    pub fn get<C, F>(&self, member: F) -> C
    where
        C: TypedColumn,
        F: FnOnce(&R) -> &C,
    {
        member(&self.fields()).clone()
    }

    /// Struct built from same-named columns currently in scope
    pub fn from_scope() -> Result<Self, SchemaError> {
        let shape = shape_of::<R>()?;
        let (record, _) = bind_record::<R>(&shape, Binding::Unqualified);
        Ok(Self::from_record(&record))
    }

    /// Struct built from a record's member expressions, in declaration order
    pub fn from_record(record: &R) -> Self {
        let names = match shape_of::<R>() {
            Ok(shape) => shape.field_names(),
            Err(e) => {
                warn!("building struct from an invalid record: {}", e);
                Vec::new()
            }
        };
        Self::from_expr(named_struct(&names, record.to_exprs()))
    }

    /// Convert to the shape of `T` by adding and dropping fields.
    ///
    /// Added fields reference existing unqualified columns of the same name;
    /// shared fields pass through unchanged.
    pub fn migrate<T: Record>(&self) -> StructColumn<T> {
        let (source, target) = match (shape_of::<R>(), shape_of::<T>()) {
            (Ok(source), Ok(target)) => (source.field_names(), target.field_names()),
            (Err(e), _) | (_, Err(e)) => {
                warn!("migrating struct between invalid records: {}", e);
                return StructColumn::from_expr(self.expr.clone());
            }
        };
        let plan = plan_migration(&source, &target);
        StructColumn::from_expr(plan.apply(self.expr.clone()))
    }

    /// Replace the value of one declared member: `addr.with_field(|a| a.city(), "Oslo")`
    pub fn with_field<C, F>(&self, member: F, value: impl IntoColumn<C>) -> Self
    where
        C: TypedColumn,
        F: FnOnce(&R) -> &C,
    {
        let fields = self.fields();
        let name = match member(&fields).expr().output_name() {
            Some(name) => name.to_string(),
            None => {
                warn!("with_field selector did not name a member of {}", type_name::<R>());
                return self.clone();
            }
        };
        Self::from_expr(Expr::WithField {
            expr: Box::new(self.expr.clone()),
            name,
            value: Box::new(value.into_column().into_expr()),
        })
    }
}

/// Record describing one key/value entry of a map column
#[derive(Debug, Clone)]
pub struct MapEntry<K, V> {
    key: K,
    value: V,
}

impl<K: TypedColumn, V: TypedColumn> MapEntry<K, V> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }
}

impl<K: TypedColumn + 'static, V: TypedColumn + 'static> Record for MapEntry<K, V> {
    fn describe() -> crate::schema::RecordDescriptor {
        use crate::schema::{MemberDescriptor, RecordDescriptor};
        RecordDescriptor::new("MapEntry")
            .member(MemberDescriptor::column("key", "key", K::data_type()))
            .member(MemberDescriptor::column("value", "value", V::data_type()))
    }

    fn bind(binder: &mut FieldBinder) -> Self {
        Self {
            key: binder.bind("key"),
            value: binder.bind("value"),
        }
    }

    fn to_exprs(&self) -> Vec<Expr> {
        vec![self.key.expr().clone(), self.value.expr().clone()]
    }
}
