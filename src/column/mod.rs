//! Typed columns
//!
//! A typed column pairs one engine [`Expr`] with a fixed structural
//! [`DataType`]. Operations build new expressions and wrap them in the column
//! type the engine will produce, so the result type of every operation is known
//! statically.
//!
//! - [`base`]: operations every column has, plus the capability-bound extensions
//! - leaf types: [`boolean`], [`numeric`], [`string`], [`binary`], [`temporal`]
//! - composites: [`array`], [`map`], [`structs`], [`tuple`]
//! - [`lambda`]: higher-order templates used by array and map operations

use std::fmt::Debug;

use crate::expr::{DataType, Expr, NativeValue};

pub mod array;
pub mod base;
pub mod binary;
pub mod boolean;
pub mod case;
pub mod lambda;
pub mod map;
pub mod numeric;
mod ops;
pub mod string;
pub mod structs;
pub mod temporal;
pub mod tuple;
pub mod window;

pub use base::{
    ColumnExt, FloatingPointExt, IntegralExt, LeafCasts, NegateExt, NumericExt, OrderedExt,
    SortKey, TemporalExt,
};
pub use array::{zip2, zip3, zip4, zip5, ArrayColumn, PosExplode};
pub use binary::BinaryColumn;
pub use boolean::BooleanColumn;
pub use case::{when, CaseWhen};
pub use map::MapColumn;
pub use numeric::{
    ByteColumn, DecimalColumn, DoubleColumn, FloatColumn, IntegerColumn, LongColumn, ShortColumn,
};
pub use string::StringColumn;
pub use structs::{MapEntry, StructColumn};
pub use temporal::{temporal_difference, DateColumn, IntervalColumn, TimestampColumn};
pub use tuple::{Tuple2, Tuple3, Tuple4, Tuple5};
pub use window::{dense_rank, rank, row_number, WindowSpec};

/// A column whose structural type is fixed by its Rust type.
pub trait TypedColumn: Clone + Debug + Sized {
    /// Descriptor reported by every value of this column type
    fn data_type() -> DataType;

    /// Wrap an expression the caller knows evaluates to this column's type
    fn from_expr(expr: Expr) -> Self;

    fn expr(&self) -> &Expr;

    fn into_expr(self) -> Expr;

    /// Unqualified reference to a column named `name`
    fn named(name: &str) -> Self {
        Self::from_expr(Expr::column(name))
    }

    /// Reference to `alias.name`
    fn qualified(alias: &str, name: &str) -> Self {
        Self::from_expr(Expr::qualified(alias, name))
    }
}

/// A column whose values have a host literal form.
pub trait LiteralColumn: TypedColumn {
    type Native: NativeValue;

    fn lit(value: Self::Native) -> Self {
        Self::from_expr(Expr::lit(value.into_literal()))
    }

    /// Recover the host value when this column is literal-backed.
    ///
    /// Returns `None` for any other expression; callers treat that as an expected
    /// outcome, not an error.
    fn try_native(&self) -> Option<Self::Native> {
        self.expr().as_literal().and_then(Self::Native::from_literal)
    }
}

/// Anything that can stand where a column of type `C` is expected: the column
/// itself, a borrowed column, or a host literal promoted to a column.
pub trait IntoColumn<C: TypedColumn> {
    fn into_column(self) -> C;
}

impl<C: TypedColumn> IntoColumn<C> for C {
    fn into_column(self) -> C {
        self
    }
}

impl<C: TypedColumn> IntoColumn<C> for &C {
    fn into_column(self) -> C {
        self.clone()
    }
}

/// Type-erased column: an expression with its descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct UntypedColumn {
    pub expr: Expr,
    pub data_type: DataType,
}

impl UntypedColumn {
    pub fn of<C: TypedColumn>(column: &C) -> Self {
        Self {
            expr: column.expr().clone(),
            data_type: C::data_type(),
        }
    }
}
