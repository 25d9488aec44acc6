//! Capability lattice
//!
//! Member-less marker traits describing which families of operations a column
//! type supports. Operations are attached through generic bounds on these
//! traits (see `column::base`), so an operation on a column type without the
//! capability is a compile error rather than an engine error.
//!
//! ```text
//! Ordered ─┬─ Numeric ─┬─ Integral
//!          │           └─ FloatingPoint
//!          └─ Temporal
//! ```
//!
//! The `NumericOr*` traits are unions used where the engine accepts either family.

use crate::column::TypedColumn;

/// Total ordering: comparisons, `between`, `min`/`max`
pub trait Ordered: TypedColumn {}

/// Arithmetic
pub trait Numeric: Ordered {}

/// Whole numbers: bitwise operators and reductions
pub trait Integral: Numeric {}

/// Binary floating point: `is_nan`
pub trait FloatingPoint: Numeric {}

/// Dates, timestamps and intervals; subtracting two yields an interval
pub trait Temporal: Ordered {}

/// Numbers or intervals: negation and averaging
pub trait NumericOrInterval: TypedColumn {}

/// Numbers or any temporal value
pub trait NumericOrTemporal: TypedColumn {}

/// Numbers, dates or timestamps: sequence bounds
pub trait NumericOrDateTime: TypedColumn {}

/// Attach capability markers to concrete column types.
macro_rules! capabilities {
    ($($capability:ident => [$($column:ty),* $(,)?]);* $(;)?) => {
        $($(impl $crate::capability::$capability for $column {})*)*
    };
}

pub(crate) use capabilities;
