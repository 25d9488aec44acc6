//! TypedFrame - statically typed columns for an untyped dataframe engine
//!
//! This crate builds the engine's untyped expression trees from typed columns:
//! - a capability lattice deciding which operations each column type has
//! - leaf and composite column types (array, map, struct, tuple)
//! - schema reflection from declarative record types
//! - alias qualification of free-form expression text
//! - struct schema migration

pub mod capability;
pub mod column;
pub mod config;
pub mod expr;
pub mod frame;
pub mod rewrite;
pub mod schema;

/// Everything needed to write typed column expressions
pub mod prelude {
    pub use crate::capability::{
        FloatingPoint, Integral, Numeric, NumericOrDateTime, NumericOrInterval, NumericOrTemporal,
        Ordered, Temporal,
    };
    pub use crate::column::{
        temporal_difference, when, ArrayColumn, BinaryColumn, BooleanColumn, ByteColumn,
        ColumnExt, DateColumn, DecimalColumn, DoubleColumn, FloatColumn, FloatingPointExt,
        IntegerColumn, IntegralExt, IntervalColumn, IntoColumn, LeafCasts, LiteralColumn,
        LongColumn, MapColumn, NegateExt, NumericExt, OrderedExt, ShortColumn, SortKey,
        StringColumn, StructColumn, TemporalExt, TimestampColumn, TypedColumn, WindowSpec,
    };
    pub use crate::frame::{FrameHandle, JoinKind, TypedFrame};
    pub use crate::record;
    pub use crate::schema::{Record, Schema};
}
