//! Numeric leaf columns: the integer widths, decimal and the binary floats.

use bigdecimal::BigDecimal;

use super::ops::{arithmetic_ops, bitwise_ops, leaf_column};
use crate::capability::capabilities;
use crate::expr::type_mapping::{HOST_DECIMAL_PRECISION, HOST_DECIMAL_SCALE};
use crate::expr::DataType;

leaf_column!(
    /// 8-bit signed integers (`tinyint`)
    ByteColumn,
    DataType::Byte,
    i8
);
leaf_column!(
    /// 16-bit signed integers (`smallint`)
    ShortColumn,
    DataType::Short,
    i16
);
leaf_column!(
    /// 32-bit signed integers (`int`)
    IntegerColumn,
    DataType::Integer,
    i32
);
leaf_column!(
    /// 64-bit signed integers (`bigint`)
    LongColumn,
    DataType::Long,
    i64
);
leaf_column!(FloatColumn, DataType::Float, f32);
leaf_column!(DoubleColumn, DataType::Double, f64);
leaf_column!(
    /// Fixed-point decimals with the host decimal's precision and scale
    DecimalColumn,
    DataType::decimal(HOST_DECIMAL_PRECISION, HOST_DECIMAL_SCALE),
    BigDecimal
);

capabilities! {
    Ordered => [ByteColumn, ShortColumn, IntegerColumn, LongColumn, FloatColumn, DoubleColumn, DecimalColumn];
    Numeric => [ByteColumn, ShortColumn, IntegerColumn, LongColumn, FloatColumn, DoubleColumn, DecimalColumn];
    Integral => [ByteColumn, ShortColumn, IntegerColumn, LongColumn];
    FloatingPoint => [FloatColumn, DoubleColumn];
    NumericOrInterval => [ByteColumn, ShortColumn, IntegerColumn, LongColumn, FloatColumn, DoubleColumn, DecimalColumn];
    NumericOrTemporal => [ByteColumn, ShortColumn, IntegerColumn, LongColumn, FloatColumn, DoubleColumn, DecimalColumn];
    NumericOrDateTime => [ByteColumn, ShortColumn, IntegerColumn, LongColumn, FloatColumn, DoubleColumn, DecimalColumn];
}

arithmetic_ops!(
    ByteColumn => i8,
    ShortColumn => i16,
    IntegerColumn => i32,
    LongColumn => i64,
    FloatColumn => f32,
    DoubleColumn => f64,
    DecimalColumn => BigDecimal,
);

bitwise_ops!(
    ByteColumn => i8,
    ShortColumn => i16,
    IntegerColumn => i32,
    LongColumn => i64,
);
