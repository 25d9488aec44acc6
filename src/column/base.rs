//! Operations shared by every column type, and the capability-bound extensions.
//!
//! Each extension trait has a blanket impl for every type carrying the
//! matching capability marker, so importing the trait is all that is needed.

use super::{
    ArrayColumn, BinaryColumn, BooleanColumn, ByteColumn, DateColumn, DecimalColumn, DoubleColumn,
    FloatColumn, IntegerColumn, IntoColumn, LongColumn, ShortColumn, StringColumn, TimestampColumn,
    TypedColumn, WindowSpec,
};
use crate::capability::{FloatingPoint, Integral, Numeric, NumericOrInterval, Ordered, Temporal};
use crate::expr::{BinaryOperator, DataType, Expr, Literal, NullOrdering, SortDirection, UnaryOperator};

pub(crate) fn boolean_op(op: BinaryOperator, left: Expr, right: Expr) -> BooleanColumn {
    BooleanColumn::from_expr(Expr::binary(op, left, right))
}

/// Division always yields a double: the dividend is widened before dividing.
pub(crate) fn double_division(left: Expr, right: Expr) -> Expr {
    Expr::binary(BinaryOperator::Divide, left.cast(DataType::Double), right)
}

/// A sort key. Terminal: it can be used for ordering, but carries no value type.
#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    expr: Expr,
}

impl SortKey {
    fn new(expr: Expr, direction: SortDirection, nulls: NullOrdering) -> Self {
        Self {
            expr: expr.sort(direction, nulls),
        }
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn into_expr(self) -> Expr {
        self.expr
    }
}

/// Operations available on every column.
pub trait ColumnExt: TypedColumn {
    fn equal_to(&self, other: impl IntoColumn<Self>) -> BooleanColumn {
        boolean_op(BinaryOperator::Equal, self.expr().clone(), other.into_column().into_expr())
    }

    fn not_equal(&self, other: impl IntoColumn<Self>) -> BooleanColumn {
        boolean_op(BinaryOperator::NotEqual, self.expr().clone(), other.into_column().into_expr())
    }

    /// Null-safe equality: two nulls are equal, null and non-null are not
    fn equal_null_safe(&self, other: impl IntoColumn<Self>) -> BooleanColumn {
        boolean_op(
            BinaryOperator::EqualNullSafe,
            self.expr().clone(),
            other.into_column().into_expr(),
        )
    }

    fn not_equal_null_safe(&self, other: impl IntoColumn<Self>) -> BooleanColumn {
        BooleanColumn::from_expr(Expr::unary(
            UnaryOperator::Not,
            self.equal_null_safe(other).into_expr(),
        ))
    }

    fn is_null(&self) -> BooleanColumn {
        BooleanColumn::from_expr(Expr::unary(UnaryOperator::IsNull, self.expr().clone()))
    }

    fn is_not_null(&self) -> BooleanColumn {
        BooleanColumn::from_expr(Expr::unary(UnaryOperator::IsNotNull, self.expr().clone()))
    }

    /// Same column under a new output name; the receiver is left untouched
    fn alias(&self, name: &str) -> Self {
        Self::from_expr(self.expr().clone().alias(name))
    }

    fn name(&self, name: &str) -> Self {
        self.alias(name)
    }

    fn asc(&self) -> SortKey {
        let direction = SortDirection::Ascending;
        SortKey::new(self.expr().clone(), direction, direction.default_nulls())
    }

    fn asc_nulls_first(&self) -> SortKey {
        SortKey::new(self.expr().clone(), SortDirection::Ascending, NullOrdering::NullsFirst)
    }

    fn asc_nulls_last(&self) -> SortKey {
        SortKey::new(self.expr().clone(), SortDirection::Ascending, NullOrdering::NullsLast)
    }

    fn desc(&self) -> SortKey {
        let direction = SortDirection::Descending;
        SortKey::new(self.expr().clone(), direction, direction.default_nulls())
    }

    fn desc_nulls_first(&self) -> SortKey {
        SortKey::new(self.expr().clone(), SortDirection::Descending, NullOrdering::NullsFirst)
    }

    fn desc_nulls_last(&self) -> SortKey {
        SortKey::new(self.expr().clone(), SortDirection::Descending, NullOrdering::NullsLast)
    }

    /// Inclusive range test
    fn between(&self, lower: impl IntoColumn<Self>, upper: impl IntoColumn<Self>) -> BooleanColumn {
        BooleanColumn::from_expr(Expr::Between {
            expr: Box::new(self.expr().clone()),
            low: Box::new(lower.into_column().into_expr()),
            high: Box::new(upper.into_column().into_expr()),
        })
    }

    /// Cast to any column type, using the target's descriptor
    fn cast<T: TypedColumn>(&self) -> T {
        T::from_expr(self.expr().clone().cast(T::data_type()))
    }

    /// Apply this (aggregate or ranking) expression over a window
    fn over(&self, window: &WindowSpec) -> Self {
        Self::from_expr(Expr::Window {
            expr: Box::new(self.expr().clone()),
            window: window.definition().clone(),
        })
    }

    fn count(&self) -> LongColumn {
        LongColumn::from_expr(Expr::call("count", vec![self.expr().clone()]))
    }

    fn count_distinct(&self) -> LongColumn {
        LongColumn::from_expr(Expr::call("count", vec![Expr::raw(format!("DISTINCT {}", self.expr()))]))
    }

    fn first(&self) -> Self {
        Self::from_expr(Expr::call("first", vec![self.expr().clone()]))
    }

    fn collect_list(&self) -> ArrayColumn<Self> {
        ArrayColumn::from_expr(Expr::call("collect_list", vec![self.expr().clone()]))
    }

    fn collect_set(&self) -> ArrayColumn<Self> {
        ArrayColumn::from_expr(Expr::call("collect_set", vec![self.expr().clone()]))
    }

    /// Value `offset` rows before the current row within a window
    fn lag(&self, offset: i32) -> Self {
        Self::from_expr(Expr::call(
            "lag",
            vec![self.expr().clone(), Expr::lit(Literal::Integer(offset))],
        ))
    }

    /// Value `offset` rows after the current row within a window
    fn lead(&self, offset: i32) -> Self {
        Self::from_expr(Expr::call(
            "lead",
            vec![self.expr().clone(), Expr::lit(Literal::Integer(offset))],
        ))
    }
}

impl<T: TypedColumn> ColumnExt for T {}

/// Comparisons for ordered columns.
///
/// `lt`/`le` are emitted as the mirrored `>`/`>=`, so `a.gt(b)` and `b.lt(a)`
/// build the same expression.
pub trait OrderedExt: Ordered {
    fn gt(&self, other: impl IntoColumn<Self>) -> BooleanColumn {
        boolean_op(
            BinaryOperator::GreaterThan,
            self.expr().clone(),
            other.into_column().into_expr(),
        )
    }

    fn ge(&self, other: impl IntoColumn<Self>) -> BooleanColumn {
        boolean_op(
            BinaryOperator::GreaterThanOrEqual,
            self.expr().clone(),
            other.into_column().into_expr(),
        )
    }

    fn lt(&self, other: impl IntoColumn<Self>) -> BooleanColumn {
        boolean_op(
            BinaryOperator::GreaterThan,
            other.into_column().into_expr(),
            self.expr().clone(),
        )
    }

    fn le(&self, other: impl IntoColumn<Self>) -> BooleanColumn {
        boolean_op(
            BinaryOperator::GreaterThanOrEqual,
            other.into_column().into_expr(),
            self.expr().clone(),
        )
    }

    fn min(&self) -> Self {
        Self::from_expr(Expr::call("min", vec![self.expr().clone()]))
    }

    fn max(&self) -> Self {
        Self::from_expr(Expr::call("max", vec![self.expr().clone()]))
    }

    /// Greatest of this column and the others, row-wise
    fn greatest(&self, others: &[Self]) -> Self {
        let mut args = vec![self.expr().clone()];
        args.extend(others.iter().map(|c| c.expr().clone()));
        Self::from_expr(Expr::call("greatest", args))
    }

    /// Least of this column and the others, row-wise
    fn least(&self, others: &[Self]) -> Self {
        let mut args = vec![self.expr().clone()];
        args.extend(others.iter().map(|c| c.expr().clone()));
        Self::from_expr(Expr::call("least", args))
    }
}

impl<T: Ordered> OrderedExt for T {}

pub trait NumericExt: Numeric {
    fn abs(&self) -> Self {
        Self::from_expr(Expr::call("abs", vec![self.expr().clone()]))
    }

    fn sum(&self) -> Self {
        Self::from_expr(Expr::call("sum", vec![self.expr().clone()]))
    }

    /// Average, always a double
    fn avg(&self) -> DoubleColumn {
        DoubleColumn::from_expr(Expr::call("avg", vec![self.expr().clone()]))
    }

    /// Division by another column or literal of the same type, always a double
    fn divide(&self, other: impl IntoColumn<Self>) -> DoubleColumn {
        DoubleColumn::from_expr(double_division(
            self.expr().clone(),
            other.into_column().into_expr(),
        ))
    }
}

impl<T: Numeric> NumericExt for T {}

/// Negation for numbers and intervals
pub trait NegateExt: NumericOrInterval {
    fn negate(&self) -> Self {
        Self::from_expr(Expr::unary(UnaryOperator::Negate, self.expr().clone()))
    }
}

impl<T: NumericOrInterval> NegateExt for T {}

pub trait IntegralExt: Integral {
    /// XOR of every value in the group
    fn bit_xor_agg(&self) -> Self {
        Self::from_expr(Expr::call("bit_xor", vec![self.expr().clone()]))
    }

    fn bit_and_agg(&self) -> Self {
        Self::from_expr(Expr::call("bit_and", vec![self.expr().clone()]))
    }

    fn bit_or_agg(&self) -> Self {
        Self::from_expr(Expr::call("bit_or", vec![self.expr().clone()]))
    }

    /// Number of set bits
    fn bit_count(&self) -> IntegerColumn {
        IntegerColumn::from_expr(Expr::call("bit_count", vec![self.expr().clone()]))
    }

    fn shift_left(&self, bits: i32) -> Self {
        Self::from_expr(Expr::call(
            "shiftleft",
            vec![self.expr().clone(), Expr::lit(Literal::Integer(bits))],
        ))
    }

    fn shift_right(&self, bits: i32) -> Self {
        Self::from_expr(Expr::call(
            "shiftright",
            vec![self.expr().clone(), Expr::lit(Literal::Integer(bits))],
        ))
    }
}

impl<T: Integral> IntegralExt for T {}

pub trait FloatingPointExt: FloatingPoint {
    fn is_nan(&self) -> BooleanColumn {
        BooleanColumn::from_expr(Expr::call("isnan", vec![self.expr().clone()]))
    }

    /// This value, or `replacement` where it is NaN
    fn nan_or(&self, replacement: impl IntoColumn<Self>) -> Self {
        Self::from_expr(Expr::call(
            "nanvl",
            vec![self.expr().clone(), replacement.into_column().into_expr()],
        ))
    }
}

impl<T: FloatingPoint> FloatingPointExt for T {}

pub trait TemporalExt: Temporal {
    fn year(&self) -> IntegerColumn {
        IntegerColumn::from_expr(Expr::call(
            "date_part",
            vec![Expr::lit(Literal::String("YEAR".to_string())), self.expr().clone()],
        ))
    }
}

impl<T: Temporal> TemporalExt for T {}

/// Named casts shared by the numeric leaves, booleans and strings
pub trait LeafCasts: TypedColumn {
    fn as_byte(&self) -> ByteColumn {
        self.cast()
    }

    fn as_short(&self) -> ShortColumn {
        self.cast()
    }

    fn as_integer(&self) -> IntegerColumn {
        self.cast()
    }

    fn as_long(&self) -> LongColumn {
        self.cast()
    }

    fn as_float(&self) -> FloatColumn {
        self.cast()
    }

    fn as_double(&self) -> DoubleColumn {
        self.cast()
    }

    fn as_decimal(&self) -> DecimalColumn {
        self.cast()
    }

    fn as_string(&self) -> StringColumn {
        self.cast()
    }
}

impl LeafCasts for BooleanColumn {}
impl LeafCasts for ByteColumn {}
impl LeafCasts for ShortColumn {}
impl LeafCasts for IntegerColumn {}
impl LeafCasts for LongColumn {}
impl LeafCasts for FloatColumn {}
impl LeafCasts for DoubleColumn {}
impl LeafCasts for DecimalColumn {}
impl LeafCasts for StringColumn {}

/// Casts only strings support
impl StringColumn {
    pub fn as_boolean(&self) -> BooleanColumn {
        self.cast()
    }

    pub fn as_date(&self) -> DateColumn {
        self.cast()
    }

    pub fn as_timestamp(&self) -> TimestampColumn {
        self.cast()
    }

    pub fn as_binary(&self) -> BinaryColumn {
        self.cast()
    }
}
