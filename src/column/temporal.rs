//! Dates, timestamps and intervals.
//!
//! Subtracting two values of the same temporal type always yields an
//! [`IntervalColumn`], whichever side is a column and whichever is a host
//! literal. When both sides are host literals, the host type's own `-` applies,
//! so [`temporal_difference`] covers that case.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::ops::{column_op, leaf_column, negation};
use super::{IntegerColumn, IntoColumn, LiteralColumn, TypedColumn};
use crate::capability::{capabilities, Temporal};
use crate::expr::{BinaryOperator, DataType, Expr, Interval, Literal};

leaf_column!(DateColumn, DataType::Date, NaiveDate);
leaf_column!(TimestampColumn, DataType::Timestamp, NaiveDateTime);
leaf_column!(
    /// Calendar interval (months, days, microseconds)
    IntervalColumn,
    DataType::Interval,
    Interval
);

capabilities! {
    Ordered => [DateColumn, TimestampColumn, IntervalColumn];
    Temporal => [DateColumn, TimestampColumn, IntervalColumn];
    NumericOrInterval => [IntervalColumn];
    NumericOrTemporal => [DateColumn, TimestampColumn, IntervalColumn];
    NumericOrDateTime => [DateColumn, TimestampColumn];
}

fn minus(left: Expr, right: Expr) -> Expr {
    Expr::binary(BinaryOperator::Minus, left, right)
}

fn plus(left: Expr, right: Expr) -> Expr {
    Expr::binary(BinaryOperator::Plus, left, right)
}

column_op!(Sub::sub, minus, DateColumn, NaiveDate => IntervalColumn);
column_op!(Sub::sub, minus, TimestampColumn, NaiveDateTime => IntervalColumn);
column_op!(Sub::sub, minus, IntervalColumn, Interval => IntervalColumn);
column_op!(Add::add, plus, IntervalColumn, Interval => IntervalColumn);
negation!(IntervalColumn);

impl IntoColumn<TimestampColumn> for DateTime<Utc> {
    fn into_column(self) -> TimestampColumn {
        TimestampColumn::lit(self.naive_utc())
    }
}

/// Shift a date or timestamp by an interval; the result keeps the temporal type.
macro_rules! interval_shift {
    ($($column:ty),*) => {
        $(
            impl<R: IntoColumn<IntervalColumn>> std::ops::Add<R> for $column {
                type Output = $column;

                fn add(self, rhs: R) -> $column {
                    <$column>::from_expr(plus(self.into_expr(), rhs.into_column().into_expr()))
                }
            }

            impl<R: IntoColumn<IntervalColumn>> std::ops::Add<R> for &$column {
                type Output = $column;

                fn add(self, rhs: R) -> $column {
                    <$column>::from_expr(plus(self.expr().clone(), rhs.into_column().into_expr()))
                }
            }

            impl $column {
                /// Shift back by an interval. `-` between two values of this type
                /// is the interval-valued difference instead.
                pub fn minus_interval(&self, interval: impl IntoColumn<IntervalColumn>) -> $column {
                    <$column>::from_expr(minus(self.expr().clone(), interval.into_column().into_expr()))
                }

                pub fn month(&self) -> IntegerColumn {
                    date_part("MONTH", self.expr())
                }

                pub fn day_of_month(&self) -> IntegerColumn {
                    date_part("DAY", self.expr())
                }
            }
        )*
    };
}

interval_shift!(DateColumn, TimestampColumn);

fn date_part(field: &str, source: &Expr) -> IntegerColumn {
    IntegerColumn::from_expr(Expr::call(
        "date_part",
        vec![Expr::lit(Literal::String(field.to_string())), source.clone()],
    ))
}

/// Interval between two temporal values of the same type, for any mix of
/// columns and host literals.
pub fn temporal_difference<T: Temporal>(
    left: impl IntoColumn<T>,
    right: impl IntoColumn<T>,
) -> IntervalColumn {
    IntervalColumn::from_expr(minus(
        left.into_column().into_expr(),
        right.into_column().into_expr(),
    ))
}

impl DateColumn {
    pub fn current() -> DateColumn {
        DateColumn::from_expr(Expr::call("current_date", Vec::new()))
    }

    pub fn add_days(&self, days: impl IntoColumn<IntegerColumn>) -> DateColumn {
        DateColumn::from_expr(Expr::call(
            "date_add",
            vec![self.expr.clone(), days.into_column().into_expr()],
        ))
    }

    /// Whole days between `start` and this date
    pub fn days_since(&self, start: impl IntoColumn<DateColumn>) -> IntegerColumn {
        IntegerColumn::from_expr(Expr::call(
            "datediff",
            vec![self.expr.clone(), start.into_column().into_expr()],
        ))
    }
}

impl TimestampColumn {
    pub fn current() -> TimestampColumn {
        TimestampColumn::from_expr(Expr::call("current_timestamp", Vec::new()))
    }

    pub fn to_date(&self) -> DateColumn {
        DateColumn::from_expr(self.expr.clone().cast(DataType::Date))
    }

    pub fn hour(&self) -> IntegerColumn {
        date_part("HOUR", &self.expr)
    }

    pub fn minute(&self) -> IntegerColumn {
        date_part("MINUTE", &self.expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{NegateExt, OrderedExt, TemporalExt};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_date_difference_is_interval_for_every_operand_form() {
        let a = DateColumn::named("a");
        let b = DateColumn::named("b");

        let column_column: IntervalColumn = &a - &b;
        let column_literal: IntervalColumn = &a - day(2);
        let literal_column: IntervalColumn = day(1) - &b;
        let literal_literal: IntervalColumn = temporal_difference::<DateColumn>(day(1), day(2));

        assert_eq!(column_column.expr().to_string(), "(a - b)");
        assert_eq!(column_literal.expr().to_string(), "(a - DATE '2024-01-02')");
        assert_eq!(literal_column.expr().to_string(), "(DATE '2024-01-01' - b)");
        assert_eq!(
            literal_literal.expr().to_string(),
            "(DATE '2024-01-01' - DATE '2024-01-02')"
        );
    }

    #[test]
    fn test_timestamp_and_interval_difference() {
        let t = TimestampColumn::named("t");
        let noon = day(3).and_hms_opt(12, 0, 0).unwrap();
        let _: IntervalColumn = &t - noon;
        let _: IntervalColumn = noon - t.clone();

        let i = IntervalColumn::named("i");
        let _: IntervalColumn = &i - Interval::days(1);
        let _: IntervalColumn = Interval::months(1) - &i;
        assert_eq!(i.negate(), -&i);
    }

    #[test]
    fn test_shift_by_interval_keeps_type() {
        let d = DateColumn::named("d");
        let shifted: DateColumn = &d + Interval::days(7);
        assert_eq!(
            shifted.expr().to_string(),
            "(d + INTERVAL 0 MONTHS 7 DAYS 0 MICROSECONDS)"
        );
        let back: DateColumn = d.minus_interval(IntervalColumn::named("i"));
        assert_eq!(back.expr().to_string(), "(d - i)");
    }

    #[test]
    fn test_year_and_ordering() {
        let t = TimestampColumn::named("t");
        assert_eq!(t.year().expr().to_string(), "date_part('YEAR', t)");
        assert_eq!(t.hour().expr().to_string(), "date_part('HOUR', t)");
        let now = Utc::now();
        assert_eq!(
            t.lt(now).expr(),
            &Expr::binary(
                BinaryOperator::GreaterThan,
                Expr::lit(Literal::Timestamp(now.naive_utc())),
                Expr::column("t")
            )
        );
        assert_eq!(t.to_date().expr().to_string(), "CAST(t AS date)");
    }
}
