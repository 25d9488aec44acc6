use super::{IntegerColumn, SortKey, TypedColumn};
use crate::expr::{Expr, FrameBound, FrameKind, WindowDefinition, WindowFrame};

/// Frame offset for an unbounded start
pub const UNBOUNDED_PRECEDING: i64 = i64::MIN;
/// Frame offset for an unbounded end
pub const UNBOUNDED_FOLLOWING: i64 = i64::MAX;
pub const CURRENT_ROW: i64 = 0;

/// Window specification applied with `ColumnExt::over`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowSpec {
    definition: WindowDefinition,
}

impl WindowSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn partition_by<C: TypedColumn>(mut self, column: &C) -> Self {
        self.definition.partition_by.push(column.expr().clone());
        self
    }

    pub fn order_by(mut self, key: SortKey) -> Self {
        self.definition.order_by.push(key.into_expr());
        self
    }

    /// Physical frame in rows relative to the current row
    pub fn rows_between(mut self, start: i64, end: i64) -> Self {
        self.definition.frame = Some(frame(FrameKind::Rows, start, end));
        self
    }

    /// Logical frame in ordering-key values relative to the current row
    pub fn range_between(mut self, start: i64, end: i64) -> Self {
        self.definition.frame = Some(frame(FrameKind::Range, start, end));
        self
    }

    pub fn definition(&self) -> &WindowDefinition {
        &self.definition
    }
}

fn frame(kind: FrameKind, start: i64, end: i64) -> WindowFrame {
    WindowFrame {
        kind,
        start: FrameBound::from_offset(start),
        end: FrameBound::from_offset(end),
    }
}

/// Sequential row number within the window partition, starting at 1
pub fn row_number() -> IntegerColumn {
    IntegerColumn::from_expr(Expr::call("row_number", Vec::new()))
}

/// Rank with gaps after ties
pub fn rank() -> IntegerColumn {
    IntegerColumn::from_expr(Expr::call("rank", Vec::new()))
}

pub fn dense_rank() -> IntegerColumn {
    IntegerColumn::from_expr(Expr::call("dense_rank", Vec::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{ColumnExt, LongColumn, NumericExt, StringColumn};

    #[test]
    fn test_ranking_over_partition() {
        let dept = StringColumn::named("dept");
        let salary = LongColumn::named("salary");
        let spec = WindowSpec::new().partition_by(&dept).order_by(salary.desc());
        assert_eq!(
            row_number().over(&spec).expr().to_string(),
            "row_number() OVER (PARTITION BY dept ORDER BY salary DESC NULLS LAST)"
        );
    }

    #[test]
    fn test_running_total_frame() {
        let v = LongColumn::named("v");
        let spec = WindowSpec::new()
            .order_by(LongColumn::named("t").asc())
            .rows_between(UNBOUNDED_PRECEDING, CURRENT_ROW);
        assert_eq!(
            v.sum().over(&spec).expr().to_string(),
            "sum(v) OVER (ORDER BY t ASC NULLS FIRST ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW)"
        );
        assert_eq!(
            v.lag(1).over(&WindowSpec::new().range_between(-2, 2)).expr().to_string(),
            "lag(v, 1) OVER (RANGE BETWEEN 2 PRECEDING AND 2 FOLLOWING)"
        );
    }
}
