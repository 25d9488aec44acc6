//! Boolean columns: logical operators and boolean aggregates.

use indexmap::IndexSet;

use super::ops::{column_op, leaf_column};
use super::{IntoColumn, TypedColumn};
use crate::capability::capabilities;
use crate::expr::{BinaryOperator, DataType, Expr, UnaryOperator};

leaf_column!(
    /// Boolean column. `!`, `&` and `|` are logical, not bitwise.
    BooleanColumn,
    DataType::Boolean,
    bool
);

capabilities! {
    Ordered => [BooleanColumn];
}

column_op!(BitAnd::bitand, |l, r| Expr::binary(BinaryOperator::And, l, r), BooleanColumn, bool => BooleanColumn);
column_op!(BitOr::bitor, |l, r| Expr::binary(BinaryOperator::Or, l, r), BooleanColumn, bool => BooleanColumn);

impl std::ops::Not for BooleanColumn {
    type Output = BooleanColumn;

    fn not(self) -> BooleanColumn {
        BooleanColumn::from_expr(Expr::unary(UnaryOperator::Not, self.expr))
    }
}

impl std::ops::Not for &BooleanColumn {
    type Output = BooleanColumn;

    fn not(self) -> BooleanColumn {
        BooleanColumn::from_expr(Expr::unary(UnaryOperator::Not, self.expr.clone()))
    }
}

impl BooleanColumn {
    pub fn and(&self, other: impl IntoColumn<BooleanColumn>) -> BooleanColumn {
        self & other
    }

    pub fn or(&self, other: impl IntoColumn<BooleanColumn>) -> BooleanColumn {
        self | other
    }

    pub fn not(&self) -> BooleanColumn {
        !self
    }

    /// Membership test against literal values. Duplicates are dropped, keeping
    /// the first occurrence, so the generated list is stable.
    pub fn is_in(&self, values: impl IntoIterator<Item = bool>) -> BooleanColumn {
        let distinct: IndexSet<bool> = values.into_iter().collect();
        BooleanColumn::from_expr(Expr::InList {
            expr: Box::new(self.expr.clone()),
            list: distinct
                .into_iter()
                .map(|v| BooleanColumn::from(v).into_expr())
                .collect(),
        })
    }

    /// True when every value in the group is true
    pub fn every(&self) -> BooleanColumn {
        BooleanColumn::from_expr(Expr::call("bool_and", vec![self.expr.clone()]))
    }

    /// True when at least one value in the group is true
    pub fn some(&self) -> BooleanColumn {
        BooleanColumn::from_expr(Expr::call("bool_or", vec![self.expr.clone()]))
    }
}

impl From<bool> for BooleanColumn {
    fn from(value: bool) -> Self {
        value.into_column()
    }
}
