use std::marker::PhantomData;

use super::{BooleanColumn, IntoColumn, TypedColumn};
use crate::expr::Expr;

/// Start a conditional: `value` where `condition` holds.
///
/// Every branch, and the fallback, must have the same column type `T`.
pub fn when<T: TypedColumn>(
    condition: impl IntoColumn<BooleanColumn>,
    value: impl IntoColumn<T>,
) -> CaseWhen<T> {
    CaseWhen {
        branches: vec![(
            condition.into_column().into_expr(),
            value.into_column().into_expr(),
        )],
        _column: PhantomData,
    }
}

/// A conditional under construction
#[derive(Debug, Clone, PartialEq)]
pub struct CaseWhen<T> {
    branches: Vec<(Expr, Expr)>,
    _column: PhantomData<T>,
}

impl<T: TypedColumn> CaseWhen<T> {
    pub fn when(
        mut self,
        condition: impl IntoColumn<BooleanColumn>,
        value: impl IntoColumn<T>,
    ) -> Self {
        self.branches.push((
            condition.into_column().into_expr(),
            value.into_column().into_expr(),
        ));
        self
    }

    pub fn otherwise(self, value: impl IntoColumn<T>) -> T {
        T::from_expr(Expr::Case {
            branches: self.branches,
            otherwise: Some(Box::new(value.into_column().into_expr())),
        })
    }

    /// Finish without a fallback; unmatched rows are null
    pub fn end(self) -> T {
        T::from_expr(Expr::Case {
            branches: self.branches,
            otherwise: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{ColumnExt, IntegerColumn, OrderedExt, StringColumn};

    #[test]
    fn test_chained_branches() {
        let score = IntegerColumn::named("score");
        let grade: StringColumn = when(score.ge(90), "A")
            .when(score.ge(80), "B")
            .otherwise("C");
        assert_eq!(
            grade.expr().to_string(),
            "CASE WHEN (score >= 90) THEN 'A' WHEN (score >= 80) THEN 'B' ELSE 'C' END"
        );
    }

    #[test]
    fn test_without_fallback() {
        let flag = IntegerColumn::named("n").is_null();
        let n: IntegerColumn = when(flag, 0).end();
        assert_eq!(n.expr().to_string(), "CASE WHEN (n IS NULL) THEN 0 END");
    }
}
