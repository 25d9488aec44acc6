use indexmap::IndexSet;

use super::ops::{column_op, leaf_column};
use super::{BooleanColumn, IntegerColumn, IntoColumn, LiteralColumn, TypedColumn};
use crate::capability::capabilities;
use crate::expr::{BinaryOperator, DataType, Expr, Literal};

leaf_column!(
    /// UTF-8 strings. `+` concatenates.
    StringColumn,
    DataType::String,
    String
);

capabilities! {
    Ordered => [StringColumn];
}

fn concat(left: Expr, right: Expr) -> Expr {
    Expr::call("concat", vec![left, right])
}

column_op!(Add::add, concat, StringColumn, String => StringColumn);

impl IntoColumn<StringColumn> for &str {
    fn into_column(self) -> StringColumn {
        StringColumn::lit(self.to_string())
    }
}

impl std::ops::Add<StringColumn> for &str {
    type Output = StringColumn;

    fn add(self, rhs: StringColumn) -> StringColumn {
        StringColumn::from_expr(concat(self.into_column().into_expr(), rhs.into_expr()))
    }
}

impl std::ops::Add<&StringColumn> for &str {
    type Output = StringColumn;

    fn add(self, rhs: &StringColumn) -> StringColumn {
        StringColumn::from_expr(concat(self.into_column().into_expr(), rhs.expr().clone()))
    }
}

fn string_lit(value: &str) -> Expr {
    Expr::lit(Literal::String(value.to_string()))
}

fn int_lit(value: i32) -> Expr {
    Expr::lit(Literal::Integer(value))
}

impl StringColumn {
    fn apply(&self, function: &str) -> StringColumn {
        StringColumn::from_expr(Expr::call(function, vec![self.expr.clone()]))
    }

    pub fn plus(&self, other: impl IntoColumn<StringColumn>) -> StringColumn {
        self + other
    }

    /// Length in characters
    pub fn length(&self) -> IntegerColumn {
        IntegerColumn::from_expr(Expr::call("length", vec![self.expr.clone()]))
    }

    /// SQL `LIKE` match against a literal pattern (`%` and `_` wildcards)
    pub fn like(&self, pattern: &str) -> BooleanColumn {
        BooleanColumn::from_expr(Expr::binary(
            BinaryOperator::Like,
            self.expr.clone(),
            string_lit(pattern),
        ))
    }

    /// Regular-expression match against a literal pattern
    pub fn rlike(&self, pattern: &str) -> BooleanColumn {
        BooleanColumn::from_expr(Expr::binary(
            BinaryOperator::RLike,
            self.expr.clone(),
            string_lit(pattern),
        ))
    }

    // Prefix, suffix and containment take columns only; literals must be
    // wrapped explicitly with `StringColumn::lit`.

    pub fn starts_with(&self, prefix: &StringColumn) -> BooleanColumn {
        BooleanColumn::from_expr(Expr::call(
            "startswith",
            vec![self.expr.clone(), prefix.expr.clone()],
        ))
    }

    pub fn ends_with(&self, suffix: &StringColumn) -> BooleanColumn {
        BooleanColumn::from_expr(Expr::call(
            "endswith",
            vec![self.expr.clone(), suffix.expr.clone()],
        ))
    }

    pub fn contains(&self, other: &StringColumn) -> BooleanColumn {
        BooleanColumn::from_expr(Expr::call(
            "contains",
            vec![self.expr.clone(), other.expr.clone()],
        ))
    }

    /// Substring by 1-based literal position and length
    pub fn substr(&self, position: i32, length: i32) -> StringColumn {
        StringColumn::from_expr(Expr::call(
            "substring",
            vec![self.expr.clone(), int_lit(position), int_lit(length)],
        ))
    }

    /// Substring with column-valued bounds
    pub fn substring(
        &self,
        position: impl IntoColumn<IntegerColumn>,
        length: impl IntoColumn<IntegerColumn>,
    ) -> StringColumn {
        StringColumn::from_expr(Expr::call(
            "substring",
            vec![
                self.expr.clone(),
                position.into_column().into_expr(),
                length.into_column().into_expr(),
            ],
        ))
    }

    pub fn lpad(&self, length: i32, pad: &str) -> StringColumn {
        StringColumn::from_expr(Expr::call(
            "lpad",
            vec![self.expr.clone(), int_lit(length), string_lit(pad)],
        ))
    }

    pub fn rpad(&self, length: i32, pad: &str) -> StringColumn {
        StringColumn::from_expr(Expr::call(
            "rpad",
            vec![self.expr.clone(), int_lit(length), string_lit(pad)],
        ))
    }

    pub fn trim(&self) -> StringColumn {
        self.apply("trim")
    }

    pub fn ltrim(&self) -> StringColumn {
        self.apply("ltrim")
    }

    pub fn rtrim(&self) -> StringColumn {
        self.apply("rtrim")
    }

    /// Trim any of `characters` from both ends
    pub fn trim_chars(&self, characters: &str) -> StringColumn {
        StringColumn::from_expr(Expr::raw(format!(
            "trim(BOTH {} FROM {})",
            Literal::String(characters.to_string()),
            self.expr
        )))
    }

    pub fn upper(&self) -> StringColumn {
        self.apply("upper")
    }

    pub fn lower(&self) -> StringColumn {
        self.apply("lower")
    }

    pub fn initcap(&self) -> StringColumn {
        self.apply("initcap")
    }

    /// Membership test; duplicates are dropped keeping first-seen order
    pub fn is_in<S: Into<String>>(&self, values: impl IntoIterator<Item = S>) -> BooleanColumn {
        let distinct: IndexSet<String> = values.into_iter().map(Into::into).collect();
        BooleanColumn::from_expr(Expr::InList {
            expr: Box::new(self.expr.clone()),
            list: distinct.into_iter().map(|v| Expr::lit(Literal::String(v))).collect(),
        })
    }
}

impl From<&str> for StringColumn {
    fn from(value: &str) -> Self {
        value.into_column()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{ColumnExt, LeafCasts, OrderedExt};

    #[test]
    fn test_concatenation() {
        let first = StringColumn::named("first");
        let last = StringColumn::named("last");
        assert_eq!(
            (&first + " " + &last).expr().to_string(),
            "concat(concat(first, ' '), last)"
        );
        assert_eq!(("Dr. " + &last).expr().to_string(), "concat('Dr. ', last)");
        assert_eq!(first.plus("x"), &first + "x");
    }

    #[test]
    fn test_pattern_and_containment() {
        let s = StringColumn::named("s");
        assert_eq!(s.like("a%").expr().to_string(), "(s LIKE 'a%')");
        assert_eq!(s.rlike("^a.*$").expr().to_string(), "(s RLIKE '^a.*$')");
        assert_eq!(
            s.starts_with(&StringColumn::lit("ab".into())).expr().to_string(),
            "startswith(s, 'ab')"
        );
        assert_eq!(
            s.contains(&StringColumn::named("t")).expr().to_string(),
            "contains(s, t)"
        );
    }

    #[test]
    fn test_substring_and_padding() {
        let s = StringColumn::named("s");
        assert_eq!(s.substr(2, 3).expr().to_string(), "substring(s, 2, 3)");
        assert_eq!(
            s.substring(IntegerColumn::named("p"), 1).expr().to_string(),
            "substring(s, p, 1)"
        );
        assert_eq!(s.lpad(5, "0").expr().to_string(), "lpad(s, 5, '0')");
        assert_eq!(s.trim_chars("xy").expr().to_string(), "trim(BOTH 'xy' FROM s)");
        assert_eq!(s.upper().lower().expr().to_string(), "lower(upper(s))");
    }

    #[test]
    fn test_is_in_dedups_in_first_seen_order() {
        let s = StringColumn::named("s");
        assert_eq!(
            s.is_in(["b", "a", "b", "c", "a"]).expr().to_string(),
            "(s IN ('b', 'a', 'c'))"
        );
    }

    #[test]
    fn test_ordering_and_casts() {
        let s = StringColumn::named("s");
        assert_eq!(s.ge("m").expr().to_string(), "(s >= 'm')");
        assert_eq!(s.length().expr().to_string(), "length(s)");
        assert_eq!(s.as_long().expr().to_string(), "CAST(s AS bigint)");
        assert_eq!(s.as_date().expr().to_string(), "CAST(s AS date)");
        assert_eq!(s.equal_to("x").expr().to_string(), "(s = 'x')");
    }
}
