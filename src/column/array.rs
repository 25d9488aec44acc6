//! Array columns
//!
//! `ArrayColumn<T>` holds elements of column type `T`. Set operators keep the
//! mapping inherited from the original column API: `&` is union, `|` is
//! intersection, `-` is difference and `+` concatenates.
//!
//! Predicates, comparators, transforms and folds are closures over placeholder
//! columns, compiled once into higher-order templates (see [`super::lambda`]).

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

use super::lambda::{template, Lambda, LambdaScope};
use super::tuple::{Tuple2, Tuple3, Tuple4, Tuple5};
use super::{
    BooleanColumn, IntegerColumn, IntoColumn, LiteralColumn, LongColumn, StringColumn,
    StructColumn, TypedColumn,
};
use crate::capability::{NumericOrDateTime, Ordered};
use crate::expr::{DataType, Expr, Literal, LiteralArray};

pub struct ArrayColumn<T> {
    expr: Expr,
    _element: PhantomData<T>,
}

impl<T> Clone for ArrayColumn<T> {
    fn clone(&self) -> Self {
        Self {
            expr: self.expr.clone(),
            _element: PhantomData,
        }
    }
}

impl<T> PartialEq for ArrayColumn<T> {
    fn eq(&self, other: &Self) -> bool {
        self.expr == other.expr
    }
}

impl<T> fmt::Debug for ArrayColumn<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayColumn")
            .field("element", &type_name::<T>())
            .field("expr", &self.expr)
            .finish()
    }
}

impl<T: TypedColumn> TypedColumn for ArrayColumn<T> {
    fn data_type() -> DataType {
        DataType::array(T::data_type())
    }

    fn from_expr(expr: Expr) -> Self {
        Self {
            expr,
            _element: PhantomData,
        }
    }

    fn expr(&self) -> &Expr {
        &self.expr
    }

    fn into_expr(self) -> Expr {
        self.expr
    }
}

impl<T: LiteralColumn> LiteralColumn for ArrayColumn<T> {
    type Native = LiteralArray<T::Native>;
}

impl<T: LiteralColumn> IntoColumn<ArrayColumn<T>> for LiteralArray<T::Native> {
    fn into_column(self) -> ArrayColumn<T> {
        ArrayColumn::lit(self)
    }
}

impl<T: LiteralColumn> IntoColumn<ArrayColumn<T>> for Vec<T::Native> {
    fn into_column(self) -> ArrayColumn<T> {
        ArrayColumn::lit(LiteralArray(self))
    }
}

macro_rules! array_set_op {
    ($trait:ident :: $method:ident, $function:literal) => {
        impl<T: TypedColumn, R: IntoColumn<ArrayColumn<T>>> std::ops::$trait<R> for ArrayColumn<T> {
            type Output = ArrayColumn<T>;

            fn $method(self, rhs: R) -> ArrayColumn<T> {
                ArrayColumn::from_expr(Expr::call(
                    $function,
                    vec![self.expr, rhs.into_column().into_expr()],
                ))
            }
        }

        impl<T: TypedColumn, R: IntoColumn<ArrayColumn<T>>> std::ops::$trait<R> for &ArrayColumn<T> {
            type Output = ArrayColumn<T>;

            fn $method(self, rhs: R) -> ArrayColumn<T> {
                ArrayColumn::from_expr(Expr::call(
                    $function,
                    vec![self.expr.clone(), rhs.into_column().into_expr()],
                ))
            }
        }
    };
}

array_set_op!(BitAnd::bitand, "array_union");
array_set_op!(BitOr::bitor, "array_intersect");
array_set_op!(Sub::sub, "array_except");
array_set_op!(Add::add, "concat");

fn empty_array(data_type: DataType) -> Expr {
    Expr::call("array", Vec::new()).cast(data_type)
}

/// Result of a positional explode: one row per element with its position.
///
/// Select [`PosExplode::expr`] to produce the `pos` and `col` output columns.
pub struct PosExplode<T> {
    expr: Expr,
    _element: PhantomData<T>,
}

impl<T: TypedColumn> PosExplode<T> {
    pub const POSITION: &'static str = "pos";
    pub const VALUE: &'static str = "col";

    fn new(generator: Expr) -> Self {
        Self {
            expr: Expr::MultiAlias {
                expr: Box::new(generator),
                names: vec![Self::POSITION.to_string(), Self::VALUE.to_string()],
            },
            _element: PhantomData,
        }
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn into_expr(self) -> Expr {
        self.expr
    }

    /// Zero-based position column produced by the generator
    pub fn position(&self) -> IntegerColumn {
        IntegerColumn::named(Self::POSITION)
    }

    /// Element column produced by the generator
    pub fn value(&self) -> T {
        T::named(Self::VALUE)
    }
}

impl<T> fmt::Debug for PosExplode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PosExplode").field("expr", &self.expr).finish()
    }
}

impl<T: TypedColumn> ArrayColumn<T> {
    fn call<O: TypedColumn>(&self, function: &str, extra: Vec<Expr>) -> O {
        let mut args = vec![self.expr.clone()];
        args.extend(extra);
        O::from_expr(Expr::call(function, args))
    }

    /// Array built from element columns or literals
    pub fn of<I, E>(items: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: IntoColumn<T>,
    {
        let items: Vec<Expr> = items
            .into_iter()
            .map(|item| item.into_column().into_expr())
            .collect();
        if items.is_empty() {
            Self::from_expr(empty_array(Self::data_type()))
        } else {
            Self::from_expr(Expr::call("array", items))
        }
    }

    /// `count` copies of `value`
    pub fn repeat(value: impl IntoColumn<T>, count: i32) -> Self {
        Self::from_expr(Expr::call(
            "array_repeat",
            vec![value.into_column().into_expr(), Expr::lit(Literal::Integer(count))],
        ))
    }

    /// Element at a zero-based literal position; null when out of range
    pub fn get(&self, index: i32) -> T {
        T::from_expr(Expr::Subscript {
            expr: Box::new(self.expr.clone()),
            index: Box::new(Expr::lit(Literal::Integer(index))),
        })
    }

    pub fn size(&self) -> IntegerColumn {
        self.call("size", Vec::new())
    }

    /// Whether any element equals `value`
    pub fn contains(&self, value: impl IntoColumn<T>) -> BooleanColumn {
        self.call("array_contains", vec![value.into_column().into_expr()])
    }

    /// 1-based position of the first element equal to `value`, 0 when absent
    pub fn position(&self, value: impl IntoColumn<T>) -> LongColumn {
        self.call("array_position", vec![value.into_column().into_expr()])
    }

    /// `length` elements starting at 1-based `start`
    pub fn slice(&self, start: i32, length: i32) -> Self {
        self.call(
            "slice",
            vec![Expr::lit(Literal::Integer(start)), Expr::lit(Literal::Integer(length))],
        )
    }

    pub fn slice_by(
        &self,
        start: impl IntoColumn<IntegerColumn>,
        length: impl IntoColumn<IntegerColumn>,
    ) -> Self {
        self.call(
            "slice",
            vec![start.into_column().into_expr(), length.into_column().into_expr()],
        )
    }

    /// Drop every element equal to `value`
    pub fn remove(&self, value: impl IntoColumn<T>) -> Self {
        self.call("array_remove", vec![value.into_column().into_expr()])
    }

    pub fn union(&self, other: impl IntoColumn<ArrayColumn<T>>) -> Self {
        self & other
    }

    pub fn intersect(&self, other: impl IntoColumn<ArrayColumn<T>>) -> Self {
        self | other
    }

    pub fn except(&self, other: impl IntoColumn<ArrayColumn<T>>) -> Self {
        self - other
    }

    pub fn concat(&self, other: impl IntoColumn<ArrayColumn<T>>) -> Self {
        self + other
    }

    pub fn distinct(&self) -> Self {
        self.call("array_distinct", Vec::new())
    }

    /// One row per element; empty or null arrays produce no rows
    pub fn explode(&self) -> T {
        self.call("explode", Vec::new())
    }

    /// Like `explode`, but empty or null arrays produce a single null row
    pub fn explode_outer(&self) -> T {
        self.call("explode_outer", Vec::new())
    }

    pub fn posexplode(&self) -> PosExplode<T> {
        PosExplode::new(Expr::call("posexplode", vec![self.expr.clone()]))
    }

    pub fn posexplode_outer(&self) -> PosExplode<T> {
        PosExplode::new(Expr::call("posexplode_outer", vec![self.expr.clone()]))
    }

    pub fn shuffle(&self) -> Self {
        self.call("shuffle", Vec::new())
    }

    pub fn reverse(&self) -> Self {
        self.call("reverse", Vec::new())
    }

    /// Sort ascending in natural element order, nulls last
    pub fn sort(&self) -> Self {
        self.call("array_sort", Vec::new())
    }

    /// Sort with a comparator returning a negative, zero or positive integer
    pub fn sort_by(&self, comparator: impl FnOnce(T, T) -> IntegerColumn) -> Self {
        let lambda = LambdaScope::new().lambda2(comparator);
        Self::from_expr(template("array_sort", &[&self.expr], &[lambda]))
    }

    pub fn filter(&self, predicate: impl FnOnce(T) -> BooleanColumn) -> Self {
        let lambda = LambdaScope::new().lambda1(predicate);
        Self::from_expr(template("filter", &[&self.expr], &[lambda]))
    }

    /// Filter with access to each element's zero-based index
    pub fn filter_indexed(&self, predicate: impl FnOnce(T, IntegerColumn) -> BooleanColumn) -> Self {
        let lambda = LambdaScope::new().lambda2(predicate);
        Self::from_expr(template("filter", &[&self.expr], &[lambda]))
    }

    pub fn transform<O: TypedColumn>(&self, function: impl FnOnce(T) -> O) -> ArrayColumn<O> {
        let lambda = LambdaScope::new().lambda1(function);
        ArrayColumn::from_expr(template("transform", &[&self.expr], &[lambda]))
    }

    /// Whether `predicate` holds for at least one element
    pub fn exists(&self, predicate: impl FnOnce(T) -> BooleanColumn) -> BooleanColumn {
        let lambda = LambdaScope::new().lambda1(predicate);
        BooleanColumn::from_expr(template("exists", &[&self.expr], &[lambda]))
    }

    /// Whether `predicate` holds for every element
    pub fn forall(&self, predicate: impl FnOnce(T) -> BooleanColumn) -> BooleanColumn {
        let lambda = LambdaScope::new().lambda1(predicate);
        BooleanColumn::from_expr(template("forall", &[&self.expr], &[lambda]))
    }

    /// Fold the elements into an accumulator starting at `zero`
    pub fn aggregate<A: TypedColumn>(
        &self,
        zero: impl IntoColumn<A>,
        merge: impl FnOnce(A, T) -> A,
    ) -> A {
        let zero = zero.into_column().into_expr();
        let merge = LambdaScope::new().lambda2(merge);
        A::from_expr(template("aggregate", &[&self.expr, &zero], &[merge]))
    }

    /// Fold, then project the final accumulator through `finish`
    pub fn aggregate_with<A: TypedColumn, O: TypedColumn>(
        &self,
        zero: impl IntoColumn<A>,
        merge: impl FnOnce(A, T) -> A,
        finish: impl FnOnce(A) -> O,
    ) -> O {
        let scope = LambdaScope::new();
        let zero = zero.into_column().into_expr();
        let merge = scope.lambda2(merge);
        let finish = scope.lambda1(finish);
        O::from_expr(template("aggregate", &[&self.expr, &zero], &[merge, finish]))
    }
}

impl<T: Ordered> ArrayColumn<T> {
    pub fn array_min(&self) -> T {
        self.call("array_min", Vec::new())
    }

    pub fn array_max(&self) -> T {
        self.call("array_max", Vec::new())
    }
}

impl<T: NumericOrDateTime> ArrayColumn<T> {
    /// Inclusive sequence from `start` to `stop` (one day steps for dates)
    pub fn sequence(start: impl IntoColumn<T>, stop: impl IntoColumn<T>) -> Self {
        Self::from_expr(Expr::call(
            "sequence",
            vec![start.into_column().into_expr(), stop.into_column().into_expr()],
        ))
    }
}

impl ArrayColumn<IntegerColumn> {
    /// Integers from `start` up to, not including, `end`
    pub fn range(start: i32, end: i32) -> Self {
        if end <= start {
            return Self::from_expr(empty_array(Self::data_type()));
        }
        Self::sequence(start, end - 1)
    }
}

impl ArrayColumn<StringColumn> {
    pub fn join(&self, separator: &str) -> StringColumn {
        self.call(
            "array_join",
            vec![Expr::lit(Literal::String(separator.to_string()))],
        )
    }
}

impl<T: TypedColumn> ArrayColumn<ArrayColumn<T>> {
    /// Remove one level of nesting
    pub fn flatten(&self) -> ArrayColumn<T> {
        ArrayColumn::from_expr(Expr::call("flatten", vec![self.expr.clone()]))
    }
}

/// Zip into structs with positional fields `item1` .. `itemN`.
///
/// `arrays_zip` names its fields after the inputs, and the engine rejects
/// aliases inside call arguments, so each zipped position is rebuilt with
/// `named_struct` by index. The shorter inputs read as null past their end.
fn arrays_zip(inputs: Vec<Expr>) -> Expr {
    let scope = LambdaScope::new();
    let element = scope.fresh_name();
    let index = scope.fresh_name();
    let mut fields = Vec::with_capacity(inputs.len() * 2);
    for (i, input) in inputs.iter().enumerate() {
        fields.push(Expr::lit(Literal::String(format!("item{}", i + 1))));
        fields.push(Expr::Subscript {
            expr: Box::new(input.clone()),
            index: Box::new(Expr::column(index.as_str())),
        });
    }
    let lambda = Lambda {
        params: vec![element, index],
        body: Expr::call("named_struct", fields),
    };
    template("transform", &[&Expr::call("arrays_zip", inputs)], &[lambda])
}

pub fn zip2<A: TypedColumn + 'static, B: TypedColumn + 'static>(
    a: &ArrayColumn<A>,
    b: &ArrayColumn<B>,
) -> ArrayColumn<StructColumn<Tuple2<A, B>>> {
    ArrayColumn::from_expr(arrays_zip(vec![a.expr.clone(), b.expr.clone()]))
}

pub fn zip3<A, B, C>(
    a: &ArrayColumn<A>,
    b: &ArrayColumn<B>,
    c: &ArrayColumn<C>,
) -> ArrayColumn<StructColumn<Tuple3<A, B, C>>>
where
    A: TypedColumn + 'static,
    B: TypedColumn + 'static,
    C: TypedColumn + 'static,
{
    ArrayColumn::from_expr(arrays_zip(vec![
        a.expr.clone(),
        b.expr.clone(),
        c.expr.clone(),
    ]))
}

pub fn zip4<A, B, C, D>(
    a: &ArrayColumn<A>,
    b: &ArrayColumn<B>,
    c: &ArrayColumn<C>,
    d: &ArrayColumn<D>,
) -> ArrayColumn<StructColumn<Tuple4<A, B, C, D>>>
where
    A: TypedColumn + 'static,
    B: TypedColumn + 'static,
    C: TypedColumn + 'static,
    D: TypedColumn + 'static,
{
    ArrayColumn::from_expr(arrays_zip(vec![
        a.expr.clone(),
        b.expr.clone(),
        c.expr.clone(),
        d.expr.clone(),
    ]))
}

pub fn zip5<A, B, C, D, E>(
    a: &ArrayColumn<A>,
    b: &ArrayColumn<B>,
    c: &ArrayColumn<C>,
    d: &ArrayColumn<D>,
    e: &ArrayColumn<E>,
) -> ArrayColumn<StructColumn<Tuple5<A, B, C, D, E>>>
where
    A: TypedColumn + 'static,
    B: TypedColumn + 'static,
    C: TypedColumn + 'static,
    D: TypedColumn + 'static,
    E: TypedColumn + 'static,
{
    ArrayColumn::from_expr(arrays_zip(vec![
        a.expr.clone(),
        b.expr.clone(),
        c.expr.clone(),
        d.expr.clone(),
        e.expr.clone(),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{ColumnExt, OrderedExt};
    use regex::Regex;

    fn ints(name: &str) -> ArrayColumn<IntegerColumn> {
        ArrayColumn::named(name)
    }

    #[test]
    fn test_descriptor() {
        assert_eq!(
            ArrayColumn::<ArrayColumn<LongColumn>>::data_type().to_string(),
            "array<array<bigint>>"
        );
    }

    #[test]
    fn test_element_access_and_search() {
        let xs = ints("xs");
        assert_eq!(xs.get(0).expr().to_string(), "xs[0]");
        assert_eq!(xs.contains(3).expr().to_string(), "array_contains(xs, 3)");
        assert_eq!(xs.position(3).expr().to_string(), "array_position(xs, 3)");
        assert_eq!(xs.remove(1).expr().to_string(), "array_remove(xs, 1)");
        assert_eq!(xs.slice(2, 3).expr().to_string(), "slice(xs, 2, 3)");
        assert_eq!(
            xs.slice_by(IntegerColumn::named("s"), 2).expr().to_string(),
            "slice(xs, s, 2)"
        );
    }

    #[test]
    fn test_set_operator_mapping() {
        let xs = ints("xs");
        let ys = ints("ys");
        assert_eq!((&xs & &ys).expr().to_string(), "array_union(xs, ys)");
        assert_eq!((&xs | &ys).expr().to_string(), "array_intersect(xs, ys)");
        assert_eq!((&xs - &ys).expr().to_string(), "array_except(xs, ys)");
        assert_eq!((&xs + vec![1, 2]).expr().to_string(), "concat(xs, array(1, 2))");
        assert_eq!(xs.union(&ys), &xs & &ys);
        assert_eq!(xs.intersect(&ys), &xs | &ys);
    }

    #[test]
    fn test_explode_variants() {
        let xs = ints("xs");
        assert_eq!(xs.explode().expr().to_string(), "explode(xs)");
        assert_eq!(xs.explode_outer().expr().to_string(), "explode_outer(xs)");
        let exploded = xs.posexplode();
        assert_eq!(exploded.expr().to_string(), "posexplode(xs) AS (pos, col)");
        assert_eq!(exploded.position().expr().to_string(), "pos");
        assert_eq!(exploded.value().expr().to_string(), "col");
    }

    #[test]
    fn test_filter_template() {
        let xs = ints("xs");
        let filtered = xs.filter(|x| x.gt(2));
        let text = filtered.expr().to_string();
        let pattern = Regex::new(r"^filter\(xs, \((x_[0-9a-f]+)\) -> \((x_[0-9a-f]+) > 2\)\)$").unwrap();
        let captures = pattern.captures(&text).unwrap();
        assert_eq!(&captures[1], &captures[2]);
    }

    #[test]
    fn test_filter_indexed_binds_two_parameters() {
        let xs = ints("xs");
        let text = xs
            .filter_indexed(|x, i| x.gt(&i))
            .expr()
            .to_string();
        let pattern = Regex::new(r"^filter\(xs, \((\w+), (\w+)\) -> \((\w+) > (\w+)\)\)$").unwrap();
        let c = pattern.captures(&text).unwrap();
        assert_eq!(&c[1], &c[3]);
        assert_eq!(&c[2], &c[4]);
        assert_ne!(&c[1], &c[2]);
    }

    #[test]
    fn test_aggregate_with_finish() {
        let xs = ints("xs");
        let total: LongColumn = xs.aggregate_with(
            0i64,
            |acc: LongColumn, x| acc + x.cast::<LongColumn>(),
            |acc| acc * 2i64,
        );
        let text = total.expr().to_string();
        assert!(text.starts_with("aggregate(xs, 0L, ("), "{}", text);
        assert!(text.ends_with(" * 2L))"), "{}", text);
    }

    #[test]
    fn test_sort_and_transform() {
        let xs = ints("xs");
        assert_eq!(xs.sort().expr().to_string(), "array_sort(xs)");
        let sorted = xs.sort_by(|l, r| (r - l).cast::<IntegerColumn>());
        assert!(sorted.expr().to_string().starts_with("array_sort(xs, ("));
        let strings: ArrayColumn<StringColumn> = xs.transform(|x| x.cast::<StringColumn>());
        assert!(strings.expr().to_string().starts_with("transform(xs, ("));
    }

    #[test]
    fn test_constructors() {
        assert_eq!(
            ArrayColumn::<IntegerColumn>::range(0, 3).expr().to_string(),
            "sequence(0, 2)"
        );
        assert_eq!(
            ArrayColumn::<IntegerColumn>::range(3, 3).expr().to_string(),
            "CAST(array() AS array<int>)"
        );
        assert_eq!(
            ArrayColumn::<StringColumn>::repeat("a", 3).expr().to_string(),
            "array_repeat('a', 3)"
        );
        assert_eq!(
            ArrayColumn::<LongColumn>::of([1i64, 2]).expr().to_string(),
            "array(1L, 2L)"
        );
    }

    #[test]
    fn test_flatten_and_zip() {
        let nested = ArrayColumn::<ArrayColumn<IntegerColumn>>::named("nested");
        let flat: ArrayColumn<IntegerColumn> = nested.flatten();
        assert_eq!(flat.expr().to_string(), "flatten(nested)");

        let names = ArrayColumn::<StringColumn>::named("names");
        let zipped = zip2(&ints("ids"), &names);
        let text = zipped.expr().to_string();
        let pattern = Regex::new(
            r"^transform\(arrays_zip\(ids, names\), \((x_[0-9a-f]+), (x_[0-9a-f]+)\) -> named_struct\('item1', ids\[(x_[0-9a-f]+)\], 'item2', names\[(x_[0-9a-f]+)\]\)\)$",
        )
        .unwrap();
        let c = pattern.captures(&text).unwrap();
        assert_eq!(&c[2], &c[3]);
        assert_eq!(&c[2], &c[4]);
        assert_ne!(&c[1], &c[2]);
        assert!(!text.contains(" AS "), "{}", text);
        assert_eq!(
            zipped.get(0).get(|t| t.item2()).expr().to_string(),
            format!("{}[0].item2", text)
        );
        assert_eq!(
            ArrayColumn::<StructColumn<Tuple2<IntegerColumn, StringColumn>>>::data_type().to_string(),
            "array<struct<item1:int,item2:string>>"
        );
    }

    #[test]
    fn test_zip_inside_filter_has_no_argument_aliases() {
        let zipped = zip3(&ints("a"), &ints("b"), &ArrayColumn::<StringColumn>::named("c"));
        let kept = zipped.filter(|t| t.get(|r| r.item1()).is_not_null());
        let text = kept.expr().to_string();
        assert!(text.starts_with("filter(transform(arrays_zip(a, b, c), ("), "{}", text);
        assert!(text.contains("'item3', c["), "{}", text);
        assert!(text.ends_with(".item1 IS NOT NULL))"), "{}", text);
        assert!(!text.contains(" AS "), "{}", text);
    }

    #[test]
    fn test_search_on_empty_and_missing_elements() {
        let empty = ArrayColumn::<IntegerColumn>::of(Vec::<i32>::new());
        assert_eq!(
            empty.contains(1).expr().to_string(),
            "array_contains(CAST(array() AS array<int>), 1)"
        );
        assert_eq!(
            empty.position(1).expr().to_string(),
            "array_position(CAST(array() AS array<int>), 1)"
        );

        let listed = ArrayColumn::<IntegerColumn>::of([4, 5, 6]);
        assert_eq!(
            listed.contains(9).expr().to_string(),
            "array_contains(array(4, 5, 6), 9)"
        );
        assert_eq!(
            listed.position(9).expr().to_string(),
            "array_position(array(4, 5, 6), 9)"
        );
    }

    #[test]
    fn test_literal_arrays_round_trip_softly() {
        let xs = ArrayColumn::<IntegerColumn>::lit(LiteralArray(vec![1, 2, 3]));
        assert_eq!(xs.try_native(), Some(LiteralArray(vec![1, 2, 3])));
        assert_eq!(ints("xs").try_native(), None);
        assert_eq!(xs.equal_to(vec![1, 2, 3]).expr().to_string(), "(array(1, 2, 3) = array(1, 2, 3))");
    }
}
