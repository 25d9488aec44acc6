//! Map columns keyed by an ordered column type.

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

use log::warn;

use super::lambda::{template, LambdaScope};
use super::{
    ArrayColumn, BooleanColumn, IntegerColumn, IntoColumn, LiteralColumn, MapEntry, StructColumn,
    TypedColumn,
};
use crate::capability::Ordered;
use crate::expr::{DataType, Expr};

pub struct MapColumn<K, V> {
    expr: Expr,
    _entry: PhantomData<(K, V)>,
}

impl<K, V> Clone for MapColumn<K, V> {
    fn clone(&self) -> Self {
        Self {
            expr: self.expr.clone(),
            _entry: PhantomData,
        }
    }
}

impl<K, V> PartialEq for MapColumn<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.expr == other.expr
    }
}

impl<K, V> fmt::Debug for MapColumn<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapColumn")
            .field("key", &type_name::<K>())
            .field("value", &type_name::<V>())
            .field("expr", &self.expr)
            .finish()
    }
}

impl<K: Ordered, V: TypedColumn> TypedColumn for MapColumn<K, V> {
    fn data_type() -> DataType {
        DataType::map(K::data_type(), V::data_type())
    }

    fn from_expr(expr: Expr) -> Self {
        Self {
            expr,
            _entry: PhantomData,
        }
    }

    fn expr(&self) -> &Expr {
        &self.expr
    }

    fn into_expr(self) -> Expr {
        self.expr
    }
}

impl<K: Ordered, V: TypedColumn, R: IntoColumn<MapColumn<K, V>>> std::ops::BitAnd<R>
    for MapColumn<K, V>
{
    type Output = MapColumn<K, V>;

    fn bitand(self, rhs: R) -> MapColumn<K, V> {
        MapColumn::from_expr(Expr::call(
            "map_concat",
            vec![self.expr, rhs.into_column().into_expr()],
        ))
    }
}

impl<K: Ordered, V: TypedColumn, R: IntoColumn<MapColumn<K, V>>> std::ops::BitAnd<R>
    for &MapColumn<K, V>
{
    type Output = MapColumn<K, V>;

    fn bitand(self, rhs: R) -> MapColumn<K, V> {
        MapColumn::from_expr(Expr::call(
            "map_concat",
            vec![self.expr.clone(), rhs.into_column().into_expr()],
        ))
    }
}

impl<K: Ordered, V: TypedColumn> MapColumn<K, V> {
    fn call<O: TypedColumn>(&self, function: &str) -> O {
        O::from_expr(Expr::call(function, vec![self.expr.clone()]))
    }

    /// Map pairing `keys[i]` with `values[i]`
    pub fn from_arrays(keys: &ArrayColumn<K>, values: &ArrayColumn<V>) -> Self {
        Self::from_expr(Expr::call(
            "map_from_arrays",
            vec![keys.expr().clone(), values.expr().clone()],
        ))
    }

    pub fn from_pairs<I, KC, VC>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (KC, VC)>,
        KC: IntoColumn<K>,
        VC: IntoColumn<V>,
    {
        let args: Vec<Expr> = pairs
            .into_iter()
            .flat_map(|(k, v)| [k.into_column().into_expr(), v.into_column().into_expr()])
            .collect();
        if args.is_empty() {
            return Self::from_expr(Expr::call("map", Vec::new()).cast(Self::data_type()));
        }
        Self::from_expr(Expr::call("map", args))
    }

    /// Merge several maps; later maps win on duplicate keys per engine policy
    pub fn concat<'a, I>(maps: I) -> Self
    where
        I: IntoIterator<Item = &'a MapColumn<K, V>>,
        K: 'a,
        V: 'a,
    {
        let args = maps.into_iter().map(|m| m.expr.clone()).collect();
        Self::from_expr(Expr::call("map_concat", args))
    }

    pub fn size(&self) -> IntegerColumn {
        self.call("size")
    }

    pub fn keys(&self) -> ArrayColumn<K> {
        self.call("map_keys")
    }

    pub fn values(&self) -> ArrayColumn<V> {
        self.call("map_values")
    }

    pub fn entries(&self) -> ArrayColumn<StructColumn<MapEntry<K, V>>>
    where
        K: 'static,
        V: 'static,
    {
        self.call("map_entries")
    }

    pub fn union(&self, other: impl IntoColumn<MapColumn<K, V>>) -> Self {
        self & other
    }

    /// Value for a key expression, without literal coercion
    pub fn get_by(&self, key: impl IntoColumn<K>) -> V {
        V::from_expr(Expr::call(
            "element_at",
            vec![self.expr.clone(), key.into_column().into_expr()],
        ))
    }

    /// Keep entries for which `predicate(key, value)` holds
    pub fn filter(&self, predicate: impl FnOnce(K, V) -> BooleanColumn) -> Self {
        let lambda = LambdaScope::new().lambda2(predicate);
        Self::from_expr(template("map_filter", &[&self.expr], &[lambda]))
    }
}

impl<K: Ordered + LiteralColumn, V: TypedColumn> MapColumn<K, V> {
    /// Value stored under `key`.
    ///
    /// The key is looked up by its literal value. A key that is not
    /// literal-backed cannot be coerced; the lookup then uses a NULL key and
    /// evaluates to null. Use [`MapColumn::get_by`] for computed keys.
    pub fn get(&self, key: impl IntoColumn<K>) -> V {
        let key = key.into_column();
        let index = match key.try_native() {
            Some(native) => K::lit(native).into_expr(),
            None => {
                warn!(
                    "map key `{}` is not a literal; lookup on {} yields null",
                    key.expr(),
                    self.expr
                );
                Expr::null()
            }
        };
        V::from_expr(Expr::Subscript {
            expr: Box::new(self.expr.clone()),
            index: Box::new(index),
        })
    }
}
