//! Positional records with 2 to 5 typed slots named `item1` .. `item5`.
//!
//! Use them as `StructColumn<Tuple2<A, B>>`; they are what array zipping
//! produces.

use super::TypedColumn;
use crate::expr::Expr;
use crate::schema::{FieldBinder, MemberDescriptor, Record, RecordDescriptor};

macro_rules! tuple_record {
    ($name:ident { $($item:ident : $param:ident),+ }) => {
        #[derive(Debug, Clone)]
        pub struct $name<$($param),+> {
            $($item: $param,)+
        }

        impl<$($param: TypedColumn),+> $name<$($param),+> {
            $(
                pub fn $item(&self) -> &$param {
                    &self.$item
                }
            )+
        }

        impl<$($param: TypedColumn + 'static),+> Record for $name<$($param),+> {
            fn describe() -> RecordDescriptor {
                RecordDescriptor::new(stringify!($name))
                    $(.member(MemberDescriptor::column(
                        stringify!($item),
                        stringify!($item),
                        $param::data_type(),
                    )))+
            }

            fn bind(binder: &mut FieldBinder) -> Self {
                Self {
                    $($item: binder.bind(stringify!($item)),)+
                }
            }

            fn to_exprs(&self) -> Vec<Expr> {
                vec![$(self.$item.expr().clone()),+]
            }
        }
    };
}

tuple_record!(Tuple2 { item1: A, item2: B });
tuple_record!(Tuple3 { item1: A, item2: B, item3: C });
tuple_record!(Tuple4 { item1: A, item2: B, item3: C, item4: D });
tuple_record!(Tuple5 { item1: A, item2: B, item3: C, item4: D, item5: E });
