//! Macros generating concrete column types and their `std::ops` impls.
//!
//! `std::ops` traits must be implemented per concrete type, so each capability's
//! operator set is stamped out here for the types carrying that capability.
//! Right-hand sides accept anything that is `IntoColumn<Self>`; host literals on
//! the left-hand side get their own impls.

/// Declare a leaf column type backed by a single expression.
macro_rules! leaf_column {
    ($(#[$meta:meta])* $name:ident, $data_type:expr, $native:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            expr: $crate::expr::Expr,
        }

        impl $crate::column::TypedColumn for $name {
            fn data_type() -> $crate::expr::DataType {
                $data_type
            }

            fn from_expr(expr: $crate::expr::Expr) -> Self {
                Self { expr }
            }

            fn expr(&self) -> &$crate::expr::Expr {
                &self.expr
            }

            fn into_expr(self) -> $crate::expr::Expr {
                self.expr
            }
        }

        impl $crate::column::LiteralColumn for $name {
            type Native = $native;
        }

        impl $crate::column::IntoColumn<$name> for $native {
            fn into_column(self) -> $name {
                <$name as $crate::column::LiteralColumn>::lit(self)
            }
        }
    };
}

/// One binary operator for a concrete column type.
///
/// `$build` turns the (left, right) expressions into the result expression.
macro_rules! column_op {
    ($trait:ident :: $method:ident, $build:expr, $column:ty, $native:ty => $out:ty) => {
        impl<R: $crate::column::IntoColumn<$column>> std::ops::$trait<R> for $column {
            type Output = $out;

            fn $method(self, rhs: R) -> $out {
                use $crate::column::TypedColumn;
                <$out>::from_expr(($build)(self.into_expr(), rhs.into_column().into_expr()))
            }
        }

        impl<R: $crate::column::IntoColumn<$column>> std::ops::$trait<R> for &$column {
            type Output = $out;

            fn $method(self, rhs: R) -> $out {
                use $crate::column::TypedColumn;
                <$out>::from_expr(($build)(self.expr().clone(), rhs.into_column().into_expr()))
            }
        }

        impl std::ops::$trait<$column> for $native {
            type Output = $out;

            fn $method(self, rhs: $column) -> $out {
                use $crate::column::{LiteralColumn, TypedColumn};
                <$out>::from_expr(($build)(<$column>::lit(self).into_expr(), rhs.into_expr()))
            }
        }

        impl std::ops::$trait<&$column> for $native {
            type Output = $out;

            fn $method(self, rhs: &$column) -> $out {
                use $crate::column::{LiteralColumn, TypedColumn};
                <$out>::from_expr(($build)(<$column>::lit(self).into_expr(), rhs.expr().clone()))
            }
        }
    };
}

/// `+ - * %` in the column's own type, `/` widened to double, unary `-`.
macro_rules! arithmetic_ops {
    ($($column:ty => $native:ty),* $(,)?) => {
        $(
            $crate::column::ops::column_op!(Add::add, |l, r| $crate::expr::Expr::binary($crate::expr::BinaryOperator::Plus, l, r), $column, $native => $column);
            $crate::column::ops::column_op!(Sub::sub, |l, r| $crate::expr::Expr::binary($crate::expr::BinaryOperator::Minus, l, r), $column, $native => $column);
            $crate::column::ops::column_op!(Mul::mul, |l, r| $crate::expr::Expr::binary($crate::expr::BinaryOperator::Multiply, l, r), $column, $native => $column);
            $crate::column::ops::column_op!(Rem::rem, |l, r| $crate::expr::Expr::binary($crate::expr::BinaryOperator::Modulo, l, r), $column, $native => $column);
            $crate::column::ops::column_op!(Div::div, $crate::column::base::double_division, $column, $native => $crate::column::DoubleColumn);
            $crate::column::ops::negation!($column);
        )*
    };
}

/// Unary `-` for owned and borrowed columns.
macro_rules! negation {
    ($column:ty) => {
        impl std::ops::Neg for $column {
            type Output = $column;

            fn neg(self) -> $column {
                use $crate::column::TypedColumn;
                <$column>::from_expr($crate::expr::Expr::unary(
                    $crate::expr::UnaryOperator::Negate,
                    self.into_expr(),
                ))
            }
        }

        impl std::ops::Neg for &$column {
            type Output = $column;

            fn neg(self) -> $column {
                use $crate::column::TypedColumn;
                <$column>::from_expr($crate::expr::Expr::unary(
                    $crate::expr::UnaryOperator::Negate,
                    self.expr().clone(),
                ))
            }
        }
    };
}

/// `& | ^` and `!` (bitwise not) for integral columns.
macro_rules! bitwise_ops {
    ($($column:ty => $native:ty),* $(,)?) => {
        $(
            $crate::column::ops::column_op!(BitAnd::bitand, |l, r| $crate::expr::Expr::binary($crate::expr::BinaryOperator::BitwiseAnd, l, r), $column, $native => $column);
            $crate::column::ops::column_op!(BitOr::bitor, |l, r| $crate::expr::Expr::binary($crate::expr::BinaryOperator::BitwiseOr, l, r), $column, $native => $column);
            $crate::column::ops::column_op!(BitXor::bitxor, |l, r| $crate::expr::Expr::binary($crate::expr::BinaryOperator::BitwiseXor, l, r), $column, $native => $column);

            impl std::ops::Not for $column {
                type Output = $column;

                fn not(self) -> $column {
                    use $crate::column::TypedColumn;
                    <$column>::from_expr($crate::expr::Expr::unary(
                        $crate::expr::UnaryOperator::BitwiseNot,
                        self.into_expr(),
                    ))
                }
            }

            impl std::ops::Not for &$column {
                type Output = $column;

                fn not(self) -> $column {
                    use $crate::column::TypedColumn;
                    <$column>::from_expr($crate::expr::Expr::unary(
                        $crate::expr::UnaryOperator::BitwiseNot,
                        self.expr().clone(),
                    ))
                }
            }
        )*
    };
}

pub(crate) use arithmetic_ops;
pub(crate) use bitwise_ops;
pub(crate) use column_op;
pub(crate) use leaf_column;
pub(crate) use negation;
