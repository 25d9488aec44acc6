//! Untyped engine expressions
//!
//! This is the only representation the external engine accepts. Typed columns
//! own exactly one [`Expr`] each and build new ones by combining, renaming or
//! wrapping existing expressions; nothing here knows about column capabilities.
//!
//! Rendering (see [`render`]) produces the engine's textual expression language.
//! It is used when a sub-expression has to be spliced into a textual
//! higher-order template and for diagnostics.

pub mod data_type;
pub mod errors;
pub mod literal;
pub mod render;
pub mod type_mapping;

pub use data_type::{DataType, StructField};
pub use errors::TypeMappingError;
pub use literal::{Interval, Literal, LiteralArray, NativeValue};
pub use type_mapping::{data_type_for, data_type_of, HasNativeType, NativeType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Not,
    Negate,
    BitwiseNot,
    IsNull,
    IsNotNull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Equal,
    NotEqual,
    EqualNullSafe,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    And,
    Or,
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    Like,
    RLike,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Equal => "=",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::EqualNullSafe => "<=>",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanOrEqual => ">=",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::BitwiseAnd => "&",
            BinaryOperator::BitwiseOr => "|",
            BinaryOperator::BitwiseXor => "^",
            BinaryOperator::Like => "LIKE",
            BinaryOperator::RLike => "RLIKE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullOrdering {
    NullsFirst,
    NullsLast,
}

impl SortDirection {
    /// Null placement the engine uses when none is requested
    pub fn default_nulls(&self) -> NullOrdering {
        match self {
            SortDirection::Ascending => NullOrdering::NullsFirst,
            SortDirection::Descending => NullOrdering::NullsLast,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Rows,
    Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameBound {
    UnboundedPreceding,
    Preceding(u64),
    CurrentRow,
    Following(u64),
    UnboundedFollowing,
}

impl FrameBound {
    /// Map a signed offset onto a bound: `i64::MIN`/`i64::MAX` are unbounded,
    /// negative values precede and positive values follow the current row.
    pub fn from_offset(offset: i64) -> Self {
        match offset {
            i64::MIN => FrameBound::UnboundedPreceding,
            i64::MAX => FrameBound::UnboundedFollowing,
            0 => FrameBound::CurrentRow,
            n if n < 0 => FrameBound::Preceding(n.unsigned_abs()),
            n => FrameBound::Following(n as u64),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowFrame {
    pub kind: FrameKind,
    pub start: FrameBound,
    pub end: FrameBound,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowDefinition {
    pub partition_by: Vec<Expr>,
    pub order_by: Vec<Expr>,
    pub frame: Option<WindowFrame>,
}

/// Untyped expression tree handed to the engine
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Column reference, optionally qualified by a table alias
    Column {
        qualifier: Option<String>,
        name: String,
    },

    Literal(Literal),

    /// Pre-rendered expression text, parsed by the engine
    Raw(String),

    Alias {
        expr: Box<Expr>,
        name: String,
    },

    /// Multi-column alias for generators such as positional explode
    MultiAlias {
        expr: Box<Expr>,
        names: Vec<String>,
    },

    Unary {
        op: UnaryOperator,
        operand: Box<Expr>,
    },

    Binary {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    Function {
        name: String,
        args: Vec<Expr>,
    },

    Cast {
        expr: Box<Expr>,
        data_type: DataType,
    },

    Case {
        branches: Vec<(Expr, Expr)>,
        otherwise: Option<Box<Expr>>,
    },

    InList {
        expr: Box<Expr>,
        list: Vec<Expr>,
    },

    Between {
        expr: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
    },

    /// Zero-based element access
    Subscript {
        expr: Box<Expr>,
        index: Box<Expr>,
    },

    /// Struct member access
    Field {
        expr: Box<Expr>,
        name: String,
    },

    WithField {
        expr: Box<Expr>,
        name: String,
        value: Box<Expr>,
    },

    DropFields {
        expr: Box<Expr>,
        names: Vec<String>,
    },

    /// Sort key; only meaningful in ordering positions
    Sort {
        expr: Box<Expr>,
        direction: SortDirection,
        nulls: NullOrdering,
    },

    Window {
        expr: Box<Expr>,
        window: WindowDefinition,
    },
}

impl Expr {
    pub fn column(name: impl Into<String>) -> Self {
        Expr::Column {
            qualifier: None,
            name: name.into(),
        }
    }

    pub fn qualified(qualifier: impl Into<String>, name: impl Into<String>) -> Self {
        Expr::Column {
            qualifier: Some(qualifier.into()),
            name: name.into(),
        }
    }

    /// Reference built from expression text: `name` and `alias.name` become
    /// column references, anything else is passed through as raw text.
    pub fn reference(text: &str) -> Self {
        let is_ident = |s: &str| {
            !s.is_empty()
                && s.chars().all(|c| c.is_alphanumeric() || c == '_')
                && !s.starts_with(|c: char| c.is_ascii_digit())
        };
        match text.split_once('.') {
            None if is_ident(text) => Expr::column(text),
            Some((qualifier, name)) if is_ident(qualifier) && is_ident(name) => {
                Expr::qualified(qualifier, name)
            }
            _ => Expr::Raw(text.to_string()),
        }
    }

    pub fn lit(literal: Literal) -> Self {
        Expr::Literal(literal)
    }

    pub fn null() -> Self {
        Expr::Literal(Literal::Null)
    }

    pub fn raw(text: impl Into<String>) -> Self {
        Expr::Raw(text.into())
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Function {
            name: name.into(),
            args,
        }
    }

    pub fn unary(op: UnaryOperator, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOperator, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn cast(self, data_type: DataType) -> Self {
        Expr::Cast {
            expr: Box::new(self),
            data_type,
        }
    }

    /// Rename this expression. Re-aliasing replaces the previous name.
    pub fn alias(self, name: impl Into<String>) -> Self {
        let inner = match self {
            Expr::Alias { expr, .. } => *expr,
            other => other,
        };
        Expr::Alias {
            expr: Box::new(inner),
            name: name.into(),
        }
    }

    pub fn field(self, name: impl Into<String>) -> Self {
        Expr::Field {
            expr: Box::new(self),
            name: name.into(),
        }
    }

    pub fn sort(self, direction: SortDirection, nulls: NullOrdering) -> Self {
        Expr::Sort {
            expr: Box::new(self),
            direction,
            nulls,
        }
    }

    /// Output name the engine would assign, when it is statically known
    pub fn output_name(&self) -> Option<&str> {
        match self {
            Expr::Column { name, .. } => Some(name),
            Expr::Alias { name, .. } => Some(name),
            Expr::Field { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Expr::Literal(literal) => Some(literal),
            Expr::Alias { expr, .. } => expr.as_literal(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_parsing() {
        assert_eq!(Expr::reference("name"), Expr::column("name"));
        assert_eq!(Expr::reference("a.name"), Expr::qualified("a", "name"));
        assert_eq!(
            Expr::reference("a.name + 1"),
            Expr::Raw("a.name + 1".to_string())
        );
        assert_eq!(Expr::reference("1abc"), Expr::Raw("1abc".to_string()));
    }

    #[test]
    fn test_realias_replaces_name() {
        let e = Expr::column("x").alias("y").alias("z");
        assert_eq!(
            e,
            Expr::Alias {
                expr: Box::new(Expr::column("x")),
                name: "z".to_string()
            }
        );
        assert_eq!(e.output_name(), Some("z"));
    }

    #[test]
    fn test_frame_bounds() {
        assert_eq!(FrameBound::from_offset(i64::MIN), FrameBound::UnboundedPreceding);
        assert_eq!(FrameBound::from_offset(-3), FrameBound::Preceding(3));
        assert_eq!(FrameBound::from_offset(0), FrameBound::CurrentRow);
        assert_eq!(FrameBound::from_offset(2), FrameBound::Following(2));
        assert_eq!(FrameBound::from_offset(i64::MAX), FrameBound::UnboundedFollowing);
    }

    #[test]
    fn test_literal_through_alias() {
        let e = Expr::lit(Literal::Integer(3)).alias("three");
        assert_eq!(e.as_literal(), Some(&Literal::Integer(3)));
        assert_eq!(Expr::column("c").as_literal(), None);
    }
}
