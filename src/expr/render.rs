//! Textual rendering of engine expressions

use std::fmt;

use super::{Expr, FrameBound, FrameKind, NullOrdering, SortDirection, UnaryOperator, WindowDefinition};
use crate::config::ExprConfig;

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Back-quote an identifier when it is not a plain identifier, or always when
/// `force` is set.
pub fn quote_identifier(name: &str, force: bool) -> String {
    if !force && is_plain_identifier(name) {
        name.to_string()
    } else {
        format!("`{}`", name.replace('`', "``"))
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "ASC"),
            SortDirection::Descending => write!(f, "DESC"),
        }
    }
}

impl fmt::Display for NullOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NullOrdering::NullsFirst => write!(f, "NULLS FIRST"),
            NullOrdering::NullsLast => write!(f, "NULLS LAST"),
        }
    }
}

impl fmt::Display for FrameBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameBound::UnboundedPreceding => write!(f, "UNBOUNDED PRECEDING"),
            FrameBound::Preceding(n) => write!(f, "{} PRECEDING", n),
            FrameBound::CurrentRow => write!(f, "CURRENT ROW"),
            FrameBound::Following(n) => write!(f, "{} FOLLOWING", n),
            FrameBound::UnboundedFollowing => write!(f, "UNBOUNDED FOLLOWING"),
        }
    }
}

impl fmt::Display for WindowDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sections: Vec<String> = Vec::new();
        if !self.partition_by.is_empty() {
            let keys: Vec<String> = self.partition_by.iter().map(|e| e.to_string()).collect();
            sections.push(format!("PARTITION BY {}", keys.join(", ")));
        }
        if !self.order_by.is_empty() {
            let keys: Vec<String> = self.order_by.iter().map(|e| e.to_string()).collect();
            sections.push(format!("ORDER BY {}", keys.join(", ")));
        }
        if let Some(frame) = &self.frame {
            let kind = match frame.kind {
                FrameKind::Rows => "ROWS",
                FrameKind::Range => "RANGE",
            };
            sections.push(format!("{} BETWEEN {} AND {}", kind, frame.start, frame.end));
        }
        write!(f, "{}", sections.join(" "))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Column { qualifier, name } => {
                let force = ExprConfig::global().quote_identifiers;
                if let Some(q) = qualifier {
                    write!(f, "{}.", quote_identifier(q, force))?;
                }
                write!(f, "{}", quote_identifier(name, force))
            }
            Expr::Literal(literal) => write!(f, "{}", literal),
            Expr::Raw(text) => write!(f, "{}", text),
            Expr::Alias { expr, name } => {
                write!(f, "{} AS {}", expr, quote_identifier(name, false))
            }
            Expr::MultiAlias { expr, names } => {
                let names: Vec<String> = names.iter().map(|n| quote_identifier(n, false)).collect();
                write!(f, "{} AS ({})", expr, names.join(", "))
            }
            Expr::Unary { op, operand } => match op {
                UnaryOperator::Not => write!(f, "(NOT {})", operand),
                UnaryOperator::Negate => write!(f, "(- {})", operand),
                UnaryOperator::BitwiseNot => write!(f, "~{}", operand),
                UnaryOperator::IsNull => write!(f, "({} IS NULL)", operand),
                UnaryOperator::IsNotNull => write!(f, "({} IS NOT NULL)", operand),
            },
            Expr::Binary { op, left, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
            Expr::Function { name, args } => {
                write!(f, "{}(", name)?;
                write_list(f, args)?;
                write!(f, ")")
            }
            Expr::Cast { expr, data_type } => write!(f, "CAST({} AS {})", expr, data_type),
            Expr::Case {
                branches,
                otherwise,
            } => {
                write!(f, "CASE")?;
                for (condition, value) in branches {
                    write!(f, " WHEN {} THEN {}", condition, value)?;
                }
                if let Some(otherwise) = otherwise {
                    write!(f, " ELSE {}", otherwise)?;
                }
                write!(f, " END")
            }
            Expr::InList { expr, list } => {
                write!(f, "({} IN (", expr)?;
                write_list(f, list)?;
                write!(f, "))")
            }
            Expr::Between { expr, low, high } => {
                write!(f, "({} BETWEEN {} AND {})", expr, low, high)
            }
            Expr::Subscript { expr, index } => write!(f, "{}[{}]", expr, index),
            Expr::Field { expr, name } => {
                write!(f, "{}.{}", expr, quote_identifier(name, false))
            }
            Expr::WithField { expr, name, value } => {
                write!(f, "withField({}, {}, {})", expr, super::literal::quote_string(name), value)
            }
            Expr::DropFields { expr, names } => {
                write!(f, "dropFields({}", expr)?;
                for name in names {
                    write!(f, ", {}", super::literal::quote_string(name))?;
                }
                write!(f, ")")
            }
            Expr::Sort {
                expr,
                direction,
                nulls,
            } => write!(f, "{} {} {}", expr, direction, nulls),
            Expr::Window { expr, window } => write!(f, "{} OVER ({})", expr, window),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{BinaryOperator, DataType, Literal, WindowFrame};

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("plain_name", false), "plain_name");
        assert_eq!(quote_identifier("with space", false), "`with space`");
        assert_eq!(quote_identifier("odd`name", false), "`odd``name`");
        assert_eq!(quote_identifier("plain", true), "`plain`");
    }

    #[test]
    fn test_render_operators() {
        let e = Expr::binary(
            BinaryOperator::And,
            Expr::binary(
                BinaryOperator::GreaterThan,
                Expr::qualified("a", "age"),
                Expr::lit(Literal::Integer(18)),
            ),
            Expr::unary(UnaryOperator::IsNotNull, Expr::column("name")),
        );
        assert_eq!(e.to_string(), "((a.age > 18) AND (name IS NOT NULL))");
    }

    #[test]
    fn test_render_case_cast_and_window() {
        let case = Expr::Case {
            branches: vec![(Expr::column("flag"), Expr::lit(Literal::Integer(1)))],
            otherwise: Some(Box::new(Expr::lit(Literal::Integer(0)))),
        };
        assert_eq!(case.to_string(), "CASE WHEN flag THEN 1 ELSE 0 END");

        let cast = Expr::column("n").cast(DataType::array(DataType::Long));
        assert_eq!(cast.to_string(), "CAST(n AS array<bigint>)");

        let windowed = Expr::Window {
            expr: Box::new(Expr::call("sum", vec![Expr::column("v")])),
            window: WindowDefinition {
                partition_by: vec![Expr::column("k")],
                order_by: vec![Expr::column("t").sort(SortDirection::Descending, NullOrdering::NullsLast)],
                frame: Some(WindowFrame {
                    kind: FrameKind::Rows,
                    start: FrameBound::UnboundedPreceding,
                    end: FrameBound::CurrentRow,
                }),
            },
        };
        assert_eq!(
            windowed.to_string(),
            "sum(v) OVER (PARTITION BY k ORDER BY t DESC NULLS LAST ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW)"
        );
    }

    #[test]
    fn test_render_struct_edits() {
        let e = Expr::WithField {
            expr: Box::new(Expr::column("s")),
            name: "d".to_string(),
            value: Box::new(Expr::column("d")),
        };
        let e = Expr::DropFields {
            expr: Box::new(e),
            names: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(e.to_string(), "dropFields(withField(s, 'd', d), 'a', 'b')");
    }
}
