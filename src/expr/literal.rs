use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar interval as the engine represents it: months, days and microseconds
/// are kept apart because their lengths are not fixed relative to each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub months: i32,
    pub days: i32,
    pub microseconds: i64,
}

impl Interval {
    pub fn new(months: i32, days: i32, microseconds: i64) -> Self {
        Self {
            months,
            days,
            microseconds,
        }
    }

    pub fn months(months: i32) -> Self {
        Self::new(months, 0, 0)
    }

    pub fn days(days: i32) -> Self {
        Self::new(0, days, 0)
    }

    pub fn microseconds(microseconds: i64) -> Self {
        Self::new(0, 0, microseconds)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "INTERVAL {} MONTHS {} DAYS {} MICROSECONDS",
            self.months, self.days, self.microseconds
        )
    }
}

/// A literal value embedded in an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Decimal(BigDecimal),
    String(String),
    Binary(Vec<u8>),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    Interval(Interval),
    Array(Vec<Literal>),
}

fn write_floating(
    f: &mut fmt::Formatter<'_>,
    value: f64,
    repr: String,
    suffix: &str,
    ddl: &str,
) -> fmt::Result {
    if value.is_nan() {
        write!(f, "CAST('NaN' AS {})", ddl)
    } else if value.is_infinite() {
        let sign = if value > 0.0 { "" } else { "-" };
        write!(f, "CAST('{}Infinity' AS {})", sign, ddl)
    } else {
        write!(f, "{}{}", repr, suffix)
    }
}

/// Quote a string literal using backslash escapes
pub fn quote_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            other => quoted.push(other),
        }
    }
    quoted.push('\'');
    quoted
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => write!(f, "NULL"),
            Literal::Boolean(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Literal::Byte(v) => write!(f, "{}Y", v),
            Literal::Short(v) => write!(f, "{}S", v),
            Literal::Integer(v) => write!(f, "{}", v),
            Literal::Long(v) => write!(f, "{}L", v),
            Literal::Float(v) => write_floating(f, f64::from(*v), format!("{:?}", v), "F", "FLOAT"),
            Literal::Double(v) => write_floating(f, *v, format!("{:?}", v), "D", "DOUBLE"),
            Literal::Decimal(v) => write!(f, "{}BD", v),
            Literal::String(s) => write!(f, "{}", quote_string(s)),
            Literal::Binary(bytes) => write!(f, "X'{}'", hex::encode_upper(bytes)),
            Literal::Date(d) => write!(f, "DATE '{}'", d.format("%Y-%m-%d")),
            Literal::Timestamp(ts) => write!(f, "TIMESTAMP '{}'", ts.format("%Y-%m-%d %H:%M:%S%.f")),
            Literal::Interval(i) => write!(f, "{}", i),
            Literal::Array(items) => {
                write!(f, "array(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Host values that can be embedded as literals, and recovered from them.
///
/// `from_literal` is the soft half of the conversion: it returns `None` when the
/// literal has a different shape instead of failing.
pub trait NativeValue: Clone {
    fn into_literal(self) -> Literal;
    fn from_literal(literal: &Literal) -> Option<Self>;
}

macro_rules! impl_native_value {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl NativeValue for $t {
                fn into_literal(self) -> Literal {
                    Literal::$variant(self)
                }

                fn from_literal(literal: &Literal) -> Option<Self> {
                    match literal {
                        Literal::$variant(v) => Some(v.clone()),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_native_value!(
    bool => Boolean,
    i8 => Byte,
    i16 => Short,
    i32 => Integer,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    BigDecimal => Decimal,
    String => String,
    Vec<u8> => Binary,
    NaiveDate => Date,
    NaiveDateTime => Timestamp,
    Interval => Interval,
);

impl NativeValue for DateTime<Utc> {
    fn into_literal(self) -> Literal {
        Literal::Timestamp(self.naive_utc())
    }

    fn from_literal(literal: &Literal) -> Option<Self> {
        match literal {
            Literal::Timestamp(ts) => Some(ts.and_utc()),
            _ => None,
        }
    }
}

/// Arrays of literal values. Stored as `Literal::Array`.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralArray<T>(pub Vec<T>);

impl<T: NativeValue> NativeValue for LiteralArray<T> {
    fn into_literal(self) -> Literal {
        Literal::Array(self.0.into_iter().map(NativeValue::into_literal).collect())
    }

    fn from_literal(literal: &Literal) -> Option<Self> {
        match literal {
            Literal::Array(items) => items
                .iter()
                .map(T::from_literal)
                .collect::<Option<Vec<_>>>()
                .map(LiteralArray),
            _ => None,
        }
    }
}
