//! Structural type descriptors
//!
//! [`DataType`] mirrors the engine's type system. Every typed column reports exactly
//! one descriptor, and schemas aggregate their per-field descriptors into a
//! [`DataType::Struct`].
//!
//! Two textual forms are supported:
//! - the DDL form used in expressions and casts (`array<int>`, `struct<a:int,b:string>`)
//! - the JSON form the engine uses for schemas (`{"type":"struct","fields":[...]}`)

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};
use std::fmt;

use super::errors::TypeMappingError;
use super::render::quote_identifier;
use super::type_mapping::classify_type_name;

/// Default precision/scale used when a DDL `decimal` carries no arguments
pub const DEFAULT_DECIMAL_PRECISION: u8 = 10;
pub const DEFAULT_DECIMAL_SCALE: u8 = 0;
/// Largest precision the engine accepts for decimals
pub const MAX_DECIMAL_PRECISION: u8 = 38;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    Decimal { precision: u8, scale: u8 },
    String,
    Binary,
    Date,
    Timestamp,
    Interval,
    Array {
        element: Box<DataType>,
        contains_null: bool,
    },
    Map {
        key: Box<DataType>,
        value: Box<DataType>,
        value_contains_null: bool,
    },
    Struct(Vec<StructField>),
}

/// One named member of a struct descriptor. Order is significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructField {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
}

impl StructField {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: true,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}

impl DataType {
    pub fn array(element: DataType) -> Self {
        DataType::Array {
            element: Box::new(element),
            contains_null: true,
        }
    }

    pub fn map(key: DataType, value: DataType) -> Self {
        DataType::Map {
            key: Box::new(key),
            value: Box::new(value),
            value_contains_null: true,
        }
    }

    pub fn structure(fields: Vec<StructField>) -> Self {
        DataType::Struct(fields)
    }

    pub fn decimal(precision: u8, scale: u8) -> Self {
        DataType::Decimal { precision, scale }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            DataType::Byte
                | DataType::Short
                | DataType::Integer
                | DataType::Long
                | DataType::Float
                | DataType::Double
                | DataType::Decimal { .. }
        )
    }

    pub fn is_primitive(&self) -> bool {
        !matches!(
            self,
            DataType::Array { .. } | DataType::Map { .. } | DataType::Struct(_)
        )
    }

    /// Field names of a struct descriptor, in declaration order
    pub fn field_names(&self) -> Vec<&str> {
        match self {
            DataType::Struct(fields) => fields.iter().map(|f| f.name.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    /// Name used by the JSON schema form for primitive types
    fn json_name(&self) -> Option<String> {
        let name = match self {
            DataType::Boolean => "boolean",
            DataType::Byte => "byte",
            DataType::Short => "short",
            DataType::Integer => "integer",
            DataType::Long => "long",
            DataType::Float => "float",
            DataType::Double => "double",
            DataType::Decimal { precision, scale } => {
                return Some(format!("decimal({},{})", precision, scale))
            }
            DataType::String => "string",
            DataType::Binary => "binary",
            DataType::Date => "date",
            DataType::Timestamp => "timestamp",
            DataType::Interval => "interval",
            _ => return None,
        };
        Some(name.to_string())
    }

    /// JSON schema form understood by the engine
    pub fn to_json(&self) -> Value {
        if let Some(name) = self.json_name() {
            return Value::String(name);
        }
        match self {
            DataType::Array {
                element,
                contains_null,
            } => json!({
                "type": "array",
                "elementType": element.to_json(),
                "containsNull": contains_null,
            }),
            DataType::Map {
                key,
                value,
                value_contains_null,
            } => json!({
                "type": "map",
                "keyType": key.to_json(),
                "valueType": value.to_json(),
                "valueContainsNull": value_contains_null,
            }),
            DataType::Struct(fields) => json!({
                "type": "struct",
                "fields": fields
                    .iter()
                    .map(|f| json!({
                        "name": f.name,
                        "type": f.data_type.to_json(),
                        "nullable": f.nullable,
                        "metadata": {},
                    }))
                    .collect::<Vec<_>>(),
            }),
            // primitives handled above
            _ => Value::Null,
        }
    }

    pub fn from_json(value: &Value) -> Result<Self, TypeMappingError> {
        match value {
            Value::String(name) => DataType::parse(name),
            Value::Object(obj) => {
                let kind = obj.get("type").and_then(Value::as_str).unwrap_or_default();
                let child = |key: &str| {
                    obj.get(key)
                        .ok_or_else(|| TypeMappingError::malformed(&value.to_string(), format!("missing `{}`", key)))
                        .and_then(DataType::from_json)
                };
                let flag = |key: &str| obj.get(key).and_then(Value::as_bool).unwrap_or(true);
                match kind {
                    "array" => Ok(DataType::Array {
                        element: Box::new(child("elementType")?),
                        contains_null: flag("containsNull"),
                    }),
                    "map" => Ok(DataType::Map {
                        key: Box::new(child("keyType")?),
                        value: Box::new(child("valueType")?),
                        value_contains_null: flag("valueContainsNull"),
                    }),
                    "struct" => {
                        let fields = obj
                            .get("fields")
                            .and_then(Value::as_array)
                            .ok_or_else(|| TypeMappingError::malformed(&value.to_string(), "missing `fields`"))?;
                        fields
                            .iter()
                            .map(|f| {
                                let name = f.get("name").and_then(Value::as_str).ok_or_else(|| {
                                    TypeMappingError::malformed(&f.to_string(), "struct field without a name")
                                })?;
                                let data_type = f
                                    .get("type")
                                    .ok_or_else(|| TypeMappingError::malformed(&f.to_string(), "struct field without a type"))
                                    .and_then(DataType::from_json)?;
                                Ok(StructField {
                                    name: name.to_string(),
                                    data_type,
                                    nullable: f.get("nullable").and_then(Value::as_bool).unwrap_or(true),
                                })
                            })
                            .collect::<Result<Vec<_>, _>>()
                            .map(DataType::Struct)
                    }
                    other => Err(TypeMappingError::malformed(
                        &value.to_string(),
                        format!("unknown complex type `{}`", other),
                    )),
                }
            }
            other => Err(TypeMappingError::malformed(&other.to_string(), "expected a string or an object")),
        }
    }

    /// Parse the DDL form (`array<map<string,int>>`, `decimal(12,2)`, ...).
    ///
    /// Type names are case-insensitive and accept the usual aliases
    /// (`int`/`integer`, `bigint`/`long`, `bool`/`boolean`, ...).
    pub fn parse(input: &str) -> Result<Self, TypeMappingError> {
        let mut parser = DdlParser { input, pos: 0 };
        let data_type = parser.parse_type()?;
        parser.skip_ws();
        if parser.pos != input.len() {
            return Err(TypeMappingError::malformed(
                input,
                format!("unexpected trailing input at offset {}", parser.pos),
            ));
        }
        Ok(data_type)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Boolean => write!(f, "boolean"),
            DataType::Byte => write!(f, "tinyint"),
            DataType::Short => write!(f, "smallint"),
            DataType::Integer => write!(f, "int"),
            DataType::Long => write!(f, "bigint"),
            DataType::Float => write!(f, "float"),
            DataType::Double => write!(f, "double"),
            DataType::Decimal { precision, scale } => write!(f, "decimal({},{})", precision, scale),
            DataType::String => write!(f, "string"),
            DataType::Binary => write!(f, "binary"),
            DataType::Date => write!(f, "date"),
            DataType::Timestamp => write!(f, "timestamp"),
            DataType::Interval => write!(f, "interval"),
            DataType::Array { element, .. } => write!(f, "array<{}>", element),
            DataType::Map { key, value, .. } => write!(f, "map<{},{}>", key, value),
            DataType::Struct(fields) => {
                write!(f, "struct<")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}:{}", quote_identifier(&field.name, false), field.data_type)?;
                }
                write!(f, ">")
            }
        }
    }
}

impl Serialize for DataType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DataType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        DataType::from_json(&value).map_err(D::Error::custom)
    }
}

struct DdlParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> DdlParser<'a> {
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.input.len() - trimmed.len();
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_ws();
        self.rest().chars().next()
    }

    fn expect(&mut self, expected: char) -> Result<(), TypeMappingError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.pos += c.len_utf8();
                Ok(())
            }
            found => Err(TypeMappingError::malformed(
                self.input,
                format!("expected `{}` at offset {}, found {:?}", expected, self.pos, found),
            )),
        }
    }

    fn ident(&mut self) -> Result<&'a str, TypeMappingError> {
        self.skip_ws();
        let rest = self.rest();
        if let Some(quoted) = rest.strip_prefix('`') {
            let end = quoted
                .find('`')
                .ok_or_else(|| TypeMappingError::malformed(self.input, "unterminated quoted identifier"))?;
            self.pos += end + 2;
            return Ok(&quoted[..end]);
        }
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        if len == 0 {
            return Err(TypeMappingError::malformed(
                self.input,
                format!("expected a name at offset {}", self.pos),
            ));
        }
        self.pos += len;
        Ok(&rest[..len])
    }

    /// Struct field name; back-quoted names may contain doubled backticks
    fn field_name(&mut self) -> Result<String, TypeMappingError> {
        self.skip_ws();
        let Some(quoted) = self.rest().strip_prefix('`') else {
            return self.ident().map(str::to_string);
        };
        let mut name = String::new();
        let mut chars = quoted.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            if c != '`' {
                name.push(c);
            } else if chars.peek().map(|&(_, next)| next) == Some('`') {
                chars.next();
                name.push('`');
            } else {
                self.pos += i + 2;
                return Ok(name);
            }
        }
        Err(TypeMappingError::malformed(self.input, "unterminated quoted identifier"))
    }

    fn number(&mut self) -> Result<u8, TypeMappingError> {
        let digits = self.ident()?;
        digits
            .parse::<u8>()
            .map_err(|_| TypeMappingError::malformed(self.input, format!("`{}` is not a valid precision", digits)))
    }

    fn parse_type(&mut self) -> Result<DataType, TypeMappingError> {
        let name = self.ident()?.to_ascii_lowercase();
        let data_type = match name.as_str() {
            "boolean" | "bool" => DataType::Boolean,
            "byte" | "tinyint" => DataType::Byte,
            "short" | "smallint" => DataType::Short,
            "int" | "integer" => DataType::Integer,
            "long" | "bigint" => DataType::Long,
            "float" | "real" => DataType::Float,
            "double" => DataType::Double,
            "string" | "text" | "varchar" => DataType::String,
            "binary" | "bytes" => DataType::Binary,
            "date" => DataType::Date,
            "timestamp" | "datetime" => DataType::Timestamp,
            "interval" | "calendarinterval" => DataType::Interval,
            "decimal" | "numeric" => {
                if self.peek() == Some('(') {
                    self.expect('(')?;
                    let precision = self.number()?;
                    let scale = if self.peek() == Some(',') {
                        self.expect(',')?;
                        self.number()?
                    } else {
                        0
                    };
                    self.expect(')')?;
                    if precision == 0 || precision > MAX_DECIMAL_PRECISION || scale > precision {
                        return Err(TypeMappingError::malformed(
                            self.input,
                            format!("invalid decimal precision/scale ({},{})", precision, scale),
                        ));
                    }
                    DataType::decimal(precision, scale)
                } else {
                    DataType::decimal(DEFAULT_DECIMAL_PRECISION, DEFAULT_DECIMAL_SCALE)
                }
            }
            "array" => {
                self.expect('<')?;
                let element = self.parse_type()?;
                self.expect('>')?;
                DataType::array(element)
            }
            "map" => {
                self.expect('<')?;
                let key = self.parse_type()?;
                self.expect(',')?;
                let value = self.parse_type()?;
                self.expect('>')?;
                DataType::map(key, value)
            }
            "struct" => {
                self.expect('<')?;
                let mut fields = Vec::new();
                if self.peek() != Some('>') {
                    loop {
                        let field_name = self.field_name()?;
                        self.expect(':')?;
                        let field_type = self.parse_type()?;
                        fields.push(StructField::new(field_name, field_type));
                        if self.peek() == Some(',') {
                            self.expect(',')?;
                        } else {
                            break;
                        }
                    }
                }
                self.expect('>')?;
                DataType::Struct(fields)
            }
            other => return Err(classify_type_name(other)),
        };
        Ok(data_type)
    }
}
