//! Host data shape → engine type descriptor mapping
//!
//! Only the descriptor is mapped here; values never cross the boundary through
//! this module. Shapes without an engine primitive fail with one of two distinct
//! errors:
//!
//! | Shape                      | Result                                   |
//! |----------------------------|------------------------------------------|
//! | `u32`, `u64`, `usize`      | [`TypeMappingError::Unsupported`]        |
//! | `char`, time-of-day, UUID  | [`TypeMappingError::InteropUnsupported`] |
//! | everything else listed     | a [`DataType`]                           |

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::collections::{BTreeMap, HashMap};

use super::data_type::{DataType, StructField, MAX_DECIMAL_PRECISION};
use super::errors::TypeMappingError;
use super::literal::Interval;

/// Precision/scale used for host decimals, which carry no static precision
pub const HOST_DECIMAL_PRECISION: u8 = MAX_DECIMAL_PRECISION;
pub const HOST_DECIMAL_SCALE: u8 = 18;

/// A host data shape, described structurally.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeType {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Decimal,
    String,
    Char,
    Bytes,
    Date,
    DateTime,
    Time,
    Uuid,
    Interval,
    Optional(Box<NativeType>),
    Sequence(Box<NativeType>),
    Dictionary(Box<NativeType>, Box<NativeType>),
    Record(Vec<(String, NativeType)>),
}

impl NativeType {
    fn name(&self) -> String {
        match self {
            NativeType::Bool => "bool".into(),
            NativeType::I8 => "i8".into(),
            NativeType::I16 => "i16".into(),
            NativeType::I32 => "i32".into(),
            NativeType::I64 => "i64".into(),
            NativeType::U8 => "u8".into(),
            NativeType::U16 => "u16".into(),
            NativeType::U32 => "u32".into(),
            NativeType::U64 => "u64".into(),
            NativeType::F32 => "f32".into(),
            NativeType::F64 => "f64".into(),
            NativeType::Decimal => "decimal".into(),
            NativeType::String => "string".into(),
            NativeType::Char => "char".into(),
            NativeType::Bytes => "bytes".into(),
            NativeType::Date => "date".into(),
            NativeType::DateTime => "datetime".into(),
            NativeType::Time => "time".into(),
            NativeType::Uuid => "uuid".into(),
            NativeType::Interval => "interval".into(),
            NativeType::Optional(inner) => format!("Option<{}>", inner.name()),
            NativeType::Sequence(inner) => format!("Vec<{}>", inner.name()),
            NativeType::Dictionary(k, v) => format!("Map<{}, {}>", k.name(), v.name()),
            NativeType::Record(_) => "record".into(),
        }
    }
}

/// Host types that know their own structural shape.
pub trait HasNativeType {
    fn native_type() -> NativeType;
}

macro_rules! impl_has_native_type {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl HasNativeType for $t {
                fn native_type() -> NativeType {
                    NativeType::$variant
                }
            }
        )*
    };
}

impl_has_native_type!(
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => U64,
    f32 => F32,
    f64 => F64,
    BigDecimal => Decimal,
    String => String,
    char => Char,
    NaiveDate => Date,
    NaiveDateTime => DateTime,
    DateTime<Utc> => DateTime,
    NaiveTime => Time,
    uuid::Uuid => Uuid,
    Interval => Interval,
);

impl HasNativeType for &str {
    fn native_type() -> NativeType {
        NativeType::String
    }
}

impl<T: HasNativeType> HasNativeType for Option<T> {
    fn native_type() -> NativeType {
        NativeType::Optional(Box::new(T::native_type()))
    }
}

impl<T: HasNativeType> HasNativeType for Vec<T> {
    fn native_type() -> NativeType {
        // Vec<u8> is a byte string, not an array of small integers
        match T::native_type() {
            NativeType::U8 => NativeType::Bytes,
            element => NativeType::Sequence(Box::new(element)),
        }
    }
}

impl<K: HasNativeType, V: HasNativeType> HasNativeType for HashMap<K, V> {
    fn native_type() -> NativeType {
        NativeType::Dictionary(Box::new(K::native_type()), Box::new(V::native_type()))
    }
}

impl<K: HasNativeType, V: HasNativeType> HasNativeType for BTreeMap<K, V> {
    fn native_type() -> NativeType {
        NativeType::Dictionary(Box::new(K::native_type()), Box::new(V::native_type()))
    }
}

/// Map a host shape onto its engine descriptor.
pub fn data_type_for(native: &NativeType) -> Result<DataType, TypeMappingError> {
    let data_type = match native {
        NativeType::Bool => DataType::Boolean,
        NativeType::I8 => DataType::Byte,
        NativeType::I16 | NativeType::U8 => DataType::Short,
        NativeType::I32 | NativeType::U16 => DataType::Integer,
        NativeType::I64 => DataType::Long,
        NativeType::F32 => DataType::Float,
        NativeType::F64 => DataType::Double,
        NativeType::Decimal => DataType::decimal(HOST_DECIMAL_PRECISION, HOST_DECIMAL_SCALE),
        NativeType::String => DataType::String,
        NativeType::Bytes => DataType::Binary,
        NativeType::Date => DataType::Date,
        NativeType::DateTime => DataType::Timestamp,
        NativeType::Interval => DataType::Interval,
        NativeType::U32 | NativeType::U64 => {
            return Err(TypeMappingError::unsupported(native.name()))
        }
        NativeType::Char | NativeType::Time | NativeType::Uuid => {
            return Err(TypeMappingError::interop_unsupported(native.name()))
        }
        // Option only affects nullability, which the enclosing container records
        NativeType::Optional(inner) => data_type_for(inner)?,
        NativeType::Sequence(element) => DataType::Array {
            contains_null: matches!(element.as_ref(), NativeType::Optional(_)),
            element: Box::new(data_type_for(element)?),
        },
        NativeType::Dictionary(key, value) => {
            if matches!(key.as_ref(), NativeType::Optional(_)) {
                return Err(TypeMappingError::unsupported(native.name()));
            }
            DataType::Map {
                key: Box::new(data_type_for(key)?),
                value_contains_null: matches!(value.as_ref(), NativeType::Optional(_)),
                value: Box::new(data_type_for(value)?),
            }
        }
        NativeType::Record(members) => DataType::Struct(
            members
                .iter()
                .map(|(name, member)| {
                    Ok(StructField {
                        name: name.clone(),
                        data_type: data_type_for(member)?,
                        nullable: matches!(member, NativeType::Optional(_)),
                    })
                })
                .collect::<Result<Vec<_>, TypeMappingError>>()?,
        ),
    };
    Ok(data_type)
}

/// Descriptor for a statically known host type, e.g. `data_type_of::<Vec<Option<i64>>>()`
pub fn data_type_of<T: HasNativeType>() -> Result<DataType, TypeMappingError> {
    data_type_for(&T::native_type())
}

/// Error for a DDL type name the parser does not recognise.
///
/// Known host-only names get the specific unsupported variant so callers can tell
/// "never representable" apart from "representable, but not across interop".
pub(crate) fn classify_type_name(name: &str) -> TypeMappingError {
    match name {
        "uint" | "uint32" | "u32" | "uint64" | "u64" | "ulong" | "usize" => {
            TypeMappingError::unsupported(name)
        }
        "char" | "time" | "uuid" | "guid" => TypeMappingError::interop_unsupported(name),
        other => TypeMappingError::malformed(other, "unknown type name"),
    }
}
