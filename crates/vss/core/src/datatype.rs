//! Signal datatypes, kinds and numeric values

use crate::error::SignalError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// The closed set of VSS datatypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Datatype {
    Double,
    Float,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Boolean,
    String,
}

/// Value families a datatype belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Integral,
    Floating,
    Boolean,
    Text,
}

impl Datatype {
    pub const ALL: [Datatype; 12] = [
        Datatype::Double,
        Datatype::Float,
        Datatype::Int8,
        Datatype::Int16,
        Datatype::Int32,
        Datatype::Int64,
        Datatype::Uint8,
        Datatype::Uint16,
        Datatype::Uint32,
        Datatype::Uint64,
        Datatype::Boolean,
        Datatype::String,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Datatype::Double => "double",
            Datatype::Float => "float",
            Datatype::Int8 => "int8",
            Datatype::Int16 => "int16",
            Datatype::Int32 => "int32",
            Datatype::Int64 => "int64",
            Datatype::Uint8 => "uint8",
            Datatype::Uint16 => "uint16",
            Datatype::Uint32 => "uint32",
            Datatype::Uint64 => "uint64",
            Datatype::Boolean => "boolean",
            Datatype::String => "string",
        }
    }

    pub fn family(&self) -> Family {
        match self {
            Datatype::Double | Datatype::Float => Family::Floating,
            Datatype::Boolean => Family::Boolean,
            Datatype::String => Family::Text,
            _ => Family::Integral,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.family(), Family::Integral | Family::Floating)
    }

    /// The representable range, or `None` for boolean and string.
    pub fn natural_bounds(&self) -> Option<(Numeric, Numeric)> {
        let int = |low: i128, high: i128| Some((Numeric::Integer(low), Numeric::Integer(high)));
        match self {
            Datatype::Int8 => int(i8::MIN.into(), i8::MAX.into()),
            Datatype::Int16 => int(i16::MIN.into(), i16::MAX.into()),
            Datatype::Int32 => int(i32::MIN.into(), i32::MAX.into()),
            Datatype::Int64 => int(i64::MIN.into(), i64::MAX.into()),
            Datatype::Uint8 => int(0, u8::MAX.into()),
            Datatype::Uint16 => int(0, u16::MAX.into()),
            Datatype::Uint32 => int(0, u32::MAX.into()),
            Datatype::Uint64 => int(0, u64::MAX.into()),
            Datatype::Float => Some((
                Numeric::Float(-f64::from(f32::MAX)),
                Numeric::Float(f64::from(f32::MAX)),
            )),
            Datatype::Double => Some((Numeric::Float(-f64::MAX), Numeric::Float(f64::MAX))),
            Datatype::Boolean | Datatype::String => None,
        }
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Datatype {
    type Err = SignalError;

    /// Case-insensitive: `"UInt8"` is `uint8`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Datatype::ALL
            .into_iter()
            .find(|d| d.as_str() == lower)
            .ok_or_else(|| SignalError::UnknownDatatype(s.to_string()))
    }
}

/// How a signal is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalType {
    Sensor,
    Attribute,
    Actuator,
}

impl SignalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalType::Sensor => "sensor",
            SignalType::Attribute => "attribute",
            SignalType::Actuator => "actuator",
        }
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A numeric value: exact integers (the full `int64` and `uint64` ranges)
/// or a double.
#[derive(Debug, Clone, Copy)]
pub enum Numeric {
    Integer(i128),
    Float(f64),
}

impl Numeric {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Numeric::Integer(i) => i as f64,
            Numeric::Float(f) => f,
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Numeric::Float(f) if f.is_nan())
    }

    /// Convert a JSON number, keeping integers exact.
    pub fn from_json(number: &serde_json::Number) -> Option<Self> {
        if let Some(i) = number.as_i64() {
            Some(Numeric::Integer(i.into()))
        } else if let Some(u) = number.as_u64() {
            Some(Numeric::Integer(u.into()))
        } else {
            number.as_f64().map(Numeric::Float)
        }
    }
}

impl PartialEq for Numeric {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Numeric {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Numeric::Integer(a), Numeric::Integer(b)) => Some(a.cmp(b)),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Integer(i) => write!(f, "{}", i),
            Numeric::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for Numeric {
    fn from(v: i64) -> Self {
        Numeric::Integer(v.into())
    }
}

impl From<u64> for Numeric {
    fn from(v: u64) -> Self {
        Numeric::Integer(v.into())
    }
}

impl From<f64> for Numeric {
    fn from(v: f64) -> Self {
        Numeric::Float(v)
    }
}

impl FromStr for Numeric {
    type Err = std::num::ParseFloatError;

    /// Integers stay exact; anything else is parsed as a double.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<i128>() {
            Ok(i) => Ok(Numeric::Integer(i)),
            Err(_) => s.trim().parse::<f64>().map(Numeric::Float),
        }
    }
}

impl Serialize for Numeric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Numeric::Integer(i) => serializer.serialize_i128(i),
            Numeric::Float(f) => serializer.serialize_f64(f),
        }
    }
}

impl<'de> Deserialize<'de> for Numeric {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let number = serde_json::Number::deserialize(deserializer)?;
        Numeric::from_json(&number)
            .ok_or_else(|| serde::de::Error::custom(format!("unsupported number {}", number)))
    }
}

/// A leaf's `default` value, kept in the kind it was authored in.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Boolean(bool),
    Integer(i128),
    Float(f64),
    Text(String),
}

impl DefaultValue {
    /// Name of the value's kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            DefaultValue::Boolean(_) => "boolean",
            DefaultValue::Integer(_) => "integer",
            DefaultValue::Float(_) => "float",
            DefaultValue::Text(_) => "string",
        }
    }

    pub fn family(&self) -> Family {
        match self {
            DefaultValue::Boolean(_) => Family::Boolean,
            DefaultValue::Integer(_) => Family::Integral,
            DefaultValue::Float(_) => Family::Floating,
            DefaultValue::Text(_) => Family::Text,
        }
    }

    /// The numeric value, for integer and float defaults.
    pub fn as_numeric(&self) -> Option<Numeric> {
        match *self {
            DefaultValue::Integer(i) => Some(Numeric::Integer(i)),
            DefaultValue::Float(f) => Some(Numeric::Float(f)),
            _ => None,
        }
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Boolean(b) => write!(f, "{}", b),
            DefaultValue::Integer(i) => write!(f, "{}", i),
            DefaultValue::Float(v) => write!(f, "{}", v),
            DefaultValue::Text(s) => write!(f, "{:?}", s),
        }
    }
}

impl Serialize for DefaultValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DefaultValue::Boolean(b) => serializer.serialize_bool(*b),
            DefaultValue::Integer(i) => serializer.serialize_i128(*i),
            DefaultValue::Float(f) => serializer.serialize_f64(*f),
            DefaultValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for DefaultValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Bool(b) => Ok(DefaultValue::Boolean(b)),
            Value::String(s) => Ok(DefaultValue::Text(s)),
            Value::Number(n) => match Numeric::from_json(&n) {
                Some(Numeric::Integer(i)) => Ok(DefaultValue::Integer(i)),
                Some(Numeric::Float(f)) => Ok(DefaultValue::Float(f)),
                None => Err(serde::de::Error::custom(format!("unsupported number {}", n))),
            },
            other => Err(serde::de::Error::custom(format!(
                "default must be a boolean, number or string, got {}",
                vss_tree::value_kind(&other)
            ))),
        }
    }
}
