//! Signal entity
//!
//! A [`Signal`] is built from a leaf's raw fields in a fixed order, failing on
//! the first bad field:
//!
//! 1. datatype is one of the known names (case-insensitive)
//! 2. `enum` only appears on `string` signals
//! 3. numeric bounds are the datatype's natural range narrowed by `min`/`max`
//! 4. `default` has the datatype's kind and lies within the bounds
//! 5. `unit` parses, and is dimensionless for `string` and `boolean`
//! 6. the namespace is non-empty with no empty segment

use crate::datatype::{Datatype, DefaultValue, Family, Numeric, SignalType};
use crate::error::{SignalError, SignalResult};
use crate::namespace::Namespace;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;
use vss_units::{Unit, UnitParser};

/// Unit assumed when a leaf has none.
pub const DIMENSIONLESS: &str = "dimensionless";

/// Leaf fields exactly as authored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSignal {
    pub datatype: String,
    pub description: String,
    #[serde(rename = "type")]
    pub signal_type: SignalType,
    pub uuid: String,
    #[serde(default)]
    pub default: Option<DefaultValue>,
    #[serde(default, rename = "enum")]
    pub enum_values: Option<Vec<String>>,
    #[serde(default)]
    pub min: Option<Numeric>,
    #[serde(default)]
    pub max: Option<Numeric>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl RawSignal {
    /// Decode a leaf's fields. `instances` belongs to the tree, not the
    /// signal, and is dropped first.
    pub fn from_fields(fields: &Map<String, Value>) -> SignalResult<Self> {
        let fields: Map<String, Value> = fields
            .iter()
            .filter(|(key, _)| key.as_str() != "instances")
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        serde_json::from_value(Value::Object(fields)).map_err(|e| SignalError::Decode(e.to_string()))
    }
}

/// A resolved, validated signal. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signal {
    namespace: Namespace,
    datatype: Datatype,
    #[serde(rename = "type")]
    signal_type: SignalType,
    description: String,
    uuid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    default: Option<DefaultValue>,
    #[serde(rename = "enum")]
    enum_values: Option<BTreeSet<String>>,
    min: Option<Numeric>,
    max: Option<Numeric>,
    unit: String,
    canonical_unit: Unit,
}

impl Signal {
    /// Validate `raw` and build the signal named by `namespace`.
    pub fn new(namespace: Vec<String>, raw: RawSignal, units: &dyn UnitParser) -> SignalResult<Self> {
        let datatype: Datatype = raw.datatype.parse()?;

        let enum_values = match raw.enum_values {
            Some(_) if datatype != Datatype::String => {
                return Err(SignalError::EnumOnNonString(datatype))
            }
            Some(values) => Some(values.into_iter().collect::<BTreeSet<_>>()),
            None => None,
        };

        let bounds = derive_bounds(datatype, raw.min, raw.max)?;

        if let Some(default) = &raw.default {
            check_default(datatype, bounds, default)?;
        }

        let unit = raw.unit.unwrap_or_else(|| DIMENSIONLESS.to_string());
        let canonical_unit = units
            .parse_unit(&unit)
            .map_err(|source| SignalError::IllegalUnit {
                unit: unit.clone(),
                source,
            })?;
        if !datatype.is_numeric() && !canonical_unit.is_dimensionless() {
            return Err(SignalError::IncompatibleUnit { datatype, unit });
        }

        let namespace = Namespace::try_from(namespace)?;

        Ok(Self {
            namespace,
            datatype,
            signal_type: raw.signal_type,
            description: raw.description,
            uuid: raw.uuid,
            comment: raw.comment,
            default: raw.default,
            enum_values,
            min: bounds.map(|(min, _)| min),
            max: bounds.map(|(_, max)| max),
            unit,
            canonical_unit,
        })
    }

    /// Decode and validate a leaf's raw JSON fields.
    pub fn from_fields(
        namespace: Vec<String>,
        fields: &Map<String, Value>,
        units: &dyn UnitParser,
    ) -> SignalResult<Self> {
        Self::new(namespace, RawSignal::from_fields(fields)?, units)
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// The last namespace segment.
    pub fn name(&self) -> &str {
        self.namespace
            .segments()
            .last()
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn datatype(&self) -> Datatype {
        self.datatype
    }

    pub fn signal_type(&self) -> SignalType {
        self.signal_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn default_value(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    pub fn enum_values(&self) -> Option<&BTreeSet<String>> {
        self.enum_values.as_ref()
    }

    pub fn min(&self) -> Option<Numeric> {
        self.min
    }

    pub fn max(&self) -> Option<Numeric> {
        self.max
    }

    /// The unit string as authored, or `dimensionless`.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn canonical_unit(&self) -> &Unit {
        &self.canonical_unit
    }

    /// Coerce `value` to this signal's numeric family and restrict it to
    /// `[min, max]`. Integral signals truncate toward zero.
    pub fn clamp(&self, value: impl Into<Numeric>) -> SignalResult<Numeric> {
        let bounds = self.min.zip(self.max);
        clamp_value(self.datatype, bounds, value.into())
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.namespace, f)
    }
}

// ── Helpers ──────────────────────────────────────────────────────

fn derive_bounds(
    datatype: Datatype,
    min: Option<Numeric>,
    max: Option<Numeric>,
) -> SignalResult<Option<(Numeric, Numeric)>> {
    let Some((low, high)) = datatype.natural_bounds() else {
        return Ok(None);
    };
    let min = min.map_or(low, |v| narrow(datatype, v, low, high, true));
    let max = max.map_or(high, |v| narrow(datatype, v, low, high, false));
    if min > max {
        return Err(SignalError::InvertedBounds {
            min: min.to_string(),
            max: max.to_string(),
            datatype,
        });
    }
    Ok(Some((min, max)))
}

/// Bring an authored bound into the datatype's family and natural range.
/// Fractional bounds on integral types round inward.
fn narrow(datatype: Datatype, value: Numeric, low: Numeric, high: Numeric, is_min: bool) -> Numeric {
    let value = match (datatype.family(), value) {
        (Family::Integral, Numeric::Float(f)) => {
            let rounded = if is_min { f.ceil() } else { f.floor() };
            Numeric::Integer(rounded as i128)
        }
        (Family::Floating, Numeric::Integer(i)) => Numeric::Float(i as f64),
        (_, v) => v,
    };
    if value < low {
        low
    } else if value > high {
        high
    } else {
        value
    }
}

fn check_default(
    datatype: Datatype,
    bounds: Option<(Numeric, Numeric)>,
    default: &DefaultValue,
) -> SignalResult<()> {
    if default.family() != datatype.family() {
        return Err(SignalError::DefaultTypeMismatch {
            kind: default.kind(),
            datatype,
        });
    }
    if let Some(value) = default.as_numeric() {
        if clamp_value(datatype, bounds, value)? != value {
            return Err(SignalError::DefaultOutOfRange {
                value: default.to_string(),
                datatype,
            });
        }
    }
    Ok(())
}

fn clamp_value(
    datatype: Datatype,
    bounds: Option<(Numeric, Numeric)>,
    value: Numeric,
) -> SignalResult<Numeric> {
    let Some((min, max)) = bounds else {
        return Err(SignalError::NotNumeric(datatype));
    };
    if value.is_nan() {
        return Err(SignalError::NotANumber);
    }

    match (value, min, max) {
        (Numeric::Integer(v), Numeric::Integer(lo), Numeric::Integer(hi)) => {
            Ok(Numeric::Integer(v.clamp(lo, hi)))
        }
        (Numeric::Float(v), Numeric::Integer(lo), Numeric::Integer(hi)) => {
            let clamped = v.clamp(lo as f64, hi as f64).trunc();
            Ok(Numeric::Integer((clamped as i128).clamp(lo, hi)))
        }
        _ => Ok(Numeric::Float(value.as_f64().clamp(min.as_f64(), max.as_f64()))),
    }
}
