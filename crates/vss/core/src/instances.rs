//! Instance matcher
//!
//! Branches such as `Vehicle.Cabin.Door` repeat their sub-tree once per
//! instance. An instance specification takes one of three shapes:
//!
//! - a range string, `"Row[1,4]"` → `Row1 .. Row4`
//! - a flat list of names, `["Left", "Right"]`, where range strings are
//!   expanded in place: `["Front", "Rear[1,2]"]` → `Front, Rear1, Rear2`
//! - a list of axes, `["Row[1,2]", ["DriverSide", "PassengerSide"]]`, each axis
//!   matched against one successive namespace segment
//!
//! The raw JSON is first parsed into an [`InstanceSpec`]; matching then
//! consumes namespace segments and returns the advanced traversal index.
//! Ranges are matched arithmetically and never expanded during resolution.

use crate::error::{VssError, VssResult};
use crate::namespace::Namespace;
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;

/// Ranges wider than this are rendered as `'Row[1,500]'` in error messages.
const LISTED_RANGE_LIMIT: u64 = 16;

fn range_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(.*)\[([0-9]+),([0-9]+)\]$").expect("instance range pattern is valid")
    })
}

/// `Prefix[lower,upper]`, bounds inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceRange {
    pub prefix: String,
    pub lower: u64,
    pub upper: u64,
}

impl InstanceRange {
    /// Parse a range string; `path` names the branch for error messages.
    pub fn parse(spec: &str, path: &str) -> VssResult<Self> {
        let malformed = || VssError::spec(format!("malformed instance '{}' on '{}'", spec, path));

        let caps = range_pattern().captures(spec).ok_or_else(malformed)?;
        let prefix = caps[1].to_string();
        let lower: u64 = caps[2].parse().map_err(|_| malformed())?;
        let upper: u64 = caps[3].parse().map_err(|_| malformed())?;

        if upper <= lower {
            return Err(VssError::spec(format!(
                "empty range [{},{}] on instance '{}' for '{}'",
                lower, upper, prefix, path
            )));
        }
        Ok(Self {
            prefix,
            lower,
            upper,
        })
    }

    /// Whether `name` is `prefix` followed by a number in `lower..=upper`,
    /// written without leading zeros.
    pub fn contains(&self, name: &str) -> bool {
        let Some(digits) = name.strip_prefix(self.prefix.as_str()) else {
            return false;
        };
        if digits.is_empty()
            || !digits.bytes().all(|b| b.is_ascii_digit())
            || (digits.len() > 1 && digits.starts_with('0'))
        {
            return false;
        }
        digits
            .parse::<u64>()
            .map(|n| (self.lower..=self.upper).contains(&n))
            .unwrap_or(false)
    }

    /// Number of names in the range.
    pub fn size(&self) -> u64 {
        self.upper - self.lower + 1
    }

    pub fn names(&self) -> impl Iterator<Item = String> + '_ {
        (self.lower..=self.upper).map(move |i| format!("{}{}", self.prefix, i))
    }
}

impl fmt::Display for InstanceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{},{}]", self.prefix, self.lower, self.upper)
    }
}

/// One member of a flat instance list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceName {
    Literal(String),
    Range(InstanceRange),
}

impl InstanceName {
    pub fn matches(&self, segment: &str) -> bool {
        match self {
            InstanceName::Literal(name) => name == segment,
            InstanceName::Range(range) => range.contains(segment),
        }
    }
}

impl From<&str> for InstanceName {
    fn from(name: &str) -> Self {
        InstanceName::Literal(name.to_string())
    }
}

/// A validated instance specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceSpec {
    /// `"Row[1,4]"`
    Range(InstanceRange),
    /// `["Left", "Right"]`, or names unioned with ranges, `["Front", "Rear[1,2]"]`
    FlatList(Vec<InstanceName>),
    /// One axis per namespace segment; each axis is a `Range` or `FlatList`.
    AxisList(Vec<InstanceSpec>),
}

enum Element {
    Name(String),
    Range(InstanceRange),
    Axis(InstanceSpec),
}

impl InstanceSpec {
    /// Parse the raw `instances` value of the node at `path`.
    ///
    /// An outer list of names and range strings is one flat axis; an outer
    /// list of only ranges and nested lists is one axis per element. Plain
    /// names next to nested lists are malformed.
    pub fn parse(raw: &Value, path: &str) -> VssResult<Self> {
        let items = match raw {
            Value::String(s) => return InstanceRange::parse(s, path).map(InstanceSpec::Range),
            Value::Array(items) => items,
            other => return Err(malformed(other, path)),
        };
        if items.is_empty() {
            return Err(VssError::spec(format!("empty instances array on '{}'", path)));
        }

        let mut elements = Vec::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            let element = match item {
                Value::String(s) if range_pattern().is_match(s) => {
                    Element::Range(InstanceRange::parse(s, path)?)
                }
                Value::String(s) => Element::Name(s.clone()),
                Value::Array(axis) => Element::Axis(parse_axis(axis, pos, path)?),
                other => return Err(malformed(other, path)),
            };
            elements.push(element);
        }

        let has_names = elements.iter().any(|e| matches!(e, Element::Name(_)));
        let has_axes = elements.iter().any(|e| matches!(e, Element::Axis(_)));
        match (has_names, has_axes) {
            (true, true) => Err(malformed(raw, path)),
            (true, false) => Ok(InstanceSpec::FlatList(
                elements
                    .into_iter()
                    .filter_map(|e| match e {
                        Element::Name(name) => Some(InstanceName::Literal(name)),
                        Element::Range(range) => Some(InstanceName::Range(range)),
                        Element::Axis(_) => None,
                    })
                    .collect(),
            )),
            (false, _) => Ok(InstanceSpec::AxisList(
                elements
                    .into_iter()
                    .filter_map(|e| match e {
                        Element::Range(range) => Some(InstanceSpec::Range(range)),
                        Element::Axis(axis) => Some(axis),
                        Element::Name(_) => None,
                    })
                    .collect(),
            )),
        }
    }

    /// Number of namespace segments this specification consumes.
    pub fn depth(&self) -> usize {
        match self {
            InstanceSpec::Range(_) | InstanceSpec::FlatList(_) => 1,
            InstanceSpec::AxisList(axes) => axes.len(),
        }
    }

    /// Match `namespace[idx..]` against this specification and return the
    /// index of the first segment after the instances.
    pub fn consume(&self, namespace: &Namespace, idx: usize) -> VssResult<usize> {
        match self {
            InstanceSpec::Range(range) => match_segment(
                namespace,
                idx,
                |segment| range.contains(segment),
                || format_range(range),
            ),
            InstanceSpec::FlatList(names) => match_segment(
                namespace,
                idx,
                |segment| names.iter().any(|n| n.matches(segment)),
                || format_alternatives(names),
            ),
            InstanceSpec::AxisList(axes) => axes
                .iter()
                .try_fold(idx, |idx, axis| axis.consume(namespace, idx)),
        }
    }
}

fn parse_axis(axis: &[Value], pos: usize, path: &str) -> VssResult<InstanceSpec> {
    if axis.is_empty() {
        return Err(VssError::spec(format!("empty instances array on '{}'", path)));
    }
    let mut names = Vec::with_capacity(axis.len());
    for item in axis {
        match item {
            Value::String(s) if range_pattern().is_match(s) => {
                names.push(InstanceName::Range(InstanceRange::parse(s, path)?));
            }
            Value::String(s) => names.push(InstanceName::Literal(s.clone())),
            other => {
                return Err(VssError::spec(format!(
                    "illegal nested instance[{}][{}] on '{}'",
                    pos, other, path
                )))
            }
        }
    }
    Ok(InstanceSpec::FlatList(names))
}

fn malformed(raw: &Value, path: &str) -> VssError {
    VssError::spec(format!("malformed instances {} for '{}'", raw, path))
}

/// Expand `"Prefix[lower,upper]"` into its names, inclusive.
pub fn expand_range(spec: &str, path: &str) -> VssResult<Vec<String>> {
    InstanceRange::parse(spec, path).map(|range| range.names().collect())
}

/// Require `namespace[idx]` to be one of `expected`; returns `idx + 1`.
pub fn consume(expected: &[String], namespace: &Namespace, idx: usize) -> VssResult<usize> {
    match_segment(
        namespace,
        idx,
        |segment| expected.iter().any(|e| e == segment),
        || format_quoted(expected.iter()),
    )
}

/// Parse the raw instances of the node ending at `namespace[idx - 1]` and
/// consume the matching segments.
pub fn parse_instances(raw: &Value, namespace: &Namespace, idx: usize) -> VssResult<usize> {
    InstanceSpec::parse(raw, &namespace.prefix(idx))?.consume(namespace, idx)
}

fn match_segment(
    namespace: &Namespace,
    idx: usize,
    is_member: impl Fn(&str) -> bool,
    expected: impl Fn() -> String,
) -> VssResult<usize> {
    let found = namespace.prefix(idx);
    let Some(name) = namespace.get(idx) else {
        let last = idx.checked_sub(1).and_then(|i| namespace.get(i)).unwrap_or("");
        return Err(VssError::branch(format!(
            "node '{}' has instances, expected one of {} after {}",
            found,
            expected(),
            last
        )));
    };

    if !is_member(name) {
        return Err(VssError::branch(format!(
            "illegal instance of '{}', got '{}' but must be one of {}",
            found,
            name,
            expected()
        )));
    }

    tracing::trace!(path = %found, instance = name, "Matched instance");
    Ok(idx + 1)
}

/// `['Row1', 'Row2']`
fn format_quoted<S: fmt::Display>(names: impl Iterator<Item = S>) -> String {
    let quoted: Vec<String> = names.map(|n| format!("'{}'", n)).collect();
    format!("[{}]", quoted.join(", "))
}

fn format_range(range: &InstanceRange) -> String {
    format_alternatives(std::slice::from_ref(&InstanceName::Range(range.clone())))
}

/// Small ranges are listed name by name, wide ones as `'Row[1,500]'`.
fn format_alternatives(names: &[InstanceName]) -> String {
    let mut rendered = Vec::new();
    for name in names {
        match name {
            InstanceName::Literal(name) => rendered.push(name.clone()),
            InstanceName::Range(range) if range.size() <= LISTED_RANGE_LIMIT => {
                rendered.extend(range.names())
            }
            InstanceName::Range(range) => rendered.push(range.to_string()),
        }
    }
    format_quoted(rendered.iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn ns(name: &str) -> Namespace {
        Namespace::parse(name).unwrap()
    }

    #[test]
    fn test_expand_range() {
        assert_eq!(expand_range("Row[1,4]", "A").unwrap(), ["Row1", "Row2", "Row3", "Row4"]);
        assert_eq!(expand_range("[0,1]", "A").unwrap(), ["0", "1"]);
    }

    #[test]
    fn test_expand_range_rejects_empty_and_malformed() {
        let err = expand_range("Row[4,4]", "Vehicle.Cabin").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Spec);
        assert_eq!(
            err.to_string(),
            "empty range [4,4] on instance 'Row' for 'Vehicle.Cabin'"
        );

        let err = expand_range("Row[2,1]", "A").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Spec);

        let err = expand_range("Row1", "Vehicle.Cabin").unwrap_err();
        assert_eq!(err.to_string(), "malformed instance 'Row1' on 'Vehicle.Cabin'");
        assert!(expand_range("Row[1,x]", "A").is_err());
        assert!(expand_range("Row[1,99999999999999999999999]", "A").is_err());
    }

    #[test]
    fn test_consume() {
        let names = vec!["Left".to_string(), "Right".to_string()];
        let namespace = ns("Vehicle.Wheel.Left.Speed");
        assert_eq!(consume(&names, &namespace, 2).unwrap(), 3);

        let err = consume(&names, &ns("Vehicle.Wheel.Middle.Speed"), 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Branch);
        assert_eq!(
            err.to_string(),
            "illegal instance of 'Vehicle.Wheel', got 'Middle' but must be one of ['Left', 'Right']"
        );

        let err = consume(&names, &ns("Vehicle.Wheel"), 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Branch);
        assert_eq!(
            err.to_string(),
            "node 'Vehicle.Wheel' has instances, expected one of ['Left', 'Right'] after Wheel"
        );
    }

    #[test]
    fn test_parse_shapes() {
        let spec = InstanceSpec::parse(&json!("Row[1,2]"), "A").unwrap();
        assert!(matches!(spec, InstanceSpec::Range(_)));

        let spec = InstanceSpec::parse(&json!(["Left", "Right"]), "A").unwrap();
        assert_eq!(spec, InstanceSpec::FlatList(vec!["Left".into(), "Right".into()]));

        let spec = InstanceSpec::parse(&json!(["Row[1,4]", ["Left", "Right"]]), "A").unwrap();
        assert_eq!(spec.depth(), 2);

        let rear = InstanceName::Range(InstanceRange {
            prefix: "Rear".into(),
            lower: 1,
            upper: 2,
        });
        let spec = InstanceSpec::parse(&json!([["Front", "Rear[1,2]"]]), "A").unwrap();
        assert_eq!(
            spec,
            InstanceSpec::AxisList(vec![InstanceSpec::FlatList(vec!["Front".into(), rear.clone()])])
        );

        let spec = InstanceSpec::parse(&json!(["Front", "Rear[1,2]"]), "A").unwrap();
        assert_eq!(spec, InstanceSpec::FlatList(vec!["Front".into(), rear]));
        assert_eq!(spec.depth(), 1);

        let spec = InstanceSpec::parse(&json!(["Row[1,2]", "Pos[1,3]"]), "A").unwrap();
        assert_eq!(spec.depth(), 2);
    }

    #[test]
    fn test_mixed_flat_list_matches_union() {
        let raw = json!(["Front", "Rear[1,2]"]);
        for name in ["V.Seat.Front.On", "V.Seat.Rear1.On", "V.Seat.Rear2.On"] {
            assert_eq!(parse_instances(&raw, &ns(name), 2).unwrap(), 3, "{name}");
        }

        let err = parse_instances(&raw, &ns("V.Seat.Rear3.On"), 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Branch);
        assert_eq!(
            err.to_string(),
            "illegal instance of 'V.Seat', got 'Rear3' but must be one of ['Front', 'Rear1', 'Rear2']"
        );
    }

    #[test]
    fn test_range_contains() {
        let range = InstanceRange::parse("Row[1,12]", "A").unwrap();
        assert!(range.contains("Row1"));
        assert!(range.contains("Row12"));
        assert!(!range.contains("Row0"));
        assert!(!range.contains("Row13"));
        assert!(!range.contains("Row01"));
        assert!(!range.contains("Row"));
        assert!(!range.contains("Row+1"));
        assert!(!range.contains("Seat1"));
        assert!(!range.contains("Row99999999999999999999999"));

        let range = InstanceRange::parse("[0,3]", "A").unwrap();
        assert!(range.contains("0"));
        assert!(!range.contains("00"));
    }

    #[test]
    fn test_wide_range_is_matched_without_expansion() {
        let raw = json!("Row[1,4000000000]");
        assert_eq!(parse_instances(&raw, &ns("V.Seat.Row1.On"), 2).unwrap(), 3);
        assert_eq!(parse_instances(&raw, &ns("V.Seat.Row4000000000.On"), 2).unwrap(), 3);

        let err = parse_instances(&raw, &ns("V.Seat.Row0.On"), 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Branch);
        assert_eq!(
            err.to_string(),
            "illegal instance of 'V.Seat', got 'Row0' but must be one of ['Row[1,4000000000]']"
        );

        let raw = json!(["Driver", "Row[1,4000000000]"]);
        let err = parse_instances(&raw, &ns("V.Seat"), 2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "node 'V.Seat' has instances, expected one of ['Driver', 'Row[1,4000000000]'] after Seat"
        );
    }

    #[test]
    fn test_parse_errors_are_spec_errors() {
        let cases = [
            (json!([]), "empty instances array on 'A'"),
            (json!([[]]), "empty instances array on 'A'"),
            (json!([["Left", 3]]), "illegal nested instance[0][3] on 'A'"),
            (json!(["Left", ["Right"]]), "malformed instances [\"Left\",[\"Right\"]] for 'A'"),
            (json!(7), "malformed instances 7 for 'A'"),
            (json!([true]), "malformed instances true for 'A'"),
            (json!(["Left", "Row[3,3]"]), "empty range [3,3] on instance 'Row' for 'A'"),
        ];
        for (raw, message) in cases {
            let err = InstanceSpec::parse(&raw, "A").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Spec, "{raw}");
            assert_eq!(err.to_string(), message);
        }
    }

    #[test]
    fn test_parse_instances_multi_axis() {
        let raw = json!(["Row[1,4]", ["Left", "Right"]]);
        let namespace = ns("Vehicle.Cabin.HVAC.Station.Row2.Right.FanSpeed");
        assert_eq!(parse_instances(&raw, &namespace, 4).unwrap(), 6);

        let namespace = ns("Vehicle.Cabin.HVAC.Station.Row2.Middle.FanSpeed");
        let err = parse_instances(&raw, &namespace, 4).unwrap_err();
        assert_eq!(
            err.to_string(),
            "illegal instance of 'Vehicle.Cabin.HVAC.Station.Row2', got 'Middle' but must be one of ['Left', 'Right']"
        );

        let namespace = ns("Vehicle.Cabin.HVAC.Station.Row5.Left.FanSpeed");
        let err = parse_instances(&raw, &namespace, 4).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Branch);
    }

    #[test]
    fn test_parse_instances_empty_is_spec_not_branch() {
        let namespace = ns("Vehicle.Seat.Row1");
        let err = parse_instances(&json!([]), &namespace, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Spec);
    }
}
