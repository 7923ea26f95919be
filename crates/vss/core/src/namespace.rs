//! Signal namespaces: `Vehicle.Cabin.HVAC.Station.Row1.Left.FanSpeed`

use crate::error::NamespaceError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A non-empty sequence of non-empty path segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Namespace(Vec<String>);

impl Namespace {
    /// Split a dotted name literally on `.`.
    pub fn parse(name: &str) -> Result<Self, NamespaceError> {
        if name.is_empty() {
            return Err(NamespaceError::Empty);
        }
        Self::from_segments(name.split('.'))
    }

    pub fn from_segments<I, S>(segments: I) -> Result<Self, NamespaceError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        validate(&segments)?;
        Ok(Self(segments))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.0.get(idx).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a constructed namespace.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first segment: the domain.
    pub fn domain(&self) -> &str {
        &self.0[0]
    }

    /// The first `n` segments joined with `.`.
    pub fn prefix(&self, n: usize) -> String {
        self.0[..n.min(self.0.len())].join(".")
    }

    /// The segments from `idx` on, joined with `.`.
    pub fn suffix(&self, idx: usize) -> String {
        self.0[idx.min(self.0.len())..].join(".")
    }

    pub fn into_segments(self) -> Vec<String> {
        self.0
    }
}

/// Check that `segments` forms a valid namespace.
pub fn validate<S: AsRef<str>>(segments: &[S]) -> Result<(), NamespaceError> {
    if segments.is_empty() {
        return Err(NamespaceError::Empty);
    }
    if segments.iter().any(|s| s.as_ref().is_empty()) {
        return Err(NamespaceError::EmptyKey);
    }
    Ok(())
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl FromStr for Namespace {
    type Err = NamespaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Namespace {
    type Error = NamespaceError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Namespace {
    type Error = NamespaceError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl TryFrom<Vec<String>> for Namespace {
    type Error = NamespaceError;

    fn try_from(segments: Vec<String>) -> Result<Self, Self::Error> {
        validate(&segments)?;
        Ok(Self(segments))
    }
}

impl TryFrom<&[&str]> for Namespace {
    type Error = NamespaceError;

    fn try_from(segments: &[&str]) -> Result<Self, Self::Error> {
        Self::from_segments(segments.iter().copied())
    }
}

impl<const N: usize> TryFrom<[&str; N]> for Namespace {
    type Error = NamespaceError;

    fn try_from(segments: [&str; N]) -> Result<Self, Self::Error> {
        Self::from_segments(segments)
    }
}

impl From<Namespace> for Vec<String> {
    fn from(ns: Namespace) -> Self {
        ns.0
    }
}

/// Anything a signal name can be given as: a dotted string or a sequence of
/// segments.
pub trait IntoNamespace {
    fn into_namespace(self) -> Result<Namespace, NamespaceError>;
}

impl IntoNamespace for Namespace {
    fn into_namespace(self) -> Result<Namespace, NamespaceError> {
        Ok(self)
    }
}

impl IntoNamespace for &Namespace {
    fn into_namespace(self) -> Result<Namespace, NamespaceError> {
        Ok(self.clone())
    }
}

impl IntoNamespace for &str {
    fn into_namespace(self) -> Result<Namespace, NamespaceError> {
        Namespace::parse(self)
    }
}

impl IntoNamespace for String {
    fn into_namespace(self) -> Result<Namespace, NamespaceError> {
        Namespace::parse(&self)
    }
}

impl IntoNamespace for &String {
    fn into_namespace(self) -> Result<Namespace, NamespaceError> {
        Namespace::parse(self)
    }
}

impl IntoNamespace for Vec<String> {
    fn into_namespace(self) -> Result<Namespace, NamespaceError> {
        Namespace::try_from(self)
    }
}

impl IntoNamespace for &[String] {
    fn into_namespace(self) -> Result<Namespace, NamespaceError> {
        Namespace::from_segments(self.iter().cloned())
    }
}

impl IntoNamespace for &[&str] {
    fn into_namespace(self) -> Result<Namespace, NamespaceError> {
        Namespace::try_from(self)
    }
}

impl<const N: usize> IntoNamespace for [&str; N] {
    fn into_namespace(self) -> Result<Namespace, NamespaceError> {
        Namespace::from_segments(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_on_dots() {
        let ns = Namespace::parse("Vehicle.Cabin.HVAC").unwrap();
        assert_eq!(ns.segments(), ["Vehicle", "Cabin", "HVAC"]);
        assert_eq!(ns.domain(), "Vehicle");
        assert_eq!(ns.to_string(), "Vehicle.Cabin.HVAC");
    }

    #[test]
    fn test_empty_namespace() {
        assert_eq!(Namespace::parse(""), Err(NamespaceError::Empty));
        let none: [&str; 0] = [];
        assert_eq!(Namespace::try_from(none), Err(NamespaceError::Empty));
        assert_eq!(Namespace::try_from(Vec::<String>::new()), Err(NamespaceError::Empty));
    }

    #[test]
    fn test_empty_key() {
        assert_eq!(Namespace::parse("Foo..Bar"), Err(NamespaceError::EmptyKey));
        assert_eq!(Namespace::parse("."), Err(NamespaceError::EmptyKey));
        assert_eq!(Namespace::parse("Vehicle."), Err(NamespaceError::EmptyKey));
        assert_eq!(
            Namespace::try_from(["Vehicle", ""]),
            Err(NamespaceError::EmptyKey)
        );
    }

    #[test]
    fn test_prefix_and_suffix() {
        let ns: Namespace = "A.B.C.D".parse().unwrap();
        assert_eq!(ns.prefix(2), "A.B");
        assert_eq!(ns.prefix(10), "A.B.C.D");
        assert_eq!(ns.suffix(2), "C.D");
        assert_eq!(ns.suffix(4), "");
        assert_eq!(ns.get(3), Some("D"));
        assert_eq!(ns.get(4), None);
    }

    #[test]
    fn test_string_and_sequence_forms_agree() {
        let a = "Vehicle.Speed".into_namespace().unwrap();
        let b = ["Vehicle", "Speed"].into_namespace().unwrap();
        let c = vec!["Vehicle".to_string(), "Speed".to_string()]
            .into_namespace()
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_serializes_as_segments() {
        let ns = Namespace::parse("Vehicle.Speed").unwrap();
        assert_eq!(
            serde_json::to_value(&ns).unwrap(),
            serde_json::json!(["Vehicle", "Speed"])
        );
    }
}
