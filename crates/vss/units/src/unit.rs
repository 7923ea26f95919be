//! Canonical parsed unit.
//!
//! A [`Unit`] keeps the named factors it was built from (so it can be printed
//! back in long or abbreviated form) alongside its SI dimensions and scale.

use crate::dimensions::UnitDimensions;
use serde::{Serialize, Serializer};
use std::fmt;

/// One named factor of a unit, e.g. `kilometer` or `second ** -2`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitTerm {
    /// Long name, e.g. `kilometer`
    pub name: String,
    /// Abbreviation, e.g. `km`
    pub symbol: String,
    /// Power this factor is raised to (never zero)
    pub exponent: i32,
}

/// A parsed, canonical unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    dims: UnitDimensions,
    /// Factor relative to the coherent SI unit for `dims`
    scale: f64,
    terms: Vec<UnitTerm>,
}

impl Unit {
    /// The unit with no factors.
    pub fn dimensionless() -> Self {
        Self {
            dims: UnitDimensions::DIMENSIONLESS,
            scale: 1.0,
            terms: Vec::new(),
        }
    }

    /// A single named factor.
    pub fn named(
        name: impl Into<String>,
        symbol: impl Into<String>,
        dims: UnitDimensions,
        scale: f64,
    ) -> Self {
        Self {
            dims,
            scale,
            terms: vec![UnitTerm {
                name: name.into(),
                symbol: symbol.into(),
                exponent: 1,
            }],
        }
    }

    /// SI dimensional exponents.
    pub fn dims(&self) -> &UnitDimensions {
        &self.dims
    }

    /// Scale relative to the coherent SI unit.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Named factors in the order they were first written.
    pub fn terms(&self) -> &[UnitTerm] {
        &self.terms
    }

    /// True when the unit carries no physical dimension (`%`, `ratio`, `degree`).
    pub fn is_dimensionless(&self) -> bool {
        self.dims.is_dimensionless()
    }

    /// Same dimensions, ignoring scale.
    pub fn is_compatible_with(&self, other: &Unit) -> bool {
        self.dims == other.dims
    }

    /// Product of two units; `None` when an exponent overflows.
    pub fn multiply(&self, other: &Unit) -> Option<Unit> {
        let mut terms = self.terms.clone();
        for term in &other.terms {
            merge_term(&mut terms, term.clone())?;
        }
        Some(Unit {
            dims: self.dims.multiply(&other.dims)?,
            scale: self.scale * other.scale,
            terms,
        })
    }

    /// Quotient of two units.
    pub fn divide(&self, other: &Unit) -> Option<Unit> {
        self.multiply(&other.pow(-1)?)
    }

    /// This unit raised to an integer power.
    pub fn pow(&self, exponent: i8) -> Option<Unit> {
        if exponent == 0 {
            return Some(Unit::dimensionless());
        }
        let terms = self
            .terms
            .iter()
            .map(|t| {
                Some(UnitTerm {
                    exponent: t.exponent.checked_mul(i32::from(exponent))?,
                    ..t.clone()
                })
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Unit {
            dims: self.dims.pow(exponent)?,
            scale: self.scale.powi(i32::from(exponent)),
            terms,
        })
    }

    /// Abbreviated form, e.g. `km / h`.
    pub fn symbol(&self) -> String {
        self.render(|t| t.symbol.as_str())
    }

    fn render<'a>(&'a self, label: impl Fn(&'a UnitTerm) -> &'a str) -> String {
        if self.terms.is_empty() {
            return "dimensionless".to_string();
        }

        let power = |t: &'a UnitTerm, exp: i32| {
            if exp == 1 {
                label(t).to_string()
            } else {
                format!("{} ** {}", label(t), exp)
            }
        };

        let numerator: Vec<String> = self
            .terms
            .iter()
            .filter(|t| t.exponent > 0)
            .map(|t| power(t, t.exponent))
            .collect();
        let denominator: Vec<String> = self
            .terms
            .iter()
            .filter(|t| t.exponent < 0)
            .map(|t| power(t, -t.exponent))
            .collect();

        let mut out = if numerator.is_empty() {
            "1".to_string()
        } else {
            numerator.join(" * ")
        };
        for d in denominator {
            out.push_str(" / ");
            out.push_str(&d);
        }
        out
    }
}

fn merge_term(terms: &mut Vec<UnitTerm>, term: UnitTerm) -> Option<()> {
    match terms.iter().position(|t| t.name == term.name) {
        Some(pos) => {
            terms[pos].exponent = terms[pos].exponent.checked_add(term.exponent)?;
            if terms[pos].exponent == 0 {
                terms.remove(pos);
            }
        }
        None => terms.push(term),
    }
    Some(())
}

impl fmt::Display for Unit {
    /// Long form, e.g. `kilometer / hour`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(|t| t.name.as_str()))
    }
}

impl Serialize for Unit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
