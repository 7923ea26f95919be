//! SI base dimensional exponents.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Exponents of the seven SI base dimensions.
///
/// Plane angles are dimensionless, matching SI and the behaviour VSS tooling
/// has always relied on (`degree` is a valid unit for a dimensionless check).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitDimensions {
    /// Length (L), base unit meter
    pub length: i8,
    /// Mass (M), base unit kilogram
    pub mass: i8,
    /// Time (T), base unit second
    pub time: i8,
    /// Temperature (Θ), base unit kelvin
    pub temperature: i8,
    /// Electric current (I), base unit ampere
    pub current: i8,
    /// Amount of substance (N), base unit mole
    pub amount: i8,
    /// Luminous intensity (J), base unit candela
    pub luminosity: i8,
}

impl UnitDimensions {
    /// All exponents zero.
    pub const DIMENSIONLESS: Self = Self::new(0, 0, 0, 0, 0, 0, 0);
    /// L
    pub const LENGTH: Self = Self::new(1, 0, 0, 0, 0, 0, 0);
    /// M
    pub const MASS: Self = Self::new(0, 1, 0, 0, 0, 0, 0);
    /// T
    pub const TIME: Self = Self::new(0, 0, 1, 0, 0, 0, 0);
    /// Θ
    pub const TEMPERATURE: Self = Self::new(0, 0, 0, 1, 0, 0, 0);
    /// I
    pub const CURRENT: Self = Self::new(0, 0, 0, 0, 1, 0, 0);
    /// N
    pub const AMOUNT: Self = Self::new(0, 0, 0, 0, 0, 1, 0);
    /// J
    pub const LUMINOSITY: Self = Self::new(0, 0, 0, 0, 0, 0, 1);

    /// Build a dimension vector in `L M T Θ I N J` order.
    pub const fn new(
        length: i8,
        mass: i8,
        time: i8,
        temperature: i8,
        current: i8,
        amount: i8,
        luminosity: i8,
    ) -> Self {
        Self {
            length,
            mass,
            time,
            temperature,
            current,
            amount,
            luminosity,
        }
    }

    /// True when every exponent is zero.
    pub fn is_dimensionless(&self) -> bool {
        *self == Self::DIMENSIONLESS
    }

    /// Dimensions of a product (exponents add); `None` when an exponent
    /// leaves the `i8` range.
    pub fn multiply(&self, other: &Self) -> Option<Self> {
        self.zip_with(other, i8::checked_add)
    }

    /// Dimensions of a quotient (exponents subtract).
    pub fn divide(&self, other: &Self) -> Option<Self> {
        self.zip_with(other, i8::checked_sub)
    }

    /// Dimensions raised to an integer power.
    pub fn pow(&self, exponent: i8) -> Option<Self> {
        self.zip_with(&Self::DIMENSIONLESS, |lhs, _| lhs.checked_mul(exponent))
    }

    fn zip_with(&self, other: &Self, f: impl Fn(i8, i8) -> Option<i8>) -> Option<Self> {
        Some(Self {
            length: f(self.length, other.length)?,
            mass: f(self.mass, other.mass)?,
            time: f(self.time, other.time)?,
            temperature: f(self.temperature, other.temperature)?,
            current: f(self.current, other.current)?,
            amount: f(self.amount, other.amount)?,
            luminosity: f(self.luminosity, other.luminosity)?,
        })
    }

    fn exponents(&self) -> [(&'static str, i8); 7] {
        [
            ("[length]", self.length),
            ("[mass]", self.mass),
            ("[time]", self.time),
            ("[temperature]", self.temperature),
            ("[current]", self.current),
            ("[substance]", self.amount),
            ("[luminosity]", self.luminosity),
        ]
    }
}

impl fmt::Display for UnitDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return write!(f, "dimensionless");
        }

        let mut first = true;
        for (name, exp) in self.exponents().into_iter().filter(|(_, e)| *e != 0) {
            if !first {
                write!(f, " * ")?;
            }
            first = false;
            if exp == 1 {
                write!(f, "{}", name)?;
            } else {
                write!(f, "{} ** {}", name, exp)?;
            }
        }
        Ok(())
    }
}
