//! Unit registry: the table of known units, SI prefixes and aliases.
//!
//! Lookup strategy for a single name:
//!
//! 1. Exact match on a symbol, long name or alias (`m`, `meter`, `celsius`)
//! 2. SI prefix + prefixable unit, by symbol (`km`, `mbar`) or long name
//!    (`kilometer`)
//! 3. Plural long names (`meters`, `kilometers`)

use crate::dimensions::UnitDimensions;
use crate::error::{UnitError, UnitResult};
use crate::parser::parse_expression;
use crate::unit::Unit;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Anything that can turn a unit string into a canonical [`Unit`].
///
/// Signal construction only depends on this trait, so tests and embedders can
/// supply an isolated registry instead of the process-wide one.
pub trait UnitParser: Send + Sync {
    /// Parse a unit expression such as `km/h`.
    fn parse_unit(&self, unit: &str) -> UnitResult<Unit>;
}

/// SI prefixes: symbol, long name, power of ten.
///
/// Two-character symbols come first so `da` wins over `d`.
const SI_PREFIXES: &[(&str, &str, i32)] = &[
    ("da", "deca", 1),
    ("Y", "yotta", 24),
    ("Z", "zetta", 21),
    ("E", "exa", 18),
    ("P", "peta", 15),
    ("T", "tera", 12),
    ("G", "giga", 9),
    ("M", "mega", 6),
    ("k", "kilo", 3),
    ("h", "hecto", 2),
    ("d", "deci", -1),
    ("c", "centi", -2),
    ("m", "milli", -3),
    ("µ", "micro", -6),
    ("μ", "micro", -6),
    ("u", "micro", -6),
    ("n", "nano", -9),
    ("p", "pico", -12),
    ("f", "femto", -15),
    ("a", "atto", -18),
];

#[derive(Debug, Clone)]
struct UnitDef {
    name: String,
    symbol: String,
    dims: UnitDimensions,
    scale: f64,
    prefixable: bool,
}

impl UnitDef {
    fn unit(&self) -> Unit {
        Unit::named(&self.name, &self.symbol, self.dims, self.scale)
    }
}

/// A table of named units.
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    defs: Vec<UnitDef>,
    /// symbol, long name or alias → index into `defs`
    index: HashMap<String, usize>,
}

impl UnitRegistry {
    /// An empty registry that knows no units at all.
    pub fn empty() -> Self {
        Self {
            defs: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// The standard table: SI base and derived units plus the common
    /// engineering units found in vehicle catalogs.
    pub fn new() -> Self {
        let mut reg = Self::empty();
        for &(symbol, name, dims, scale, prefixable) in STANDARD_UNITS {
            reg.insert(UnitDef {
                name: name.to_string(),
                symbol: symbol.to_string(),
                dims,
                scale,
                prefixable,
            });
        }
        for &(alias, target) in STANDARD_ALIASES {
            if let Some(&idx) = reg.index.get(target) {
                reg.index.insert(alias.to_string(), idx);
            }
        }
        reg
    }

    /// The standard table plus the VSS conventions: `%`/`percent` and `ratio`
    /// are dimensionless and `h` means hour.
    pub fn vss() -> Self {
        let mut reg = Self::new();
        reg.insert(UnitDef {
            name: "percent".into(),
            symbol: "%".into(),
            dims: UnitDimensions::DIMENSIONLESS,
            scale: 0.01,
            prefixable: false,
        });
        reg.insert(UnitDef {
            name: "ratio".into(),
            symbol: "ratio".into(),
            dims: UnitDimensions::DIMENSIONLESS,
            scale: 1.0,
            prefixable: false,
        });
        reg.insert(UnitDef {
            name: "iso8601".into(),
            symbol: "iso8601".into(),
            dims: UnitDimensions::DIMENSIONLESS,
            scale: 1.0,
            prefixable: false,
        });
        if let Some(&hour) = reg.index.get("hour") {
            reg.index.insert("h".to_string(), hour);
        }
        reg
    }

    /// The process-wide VSS registry, built on first use.
    pub fn global() -> &'static UnitRegistry {
        static REGISTRY: OnceLock<UnitRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            tracing::debug!("Initialising default unit registry");
            UnitRegistry::vss()
        })
    }

    /// Define a new unit as `expr`, e.g. `define("kph", "kilometer_per_hour", "km/h")`.
    ///
    /// The new unit takes its dimensions and scale from the expression; it is
    /// not prefixable.
    pub fn define(&mut self, symbol: &str, name: &str, expr: &str) -> UnitResult<()> {
        for key in [symbol, name] {
            if self.index.contains_key(key) {
                return Err(UnitError::DuplicateDefinition(key.to_string()));
            }
        }
        let base = self.parse(expr)?;
        self.insert(UnitDef {
            name: name.to_string(),
            symbol: symbol.to_string(),
            dims: *base.dims(),
            scale: base.scale(),
            prefixable: false,
        });
        tracing::debug!(symbol, name, expr, "Defined unit");
        Ok(())
    }

    /// Make `alias` another spelling of the existing unit `target`.
    pub fn alias(&mut self, alias: &str, target: &str) -> UnitResult<()> {
        if self.index.contains_key(alias) {
            return Err(UnitError::DuplicateDefinition(alias.to_string()));
        }
        let idx = *self
            .index
            .get(target)
            .ok_or_else(|| UnitError::UnknownUnit(target.to_string()))?;
        self.index.insert(alias.to_string(), idx);
        Ok(())
    }

    /// True when `name` resolves to a unit (with or without a prefix).
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_ok()
    }

    /// Number of distinct unit definitions (aliases and prefixes excluded).
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// True when no unit is defined.
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Parse a unit expression.
    pub fn parse(&self, expr: &str) -> UnitResult<Unit> {
        parse_expression(expr, &|name| self.lookup(name))
    }

    fn insert(&mut self, def: UnitDef) {
        let idx = self.defs.len();
        self.index.insert(def.symbol.clone(), idx);
        self.index.insert(def.name.clone(), idx);
        self.defs.push(def);
    }

    fn lookup(&self, name: &str) -> UnitResult<Unit> {
        if name == "dimensionless" {
            return Ok(Unit::dimensionless());
        }
        if let Some(&idx) = self.index.get(name) {
            return Ok(self.defs[idx].unit());
        }
        if let Some(unit) = self.lookup_prefixed(name) {
            return Ok(unit);
        }
        if let Some(singular) = name.strip_suffix('s') {
            if let Some(unit) = self.lookup_long_name(singular) {
                return Ok(unit);
            }
        }
        Err(UnitError::UnknownUnit(name.to_string()))
    }

    fn lookup_long_name(&self, name: &str) -> Option<Unit> {
        if let Some(def) = self.defs.iter().find(|d| d.name == name) {
            return Some(def.unit());
        }
        self.lookup_prefixed(name)
    }

    fn lookup_prefixed(&self, name: &str) -> Option<Unit> {
        for &(symbol, long, exp) in SI_PREFIXES {
            let candidates = [
                name.strip_prefix(symbol).map(|rest| (rest, true)),
                name.strip_prefix(long).map(|rest| (rest, false)),
            ];
            for (rest, by_symbol) in candidates.into_iter().flatten() {
                if rest.is_empty() {
                    continue;
                }
                let found = self.defs.iter().find(|d| {
                    d.prefixable && if by_symbol { d.symbol == rest } else { d.name == rest }
                });
                if let Some(def) = found {
                    return Some(Unit::named(
                        format!("{}{}", long, def.name),
                        format!("{}{}", symbol, def.symbol),
                        def.dims,
                        def.scale * 10f64.powi(exp),
                    ));
                }
            }
        }
        None
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitParser for UnitRegistry {
    fn parse_unit(&self, unit: &str) -> UnitResult<Unit> {
        self.parse(unit)
    }
}

type StandardUnit = (&'static str, &'static str, UnitDimensions, f64, bool);

const fn dims(l: i8, m: i8, t: i8, th: i8, i: i8) -> UnitDimensions {
    UnitDimensions::new(l, m, t, th, i, 0, 0)
}

/// symbol, long name, dimensions, scale to SI, prefixable
const STANDARD_UNITS: &[StandardUnit] = &[
    // SI base
    ("m", "meter", UnitDimensions::LENGTH, 1.0, true),
    ("g", "gram", UnitDimensions::MASS, 1e-3, true),
    ("s", "second", UnitDimensions::TIME, 1.0, true),
    ("K", "kelvin", UnitDimensions::TEMPERATURE, 1.0, true),
    ("A", "ampere", UnitDimensions::CURRENT, 1.0, true),
    ("mol", "mole", UnitDimensions::AMOUNT, 1.0, true),
    ("cd", "candela", UnitDimensions::LUMINOSITY, 1.0, true),
    // Angles
    ("rad", "radian", UnitDimensions::DIMENSIONLESS, 1.0, true),
    ("deg", "degree", UnitDimensions::DIMENSIONLESS, std::f64::consts::PI / 180.0, false),
    // Ratios
    ("ppm", "parts_per_million", UnitDimensions::DIMENSIONLESS, 1e-6, false),
    // SI derived
    ("Hz", "hertz", dims(0, 0, -1, 0, 0), 1.0, true),
    ("N", "newton", dims(1, 1, -2, 0, 0), 1.0, true),
    ("Pa", "pascal", dims(-1, 1, -2, 0, 0), 1.0, true),
    ("J", "joule", dims(2, 1, -2, 0, 0), 1.0, true),
    ("W", "watt", dims(2, 1, -3, 0, 0), 1.0, true),
    ("C", "coulomb", dims(0, 0, 1, 0, 1), 1.0, true),
    ("V", "volt", dims(2, 1, -3, 0, -1), 1.0, true),
    ("Ω", "ohm", dims(2, 1, -3, 0, -2), 1.0, true),
    ("Nm", "newton_meter", dims(2, 1, -2, 0, 0), 1.0, false),
    ("lx", "lux", UnitDimensions::new(-2, 0, 0, 0, 0, 0, 1), 1.0, true),
    // Time
    ("min", "minute", UnitDimensions::TIME, 60.0, false),
    ("hr", "hour", UnitDimensions::TIME, 3_600.0, false),
    ("day", "day", UnitDimensions::TIME, 86_400.0, false),
    ("week", "week", UnitDimensions::TIME, 604_800.0, false),
    // Temperature scales (offsets are irrelevant for dimensional checks)
    ("degC", "degree_Celsius", UnitDimensions::TEMPERATURE, 1.0, false),
    ("degF", "degree_Fahrenheit", UnitDimensions::TEMPERATURE, 5.0 / 9.0, false),
    // Volume and pressure
    ("l", "liter", dims(3, 0, 0, 0, 0), 1e-3, true),
    ("bar", "bar", dims(-1, 1, -2, 0, 0), 1e5, true),
    ("psi", "pound_force_per_square_inch", dims(-1, 1, -2, 0, 0), 6_894.757_293_168, false),
    // Energy, charge and power
    ("Wh", "watt_hour", dims(2, 1, -2, 0, 0), 3_600.0, true),
    ("Ah", "ampere_hour", dims(0, 0, 1, 0, 1), 3_600.0, true),
    ("hp", "horsepower", dims(2, 1, -3, 0, 0), 745.699_871_582_270_2, false),
    ("PS", "metric_horsepower", dims(2, 1, -3, 0, 0), 735.498_75, false),
    // Imperial
    ("in", "inch", UnitDimensions::LENGTH, 0.0254, false),
    ("ft", "foot", UnitDimensions::LENGTH, 0.3048, false),
    ("mi", "mile", UnitDimensions::LENGTH, 1_609.344, false),
    ("lb", "pound", UnitDimensions::MASS, 0.453_592_37, false),
    ("gal", "gallon", dims(3, 0, 0, 0, 0), 3.785_411_784e-3, false),
    ("mph", "mile_per_hour", dims(1, 0, -1, 0, 0), 0.447_04, false),
    // Rotation
    ("rpm", "revolutions_per_minute", dims(0, 0, -1, 0, 0), 1.0 / 60.0, false),
];

/// alias → existing symbol or long name
const STANDARD_ALIASES: &[(&str, &str)] = &[
    ("L", "l"),
    ("litre", "liter"),
    ("metre", "meter"),
    ("°", "deg"),
    ("celsius", "degC"),
    ("°C", "degC"),
    ("fahrenheit", "degF"),
    ("°F", "degF"),
    ("ohm", "Ω"),
    ("inches", "inch"),
    ("feet", "foot"),
];
