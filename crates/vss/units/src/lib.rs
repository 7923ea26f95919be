//! Unit parsing for the Vehicle Signal Specification
//!
//! VSS leaves carry a free-form unit string (`km/h`, `kPa`, `%`). This crate
//! turns those strings into a canonical [`Unit`] with SI dimensions, so the
//! signal model can check that string and boolean signals are dimensionless.
//!
//! # Example
//!
//! ```rust
//! use vss_units::UnitRegistry;
//!
//! let unit = UnitRegistry::global().parse("km/h").unwrap();
//! assert_eq!(unit.to_string(), "kilometer / hour");
//! assert!(!unit.is_dimensionless());
//! ```

#![deny(unsafe_code)]

pub mod dimensions;
pub mod error;
pub mod parser;
pub mod registry;
pub mod unit;

pub use dimensions::UnitDimensions;
pub use error::{UnitError, UnitResult};
pub use registry::{UnitParser, UnitRegistry};
pub use unit::{Unit, UnitTerm};
