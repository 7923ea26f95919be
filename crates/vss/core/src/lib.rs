//! Simple, safe lookup of Vehicle Signal Specification signals
//!
//! A VSS tree is a nested catalog of branches and typed signals. This crate
//! resolves a dotted name such as `Vehicle.Cabin.HVAC.Station.Row1.Left.FanSpeed`
//! against a tree, matching instance segments (`Row1`, `Left`) along the way,
//! and validates the leaf it lands on into a [`Signal`].
//!
//! # Example
//!
//! ```rust
//! use vss::{find_signal, Datatype, Numeric};
//!
//! let speed = find_signal("Vehicle.AverageSpeed").unwrap();
//! assert_eq!(speed.datatype(), Datatype::Int32);
//! assert_eq!(speed.canonical_unit().to_string(), "kilometer / hour");
//! assert_eq!(speed.clamp(900i64).unwrap(), Numeric::Integer(250));
//!
//! let err = find_signal("Vehicle.Cabin.HVAC").unwrap_err();
//! assert_eq!(err.kind(), vss::ErrorKind::Branch);
//! ```
//!
//! Custom trees and unit registries are passed through a [`Resolver`].

#![deny(unsafe_code)]

pub mod config;
pub mod datatype;
pub mod error;
pub mod instances;
pub mod namespace;
pub mod node;
pub mod resolver;
pub mod signal;

pub use config::{UnitDefinition, UnitsConfig, VssConfig};
pub use datatype::{Datatype, DefaultValue, Family, Numeric, SignalType};
pub use error::{
    ConfigError, ConfigResult, ErrorKind, NamespaceError, SignalError, SignalResult, VssError,
    VssResult,
};
pub use instances::{consume, expand_range, parse_instances, InstanceName, InstanceRange, InstanceSpec};
pub use namespace::{IntoNamespace, Namespace};
pub use node::Node;
pub use resolver::{find_signal, resolve_value, Resolver};
pub use signal::{RawSignal, Signal, DIMENSIONLESS};

pub use vss_tree::VssTree;
pub use vss_units::{Unit, UnitParser, UnitRegistry};
