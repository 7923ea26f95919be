//! Property tests: derived bounds, clamping and name forms.

use proptest::prelude::*;
use serde_json::{json, Map, Value};
use vss::{find_signal, Datatype, Numeric, Resolver, Signal, SignalError, UnitRegistry};

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

fn arb_numeric_datatype() -> impl Strategy<Value = Datatype> {
    prop::sample::select(
        Datatype::ALL
            .into_iter()
            .filter(Datatype::is_numeric)
            .collect::<Vec<_>>(),
    )
}

/// An optional author bound: absent, an integer, or a float.
fn arb_bound() -> impl Strategy<Value = Option<Value>> {
    prop_oneof![
        Just(None),
        any::<i64>().prop_map(|v| Some(json!(v))),
        any::<u64>().prop_map(|v| Some(json!(v))),
        (-1e40f64..1e40).prop_map(|v| Some(json!(v))),
        (-300.0f64..300.0).prop_map(|v| Some(json!(v))),
    ]
}

fn arb_input() -> impl Strategy<Value = Numeric> {
    prop_oneof![
        any::<i64>().prop_map(Numeric::from),
        any::<u64>().prop_map(Numeric::from),
        any::<f64>()
            .prop_filter("not NaN", |f| !f.is_nan())
            .prop_map(Numeric::Float),
    ]
}

fn build(datatype: Datatype, min: Option<Value>, max: Option<Value>) -> Result<Signal, SignalError> {
    let mut fields = Map::new();
    fields.insert("datatype".into(), json!(datatype.as_str()));
    fields.insert("description".into(), json!("generated"));
    fields.insert("type".into(), json!("sensor"));
    fields.insert("uuid".into(), json!("0"));
    if let Some(min) = min {
        fields.insert("min".into(), min);
    }
    if let Some(max) = max {
        fields.insert("max".into(), max);
    }
    Signal::from_fields(vec!["Vehicle".into(), "Generated".into()], &fields, UnitRegistry::global())
}

const CATALOG_NAMES: &[&str] = &[
    "Vehicle.AverageSpeed",
    "Vehicle.Speed",
    "Vehicle.Cabin.HVAC",
    "Vehicle.Cabin.HVAC.Station.Row3.Left.Temperature",
    "Vehicle.Cabin.Lights.Spotlight",
    "Vehicle.Cabin.Lights.Spotlight.Row7.IsSharedOn",
    "Vehicle.Chassis.Axle.Row2.Wheel.Right.Speed",
    "Vehicle.Powertrain.Transmission.Gear",
    "Vehicle.OBD.Status.DTCCount",
    "Body.Trunk",
];

fn arb_name() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(CATALOG_NAMES).prop_map(str::to_string),
        prop::collection::vec("[A-Za-z0-9]{1,8}", 1..6).prop_map(|s| format!("Vehicle.{}", s.join("."))),
    ]
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// Derived bounds never leave the datatype's representable range.
    #[test]
    fn bounds_within_natural_range(
        datatype in arb_numeric_datatype(),
        min in arb_bound(),
        max in arb_bound(),
    ) {
        let signal = match build(datatype, min, max) {
            Ok(signal) => signal,
            Err(SignalError::InvertedBounds { .. }) => return Ok(()),
            Err(e) => return Err(TestCaseError::fail(e.to_string())),
        };
        let (low, high) = datatype.natural_bounds().unwrap();
        let (min, max) = (signal.min().unwrap(), signal.max().unwrap());

        prop_assert!(low <= min, "{} < {}", min, low);
        prop_assert!(max <= high, "{} > {}", max, high);
        prop_assert!(min <= max);
    }

    /// Clamping lands inside [min, max] and clamping again changes nothing.
    #[test]
    fn clamp_is_bounded_and_idempotent(
        datatype in arb_numeric_datatype(),
        min in arb_bound(),
        max in arb_bound(),
        input in arb_input(),
    ) {
        let Ok(signal) = build(datatype, min, max) else {
            return Ok(());
        };
        let once = signal.clamp(input).unwrap();
        let twice = signal.clamp(once).unwrap();

        prop_assert!(signal.min().unwrap() <= once);
        prop_assert!(once <= signal.max().unwrap());
        prop_assert_eq!(once, twice);
    }

    /// A dotted name and its segments resolve to the same outcome.
    #[test]
    fn string_and_sequence_forms_agree(name in arb_name()) {
        let segments: Vec<String> = name.split('.').map(str::to_string).collect();
        match (find_signal(name.as_str()), find_signal(segments)) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(a), Err(b)) => {
                prop_assert_eq!(a.kind(), b.kind());
                prop_assert_eq!(a.to_string(), b.to_string());
            }
            (a, b) => prop_assert!(false, "diverged: {:?} vs {:?}", a.is_ok(), b.is_ok()),
        }
    }

    /// Resolution never mutates the tree, whether it succeeds or not.
    #[test]
    fn resolution_leaves_tree_untouched(names in prop::collection::vec(arb_name(), 1..8)) {
        let tree = vss_tree::load_default_tree().unwrap();
        let before = tree.clone();
        let resolver = Resolver::new(&tree, UnitRegistry::global());
        for name in &names {
            let _ = resolver.resolve(name);
        }
        prop_assert_eq!(tree, before);
    }
}
