//! Property tests: unit expressions keep their dimensions and scale through
//! display and re-parsing, and powers compose.

use proptest::prelude::*;
use vss_units::{Unit, UnitRegistry};

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

/// Symbols whose long names are also registered.
fn arb_symbol() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("m"),
        Just("s"),
        Just("km"),
        Just("kg"),
        Just("A"),
        Just("K"),
        Just("h"),
        Just("kPa"),
        Just("N"),
        Just("W"),
        Just("ppm"),
    ]
}

/// A unit expression such as `km / h ^ 2 * A`.
fn arb_expression() -> impl Strategy<Value = String> {
    (
        arb_symbol(),
        prop::collection::vec((prop_oneof![Just("*"), Just("/")], arb_symbol(), 1i8..4), 0..5),
    )
        .prop_map(|(first, rest)| {
            let mut expr = first.to_string();
            for (op, symbol, exponent) in rest {
                expr.push_str(&format!(" {} {}^{}", op, symbol, exponent));
            }
            expr
        })
}

fn same_unit(a: &Unit, b: &Unit) -> bool {
    a.dims() == b.dims() && (a.scale() - b.scale()).abs() <= 1e-9 * a.scale().abs().max(1.0)
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The long display form parses back to the same unit.
    #[test]
    fn display_round_trips(expr in arb_expression()) {
        let reg = UnitRegistry::vss();
        let unit = reg.parse(&expr).unwrap();

        let long = reg.parse(&unit.to_string()).unwrap();
        prop_assert!(same_unit(&unit, &long), "{} -> {}", expr, unit);

        let short = reg.parse(&unit.symbol()).unwrap();
        prop_assert!(same_unit(&unit, &short), "{} -> {}", expr, unit.symbol());
    }

    /// `u^a * u^b` equals `u^(a + b)`.
    #[test]
    fn powers_compose(symbol in arb_symbol(), a in -20i8..20, b in -20i8..20) {
        let reg = UnitRegistry::vss();
        let unit = reg.parse(symbol).unwrap();

        let product = unit.pow(a).unwrap().multiply(&unit.pow(b).unwrap()).unwrap();
        let combined = unit.pow(a + b).unwrap();
        prop_assert_eq!(product.dims(), combined.dims());
        prop_assert_eq!(product.terms(), combined.terms());
    }

    /// A quotient by itself is dimensionless.
    #[test]
    fn self_quotient_is_dimensionless(expr in arb_expression()) {
        let reg = UnitRegistry::vss();
        let unit = reg.parse(&format!("({}) / ({})", expr, expr)).unwrap();
        prop_assert!(unit.is_dimensionless());
        prop_assert_eq!(unit.to_string(), "dimensionless");
    }
}
