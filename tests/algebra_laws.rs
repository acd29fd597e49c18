use eunits::{Quantity, UnitExpression};
use proptest::prelude::*;

const SYMBOLS: [&str; 6] = ["g", "cm", "m", "s", "cP", "kg"];

fn unit_expression() -> impl Strategy<Value = UnitExpression> {
    prop::collection::vec((0..SYMBOLS.len(), -4i32..=4), 0..6).prop_map(|terms| {
        UnitExpression::from_terms(terms.into_iter().map(|(i, e)| (SYMBOLS[i], e)))
            .unwrap()
    })
}

proptest! {
    #[test]
    fn render_then_parse_round_trips(u in unit_expression()) {
        let rendered = u.to_string();
        let parsed = UnitExpression::parse(&rendered).unwrap();
        prop_assert_eq!(&parsed, &u);
        prop_assert_eq!(parsed.to_string(), rendered);
    }

    #[test]
    fn dimensionless_is_multiplicative_identity(u in unit_expression()) {
        prop_assert_eq!(u.multiply(&UnitExpression::dimensionless()), u.clone());
        prop_assert_eq!(UnitExpression::dimensionless().multiply(&u), u);
    }

    #[test]
    fn multiplying_by_inverse_is_dimensionless(u in unit_expression()) {
        prop_assert!(u.multiply(&u.invert()).is_dimensionless());
    }

    #[test]
    fn multiply_is_commutative_and_associative(
        a in unit_expression(),
        b in unit_expression(),
        c in unit_expression(),
    ) {
        prop_assert_eq!(a.multiply(&b), b.multiply(&a));
        prop_assert_eq!(a.multiply(&b).multiply(&c), a.multiply(&b.multiply(&c)));
    }

    #[test]
    fn divide_is_multiply_by_inverse(a in unit_expression(), b in unit_expression()) {
        prop_assert_eq!(a.divide(&b), a.multiply(&b.invert()));
    }

    #[test]
    fn no_term_has_zero_exponent(a in unit_expression(), b in unit_expression()) {
        for (_, exponent) in a.divide(&b).terms() {
            prop_assert_ne!(exponent, 0);
        }
    }

    #[test]
    fn as_base_is_idempotent(u in unit_expression(), magnitude in 0.001f64..1000.0) {
        let q = Quantity::from_parts(magnitude, u);
        let once = q.as_base().unwrap();
        let twice = once.as_base().unwrap();
        prop_assert_eq!(once.units(), twice.units());
        prop_assert_eq!(once.magnitude(), twice.magnitude());
    }
}
