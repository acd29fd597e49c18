use crate::units::error::{Result, UnitError};
use crate::units::expression::UnitExpression;
use crate::units::registry::UnitRegistry;

/// Reduce `expr` to SI base units using `registry`
///
/// Returns the base expression together with the factor that converts a
/// magnitude in `expr` into a magnitude in the base expression. Fails on the
/// first symbol the registry does not know.
pub fn to_base(expr: &UnitExpression, registry: &UnitRegistry) -> Result<(UnitExpression, f64)> {
    let mut base = UnitExpression::dimensionless();
    let mut scale = 1.0_f64;

    for (symbol, exponent) in expr.terms() {
        let definition = registry
            .get(symbol)
            .ok_or_else(|| UnitError::UnknownUnit(symbol.to_string()))?;
        let overflow = || UnitError::ExponentOverflow(symbol.to_string());
        let term = definition.base.checked_powi(exponent).ok_or_else(overflow)?;
        base = base.checked_multiply(&term).ok_or_else(overflow)?;
        scale *= definition.scale.powi(exponent);
    }

    log::trace!("Normalized '{}' to {} '{}'", expr, scale, base);
    Ok((base, scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn base_of(s: &str) -> (String, f64) {
        let expr = UnitExpression::parse(s).unwrap();
        let (base, scale) = to_base(&expr, UnitRegistry::si()).unwrap();
        (base.to_string(), scale)
    }

    #[test]
    fn test_density_to_base() {
        let (base, scale) = base_of("g cm^-3");
        assert_eq!(base, "kg m^-3");
        assert_relative_eq!(scale, 1000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_derived_units_combine() {
        // Pa s is the SI unit of dynamic viscosity
        let (base, scale) = base_of("Pa s");
        assert_eq!(base, "kg m^-1 s^-1");
        assert_eq!(scale, 1.0);

        let (base, scale) = base_of("kN m");
        assert_eq!(base, "kg m^2 s^-2");
        assert_relative_eq!(scale, 1000.0);

        let (base, scale) = base_of("cP Pa^-1");
        assert_eq!(base, "s");
        assert_relative_eq!(scale, 1e-3);
    }

    #[test]
    fn test_base_units_are_fixed_points() {
        let (base, scale) = base_of("kg m^-1 s^-2");
        assert_eq!(base, "kg m^-1 s^-2");
        assert_eq!(scale, 1.0);
    }

    #[test]
    fn test_dimensionless_to_base() {
        let (base, scale) = to_base(&UnitExpression::dimensionless(), UnitRegistry::si()).unwrap();
        assert!(base.is_dimensionless());
        assert_eq!(scale, 1.0);
    }

    #[test]
    fn test_exponent_overflow_is_an_error() {
        // N^-1100000000 fits in i32, its s^-2 term raised to it does not
        let expr = UnitExpression::parse("N^-1000").unwrap().powi(1_100_000);
        let err = to_base(&expr, UnitRegistry::si()).unwrap_err();
        assert_eq!(err, UnitError::ExponentOverflow("N".to_string()));
    }

    #[test]
    fn test_exponent_limit_survives_normalization() {
        let (base, _) = base_of("N^-1000");
        assert_eq!(base.to_string(), "kg^-1000 m^-1000 s^2000");
    }

    #[test]
    fn test_unknown_unit() {
        let expr = UnitExpression::parse("m zz^2").unwrap();
        let err = to_base(&expr, UnitRegistry::si()).unwrap_err();
        assert_eq!(err, UnitError::UnknownUnit("zz".to_string()));
    }
}
