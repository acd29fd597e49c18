//! Physical quantities: a magnitude paired with a unit expression.
//!
//! Multiplication and division compose units. The `*` and `/` operators panic
//! if a unit exponent overflows `i32`; [`Quantity::try_mul`] and
//! [`Quantity::try_div`] report [`UnitError::ExponentOverflow`] instead.
//! Comparison, addition and subtraction require structurally equal units and
//! report [`UnitError::IncompatibleUnits`] otherwise. `Quantity` has no `PartialEq`;
//! compare with [`Quantity::try_eq`] or [`Quantity::try_cmp`].

use crate::units::{parse_unit_string, to_base, Result, UnitError, UnitExpression, UnitRegistry};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Div, Mul, Neg};
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "QuantityRepr", into = "QuantityRepr")]
pub struct Quantity {
    magnitude: f64,
    units: UnitExpression,
}

/// Serialized form: `{ "magnitude": 1.1, "units": "cm^-3 g" }`
#[derive(Serialize, Deserialize)]
struct QuantityRepr {
    magnitude: f64,
    units: String,
}

impl Quantity {
    /// Parse `units` and pair it with `magnitude`
    pub fn new(magnitude: f64, units: &str) -> Result<Self> {
        Ok(Self {
            magnitude,
            units: parse_unit_string(units)?,
        })
    }

    pub fn from_parts(magnitude: f64, units: UnitExpression) -> Self {
        Self { magnitude, units }
    }

    pub fn dimensionless(magnitude: f64) -> Self {
        Self::from_parts(magnitude, UnitExpression::dimensionless())
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn units(&self) -> &UnitExpression {
        &self.units
    }

    pub fn is_dimensionless(&self) -> bool {
        self.units.is_dimensionless()
    }

    /// Round the magnitude to `ndigits` decimal places, keeping the units as they are
    ///
    /// Halves round away from zero. A negative `ndigits` rounds to tens, hundreds, ...
    pub fn round(&self, ndigits: i32) -> Self {
        Self::from_parts(round_to(self.magnitude, ndigits), self.units.clone())
    }

    /// # Panics
    ///
    /// Panics if a unit exponent overflows `i32`; see [`Quantity::try_powi`].
    pub fn powi(&self, n: i32) -> Self {
        Self::from_parts(self.magnitude.powi(n), self.units.powi(n))
    }

    pub fn try_powi(&self, n: i32) -> Result<Self> {
        let units = self
            .units
            .checked_powi(n)
            .ok_or_else(|| UnitError::ExponentOverflow(self.units.to_string()))?;
        Ok(Self::from_parts(self.magnitude.powi(n), units))
    }

    pub fn try_mul(&self, other: &Quantity) -> Result<Self> {
        let units = self
            .units
            .checked_multiply(&other.units)
            .ok_or_else(|| UnitError::ExponentOverflow(format!("{} * {}", self.units, other.units)))?;
        Ok(Self::from_parts(self.magnitude * other.magnitude, units))
    }

    pub fn try_div(&self, other: &Quantity) -> Result<Self> {
        let units = self
            .units
            .checked_divide(&other.units)
            .ok_or_else(|| UnitError::ExponentOverflow(format!("{} / {}", self.units, other.units)))?;
        Ok(Self::from_parts(self.magnitude / other.magnitude, units))
    }

    /// Express this quantity in SI base units using the default registry
    pub fn as_base(&self) -> Result<Self> {
        self.as_base_in(UnitRegistry::si())
    }

    pub fn as_base_in(&self, registry: &UnitRegistry) -> Result<Self> {
        let (base, scale) = to_base(&self.units, registry)?;
        Ok(Self::from_parts(self.magnitude * scale, base))
    }

    /// Re-express this quantity in `units`, which must reduce to the same base units
    pub fn convert_to(&self, units: &str) -> Result<Self> {
        self.convert_to_in(units, UnitRegistry::si())
    }

    pub fn convert_to_in(&self, units: &str, registry: &UnitRegistry) -> Result<Self> {
        let target = parse_unit_string(units)?;
        let (from_base, from_scale) = to_base(&self.units, registry)?;
        let (to_base_expr, to_scale) = to_base(&target, registry)?;
        if from_base != to_base_expr {
            return Err(UnitError::incompatible(&self.units, &target));
        }
        Ok(Self::from_parts(
            self.magnitude * from_scale / to_scale,
            target,
        ))
    }

    pub fn try_add(&self, other: &Quantity) -> Result<Self> {
        self.ensure_same_units(other)?;
        Ok(Self::from_parts(
            self.magnitude + other.magnitude,
            self.units.clone(),
        ))
    }

    pub fn try_sub(&self, other: &Quantity) -> Result<Self> {
        self.ensure_same_units(other)?;
        Ok(Self::from_parts(
            self.magnitude - other.magnitude,
            self.units.clone(),
        ))
    }

    pub fn try_eq(&self, other: &Quantity) -> Result<bool> {
        self.ensure_same_units(other)?;
        Ok(self.magnitude == other.magnitude)
    }

    /// Order two quantities with identical units; `Ok(None)` when a magnitude is NaN
    pub fn try_cmp(&self, other: &Quantity) -> Result<Option<Ordering>> {
        self.ensure_same_units(other)?;
        Ok(self.magnitude.partial_cmp(&other.magnitude))
    }

    fn ensure_same_units(&self, other: &Quantity) -> Result<()> {
        if self.units != other.units {
            return Err(UnitError::incompatible(&self.units, &other.units));
        }
        Ok(())
    }
}

fn round_to(value: f64, ndigits: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10_f64.powi(ndigits.saturating_abs());
    if ndigits >= 0 {
        // More digits than f64 carries: the value is already exact at that precision
        let rounded = (value * factor).round() / factor;
        if rounded.is_finite() {
            rounded
        } else {
            value
        }
    } else if factor.is_infinite() {
        // Every finite f64 is below half of 10^309
        0.0_f64.copysign(value)
    } else {
        (value / factor).round() * factor
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(precision) => write!(f, "{:.*}", precision, self.magnitude)?,
            None => write!(f, "{}", self.magnitude)?,
        }
        if !self.units.is_dimensionless() {
            write!(f, " {}", self.units)?;
        }
        Ok(())
    }
}

impl FromStr for Quantity {
    type Err = UnitError;

    /// Parse `"<number> <units>"`; a bare number is dimensionless
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let (number, units) = match trimmed.split_once(char::is_whitespace) {
            Some((number, units)) => (number, units.trim()),
            None => (trimmed, ""),
        };
        if number.is_empty() {
            return Err(UnitError::parse(s, "quantity is empty"));
        }
        let magnitude = number
            .parse::<f64>()
            .map_err(|_| UnitError::parse(s, format!("'{}' is not a number", number)))?;
        if units.is_empty() {
            Ok(Self::dimensionless(magnitude))
        } else {
            Self::new(magnitude, units)
        }
    }
}

impl TryFrom<QuantityRepr> for Quantity {
    type Error = UnitError;

    fn try_from(repr: QuantityRepr) -> Result<Self> {
        Self::new(repr.magnitude, &repr.units)
    }
}

impl From<Quantity> for QuantityRepr {
    fn from(q: Quantity) -> Self {
        Self {
            magnitude: q.magnitude,
            units: q.units.to_string(),
        }
    }
}

impl From<f64> for Quantity {
    fn from(magnitude: f64) -> Self {
        Self::dimensionless(magnitude)
    }
}

// Panics on unit exponent overflow; use `try_mul`/`try_div` to handle it
impl Mul<&Quantity> for &Quantity {
    type Output = Quantity;

    fn mul(self, rhs: &Quantity) -> Quantity {
        Quantity::from_parts(self.magnitude * rhs.magnitude, self.units.multiply(&rhs.units))
    }
}

impl Div<&Quantity> for &Quantity {
    type Output = Quantity;

    fn div(self, rhs: &Quantity) -> Quantity {
        Quantity::from_parts(self.magnitude / rhs.magnitude, self.units.divide(&rhs.units))
    }
}

impl Mul<f64> for &Quantity {
    type Output = Quantity;

    fn mul(self, rhs: f64) -> Quantity {
        Quantity::from_parts(self.magnitude * rhs, self.units.clone())
    }
}

impl Div<f64> for &Quantity {
    type Output = Quantity;

    fn div(self, rhs: f64) -> Quantity {
        Quantity::from_parts(self.magnitude / rhs, self.units.clone())
    }
}

impl Mul<&Quantity> for f64 {
    type Output = Quantity;

    fn mul(self, rhs: &Quantity) -> Quantity {
        rhs * self
    }
}

impl Div<&Quantity> for f64 {
    type Output = Quantity;

    fn div(self, rhs: &Quantity) -> Quantity {
        Quantity::from_parts(self / rhs.magnitude, rhs.units.invert())
    }
}

impl Neg for &Quantity {
    type Output = Quantity;

    fn neg(self) -> Quantity {
        Quantity::from_parts(-self.magnitude, self.units.clone())
    }
}

impl Neg for Quantity {
    type Output = Quantity;

    fn neg(self) -> Quantity {
        -&self
    }
}

// Owned operand combinations forward to the borrowed implementations
macro_rules! forward_binop {
    ($imp:ident, $method:ident) => {
        impl $imp<Quantity> for Quantity {
            type Output = Quantity;

            fn $method(self, rhs: Quantity) -> Quantity {
                (&self).$method(&rhs)
            }
        }

        impl $imp<&Quantity> for Quantity {
            type Output = Quantity;

            fn $method(self, rhs: &Quantity) -> Quantity {
                (&self).$method(rhs)
            }
        }

        impl $imp<Quantity> for &Quantity {
            type Output = Quantity;

            fn $method(self, rhs: Quantity) -> Quantity {
                self.$method(&rhs)
            }
        }

        impl $imp<f64> for Quantity {
            type Output = Quantity;

            fn $method(self, rhs: f64) -> Quantity {
                (&self).$method(rhs)
            }
        }

        impl $imp<Quantity> for f64 {
            type Output = Quantity;

            fn $method(self, rhs: Quantity) -> Quantity {
                self.$method(&rhs)
            }
        }
    };
}

forward_binop!(Mul, mul);
forward_binop!(Div, div);
