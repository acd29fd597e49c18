use crate::units::error::{Result, UnitError};
use crate::units::parser::{is_unit_symbol, parse_unit_string};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Largest exponent magnitude accepted from unit strings and public constructors
///
/// Arithmetic may grow exponents past this bound; only `i32` overflow is an error there.
pub const MAX_EXPONENT: i32 = 1000;

/// Canonical product of unit symbols raised to integer exponents
///
/// Terms are kept sorted by symbol and never hold a zero exponent, so two
/// expressions describing the same product always compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UnitExpression {
    terms: BTreeMap<String, i32>,
}

impl UnitExpression {
    /// The empty product
    pub fn dimensionless() -> Self {
        Self::default()
    }

    /// A single alphabetic symbol with exponent 1
    pub fn symbol(symbol: &str) -> Result<Self> {
        Self::from_terms([(symbol, 1)])
    }

    /// Build from `(symbol, exponent)` pairs; repeated symbols accumulate
    ///
    /// Symbols must be alphabetic and every resulting exponent must lie within
    /// [`MAX_EXPONENT`], the same rules [`UnitExpression::parse`] applies.
    pub fn from_terms<'a, I>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, i32)>,
    {
        let mut expr = Self::default();
        for (symbol, exponent) in terms {
            if !is_unit_symbol(symbol) {
                return Err(UnitError::parse(symbol, "unit symbol must be alphabetic"));
            }
            expr.try_accumulate(symbol, exponent)
                .ok_or_else(|| UnitError::parse(symbol, "exponent overflows"))?;
        }
        match expr.exponent_limit_violation() {
            Some(reason) => Err(UnitError::parse(&expr.to_string(), reason)),
            None => Ok(expr),
        }
    }

    /// Terms from a trusted table: distinct valid symbols with small exponents
    pub(crate) fn from_trusted_terms<'a, I>(terms: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, i32)>,
    {
        let terms = terms
            .into_iter()
            .filter(|(_, exponent)| *exponent != 0)
            .map(|(symbol, exponent)| (symbol.to_string(), exponent))
            .collect();
        UnitExpression { terms }
    }

    /// Parse a unit string such as `"g cm^-3"`
    pub fn parse(input: &str) -> Result<Self> {
        parse_unit_string(input)
    }

    pub fn is_dimensionless(&self) -> bool {
        self.terms.is_empty()
    }

    /// Exponent of `symbol`, 0 when absent
    pub fn exponent(&self, symbol: &str) -> i32 {
        self.terms.get(symbol).copied().unwrap_or(0)
    }

    /// Terms in lexicographic symbol order
    pub fn terms(&self) -> impl Iterator<Item = (&str, i32)> {
        self.terms.iter().map(|(s, e)| (s.as_str(), *e))
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Product of two expressions, `None` if an exponent overflows `i32`
    pub fn checked_multiply(&self, other: &UnitExpression) -> Option<UnitExpression> {
        let mut result = self.clone();
        for (symbol, exponent) in other.terms() {
            result.try_accumulate(symbol, exponent)?;
        }
        Some(result)
    }

    pub fn checked_divide(&self, other: &UnitExpression) -> Option<UnitExpression> {
        self.checked_multiply(&other.checked_powi(-1)?)
    }

    /// Every term raised to `n`, `None` if an exponent overflows `i32`
    pub fn checked_powi(&self, n: i32) -> Option<UnitExpression> {
        if n == 0 {
            return Some(Self::dimensionless());
        }
        let mut terms = BTreeMap::new();
        for (symbol, exponent) in &self.terms {
            terms.insert(symbol.clone(), exponent.checked_mul(n)?);
        }
        Some(UnitExpression { terms })
    }

    /// # Panics
    ///
    /// Panics if a resulting exponent overflows `i32`; see [`Self::checked_multiply`].
    pub fn multiply(&self, other: &UnitExpression) -> UnitExpression {
        self.checked_multiply(other)
            .unwrap_or_else(|| panic!("exponent overflow in ({}) * ({})", self, other))
    }

    /// # Panics
    ///
    /// Panics if a resulting exponent overflows `i32`; see [`Self::checked_divide`].
    pub fn divide(&self, other: &UnitExpression) -> UnitExpression {
        self.checked_divide(other)
            .unwrap_or_else(|| panic!("exponent overflow in ({}) / ({})", self, other))
    }

    pub fn invert(&self) -> UnitExpression {
        self.powi(-1)
    }

    /// Raise every term to `n`; `n == 0` yields the dimensionless expression
    ///
    /// # Panics
    ///
    /// Panics if a resulting exponent overflows `i32`; see [`Self::checked_powi`].
    pub fn powi(&self, n: i32) -> UnitExpression {
        self.checked_powi(n)
            .unwrap_or_else(|| panic!("exponent overflow in ({})^{}", self, n))
    }

    pub(crate) fn try_accumulate(&mut self, symbol: &str, exponent: i32) -> Option<()> {
        if exponent == 0 {
            return Some(());
        }
        let total = self.exponent(symbol).checked_add(exponent)?;
        if total == 0 {
            self.terms.remove(symbol);
        } else {
            self.terms.insert(symbol.to_string(), total);
        }
        Some(())
    }

    /// Description of the first term whose exponent exceeds [`MAX_EXPONENT`]
    pub(crate) fn exponent_limit_violation(&self) -> Option<String> {
        self.terms()
            .find(|(_, e)| e.unsigned_abs() > MAX_EXPONENT.unsigned_abs())
            .map(|(symbol, exponent)| {
                format!(
                    "exponent {} of '{}' exceeds the limit of {}",
                    exponent, symbol, MAX_EXPONENT
                )
            })
    }
}

impl fmt::Display for UnitExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "1");
        }
        for (i, (symbol, exponent)) in self.terms().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            if exponent == 1 {
                write!(f, "{}", symbol)?;
            } else {
                write!(f, "{}^{}", symbol, exponent)?;
            }
        }
        Ok(())
    }
}

impl FromStr for UnitExpression {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self> {
        parse_unit_string(s)
    }
}
