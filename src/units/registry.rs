// Registry of known unit symbols and their SI base definitions
// The default table is built once on first use and never mutated; custom
// registries are derived from it as new values.

use crate::units::error::{Result, UnitError};
use crate::units::expression::UnitExpression;
use crate::units::normalize::to_base;
use crate::units::parser::parse_unit_string;
use lazy_static::lazy_static;
use std::collections::HashMap;

/// Base expression and multiplicative scale of one registered symbol
#[derive(Debug, Clone, PartialEq)]
pub struct UnitDefinition {
    /// Equivalent product of SI base units
    pub base: UnitExpression,
    /// Magnitude of one unit expressed in `base`
    pub scale: f64,
}

/// Immutable lookup table from unit symbol to definition
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    units: HashMap<String, UnitDefinition>,
}

/// SI base symbols, each defined as itself with scale 1
pub const BASE_SYMBOLS: [&str; 7] = ["kg", "m", "s", "A", "K", "mol", "cd"];

type TableEntry = (&'static str, &'static [(&'static str, i32)], f64);

const KG: (&str, i32) = ("kg", 1);
const M: (&str, i32) = ("m", 1);

#[rustfmt::skip]
const SI_TABLE: &[TableEntry] = &[
    // mass
    ("g",   &[KG], 1e-3),
    ("mg",  &[KG], 1e-6),
    ("t",   &[KG], 1e3),
    ("lb",  &[KG], 0.453_592_37),
    // length
    ("km",  &[M], 1e3),
    ("cm",  &[M], 1e-2),
    ("mm",  &[M], 1e-3),
    ("um",  &[M], 1e-6),
    ("nm",  &[M], 1e-9),
    ("in",  &[M], 0.0254),
    ("ft",  &[M], 0.3048),
    ("yd",  &[M], 0.9144),
    ("mi",  &[M], 1609.344),
    // time
    ("ms",  &[("s", 1)], 1e-3),
    ("min", &[("s", 1)], 60.0),
    ("h",   &[("s", 1)], 3600.0),
    ("d",   &[("s", 1)], 86_400.0),
    ("Hz",  &[("s", -1)], 1.0),
    // volume
    ("L",   &[("m", 3)], 1e-3),
    ("mL",  &[("m", 3)], 1e-6),
    // force
    ("N",   &[KG, M, ("s", -2)], 1.0),
    ("kN",  &[KG, M, ("s", -2)], 1e3),
    ("dyn", &[KG, M, ("s", -2)], 1e-5),
    // pressure
    ("Pa",  &[KG, ("m", -1), ("s", -2)], 1.0),
    ("kPa", &[KG, ("m", -1), ("s", -2)], 1e3),
    ("MPa", &[KG, ("m", -1), ("s", -2)], 1e6),
    ("bar", &[KG, ("m", -1), ("s", -2)], 1e5),
    ("atm", &[KG, ("m", -1), ("s", -2)], 101_325.0),
    ("psi", &[KG, ("m", -1), ("s", -2)], 6_894.757_293_168),
    // energy and power
    ("J",   &[KG, ("m", 2), ("s", -2)], 1.0),
    ("kJ",  &[KG, ("m", 2), ("s", -2)], 1e3),
    ("cal", &[KG, ("m", 2), ("s", -2)], 4.184),
    ("kcal", &[KG, ("m", 2), ("s", -2)], 4184.0),
    ("W",   &[KG, ("m", 2), ("s", -3)], 1.0),
    ("kW",  &[KG, ("m", 2), ("s", -3)], 1e3),
    // dynamic viscosity
    ("P",   &[KG, ("m", -1), ("s", -1)], 0.1),
    ("cP",  &[KG, ("m", -1), ("s", -1)], 1e-3),
    // electromagnetic
    ("C",   &[("A", 1), ("s", 1)], 1.0),
    ("V",   &[KG, ("m", 2), ("s", -3), ("A", -1)], 1.0),
];

lazy_static! {
    static ref SI_REGISTRY: UnitRegistry = UnitRegistry::build_si();
}

impl UnitRegistry {
    /// Shared default SI registry
    pub fn si() -> &'static UnitRegistry {
        &SI_REGISTRY
    }

    fn build_si() -> Self {
        let mut units = HashMap::with_capacity(BASE_SYMBOLS.len() + SI_TABLE.len());
        for symbol in BASE_SYMBOLS {
            units.insert(
                symbol.to_string(),
                UnitDefinition {
                    base: UnitExpression::from_trusted_terms([(symbol, 1)]),
                    scale: 1.0,
                },
            );
        }
        for (symbol, base, scale) in SI_TABLE {
            units.insert(
                symbol.to_string(),
                UnitDefinition {
                    base: UnitExpression::from_trusted_terms(base.iter().copied()),
                    scale: *scale,
                },
            );
        }
        log::debug!("Initialized SI unit registry with {} symbols", units.len());
        Self { units }
    }

    /// Derive a new registry holding every unit of `self` plus `definitions`
    ///
    /// Each definition is `(symbol, base unit string, scale)`. The base string may
    /// use any symbol already known to `self` and is normalized before storing.
    /// Redefining an existing symbol is rejected.
    pub fn extend<'a, I>(&self, definitions: I) -> Result<UnitRegistry>
    where
        I: IntoIterator<Item = (&'a str, &'a str, f64)>,
    {
        let mut units = self.units.clone();
        for (symbol, base, scale) in definitions {
            let definition = self.define(symbol, base, scale)?;
            if units.contains_key(symbol) {
                return Err(invalid(symbol, "symbol is already defined"));
            }
            log::debug!(
                "Registered unit '{}' = {} {}",
                symbol,
                definition.scale,
                definition.base
            );
            units.insert(symbol.to_string(), definition);
        }
        Ok(Self { units })
    }

    fn define(&self, symbol: &str, base: &str, scale: f64) -> Result<UnitDefinition> {
        UnitExpression::symbol(symbol)
            .map_err(|_| invalid(symbol, "must be a single alphabetic symbol"))?;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(invalid(
                symbol,
                format!("scale must be a positive finite number, got {}", scale),
            ));
        }

        let base_expr = parse_unit_string(base).map_err(|e| invalid(symbol, e.to_string()))?;
        let (base_expr, base_scale) =
            to_base(&base_expr, self).map_err(|e| invalid(symbol, e.to_string()))?;

        Ok(UnitDefinition {
            base: base_expr,
            scale: scale * base_scale,
        })
    }

    pub fn get(&self, symbol: &str) -> Option<&UnitDefinition> {
        self.units.get(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.units.contains_key(symbol)
    }

    /// Registered symbols in lexicographic order
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.units.keys().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

fn invalid(symbol: &str, reason: impl Into<String>) -> UnitError {
    UnitError::InvalidDefinition {
        symbol: symbol.to_string(),
        reason: reason.into(),
    }
}
