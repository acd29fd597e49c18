use crate::units::error::{Result, UnitError};
use crate::units::expression::{UnitExpression, MAX_EXPONENT};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// One factor of a unit string: alphabetic symbol, optional `^` and signed integer
    /// Examples: "m", "cm^-3", "s^+2", "cP"
    static ref TOKEN_PATTERN: Regex = Regex::new(
        r"^(?P<symbol>[^\W\d_]+)(?:\^(?P<exponent>[+-]?\d+))?$"
    ).unwrap();

    static ref SYMBOL_PATTERN: Regex = Regex::new(r"^[^\W\d_]+$").unwrap();
}

/// Token accepted as an explicit dimensionless unit string
pub const DIMENSIONLESS_TOKEN: &str = "1";

/// Parse a whitespace-separated unit string (e.g. "g cm^-3") into a UnitExpression
///
/// Repeated symbols accumulate: "m m^2" is "m^3".
pub fn parse_unit_string(input: &str) -> Result<UnitExpression> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UnitError::parse(input, "unit string is empty"));
    }
    if trimmed == DIMENSIONLESS_TOKEN {
        return Ok(UnitExpression::dimensionless());
    }

    let mut expr = UnitExpression::dimensionless();
    for token in trimmed.split_whitespace() {
        let (symbol, exponent) = parse_token(input, token)?;
        expr.try_accumulate(symbol, exponent).ok_or_else(|| {
            UnitError::parse(input, format!("exponent of '{}' overflows", symbol))
        })?;
    }

    match expr.exponent_limit_violation() {
        Some(reason) => Err(UnitError::parse(input, reason)),
        None => Ok(expr),
    }
}

/// Whether `s` is a bare unit symbol: one or more letters, nothing else
pub(crate) fn is_unit_symbol(s: &str) -> bool {
    SYMBOL_PATTERN.is_match(s)
}

fn parse_token<'a>(input: &str, token: &'a str) -> Result<(&'a str, i32)> {
    let captures = TOKEN_PATTERN
        .captures(token)
        .ok_or_else(|| UnitError::parse(input, describe_bad_token(token)))?;

    let symbol = captures
        .name("symbol")
        .map(|m| m.as_str())
        .ok_or_else(|| UnitError::parse(input, describe_bad_token(token)))?;
    let exponent = match captures.name("exponent") {
        Some(m) => m.as_str().parse::<i32>().map_err(|e| {
            UnitError::parse(input, format!("exponent in '{}' out of range: {}", token, e))
        })?,
        None => 1,
    };
    if exponent.unsigned_abs() > MAX_EXPONENT.unsigned_abs() {
        return Err(UnitError::parse(
            input,
            format!(
                "exponent in '{}' out of range: limit is {}",
                token, MAX_EXPONENT
            ),
        ));
    }

    Ok((symbol, exponent))
}

fn describe_bad_token(token: &str) -> String {
    let symbol = token.split_once('^').map_or(token, |(symbol, _)| symbol);
    if symbol.is_empty() {
        format!("token '{}' has no unit symbol", token)
    } else if !symbol.chars().all(char::is_alphabetic) {
        format!("unit symbol in '{}' must be alphabetic", token)
    } else {
        format!("exponent in '{}' must be a signed integer", token)
    }
}
