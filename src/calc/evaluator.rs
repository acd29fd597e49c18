use crate::calc::parser::{parse_expression, Expression, Operator};
use crate::quantity::Quantity;
use crate::units::Result;

impl Expression {
    /// Fold the operand chain left to right
    pub fn evaluate(&self) -> Result<Quantity> {
        self.rest
            .iter()
            .try_fold(self.first.clone(), |acc, (op, operand)| match op {
                Operator::Multiply => acc.try_mul(operand),
                Operator::Divide => acc.try_div(operand),
            })
    }
}

/// Parse and evaluate an expression in one step
pub fn evaluate(input: &str) -> Result<Quantity> {
    let expr = parse_expression(input)?;
    let result = expr.evaluate()?;
    log::debug!("Evaluated '{}' to {}", input.trim(), result);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_associative() {
        // (8 m / 2 s) / 2 s, not 8 m / (2 s / 2 s)
        let q = evaluate("8 m / 2 s / 2 s").unwrap();
        assert_eq!(q.magnitude(), 2.0);
        assert_eq!(q.units().to_string(), "m s^-2");
    }

    #[test]
    fn test_single_operand_is_identity() {
        let q = evaluate("4.5 kg").unwrap();
        assert_eq!(q.to_string(), "4.5 kg");
    }

    #[test]
    fn test_parse_error_propagates() {
        assert!(evaluate("1 m^x * 2 s").is_err());
        assert!(evaluate("1 m^2147483647 * 1 m").is_err());
    }

    #[test]
    fn test_exponent_overflow_stops_the_fold() {
        let huge = Quantity::from_parts(
            1.0,
            crate::units::UnitExpression::parse("m^1000")
                .unwrap()
                .powi(2_000_000),
        );
        let expr = Expression {
            first: huge.clone(),
            rest: vec![(Operator::Multiply, huge)],
        };
        assert!(matches!(
            expr.evaluate(),
            Err(crate::units::UnitError::ExponentOverflow(_))
        ));
    }
}
