use crate::quantity::Quantity;
use crate::units::{Result, UnitError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Multiply,
    Divide,
}

impl Operator {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "*" => Some(Operator::Multiply),
            "/" => Some(Operator::Divide),
            _ => None,
        }
    }
}

/// Left-associative chain of quantity operands: `a * b / c`
#[derive(Debug, Clone)]
pub struct Expression {
    pub first: Quantity,
    pub rest: Vec<(Operator, Quantity)>,
}

/// Parse an expression such as "1.1 g cm^-3 * 0.5 m s^-1 / 3 cP"
///
/// Operators must be standalone tokens separated from operands by whitespace.
pub fn parse_expression(input: &str) -> Result<Expression> {
    let mut operands: Vec<Vec<&str>> = vec![Vec::new()];
    let mut operators = Vec::new();

    for token in input.split_whitespace() {
        match Operator::from_token(token) {
            Some(op) => {
                if operands.last().map_or(true, |o| o.is_empty()) {
                    return Err(UnitError::parse(
                        input,
                        format!("operator '{}' is missing its left operand", token),
                    ));
                }
                operators.push(op);
                operands.push(Vec::new());
            }
            None => {
                if let Some(current) = operands.last_mut() {
                    current.push(token);
                }
            }
        }
    }

    if operands.iter().all(|o| o.is_empty()) {
        return Err(UnitError::parse(input, "expression is empty"));
    }
    if operands.last().map_or(true, |o| o.is_empty()) {
        return Err(UnitError::parse(input, "expression ends with an operator"));
    }

    let mut quantities = operands
        .iter()
        .map(|tokens| tokens.join(" ").parse::<Quantity>());

    let first = match quantities.next() {
        Some(q) => q?,
        None => return Err(UnitError::parse(input, "expression is empty")),
    };
    let mut rest = Vec::with_capacity(operators.len());
    for (op, q) in operators.into_iter().zip(quantities) {
        rest.push((op, q?));
    }

    Ok(Expression { first, rest })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_operand() {
        let expr = parse_expression("0.25 m").unwrap();
        assert_eq!(expr.first.to_string(), "0.25 m");
        assert!(expr.rest.is_empty());
    }

    #[test]
    fn test_parse_chain() {
        let expr = parse_expression("1.1 g cm^-3 * 0.5 m s^-1 / 3 cP").unwrap();
        assert_eq!(expr.first.to_string(), "1.1 cm^-3 g");
        assert_eq!(expr.rest.len(), 2);
        assert_eq!(expr.rest[0].0, Operator::Multiply);
        assert_eq!(expr.rest[0].1.to_string(), "0.5 m s^-1");
        assert_eq!(expr.rest[1].0, Operator::Divide);
        assert_eq!(expr.rest[1].1.to_string(), "3 cP");
    }

    #[test]
    fn test_parse_bare_numbers() {
        let expr = parse_expression("2 * 3 m").unwrap();
        assert!(expr.first.is_dimensionless());
        assert_eq!(expr.rest[0].1.to_string(), "3 m");
    }

    #[test]
    fn test_parse_errors() {
        for input in ["", "   ", "* 2 m", "2 m *", "2 m * / 3 s", "m * 2"] {
            assert!(
                matches!(parse_expression(input), Err(UnitError::Parse { .. })),
                "expected parse error for '{}'",
                input
            );
        }
    }
}
