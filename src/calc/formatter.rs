use crate::quantity::Quantity;

/// Render a quantity for display, with an optional fixed number of decimals
pub fn format_quantity(quantity: &Quantity, precision: Option<usize>) -> String {
    match precision {
        Some(p) => format!("{:.*}", p, quantity),
        None => quantity.to_string(),
    }
}

pub fn format_quantity_json(quantity: &Quantity) -> String {
    serde_json::to_string_pretty(quantity).unwrap_or_else(|_| quantity.to_string())
}
