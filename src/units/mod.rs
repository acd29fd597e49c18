// Unit expressions: parsing, algebra and normalization to SI base units

pub mod error;
pub mod expression;
pub mod normalize;
pub mod parser;
pub mod registry;

pub use error::{Result, UnitError};
pub use expression::{UnitExpression, MAX_EXPONENT};
pub use normalize::to_base;
pub use parser::parse_unit_string;
pub use registry::{UnitDefinition, UnitRegistry, BASE_SYMBOLS};
