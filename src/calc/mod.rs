pub mod evaluator;
pub mod formatter;
pub mod parser;


pub use evaluator::*;
pub use formatter::*;
pub use parser::*;
