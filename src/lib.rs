//! Physical quantities with unit arithmetic and SI normalization.
//!
//! ```
//! use eunits::Quantity;
//!
//! let density = Quantity::new(1.1, "g cm^-3")?;
//! let velocity = Quantity::new(0.5, "m s^-1")?;
//! let diameter = Quantity::new(0.25, "m")?;
//! let viscosity = Quantity::new(3.0, "cP")?;
//!
//! let re = density * velocity * diameter / viscosity;
//! let base = re.as_base()?;
//! assert!(base.is_dimensionless());
//! assert_eq!(format!("{:.3}", base), "45833.333");
//! # Ok::<(), eunits::UnitError>(())
//! ```

pub mod calc;
pub mod config;
pub mod quantity;
pub mod units;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use calc::{evaluate, parse_expression};
pub use config::Config;
pub use quantity::Quantity;
pub use units::{to_base, UnitDefinition, UnitError, UnitExpression, UnitRegistry};
