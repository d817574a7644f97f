#![deny(missing_docs)]
#![doc = "Industry-level economics and population dynamics over a productivity/tax grid."]

pub mod distribution;
pub mod industry;

pub use distribution::{BivariatePareto, EntrantDistribution};
pub use industry::{Industry, IndustryConfig, SupplierLink, OUTPUT_CAPACITY};
