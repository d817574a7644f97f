#![deny(missing_docs)]
#![doc = "Network assembly over industries: dependency wiring, trophic structure, generation."]

mod generator;
mod network;
mod trophic;

pub use generator::{generate_network, GeneratorConfig};
pub use network::Network;
pub use trophic::{trophic_incoherence, trophic_levels};
