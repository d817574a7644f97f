#![deny(missing_docs)]
#![doc = "Core types shared by the trophic production-network crates."]

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod grid;
pub mod params;
pub mod rng;

pub use errors::{ErrorInfo, ModelError};
pub use grid::{linspace, Grid};
pub use params::EconParams;
pub use rng::{derive_substream_seed, RngHandle};

/// Identifier for an industry within a network.
///
/// Identifiers are caller-assigned and must be unique within a network;
/// they carry no positional meaning on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IndustryId(usize);

impl IndustryId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> usize {
        self.0
    }
}
