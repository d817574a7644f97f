//! Economic parameter set shared by every industry in a network.

use serde::{Deserialize, Serialize};

/// Structural parameters of the firm-level production economy.
///
/// Instances are plain immutable values; merge caller overrides by
/// constructing a new value with struct-update syntax. The capital price
/// `rho` is always derived through [`EconParams::rho`] and never stored, so
/// it cannot drift out of sync with `beta` and `delta`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EconParams {
    /// Intertemporal discount parameter, in (0, 1).
    #[serde(default = "default_beta")]
    pub beta: f64,
    /// Capital depreciation rate.
    #[serde(default = "default_delta")]
    pub delta: f64,
    /// Capital elasticity of production.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Combined factor elasticity; `gamma - alpha` is the labour share.
    ///
    /// Must differ from 1, and `gamma - alpha` must differ from 1: both
    /// appear in denominators of the closed-form factor demands. This is a
    /// caller contract, violations surface as non-finite outputs.
    #[serde(default = "default_gamma")]
    pub gamma: f64,
    /// Per-step firm exit rate, in [0, 1].
    #[serde(default = "default_lambda")]
    pub lambda: f64,
}

fn default_beta() -> f64 {
    0.99
}

fn default_delta() -> f64 {
    0.05
}

fn default_alpha() -> f64 {
    0.5
}

fn default_gamma() -> f64 {
    0.6
}

fn default_lambda() -> f64 {
    0.1
}

impl Default for EconParams {
    fn default() -> Self {
        Self {
            beta: default_beta(),
            delta: default_delta(),
            alpha: default_alpha(),
            gamma: default_gamma(),
            lambda: default_lambda(),
        }
    }
}

impl EconParams {
    /// Capital rental price implied by `beta` and `delta`.
    pub fn rho(&self) -> f64 {
        (1.0 - self.beta) / self.beta + self.delta
    }
}
