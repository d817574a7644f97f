//! Random-network generation from a shared parameter set.

use rand::Rng;
use serde::{Deserialize, Serialize};

use trophic_core::errors::{ErrorInfo, ModelError};
use trophic_core::grid::Grid;
use trophic_core::params::EconParams;
use trophic_core::rng::RngHandle;
use trophic_core::IndustryId;
use trophic_model::{BivariatePareto, Industry, IndustryConfig};

use crate::network::Network;

/// Parameters shared by every industry a generator call produces.
///
/// Each generated industry differs only in its sampled `theta_two`; the
/// rest of the parameter set is common to the whole network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Productivity-axis support bound shared by every industry, also
    /// forwarded into each industry's entrant distribution.
    #[serde(default = "default_theta_one")]
    pub theta_one: f64,
    /// Labour overhead shared by every industry.
    #[serde(default = "default_overhead")]
    pub overhead: f64,
    /// Shape parameter of the bivariate Pareto entrant density.
    #[serde(default = "default_pareto_shape")]
    pub pareto_shape: f64,
    /// Wage shared by every industry.
    #[serde(default = "default_wage")]
    pub wage: f64,
    /// Entrant mass scale shared by every industry.
    #[serde(default = "default_entrant_scale")]
    pub entrant_scale: f64,
    /// Grid resolution per axis.
    #[serde(default = "default_grid_points")]
    pub grid_points: usize,
    /// Structural economic parameters.
    #[serde(default = "default_params")]
    pub params: EconParams,
}

fn default_theta_one() -> f64 {
    0.2
}

fn default_overhead() -> f64 {
    0.0
}

fn default_pareto_shape() -> f64 {
    3.0
}

fn default_wage() -> f64 {
    0.5
}

fn default_entrant_scale() -> f64 {
    1.0
}

fn default_grid_points() -> usize {
    100
}

fn default_params() -> EconParams {
    EconParams {
        beta: 0.95,
        lambda: 0.3,
        ..EconParams::default()
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            theta_one: default_theta_one(),
            overhead: default_overhead(),
            pareto_shape: default_pareto_shape(),
            wage: default_wage(),
            entrant_scale: default_entrant_scale(),
            grid_points: default_grid_points(),
            params: default_params(),
        }
    }
}

/// Builds `firms` industries and wires them into a [`Network`].
///
/// `theta_two` supplies each industry's tax-axis support bound; when absent
/// one is drawn per industry from U(0.2, 0.3). `deps` supplies the
/// dependency matrix; when absent a strictly lower-triangular matrix with
/// U(0, 1) entries below the diagonal is drawn, which is acyclic by
/// construction. An explicitly supplied matrix still goes through the full
/// structural validation of [`Network::new`].
pub fn generate_network(
    firms: usize,
    theta_two: Option<Vec<f64>>,
    deps: Option<Grid>,
    config: &GeneratorConfig,
    rng: &mut RngHandle,
) -> Result<Network, ModelError> {
    if firms == 0 {
        return Err(ModelError::Params(ErrorInfo::new(
            "no-firms",
            "a network needs at least one industry",
        )));
    }

    let theta_two = match theta_two {
        Some(values) => {
            if values.len() != firms {
                return Err(ModelError::Params(
                    ErrorInfo::new("theta-count", "one theta_two per industry is required")
                        .with_context("firms", firms.to_string())
                        .with_context("supplied", values.len().to_string()),
                ));
            }
            values
        }
        None => (0..firms).map(|_| rng.gen_range(0.2..0.3)).collect(),
    };

    let mut industries = Vec::with_capacity(firms);
    for (idx, &t2) in theta_two.iter().enumerate() {
        let sampling = BivariatePareto::new(config.pareto_shape, config.theta_one, t2)?;
        let industry_config = IndustryConfig {
            wage: config.wage,
            fixed_overhead: config.overhead,
            entrant_scale: config.entrant_scale,
            grid_points: config.grid_points,
            params: config.params,
        };
        industries.push(Industry::new(
            IndustryId::from_raw(idx),
            industry_config,
            &sampling,
        )?);
    }

    let deps = deps.unwrap_or_else(|| {
        Grid::from_fn(firms, firms, |row, col| {
            if col < row {
                rng.gen_range(0.0..1.0)
            } else {
                0.0
            }
        })
    });

    Network::new(industries, deps)
}
