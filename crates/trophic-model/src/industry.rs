//! The industry state machine: firm-level economics evaluated on a dense
//! (productivity, tax) grid, plus entry/exit population dynamics.

use std::fmt;

use serde::{Deserialize, Serialize};

use trophic_core::errors::{ErrorInfo, ModelError};
use trophic_core::grid::{linspace, Grid};
use trophic_core::params::EconParams;
use trophic_core::IndustryId;

use crate::distribution::EntrantDistribution;

/// Fixed capacity constant against which realized output is normalized.
///
/// The value is a modeling choice shared with downstream shock-magnitude
/// analysis and must not change.
pub const OUTPUT_CAPACITY: f64 = 10_000.0;

/// Construction parameters for an [`Industry`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndustryConfig {
    /// Price of one unit of labour.
    #[serde(default = "default_wage")]
    pub wage: f64,
    /// Labour overhead subtracted before the labour-elasticity exponent.
    #[serde(default = "default_overhead")]
    pub fixed_overhead: f64,
    /// Scale factor applied to entrant mass each step.
    #[serde(default = "default_entrant_scale")]
    pub entrant_scale: f64,
    /// Number of coordinates per grid axis.
    #[serde(default = "default_grid_points")]
    pub grid_points: usize,
    /// Structural economic parameters.
    #[serde(default)]
    pub params: EconParams,
}

fn default_wage() -> f64 {
    0.5
}

fn default_overhead() -> f64 {
    0.5
}

fn default_entrant_scale() -> f64 {
    1.0
}

fn default_grid_points() -> usize {
    100
}

impl Default for IndustryConfig {
    fn default() -> Self {
        Self {
            wage: default_wage(),
            fixed_overhead: default_overhead(),
            entrant_scale: default_entrant_scale(),
            grid_points: default_grid_points(),
            params: EconParams::default(),
        }
    }
}

/// One upstream input dependency of an industry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupplierLink {
    /// Identifier of the upstream industry.
    pub supplier: IndustryId,
    /// Fraction of this industry's cost structure exposed to the
    /// supplier's shortfall, in [0, 1].
    pub weight: f64,
}

/// A representative-agent model of a population of firms.
///
/// The state is a mass distribution over the Cartesian product
/// `space x space`, where the row index runs over the tax axis and the
/// column index over the productivity axis. History is append-only: one
/// grid per time step, starting from an all-zero distribution at `t = 0`.
pub struct Industry {
    id: IndustryId,
    wage: f64,
    fixed_overhead: f64,
    entrant_scale: f64,
    params: EconParams,
    space: Vec<f64>,
    density: Grid,
    mus: Vec<Grid>,
    t: usize,
    suppliers: Vec<SupplierLink>,
    fixed_costs: f64,
}

impl fmt::Debug for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Industry")
            .field("id", &self.id)
            .field("t", &self.t)
            .field("grid_points", &self.space.len())
            .field("suppliers", &self.suppliers.len())
            .finish_non_exhaustive()
    }
}

impl Industry {
    /// Creates an industry with an all-zero initial state.
    ///
    /// The grid spans `max(theta_one, theta_two)` to 1 inclusive, with
    /// `grid_points` coordinates per axis. The entrant density over the
    /// grid is fixed for the industry's lifetime, so it is evaluated once
    /// here and reused by every step; the distribution itself is not
    /// retained.
    pub fn new(
        id: IndustryId,
        config: IndustryConfig,
        sampling: &dyn EntrantDistribution,
    ) -> Result<Self, ModelError> {
        let n = config.grid_points;
        if n < 2 {
            return Err(ModelError::Params(
                ErrorInfo::new("grid-points", "industry grid needs at least two points per axis")
                    .with_context("grid_points", n.to_string()),
            ));
        }
        let lower_bounds = sampling.theta_one().max(sampling.theta_two());
        let space = linspace(lower_bounds, 1.0, n);
        let density = Grid::from_fn(n, n, |row, col| sampling.pdf(space[col], space[row]));

        Ok(Self {
            id,
            wage: config.wage,
            fixed_overhead: config.fixed_overhead,
            entrant_scale: config.entrant_scale,
            params: config.params,
            space,
            density,
            mus: vec![Grid::zeros(n, n)],
            t: 0,
            suppliers: Vec::new(),
            fixed_costs: 0.0,
        })
    }

    /// Caller-assigned identifier.
    pub fn id(&self) -> IndustryId {
        self.id
    }

    /// The shared axis coordinates, from the support lower bound to 1.
    pub fn space(&self) -> &[f64] {
        &self.space
    }

    /// Current time index; starts at 0 and grows by one per [`step`](Self::step).
    pub fn time(&self) -> usize {
        self.t
    }

    /// Current mass distribution.
    pub fn mu(&self) -> &Grid {
        &self.mus[self.t]
    }

    /// Full state history, one grid per time index.
    pub fn mus(&self) -> &[Grid] {
        &self.mus
    }

    /// Upstream dependencies in insertion order.
    pub fn suppliers(&self) -> &[SupplierLink] {
        &self.suppliers
    }

    /// Entrant density evaluated on the grid.
    pub fn entrant_density(&self) -> &Grid {
        &self.density
    }

    /// Economic parameter set.
    pub fn params(&self) -> &EconParams {
        &self.params
    }

    /// True iff this industry has no suppliers, i.e. it is a root of the
    /// dependency graph.
    pub fn is_source(&self) -> bool {
        self.suppliers.is_empty()
    }

    /// Upstream cost pressure currently in force.
    ///
    /// Starts at zero and is refreshed from a settled snapshot of supplier
    /// output gaps before each network tick; see [`supplier_cost`](Self::supplier_cost).
    pub fn fixed_costs(&self) -> f64 {
        self.fixed_costs
    }

    /// Installs the upstream cost pressure for the coming tick.
    pub fn set_fixed_costs(&mut self, fixed_costs: f64) {
        self.fixed_costs = fixed_costs;
    }

    /// Cost pressure implied by a snapshot of supplier output gaps.
    ///
    /// A supplier producing below its capacity baseline (gap below 1)
    /// contributes `(1 - gap) * weight`; a supplier at or above baseline
    /// contributes nothing. `gap_of` must resolve every supplier recorded
    /// on this industry.
    pub fn supplier_cost(&self, gap_of: impl Fn(IndustryId) -> f64) -> f64 {
        self.suppliers
            .iter()
            .map(|link| (1.0 - gap_of(link.supplier)).max(0.0) * link.weight)
            .sum()
    }

    /// Effective discount factor: survival probability over net return.
    pub fn discount(&self) -> f64 {
        let net_return = self.params.rho() - self.params.delta;
        (1.0 - self.params.lambda) / (1.0 - net_return)
    }

    /// Profit-maximizing (capital, labour) for a firm of the given type.
    ///
    /// Closed form from the first-order conditions of the production
    /// problem. Undefined parameter regimes (`gamma == 1`, labour share of
    /// 1, negative bases under fractional powers) yield non-finite values
    /// rather than errors.
    pub fn optimal_factors(&self, productivity: f64, tax: f64) -> (f64, f64) {
        let net = self.params.gamma - self.params.alpha;
        let den = 1.0 - self.params.gamma;
        let rho = self.params.rho();

        let capital = (self.params.alpha / rho).powf((1.0 - net) / den)
            * (net / self.wage).powf(net / den)
            * productivity
            * (1.0 - tax).powf(1.0 / den);

        let labour = (productivity * (1.0 - tax) * net / self.wage).powf(1.0 / (1.0 - net))
            * capital.powf(self.params.alpha / (1.0 - net))
            + self.fixed_overhead;

        (capital, labour)
    }

    /// Output of a firm of the given type at its optimal factor choice.
    ///
    /// Tax reduces effective output multiplicatively; the overhead is
    /// subtracted from labour before the labour-elasticity exponent.
    pub fn production(&self, productivity: f64, tax: f64) -> f64 {
        let (capital, labour) = self.optimal_factors(productivity, tax);
        let capital_term = (1.0 - tax) * productivity * capital.powf(self.params.alpha);
        let labour_term =
            (labour - self.fixed_overhead).powf(self.params.gamma - self.params.alpha);
        capital_term * labour_term
    }

    /// Total costs of a firm of the given type: wage bill, capital rental
    /// at price `rho`, and the upstream cost pressure (constant across the
    /// grid within a tick).
    pub fn costs(&self, productivity: f64, tax: f64) -> f64 {
        let (capital, labour) = self.optimal_factors(productivity, tax);
        self.wage * labour + self.params.rho() * capital + self.fixed_costs
    }

    /// Profit of a firm of the given type.
    pub fn profit(&self, productivity: f64, tax: f64) -> f64 {
        self.production(productivity, tax) - self.costs(productivity, tax)
    }

    /// Entry decision: 1.0 where discounted profit is strictly positive,
    /// else 0.0.
    pub fn prod_decision(&self, productivity: f64, tax: f64) -> f64 {
        if self.profit(productivity, tax) * self.discount() > 0.0 {
            1.0
        } else {
            0.0
        }
    }

    /// The entry decision evaluated over the full grid.
    pub fn decision_grid(&self) -> Grid {
        self.eval_grid(|prod, tax| self.prod_decision(prod, tax))
    }

    /// Hypothetical stationary distribution if entrants were sampled from
    /// the density with no decay history. Diagnostic only; not part of the
    /// stepping recursion.
    pub fn steady_state_mu(&self) -> Grid {
        self.decision_grid()
            .zip_map(&self.density, |d, f| d * f)
            .scaled(self.entrant_scale)
    }

    /// Total realized output: production weighted by the current mass.
    pub fn aggregate_prod(&self) -> f64 {
        self.eval_grid(|prod, tax| self.production(prod, tax))
            .zip_map(self.mu(), |y, m| y * m)
            .sum()
    }

    /// Output if all current mass sat at the best cell (lowest tax,
    /// highest productivity); an upper bound for normalization.
    pub fn potential_prod(&self) -> f64 {
        let best_prod = self.space[self.space.len() - 1];
        let best_tax = self.space[0];
        self.production(best_prod, best_tax) * self.mu().sum()
    }

    /// Realized output normalized against [`OUTPUT_CAPACITY`].
    pub fn output_gap(&self) -> f64 {
        self.aggregate_prod() / OUTPUT_CAPACITY
    }

    /// Advances the population distribution by one step.
    ///
    /// Entrants arrive at every cell judged profitable, with mass given by
    /// the density and the entrant scale; prior mass decays uniformly at
    /// the exit rate regardless of current profitability. The new state is
    /// appended to the history, never overwritten.
    pub fn step(&mut self) {
        let entrants = self
            .decision_grid()
            .zip_map(&self.density, |d, f| d * f)
            .scaled(self.entrant_scale);
        let survivors = self.mus[self.t].scaled(1.0 - self.params.lambda);

        self.mus.push(survivors.zip_map(&entrants, |s, e| s + e));
        self.t += 1;
    }

    /// Records an upstream dependency.
    ///
    /// No acyclicity check happens here; wiring a well-ordered graph is
    /// the network's responsibility.
    pub fn add_supplier(&mut self, supplier: IndustryId, weight: f64) {
        self.suppliers.push(SupplierLink { supplier, weight });
    }

    fn eval_grid(&self, f: impl Fn(f64, f64) -> f64) -> Grid {
        let n = self.space.len();
        Grid::from_fn(n, n, |row, col| f(self.space[col], self.space[row]))
    }
}
