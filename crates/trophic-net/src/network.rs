//! The supply-chain network: validated dependency wiring plus
//! snapshot-consistent stepping.

use std::collections::BTreeMap;
use std::fmt;

use trophic_core::errors::{ErrorInfo, ModelError};
use trophic_core::grid::Grid;
use trophic_core::IndustryId;
use trophic_model::Industry;

use crate::trophic::{topo_order, trophic_incoherence, trophic_levels};

/// An ordered collection of industries wired through a dependency matrix.
///
/// `deps[i][j] > 0` makes industry `j` a supplier of industry `i` with that
/// weight. Topology is immutable after construction; only the contained
/// industries' population states mutate as the simulation proceeds.
pub struct Network {
    industries: Vec<Industry>,
    deps: Grid,
    positions: BTreeMap<IndustryId, usize>,
    trophic_levels: Vec<f64>,
    trophic_inc: f64,
}

impl fmt::Debug for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Network")
            .field("industries", &self.industries.len())
            .field("trophic_inc", &self.trophic_inc)
            .finish_non_exhaustive()
    }
}

impl Network {
    /// Validates the dependency matrix and wires every supplier link.
    ///
    /// Validation is fail-fast and happens before any wiring, so an error
    /// never leaves a partially wired network behind:
    ///
    /// - `matrix-shape`: the matrix is not square;
    /// - `matrix-size`: the dimension differs from the industry count;
    /// - `weight-range`: an entry is non-finite or outside [0, 1];
    /// - `duplicate-id`: two industries share an identifier;
    /// - `cyclic-dependencies`: an industry supplies itself, directly or
    ///   transitively. The check is an explicit topological sort over the
    ///   positive entries; any acyclic matrix is accepted, triangular or
    ///   not.
    pub fn new(mut industries: Vec<Industry>, deps: Grid) -> Result<Self, ModelError> {
        if !deps.is_square() {
            return Err(ModelError::Network(
                ErrorInfo::new("matrix-shape", "dependency matrix is not square")
                    .with_context("rows", deps.n_rows().to_string())
                    .with_context("cols", deps.n_cols().to_string()),
            ));
        }
        if deps.n_rows() != industries.len() {
            return Err(ModelError::Network(
                ErrorInfo::new(
                    "matrix-size",
                    "dependency matrix dimension differs from industry count",
                )
                .with_context("matrix", deps.n_rows().to_string())
                .with_context("industries", industries.len().to_string()),
            ));
        }
        for (row, col, value) in deps.cells() {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ModelError::Network(
                    ErrorInfo::new("weight-range", "dependency weight outside [0, 1]")
                        .with_context("entry", format!("({row}, {col})"))
                        .with_context("value", value.to_string()),
                ));
            }
        }

        let mut positions = BTreeMap::new();
        for (pos, industry) in industries.iter().enumerate() {
            if positions.insert(industry.id(), pos).is_some() {
                return Err(ModelError::Network(
                    ErrorInfo::new("duplicate-id", "industry identifiers must be unique")
                        .with_context("id", industry.id().as_raw().to_string()),
                ));
            }
        }

        topo_order(&deps)?;

        let ids: Vec<IndustryId> = industries.iter().map(Industry::id).collect();
        for (row, col, weight) in deps.cells() {
            if weight > 0.0 {
                industries[row].add_supplier(ids[col], weight);
            }
        }

        let levels = trophic_levels(&deps)?;
        let incoherence = trophic_incoherence(&deps, &levels);

        Ok(Self {
            industries,
            deps,
            positions,
            trophic_levels: levels,
            trophic_inc: incoherence,
        })
    }

    /// Advances every industry by one time step from a common snapshot.
    ///
    /// All output gaps are read at time `t` before any industry moves, so
    /// within a tick every downstream industry sees its suppliers' settled
    /// pre-tick state and the iteration order cannot matter.
    pub fn step(&mut self) {
        let gaps: Vec<f64> = self.industries.iter().map(Industry::output_gap).collect();
        let positions = &self.positions;
        for industry in &mut self.industries {
            let pressure = industry.supplier_cost(|id| gaps[positions[&id]]);
            industry.set_fixed_costs(pressure);
        }
        for industry in &mut self.industries {
            industry.step();
        }
    }

    /// The contained industries, in construction order.
    pub fn industries(&self) -> &[Industry] {
        &self.industries
    }

    /// Mutable access to the contained industries, for callers that drive
    /// stepping by hand rather than through [`step`](Self::step).
    pub fn industries_mut(&mut self) -> &mut [Industry] {
        &mut self.industries
    }

    /// Number of industries.
    pub fn len(&self) -> usize {
        self.industries.len()
    }

    /// True when the network holds no industries.
    pub fn is_empty(&self) -> bool {
        self.industries.is_empty()
    }

    /// The validated dependency matrix.
    pub fn deps(&self) -> &Grid {
        &self.deps
    }

    /// Current output gap of every industry, in construction order.
    pub fn output_gaps(&self) -> Vec<f64> {
        self.industries.iter().map(Industry::output_gap).collect()
    }

    /// Trophic level of every industry, in construction order.
    pub fn trophic_levels(&self) -> &[f64] {
        &self.trophic_levels
    }

    /// Trophic incoherence of the dependency graph.
    pub fn trophic_inc(&self) -> f64 {
        self.trophic_inc
    }
}
