//! Trophic structure of a validated dependency graph.
//!
//! The dependency matrix `deps` encodes one edge per strictly positive
//! entry: `deps[i][j] > 0` means industry `i` consumes from supplier `j`
//! with that weight.

use std::collections::VecDeque;

use trophic_core::errors::{ErrorInfo, ModelError};
use trophic_core::grid::Grid;

/// Returns a topological order of the dependency graph, suppliers first.
///
/// Fails with a `cyclic-dependencies` error when the positive-entry
/// relation is not a strict partial order.
pub(crate) fn topo_order(deps: &Grid) -> Result<Vec<usize>, ModelError> {
    let n = deps.n_rows();
    let mut remaining: Vec<usize> = (0..n)
        .map(|i| (0..n).filter(|&j| deps.get(i, j) > 0.0).count())
        .collect();

    let mut queue: VecDeque<usize> = (0..n).filter(|&i| remaining[i] == 0).collect();
    let mut order = Vec::with_capacity(n);

    while let Some(j) = queue.pop_front() {
        order.push(j);
        for i in 0..n {
            if deps.get(i, j) > 0.0 {
                remaining[i] -= 1;
                if remaining[i] == 0 {
                    queue.push_back(i);
                }
            }
        }
    }

    if order.len() != n {
        let stuck: Vec<String> = (0..n)
            .filter(|&i| remaining[i] > 0)
            .map(|i| i.to_string())
            .collect();
        return Err(ModelError::Network(
            ErrorInfo::new(
                "cyclic-dependencies",
                "dependency matrix contains a cycle; industries may not supply themselves, directly or transitively",
            )
            .with_context("industries", stuck.join(","))
            .with_hint("use a strictly lower-triangular matrix or break the cycle"),
        ));
    }

    Ok(order)
}

/// Trophic level of every industry: 1 for sources, otherwise one more than
/// the weighted mean level of the suppliers.
///
/// Fails when the graph is cyclic, in which case no level assignment
/// exists.
pub fn trophic_levels(deps: &Grid) -> Result<Vec<f64>, ModelError> {
    let order = topo_order(deps)?;
    let n = deps.n_rows();
    let mut levels = vec![1.0; n];

    for &i in &order {
        let mut weight_sum = 0.0;
        let mut weighted_levels = 0.0;
        for j in 0..n {
            let w = deps.get(i, j);
            if w > 0.0 {
                weight_sum += w;
                weighted_levels += w * levels[j];
            }
        }
        if weight_sum > 0.0 {
            levels[i] = 1.0 + weighted_levels / weight_sum;
        }
    }

    Ok(levels)
}

/// Trophic incoherence: weighted standard deviation of edge level
/// differences around 1.
///
/// A perfectly layered chain (every edge spanning exactly one level) has
/// incoherence 0; an edgeless graph reports 0 by convention.
pub fn trophic_incoherence(deps: &Grid, levels: &[f64]) -> f64 {
    let mut weight_sum = 0.0;
    let mut acc = 0.0;
    for (i, j, w) in deps.cells() {
        if w > 0.0 {
            let diff = levels[i] - levels[j] - 1.0;
            weight_sum += w;
            acc += w * diff * diff;
        }
    }
    if weight_sum == 0.0 {
        0.0
    } else {
        (acc / weight_sum).sqrt()
    }
}
