//! Entrant density providers over (productivity, tax) space.

use trophic_core::errors::{ErrorInfo, ModelError};

/// Bivariate density supplying entrant mass and support bounds.
///
/// Implementations must be evaluable pointwise at arbitrary coordinates;
/// grid evaluation is always an explicit loop on the caller's side. The two
/// `theta` bounds delimit the valid support: the industry grid starts at
/// their maximum.
pub trait EntrantDistribution: Send + Sync {
    /// Density at the given (productivity, tax) coordinate.
    fn pdf(&self, productivity: f64, tax: f64) -> f64;

    /// Lower support bound on the productivity axis.
    fn theta_one(&self) -> f64;

    /// Lower support bound on the tax axis.
    fn theta_two(&self) -> f64;
}

/// Bivariate Pareto density (Mardia type I).
///
/// `pdf(x, y) = a(a+1) (t1 t2)^(a+1) (t2 x + t1 y - t1 t2)^-(a+2)` on the
/// support `x >= t1, y >= t2`, zero elsewhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BivariatePareto {
    shape: f64,
    theta_one: f64,
    theta_two: f64,
}

impl BivariatePareto {
    /// Creates the density, validating that shape and both margins are
    /// strictly positive.
    pub fn new(shape: f64, theta_one: f64, theta_two: f64) -> Result<Self, ModelError> {
        if !(shape > 0.0) || !(theta_one > 0.0) || !(theta_two > 0.0) {
            return Err(ModelError::Params(
                ErrorInfo::new(
                    "pareto-domain",
                    "bivariate Pareto requires strictly positive shape and margins",
                )
                .with_context("shape", shape.to_string())
                .with_context("theta_one", theta_one.to_string())
                .with_context("theta_two", theta_two.to_string()),
            ));
        }
        Ok(Self {
            shape,
            theta_one,
            theta_two,
        })
    }

    /// Shape parameter of the density.
    pub fn shape(&self) -> f64 {
        self.shape
    }
}

impl EntrantDistribution for BivariatePareto {
    fn pdf(&self, productivity: f64, tax: f64) -> f64 {
        if productivity < self.theta_one || tax < self.theta_two {
            return 0.0;
        }
        let a = self.shape;
        let t1 = self.theta_one;
        let t2 = self.theta_two;
        let scale = a * (a + 1.0) * (t1 * t2).powf(a + 1.0);
        let base = t2 * productivity + t1 * tax - t1 * t2;
        scale * base.powf(-(a + 2.0))
    }

    fn theta_one(&self) -> f64 {
        self.theta_one
    }

    fn theta_two(&self) -> f64 {
        self.theta_two
    }
}
