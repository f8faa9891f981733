//! Christoffel symbols of the second kind.
//!
//! For a diagonal metric the defining sum over the inverse metric collapses
//! to a single term:
//!
//! ```text
//!     Gamma^l_{mn} = 1/2 g^{ll} (d_m g_{nl} + d_n g_{ml} - d_l g_{mn})
//! ```
//!
//! All 64 components are computed by symbolic differentiation of the metric
//! entries and simplified individually. The warp-bubble ansatz leaves ten
//! distinct nonzero components; nothing here assumes which ones they are.

use warpfield_symbolic::prelude::*;

use crate::chart::SymbolContext;
use crate::metric::Metric;
use crate::tensor::DIM;
use crate::GeometryError;

/// The full set of Christoffel symbols `Gamma^lambda_{mu nu}`.
#[derive(Debug, Clone)]
pub struct Christoffel {
    gamma: [[[Expr; DIM]; DIM]; DIM],
}

impl Christoffel {
    /// The component `Gamma^lambda_{mu nu}`.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of range.
    pub fn gamma(&self, lambda: usize, mu: usize, nu: usize) -> &Expr {
        &self.gamma[lambda][mu][nu]
    }

    /// Count of components that are not literally zero (diagnostic).
    pub fn nonzero_count(&self) -> usize {
        self.gamma
            .iter()
            .flatten()
            .flatten()
            .filter(|e| !e.is_zero())
            .count()
    }
}

/// Compute all Christoffel symbols for a diagonal metric.
///
/// # Errors
///
/// Propagates [`GeometryError::NotDiagonal`]/[`GeometryError::DegenerateMetric`]
/// from the metric inversion and [`GeometryError::Simplify`] if any component
/// exceeds the simplification budget.
pub fn christoffel(
    metric: &Metric,
    ctx: &SymbolContext,
    opts: &SimplifyOptions,
) -> Result<Christoffel, GeometryError> {
    let inverse = metric.inverse_diagonal(opts)?;
    let coords = ctx.coords();

    let mut flat = Vec::with_capacity(DIM * DIM * DIM);
    for lambda in 0..DIM {
        for mu in 0..DIM {
            for nu in 0..DIM {
                let d_mu = diff(metric.entry(nu, lambda), coords[mu]);
                let d_nu = diff(metric.entry(mu, lambda), coords[nu]);
                let d_lambda = diff(metric.entry(mu, nu), coords[lambda]);
                let combination = d_mu + d_nu - d_lambda;
                let component = Expr::rational(1, 2) * inverse[lambda].clone() * combination;
                flat.push(simplify(&component, opts)?);
            }
        }
    }

    let gamma = std::array::from_fn(|lambda| {
        std::array::from_fn(|mu| {
            std::array::from_fn(|nu| flat[(lambda * DIM + mu) * DIM + nu].clone())
        })
    });
    let christoffel = Christoffel { gamma };
    tracing::debug!(
        nonzero = christoffel.nonzero_count(),
        "christoffel symbols computed"
    );
    Ok(christoffel)
}
