//! The fixed-order derivation pipeline.
//!
//! One call to [`derive`] runs the whole symbolic computation, strictly
//! forward, each stage consuming only earlier stages' outputs:
//!
//! 1. Metric: `diag(-1, 1 - f, r^2, r^2 sin^2 theta)`.
//! 2. Curvature: Christoffel symbols, the Ricci tensor, the Ricci scalar.
//! 3. Field equations: the Einstein tensor `G = R - 1/2 g R_s`.
//! 4. Stress-energy: `T = G / (8 pi)`, simplified.
//!
//! Execution is single-threaded and purely sequential; there is no retry,
//! cancellation, or partial-failure recovery. The first error aborts the
//! run and nothing downstream (in particular the output document) is
//! produced. Every entity in the result is immutable once built, and the
//! whole computation is deterministic: identical contexts produce
//! structurally identical results.

use tracing::info;

use warpfield_geometry::prelude::*;
use warpfield_symbolic::prelude::*;

use crate::PipelineError;

// ---------------------------------------------------------------------------
// PipelineConfig
// ---------------------------------------------------------------------------

/// Configuration for a derivation run.
///
/// There are deliberately no knobs that change the mathematics -- only the
/// simplification resource budget is adjustable.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Resource limits passed to every simplification.
    pub simplify: SimplifyOptions,
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// The immutable result of a completed derivation.
#[derive(Debug, Clone)]
pub struct Derivation {
    /// The symbol context the run was performed in.
    pub context: SymbolContext,
    /// The warp-bubble metric.
    pub metric: Metric,
    /// The Ricci tensor, derived by symbolic differentiation.
    pub ricci: Tensor2,
    /// The Ricci scalar (trace of the Ricci tensor with the inverse metric).
    pub ricci_scalar: Expr,
    /// The Einstein tensor `G = R - 1/2 g R_s`.
    pub einstein: Tensor2,
    /// The stress-energy tensor `T = G / (8 pi)`.
    pub stress_energy: Tensor2,
}

/// Run the full derivation for the given symbol context.
///
/// # Errors
///
/// Propagates every geometry and simplification failure unchanged; see
/// [`PipelineError`]. On error, no partial result escapes.
pub fn derive(ctx: &SymbolContext, config: &PipelineConfig) -> Result<Derivation, PipelineError> {
    let opts = &config.simplify;

    info!(stage = "metric", "building warp-bubble metric");
    let metric = warp_bubble_metric(ctx);

    info!(stage = "curvature", "deriving Ricci tensor by symbolic differentiation");
    let ricci = ricci_tensor(&metric, ctx, opts)?;
    let scalar = ricci_scalar(&metric, &ricci, opts)?;

    info!(stage = "field-equations", "assembling Einstein tensor");
    let einstein = einstein_tensor(&metric, &ricci, &scalar, opts)?;

    info!(stage = "stress-energy", "simplifying stress-energy tensor");
    let stress_energy = stress_energy_tensor(&einstein, opts)?;

    Ok(Derivation {
        context: ctx.clone(),
        metric,
        ricci,
        ricci_scalar: scalar,
        einstein,
        stress_energy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiny_budget_surfaces_simplification_failure() {
        let ctx = SymbolContext::warp_bubble();
        let config = PipelineConfig {
            simplify: SimplifyOptions { max_terms: 2 },
        };
        match derive(&ctx, &config) {
            Err(PipelineError::Geometry(GeometryError::Simplify(
                SimplifyError::TermBudgetExceeded { limit: 2, .. },
            ))) => {}
            other => panic!("expected a term-budget failure, got {other:?}"),
        }
    }
}
