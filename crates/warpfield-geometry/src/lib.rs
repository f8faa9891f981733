//! Warpfield Geometry -- curvature of the warp-bubble ansatz.
//!
//! Builds on [`warpfield_symbolic`] to derive the curvature side of the
//! Einstein field equations for the spherically symmetric warp-bubble
//! metric `diag(-1, 1 - f(r,t), r^2, r^2 sin^2 theta)`:
//!
//! 1. [`chart`]: the shared coordinate/profile symbol context.
//! 2. [`metric`]: the metric builder, diagonal inversion, signature check.
//! 3. [`christoffel`]: connection coefficients by symbolic differentiation.
//! 4. [`ricci`]: the Ricci tensor (derived and closed-form) and scalar.
//! 5. [`einstein`]: the Einstein tensor and the stress-energy tensor.
//!
//! Data flows strictly forward through those stages; every produced object
//! is immutable. Shape errors are impossible by construction
//! ([`tensor::Tensor2`] is statically 4x4); the runtime invariants --
//! symmetry, diagonality, non-degeneracy -- fail fast with a
//! [`GeometryError`].

#![deny(unsafe_code)]

pub mod chart;
pub mod christoffel;
pub mod einstein;
pub mod metric;
pub mod ricci;
pub mod tensor;

use warpfield_symbolic::prelude::{EvalError, SimplifyError};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced by geometry operations.
#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    /// An operation requiring a diagonal metric met a structurally nonzero
    /// off-diagonal entry.
    #[error("metric is not diagonal: nonzero entry at [{row}][{col}]")]
    NotDiagonal { row: usize, col: usize },

    /// A diagonal metric entry is identically zero, so the inverse does not
    /// exist.
    #[error("metric is degenerate: diagonal entry [{index}][{index}] is identically zero")]
    DegenerateMetric { index: usize },

    /// A tensor that must be symmetric is not.
    #[error("tensor violates the symmetry invariant at [{row}][{col}]")]
    AsymmetricTensor { row: usize, col: usize },

    /// The symbolic engine gave up within its resource budget.
    #[error(transparent)]
    Simplify(#[from] SimplifyError),

    /// Numeric evaluation failed (signature checks only).
    #[error(transparent)]
    Eval(#[from] EvalError),
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::chart::SymbolContext;
    pub use crate::christoffel::{christoffel, Christoffel};
    pub use crate::einstein::{einstein_tensor, stress_energy_tensor};
    pub use crate::metric::{warp_bubble_metric, Metric};
    pub use crate::ricci::{
        closed_form_ricci, closed_form_ricci_scalar, ricci_scalar, ricci_tensor,
    };
    pub use crate::tensor::{Tensor2, DIM};
    pub use crate::GeometryError;
}
