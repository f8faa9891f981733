//! The warp-bubble metric.
//!
//! The ansatz is spherically symmetric with an opaque profile `f(r, t)`:
//!
//! ```text
//!     g = diag(-1,  1 - f(r,t),  r^2,  r^2 sin^2(theta))
//! ```
//!
//! Lorentzian signature (-,+,+,+). The builder always succeeds and is fully
//! deterministic; the interesting contracts live on the accessors: the
//! inverse exists only for a diagonal metric with no identically zero
//! diagonal entry, and the signature of a metric with an *opaque* profile is
//! only decidable at the flat limit (profile set to zero), the one point the
//! ansatz pins down numerically.

use warpfield_symbolic::prelude::*;

use crate::chart::SymbolContext;
use crate::tensor::{Tensor2, DIM};
use crate::GeometryError;

/// A metric tensor: a [`Tensor2`] whose role as a metric unlocks inversion
/// and signature checks.
#[derive(Debug, Clone)]
pub struct Metric {
    g: Tensor2,
}

/// Build the warp-bubble metric `diag(-1, 1 - f, r^2, r^2 sin^2(theta))`.
pub fn warp_bubble_metric(ctx: &SymbolContext) -> Metric {
    let r = Expr::sym(ctx.r());
    let sin_theta = Expr::sin(Expr::sym(ctx.theta()));
    Metric {
        g: Tensor2::from_diag([
            Expr::int(-1),
            Expr::one() - ctx.profile_expr(),
            r.clone().pow(2),
            r.pow(2) * sin_theta.pow(2),
        ]),
    }
}

impl Metric {
    /// Wrap an existing tensor as a metric.
    pub fn from_tensor(g: Tensor2) -> Metric {
        Metric { g }
    }

    /// The underlying tensor.
    pub fn tensor(&self) -> &Tensor2 {
        &self.g
    }

    /// The metric entry at `[mu][nu]`.
    pub fn entry(&self, mu: usize, nu: usize) -> &Expr {
        self.g.entry(mu, nu)
    }

    /// The diagonal of the inverse metric, `g^{mu mu} = 1 / g_{mu mu}`,
    /// simplified.
    ///
    /// # Errors
    ///
    /// - [`GeometryError::NotDiagonal`] if any off-diagonal entry is
    ///   structurally nonzero (the ansatz never produces one);
    /// - [`GeometryError::DegenerateMetric`] if a diagonal entry is
    ///   identically zero.
    pub fn inverse_diagonal(
        &self,
        opts: &SimplifyOptions,
    ) -> Result<[Expr; DIM], GeometryError> {
        if let Some((row, col)) = self.g.first_off_diagonal() {
            return Err(GeometryError::NotDiagonal { row, col });
        }
        let mut inverse = Vec::with_capacity(DIM);
        for mu in 0..DIM {
            let entry = self.g.entry(mu, mu);
            if is_identically_zero(entry, opts)? {
                return Err(GeometryError::DegenerateMetric { index: mu });
            }
            inverse.push(simplify(&entry.clone().pow(-1), opts)?);
        }
        Ok(std::array::from_fn(|mu| inverse[mu].clone()))
    }

    /// The signature at the flat limit: the profile is set to zero and each
    /// diagonal entry evaluated at `r = 1`, `theta = pi/2`, yielding the
    /// sign pattern of the metric. For the warp-bubble ansatz this is
    /// `[-1, 1, 1, 1]`.
    pub fn signature_at_flat_limit(
        &self,
        ctx: &SymbolContext,
    ) -> Result<[i8; DIM], GeometryError> {
        let bindings = Bindings::new()
            .set(ctx.t(), 0.0)
            .set(ctx.r(), 1.0)
            .set(ctx.theta(), std::f64::consts::FRAC_PI_2)
            .set(ctx.phi(), 0.0);
        let mut signs = [0i8; DIM];
        for mu in 0..DIM {
            let flat = substitute_profile(
                self.g.entry(mu, mu),
                ctx.profile().name(),
                &Expr::zero(),
            );
            let value = eval(&flat, &bindings)?;
            signs[mu] = if value > 0.0 {
                1
            } else if value < 0.0 {
                -1
            } else {
                0
            };
        }
        Ok(signs)
    }
}
