//! The Einstein tensor and the stress-energy tensor.
//!
//! The field-equation step is elementwise matrix arithmetic on symbolic
//! entries:
//!
//! ```text
//!     G_{mn} = R_{mn} - 1/2 g_{mn} R
//!     T_{mn} = G_{mn} / (8 pi)
//! ```
//!
//! Malformed curvature input fails fast: the Ricci tensor's symmetry
//! invariant is checked *before* any arithmetic or simplification happens
//! (dimensionality is already static, see [`Tensor2`]). Every one of the 16
//! output entries is simplified independently and exactly -- pi stays
//! symbolic -- and a single entry exceeding the simplification budget fails
//! the whole operation rather than producing a partially simplified tensor
//! that claims success.

use warpfield_symbolic::prelude::*;

use crate::metric::Metric;
use crate::tensor::Tensor2;
use crate::GeometryError;

/// Compute the Einstein tensor `G = R - 1/2 g R_scalar`.
///
/// # Errors
///
/// - [`GeometryError::AsymmetricTensor`] if the Ricci input violates the
///   symmetry invariant (checked before simplification);
/// - [`GeometryError::Simplify`] if an entry exceeds the budget.
pub fn einstein_tensor(
    metric: &Metric,
    ricci: &Tensor2,
    ricci_scalar: &Expr,
    opts: &SimplifyOptions,
) -> Result<Tensor2, GeometryError> {
    ricci.require_symmetric(opts)?;
    let einstein = Tensor2::try_from_fn(|mu, nu| {
        let entry = ricci.entry(mu, nu).clone()
            - Expr::rational(1, 2) * metric.entry(mu, nu).clone() * ricci_scalar.clone();
        simplify(&entry, opts)
    })?;
    Ok(einstein)
}

/// Compute the stress-energy tensor `T = G / (8 pi)`, simplified.
///
/// Symmetry is inherited: T is symmetric iff G is, which holds whenever the
/// Ricci tensor and metric are (an identity the tests verify directly).
pub fn stress_energy_tensor(
    einstein: &Tensor2,
    opts: &SimplifyOptions,
) -> Result<Tensor2, GeometryError> {
    let eight_pi = Expr::int(8) * Expr::pi();
    let stress = einstein.try_map(|entry| {
        simplify(&(entry.clone() / eight_pi.clone()), opts)
    })?;
    Ok(stress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::SymbolContext;
    use crate::metric::warp_bubble_metric;
    use crate::ricci::{ricci_scalar, ricci_tensor};
    use crate::tensor::DIM;

    fn full_derivation() -> (SymbolContext, Metric, Tensor2, Expr, SimplifyOptions) {
        let ctx = SymbolContext::warp_bubble();
        let opts = SimplifyOptions::default();
        let metric = warp_bubble_metric(&ctx);
        let ricci = ricci_tensor(&metric, &ctx, &opts).unwrap();
        let scalar = ricci_scalar(&metric, &ricci, &opts).unwrap();
        (ctx, metric, ricci, scalar, opts)
    }

    #[test]
    fn einstein_tensor_is_symmetric() {
        let (_, metric, ricci, scalar, opts) = full_derivation();
        let einstein = einstein_tensor(&metric, &ricci, &scalar, &opts).unwrap();
        assert!(einstein.require_symmetric(&opts).is_ok());
    }

    #[test]
    fn einstein_definition_holds_entrywise() {
        let (_, metric, ricci, scalar, opts) = full_derivation();
        let einstein = einstein_tensor(&metric, &ricci, &scalar, &opts).unwrap();
        for mu in 0..DIM {
            for nu in 0..DIM {
                let direct = ricci.entry(mu, nu).clone()
                    - Expr::rational(1, 2)
                        * metric.entry(mu, nu).clone()
                        * scalar.clone();
                assert!(
                    algebraically_equal(einstein.entry(mu, nu), &direct, &opts).unwrap(),
                    "G[{mu}][{nu}] deviates from its definition"
                );
            }
        }
    }

    #[test]
    fn stress_energy_restores_einstein_when_scaled_back() {
        let (_, metric, ricci, scalar, opts) = full_derivation();
        let einstein = einstein_tensor(&metric, &ricci, &scalar, &opts).unwrap();
        let stress = stress_energy_tensor(&einstein, &opts).unwrap();
        for mu in 0..DIM {
            for nu in 0..DIM {
                let scaled_back =
                    stress.entry(mu, nu).clone() * Expr::int(8) * Expr::pi();
                assert!(
                    algebraically_equal(&scaled_back, einstein.entry(mu, nu), &opts)
                        .unwrap(),
                    "8 pi T[{mu}][{nu}] != G[{mu}][{nu}]"
                );
            }
        }
    }

    #[test]
    fn stress_energy_is_symmetric() {
        let (_, metric, ricci, scalar, opts) = full_derivation();
        let einstein = einstein_tensor(&metric, &ricci, &scalar, &opts).unwrap();
        let stress = stress_energy_tensor(&einstein, &opts).unwrap();
        assert!(stress.require_symmetric(&opts).is_ok());
    }

    #[test]
    fn flat_profile_zeroes_the_field_equations_end_to_end() {
        let (ctx, metric, ricci, scalar, opts) = full_derivation();
        let einstein = einstein_tensor(&metric, &ricci, &scalar, &opts).unwrap();
        let stress = stress_energy_tensor(&einstein, &opts).unwrap();
        for tensor in [&einstein, &stress] {
            for mu in 0..DIM {
                for nu in 0..DIM {
                    let flat = substitute_profile(
                        tensor.entry(mu, nu),
                        ctx.profile().name(),
                        &Expr::zero(),
                    );
                    assert!(
                        is_identically_zero(&flat, &opts).unwrap(),
                        "entry [{mu}][{nu}] nonzero in flat spacetime"
                    );
                }
            }
        }
    }

    #[test]
    fn asymmetric_ricci_fails_fast() {
        let (_, metric, _, scalar, opts) = full_derivation();
        let crooked = Tensor2::from_fn(|mu, nu| {
            if (mu, nu) == (0, 1) {
                Expr::sym(&Symbol::new("r"))
            } else {
                Expr::zero()
            }
        });
        match einstein_tensor(&metric, &crooked, &scalar, &opts) {
            Err(GeometryError::AsymmetricTensor { row: 0, col: 1 }) => {}
            other => panic!("expected AsymmetricTensor, got {other:?}"),
        }
    }
}
