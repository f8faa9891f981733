//! The Ricci tensor and scalar curvature.
//!
//! Two independent paths to the same object:
//!
//! 1. [`ricci_tensor`] -- the load-bearing derivation. Every one of the 16
//!    components is computed separately from the Christoffel symbols via the
//!    contraction
//!
//!    ```text
//!        R_{mn} = d_l Gamma^l_{mn} - d_n Gamma^l_{ml}
//!               + Gamma^l_{ls} Gamma^s_{mn} - Gamma^l_{ns} Gamma^s_{ml}
//!    ```
//!
//!    The computation is deliberately redundant: the contraction formula is
//!    not symmetric term by term, so checking `R_{mn} == R_{nm}` afterwards
//!    is a genuine consistency check on the whole derivation rather than an
//!    artifact of mirroring entries.
//!
//! 2. [`closed_form_ricci`] -- the tabulated nonzero components for the
//!    warp-bubble ansatz, assembled directly from the profile's derivative
//!    atoms. This is the classical "known formulas" presentation; the test
//!    suite holds the two paths algebraically equal entry by entry.
//!
//! The scalar curvature is the trace with the inverse metric,
//! `R = g^{mm} R_{mm}` (diagonal metric).

use warpfield_symbolic::prelude::*;

use crate::chart::SymbolContext;
use crate::christoffel::christoffel;
use crate::metric::Metric;
use crate::tensor::{Tensor2, DIM};
use crate::GeometryError;

/// Derive the Ricci tensor from the metric by symbolic differentiation.
///
/// All 16 entries are computed independently, simplified, and then checked
/// for the symmetry invariant.
pub fn ricci_tensor(
    metric: &Metric,
    ctx: &SymbolContext,
    opts: &SimplifyOptions,
) -> Result<Tensor2, GeometryError> {
    let ch = christoffel(metric, ctx, opts)?;
    let coords = ctx.coords();

    let ricci = Tensor2::try_from_fn(|mu, nu| {
        let mut terms = Vec::new();
        for lambda in 0..DIM {
            terms.push(diff(ch.gamma(lambda, mu, nu), coords[lambda]));
            terms.push(-diff(ch.gamma(lambda, mu, lambda), coords[nu]));
        }
        for lambda in 0..DIM {
            for sigma in 0..DIM {
                terms.push(
                    ch.gamma(lambda, lambda, sigma).clone()
                        * ch.gamma(sigma, mu, nu).clone(),
                );
                terms.push(
                    -(ch.gamma(lambda, nu, sigma).clone()
                        * ch.gamma(sigma, mu, lambda).clone()),
                );
            }
        }
        simplify(&Expr::add_all(terms), opts)
    })?;

    ricci.require_symmetric(opts)?;
    Ok(ricci)
}

/// The scalar curvature `R = g^{mm} R_{mm}`, simplified.
pub fn ricci_scalar(
    metric: &Metric,
    ricci: &Tensor2,
    opts: &SimplifyOptions,
) -> Result<Expr, GeometryError> {
    let inverse = metric.inverse_diagonal(opts)?;
    let mut terms = Vec::with_capacity(DIM);
    for mu in 0..DIM {
        terms.push(inverse[mu].clone() * ricci.entry(mu, mu).clone());
    }
    Ok(simplify(&Expr::add_all(terms), opts)?)
}

/// The closed-form Ricci components for the warp-bubble ansatz.
///
/// With `A = 1 - f`:
///
/// ```text
///     R_tt = f_tt / (2 A) + f_t^2 / (4 A^2)
///     R_tr = -f_t / (r A)
///     R_rr = -f_tt / 2 - f_t^2 / (4 A) - f_r / (r A)
///     R_thth = 1 - 1/A - r f_r / (2 A^2)
///     R_phph = R_thth sin^2(theta)
/// ```
///
/// and every other component zero. These match the derived tensor exactly
/// (a cross-check the test suite enforces) and reduce correctly in the two
/// classical limits: a vanishing profile gives flat spacetime, and the
/// constant-curvature profile `f = 1 - 1/(1 - k r^2)` gives
/// `R_thth = 2 k r^2`.
pub fn closed_form_ricci(ctx: &SymbolContext) -> Tensor2 {
    let r = Expr::sym(ctx.r());
    let sin_theta = Expr::sin(Expr::sym(ctx.theta()));

    let f_t = ctx.profile_deriv(0, 1);
    let f_r = ctx.profile_deriv(1, 0);
    let f_tt = ctx.profile_deriv(0, 2);
    let a = Expr::one() - ctx.profile_expr();

    let r_tt = f_tt.clone() / (Expr::int(2) * a.clone())
        + f_t.clone().pow(2) / (Expr::int(4) * a.clone().pow(2));
    let r_tr = -(f_t.clone() / (r.clone() * a.clone()));
    let r_rr = Expr::rational(-1, 2) * f_tt
        - f_t.pow(2) / (Expr::int(4) * a.clone())
        - f_r.clone() / (r.clone() * a.clone());
    let r_thth = Expr::one() - a.clone().pow(-1)
        - r.clone() * f_r / (Expr::int(2) * a.pow(2));
    let r_phph = r_thth.clone() * sin_theta.pow(2);

    Tensor2::from_fn(|mu, nu| match (mu, nu) {
        (0, 0) => r_tt.clone(),
        (0, 1) | (1, 0) => r_tr.clone(),
        (1, 1) => r_rr.clone(),
        (2, 2) => r_thth.clone(),
        (3, 3) => r_phph.clone(),
        _ => Expr::zero(),
    })
}

/// The closed-form scalar curvature: the trace of [`closed_form_ricci`]
/// with the inverse warp-bubble metric,
/// `R = -R_tt + R_rr/(1-f) + R_thth/r^2 + R_phph/(r^2 sin^2 theta)`.
pub fn closed_form_ricci_scalar(ctx: &SymbolContext) -> Expr {
    let ricci = closed_form_ricci(ctx);
    let r = Expr::sym(ctx.r());
    let sin_theta = Expr::sin(Expr::sym(ctx.theta()));
    let a = Expr::one() - ctx.profile_expr();

    -ricci.entry(0, 0).clone()
        + ricci.entry(1, 1).clone() / a
        + ricci.entry(2, 2).clone() / r.clone().pow(2)
        + ricci.entry(3, 3).clone() / (r.pow(2) * sin_theta.pow(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::warp_bubble_metric;

    fn setup() -> (SymbolContext, Metric, SimplifyOptions) {
        let ctx = SymbolContext::warp_bubble();
        let metric = warp_bubble_metric(&ctx);
        (ctx, metric, SimplifyOptions::default())
    }

    #[test]
    fn derived_ricci_is_symmetric() {
        let (ctx, metric, opts) = setup();
        let ricci = ricci_tensor(&metric, &ctx, &opts).unwrap();
        // ricci_tensor already checks this; assert independently anyway.
        assert!(ricci.require_symmetric(&opts).is_ok());
    }

    #[test]
    fn derived_matches_closed_form_entry_by_entry() {
        let (ctx, metric, opts) = setup();
        let derived = ricci_tensor(&metric, &ctx, &opts).unwrap();
        let table = closed_form_ricci(&ctx);
        for mu in 0..DIM {
            for nu in 0..DIM {
                assert!(
                    algebraically_equal(derived.entry(mu, nu), table.entry(mu, nu), &opts)
                        .unwrap(),
                    "Ricci [{mu}][{nu}] disagrees with the closed form"
                );
            }
        }
    }

    #[test]
    fn derived_scalar_matches_closed_form() {
        let (ctx, metric, opts) = setup();
        let ricci = ricci_tensor(&metric, &ctx, &opts).unwrap();
        let scalar = ricci_scalar(&metric, &ricci, &opts).unwrap();
        let table = closed_form_ricci_scalar(&ctx);
        assert!(algebraically_equal(&scalar, &table, &opts).unwrap());
    }

    #[test]
    fn flat_profile_gives_flat_spacetime() {
        let (ctx, metric, opts) = setup();
        let ricci = ricci_tensor(&metric, &ctx, &opts).unwrap();
        let scalar = ricci_scalar(&metric, &ricci, &opts).unwrap();
        for mu in 0..DIM {
            for nu in 0..DIM {
                let flat = substitute_profile(
                    ricci.entry(mu, nu),
                    ctx.profile().name(),
                    &Expr::zero(),
                );
                assert!(
                    is_identically_zero(&flat, &opts).unwrap(),
                    "R[{mu}][{nu}] nonzero for the flat profile"
                );
            }
        }
        let flat_scalar =
            substitute_profile(&scalar, ctx.profile().name(), &Expr::zero());
        assert!(is_identically_zero(&flat_scalar, &opts).unwrap());
    }

    #[test]
    fn static_profile_kills_time_mixing() {
        // A Schwarzschild-form profile f = 2M/r has no time dependence, so
        // R_tr and every time-derivative term must vanish.
        let (ctx, metric, opts) = setup();
        let ricci = ricci_tensor(&metric, &ctx, &opts).unwrap();
        let m = Symbol::new("M");
        let static_profile =
            Expr::int(2) * Expr::sym(&m) / Expr::sym(ctx.r());

        let r_tr = substitute_profile(
            ricci.entry(0, 1),
            ctx.profile().name(),
            &static_profile,
        );
        assert!(is_identically_zero(&r_tr, &opts).unwrap());

        let r_tt = substitute_profile(
            ricci.entry(0, 0),
            ctx.profile().name(),
            &static_profile,
        );
        assert!(
            is_identically_zero(&r_tt, &opts).unwrap(),
            "R_tt survives a static profile"
        );
    }

    #[test]
    fn constant_curvature_profile_recovers_frw_identity() {
        // f = 1 - 1/(1 - k r^2) makes g_rr = 1/(1 - k r^2), the constant-
        // curvature spatial slice. Known closed forms: R_thth = 2 k r^2 and
        // R_rr = 2 k / (1 - k r^2).
        let (ctx, metric, opts) = setup();
        let ricci = ricci_tensor(&metric, &ctx, &opts).unwrap();
        let k = Symbol::new("k");
        let r = Expr::sym(ctx.r());
        let one_minus_kr2 =
            Expr::one() - Expr::sym(&k) * r.clone().pow(2);
        let profile = Expr::one() - one_minus_kr2.clone().pow(-1);

        let r_thth =
            substitute_profile(ricci.entry(2, 2), ctx.profile().name(), &profile);
        let expected_thth = Expr::int(2) * Expr::sym(&k) * r.pow(2);
        assert!(
            algebraically_equal(&r_thth, &expected_thth, &opts).unwrap(),
            "R_thth does not match the constant-curvature closed form"
        );

        let r_rr =
            substitute_profile(ricci.entry(1, 1), ctx.profile().name(), &profile);
        let expected_rr = Expr::int(2) * Expr::sym(&k) / one_minus_kr2;
        assert!(
            algebraically_equal(&r_rr, &expected_rr, &opts).unwrap(),
            "R_rr does not match the constant-curvature closed form"
        );
    }
}
