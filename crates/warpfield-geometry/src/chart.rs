//! The coordinate chart and shared symbol context.
//!
//! Symbolic equality depends on symbol identity, so every stage of a
//! derivation must agree on one set of coordinate symbols and one profile
//! function atom. [`SymbolContext`] packages those up and is threaded
//! explicitly through every component -- there is no ambient global symbol
//! table.

use warpfield_symbolic::prelude::*;

use crate::tensor::DIM;

/// The shared symbol context for one derivation.
///
/// Holds the ordered coordinate 4-tuple `(t, r, theta, phi)` -- which fixes
/// tensor index order for every matrix in the pipeline -- and the opaque
/// warp profile `f(r, t)`.
#[derive(Debug, Clone)]
pub struct SymbolContext {
    t: Symbol,
    r: Symbol,
    theta: Symbol,
    phi: Symbol,
    profile: FuncAtom,
}

impl SymbolContext {
    /// The standard chart for the warp-bubble ansatz: coordinates
    /// `t, r, theta, phi` and profile `f(r, t)`.
    pub fn warp_bubble() -> Self {
        let t = Symbol::new("t");
        let r = Symbol::new("r");
        let theta = Symbol::new("theta");
        let phi = Symbol::new("phi");
        let profile = FuncAtom::new(Symbol::new("f"), vec![r.clone(), t.clone()]);
        SymbolContext {
            t,
            r,
            theta,
            phi,
            profile,
        }
    }

    /// The ordered coordinate symbols; index order for all tensors.
    pub fn coords(&self) -> [&Symbol; DIM] {
        [&self.t, &self.r, &self.theta, &self.phi]
    }

    /// The coordinate symbol for a tensor index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 4`.
    pub fn coord(&self, index: usize) -> &Symbol {
        self.coords()[index]
    }

    pub fn t(&self) -> &Symbol {
        &self.t
    }

    pub fn r(&self) -> &Symbol {
        &self.r
    }

    pub fn theta(&self) -> &Symbol {
        &self.theta
    }

    pub fn phi(&self) -> &Symbol {
        &self.phi
    }

    /// The opaque profile function atom.
    pub fn profile(&self) -> &FuncAtom {
        &self.profile
    }

    /// The undifferentiated profile as an expression.
    pub fn profile_expr(&self) -> Expr {
        Expr::func(&self.profile)
    }

    /// The profile differentiated `r_order` times in `r` and `t_order`
    /// times in `t`, as an expression.
    pub fn profile_deriv(&self, r_order: u32, t_order: u32) -> Expr {
        Expr::Func(self.profile.with_orders(&[r_order, t_order]))
    }
}
