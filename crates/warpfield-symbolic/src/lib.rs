//! Warpfield Symbolic -- exact expression engine for the warp-bubble
//! derivation.
//!
//! This crate is the foundation of the workspace: an immutable symbolic
//! expression tree with exact rational coefficients, partial
//! differentiation, substitution, a canonical rational normal form with
//! budgeted simplification, and LaTeX rendering. It deliberately supports
//! exactly the expression family the spherically symmetric warp-bubble
//! ansatz needs (integer powers, sine/cosine, one opaque profile function)
//! rather than aspiring to a general computer-algebra system.
//!
//! # Quick Start
//!
//! ```
//! use warpfield_symbolic::prelude::*;
//!
//! let r = Symbol::new("r");
//! let t = Symbol::new("t");
//! let f = FuncAtom::new(Symbol::new("f"), vec![r.clone(), t.clone()]);
//!
//! // d/dr [ r^2 * f(r,t) ] = 2 r f + r^2 f_r
//! let e = Expr::sym(&r).pow(2) * Expr::func(&f);
//! let d = diff(&e, &r);
//!
//! let expected = Expr::int(2) * Expr::sym(&r) * Expr::func(&f)
//!     + Expr::sym(&r).pow(2) * Expr::Func(f.differentiate(&r).unwrap());
//! assert!(algebraically_equal(&d, &expected, &SimplifyOptions::default()).unwrap());
//! ```
//!
//! # Determinism
//!
//! Everything here is exact and ordered: `BigRational` coefficients,
//! `BTreeMap`-backed polynomials under a fixed lexicographic monomial
//! order, and rendering that depends only on tree structure. Identical
//! inputs produce byte-identical output, which the pipeline's idempotence
//! guarantee is built on.

#![deny(unsafe_code)]

pub mod diff;
pub mod eval;
pub mod expr;
pub mod latex;
pub mod normal;
pub mod subs;
pub mod symbol;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::diff::{diff, diff_n};
    pub use crate::eval::{eval, Bindings, EvalError};
    pub use crate::expr::Expr;
    pub use crate::latex::latex;
    pub use crate::normal::{
        algebraically_equal, is_identically_zero, simplify, SimplifyError, SimplifyOptions,
    };
    pub use crate::subs::{substitute_profile, substitute_symbol};
    pub use crate::symbol::{FuncAtom, Symbol};
}
