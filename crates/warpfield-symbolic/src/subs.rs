//! Substitution of symbols and closed-form profiles.
//!
//! Two operations: replacing a symbol with an arbitrary expression, and
//! binding an opaque function atom to a concrete closed form. The latter is
//! how flat-spacetime and known-metric cross-checks work: every occurrence
//! of `f` *and of its derivative atoms* is replaced consistently, with the
//! derivative atoms receiving the corresponding partial derivatives of the
//! closed form (computed by repeated differentiation).

use crate::diff::diff_n;
use crate::expr::Expr;
use crate::symbol::Symbol;

/// Replace every occurrence of `var` with `replacement`.
pub fn substitute_symbol(expr: &Expr, var: &Symbol, replacement: &Expr) -> Expr {
    match expr {
        Expr::Num(_) | Expr::Pi | Expr::Func(_) => expr.clone(),
        Expr::Sym(s) => {
            if s == var {
                replacement.clone()
            } else {
                expr.clone()
            }
        }
        Expr::Add(terms) => Expr::add_all(
            terms
                .iter()
                .map(|t| substitute_symbol(t, var, replacement))
                .collect(),
        ),
        Expr::Mul(factors) => Expr::mul_all(
            factors
                .iter()
                .map(|f| substitute_symbol(f, var, replacement))
                .collect(),
        ),
        Expr::Pow(base, n) => substitute_symbol(base, var, replacement).pow(*n),
        Expr::Sin(arg) => Expr::sin(substitute_symbol(arg, var, replacement)),
        Expr::Cos(arg) => Expr::cos(substitute_symbol(arg, var, replacement)),
    }
}

/// Bind the opaque function named `func_name` to `closed_form`.
///
/// Every atom of that name is replaced by the closed form differentiated
/// according to the atom's multi-index, so `f_rt` becomes
/// `d^2(closed_form)/dr dt` and so on. The closed form must be written in
/// the same coordinate symbols as the atom's arguments.
pub fn substitute_profile(expr: &Expr, func_name: &Symbol, closed_form: &Expr) -> Expr {
    match expr {
        Expr::Num(_) | Expr::Sym(_) | Expr::Pi => expr.clone(),
        Expr::Func(atom) => {
            if atom.name() != func_name {
                return expr.clone();
            }
            let mut bound = closed_form.clone();
            for (arg, &order) in atom.args().iter().zip(atom.orders()) {
                bound = diff_n(&bound, arg, order);
            }
            bound
        }
        Expr::Add(terms) => Expr::add_all(
            terms
                .iter()
                .map(|t| substitute_profile(t, func_name, closed_form))
                .collect(),
        ),
        Expr::Mul(factors) => Expr::mul_all(
            factors
                .iter()
                .map(|f| substitute_profile(f, func_name, closed_form))
                .collect(),
        ),
        Expr::Pow(base, n) => substitute_profile(base, func_name, closed_form).pow(*n),
        Expr::Sin(arg) => Expr::sin(substitute_profile(arg, func_name, closed_form)),
        Expr::Cos(arg) => Expr::cos(substitute_profile(arg, func_name, closed_form)),
    }
}
