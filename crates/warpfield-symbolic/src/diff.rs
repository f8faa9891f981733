//! Partial differentiation of expression trees.
//!
//! Implements the sum, product, power, and chain rules over [`Expr`], plus
//! the defining behavior of opaque function atoms: differentiating
//! `f(r, t)` with respect to `r` produces the atom `f_r`, and with respect
//! to any symbol outside the atom's argument list produces zero. Results are
//! built through the smart constructors, so trivial zero branches vanish as
//! they arise; callers that want a canonical result run the derivative
//! through [`simplify`](crate::normal::simplify) afterwards.

use crate::expr::Expr;
use crate::symbol::Symbol;

/// The partial derivative of `expr` with respect to `var`.
pub fn diff(expr: &Expr, var: &Symbol) -> Expr {
    match expr {
        Expr::Num(_) | Expr::Pi => Expr::zero(),
        Expr::Sym(s) => {
            if s == var {
                Expr::one()
            } else {
                Expr::zero()
            }
        }
        Expr::Func(atom) => match atom.differentiate(var) {
            Some(next) => Expr::Func(next),
            None => Expr::zero(),
        },
        Expr::Add(terms) => Expr::add_all(terms.iter().map(|t| diff(t, var)).collect()),
        Expr::Mul(factors) => {
            // Product rule: sum over each factor differentiated in place.
            let mut terms = Vec::with_capacity(factors.len());
            for (i, factor) in factors.iter().enumerate() {
                let d = diff(factor, var);
                if d.is_zero() {
                    continue;
                }
                let mut product = Vec::with_capacity(factors.len());
                for (j, other) in factors.iter().enumerate() {
                    if i == j {
                        product.push(d.clone());
                    } else {
                        product.push(other.clone());
                    }
                }
                terms.push(Expr::mul_all(product));
            }
            Expr::add_all(terms)
        }
        Expr::Pow(base, n) => {
            // d(b^n) = n * b^(n-1) * db, for any nonzero integer n.
            let db = diff(base, var);
            if db.is_zero() {
                return Expr::zero();
            }
            Expr::int(i64::from(*n)) * base.as_ref().clone().pow(n - 1) * db
        }
        Expr::Sin(arg) => Expr::cos(arg.as_ref().clone()) * diff(arg, var),
        Expr::Cos(arg) => -(Expr::sin(arg.as_ref().clone()) * diff(arg, var)),
    }
}

/// The `order`-th partial derivative of `expr` with respect to `var`.
pub fn diff_n(expr: &Expr, var: &Symbol, order: u32) -> Expr {
    let mut current = expr.clone();
    for _ in 0..order {
        current = diff(&current, var);
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::FuncAtom;

    fn setup() -> (Symbol, Symbol, FuncAtom) {
        let r = Symbol::new("r");
        let t = Symbol::new("t");
        let f = FuncAtom::new(Symbol::new("f"), vec![r.clone(), t.clone()]);
        (r, t, f)
    }

    #[test]
    fn constants_and_foreign_symbols_vanish() {
        let (r, t, _) = setup();
        assert!(diff(&Expr::int(7), &r).is_zero());
        assert!(diff(&Expr::pi(), &r).is_zero());
        assert!(diff(&Expr::sym(&t), &r).is_zero());
    }

    #[test]
    fn symbol_derivative_is_one() {
        let (r, _, _) = setup();
        assert!(diff(&Expr::sym(&r), &r).is_one());
    }

    #[test]
    fn power_rule() {
        let (r, _, _) = setup();
        // d(r^3)/dr = 3 r^2
        let d = diff(&Expr::sym(&r).pow(3), &r);
        assert_eq!(d, Expr::int(3) * Expr::sym(&r).pow(2));
    }

    #[test]
    fn negative_power_rule() {
        let (r, _, _) = setup();
        // d(r^-1)/dr = -r^-2
        let d = diff(&Expr::sym(&r).pow(-1), &r);
        assert_eq!(d, Expr::int(-1) * Expr::sym(&r).pow(-2));
    }

    #[test]
    fn product_rule() {
        let (r, t, _) = setup();
        // d(r*t)/dr = t
        let d = diff(&(Expr::sym(&r) * Expr::sym(&t)), &r);
        assert_eq!(d, Expr::sym(&t));
    }

    #[test]
    fn chain_rule_through_trig() {
        let (r, _, _) = setup();
        // d(sin(r^2))/dr = cos(r^2) * 2r
        let d = diff(&Expr::sin(Expr::sym(&r).pow(2)), &r);
        let expected =
            Expr::cos(Expr::sym(&r).pow(2)) * (Expr::int(2) * Expr::sym(&r));
        assert_eq!(d, expected);
    }

    #[test]
    fn opaque_function_gains_orders() {
        let (r, t, f) = setup();
        let d = diff(&Expr::func(&f), &r);
        match d {
            Expr::Func(atom) => assert_eq!(atom.orders(), &[1, 0]),
            other => panic!("expected a function atom, got {other:?}"),
        }
        // Mixed partials commute on the multi-index.
        let d_rt = diff(&diff(&Expr::func(&f), &r), &t);
        let d_tr = diff(&diff(&Expr::func(&f), &t), &r);
        assert_eq!(d_rt, d_tr);
    }

    #[test]
    fn diff_n_iterates() {
        let (r, _, _) = setup();
        // d^2(r^4)/dr^2 = 12 r^2
        let d2 = diff_n(&Expr::sym(&r).pow(4), &r, 2);
        assert_eq!(d2, Expr::int(12) * Expr::sym(&r).pow(2));
    }
}
