//! LaTeX rendering of expressions.
//!
//! Deterministic: the same tree always renders to the same bytes, which the
//! output document's reproducibility guarantee depends on. Products render
//! as space-separated factors, negative powers and rational denominators
//! fold into `\frac{..}{..}`, derivative atoms render with subscript
//! multi-indices (`f_{rt}`), and Greek-named symbols map to their LaTeX
//! commands.

use num_rational::BigRational;
use num_traits::{One, Signed};

use crate::expr::Expr;
use crate::symbol::{FuncAtom, Symbol};

/// Render an expression as LaTeX math (no surrounding delimiters).
pub fn latex(expr: &Expr) -> String {
    match expr {
        Expr::Add(terms) => {
            let mut out = String::new();
            for (i, term) in terms.iter().enumerate() {
                let (negative, body) = signed_term(term);
                if i == 0 {
                    if negative {
                        out.push_str("- ");
                    }
                } else if negative {
                    out.push_str(" - ");
                } else {
                    out.push_str(" + ");
                }
                out.push_str(&body);
            }
            out
        }
        other => {
            let (negative, body) = signed_term(other);
            if negative {
                format!("- {body}")
            } else {
                body
            }
        }
    }
}

/// Render a non-sum term as (sign, unsigned body).
fn signed_term(expr: &Expr) -> (bool, String) {
    match expr {
        Expr::Num(q) => (q.is_negative(), rational(&q.abs())),
        Expr::Mul(factors) => product(factors),
        Expr::Pow(base, n) if *n < 0 => (
            false,
            format!("\\frac{{1}}{{{}}}", factor(base, n.unsigned_abs())),
        ),
        Expr::Pow(base, n) => (false, factor(base, *n as u32)),
        other => (false, leaf(other)),
    }
}

/// Render a flattened product, folding negative powers and the rational
/// coefficient's denominator into a `\frac`.
fn product(factors: &[Expr]) -> (bool, String) {
    let mut coeff = BigRational::one();
    let mut num_factors: Vec<(&Expr, u32)> = Vec::new();
    let mut den_factors: Vec<(&Expr, u32)> = Vec::new();

    for f in factors {
        match f {
            Expr::Num(q) => coeff *= q,
            Expr::Pow(base, n) if *n < 0 => den_factors.push((&**base, n.unsigned_abs())),
            Expr::Pow(base, n) => num_factors.push((&**base, *n as u32)),
            other => num_factors.push((other, 1)),
        }
    }

    let negative = coeff.is_negative();
    let coeff = coeff.abs();
    let has_den = !den_factors.is_empty() || !coeff.denom().is_one();

    // A lone sum in a fraction's numerator needs no parentheses.
    let bare_sum = has_den
        && coeff.numer().is_one()
        && num_factors.len() == 1
        && num_factors[0].1 == 1
        && matches!(num_factors[0].0, Expr::Add(_));
    let num = if bare_sum {
        latex(num_factors[0].0)
    } else {
        let mut parts: Vec<String> = Vec::new();
        if !coeff.numer().is_one() || num_factors.is_empty() {
            parts.push(coeff.numer().to_string());
        }
        parts.extend(num_factors.iter().map(|(b, e)| factor(b, *e)));
        parts.join(" ")
    };

    if !has_den {
        return (negative, num);
    }
    let mut den_parts: Vec<String> = Vec::new();
    if !coeff.denom().is_one() {
        den_parts.push(coeff.denom().to_string());
    }
    den_parts.extend(den_factors.iter().map(|(b, e)| factor(b, *e)));
    (
        negative,
        format!("\\frac{{{num}}}{{{}}}", den_parts.join(" ")),
    )
}

/// Render `base^exp` (exp >= 1), parenthesizing composite bases.
///
/// Power-flattening in the constructors guarantees the base is never itself
/// a power.
fn factor(base: &Expr, exp: u32) -> String {
    match base {
        Expr::Sin(arg) if exp > 1 => {
            format!("\\sin^{{{exp}}}\\left({}\\right)", latex(arg))
        }
        Expr::Cos(arg) if exp > 1 => {
            format!("\\cos^{{{exp}}}\\left({}\\right)", latex(arg))
        }
        _ => {
            let body = leaf(base);
            let grouped = matches!(base, Expr::Add(_) | Expr::Mul(_));
            match (exp, grouped) {
                (1, false) => body,
                (1, true) => format!("\\left({body}\\right)"),
                (_, false) => format!("{body}^{{{exp}}}"),
                (_, true) => format!("\\left({body}\\right)^{{{exp}}}"),
            }
        }
    }
}

/// Render a leaf or a grouped sub-expression.
fn leaf(expr: &Expr) -> String {
    match expr {
        Expr::Num(q) => rational(q),
        Expr::Sym(s) => symbol(s),
        Expr::Pi => "\\pi".to_owned(),
        Expr::Func(f) => func_atom(f),
        Expr::Sin(arg) => format!("\\sin\\left({}\\right)", latex(arg)),
        Expr::Cos(arg) => format!("\\cos\\left({}\\right)", latex(arg)),
        Expr::Add(_) | Expr::Mul(_) | Expr::Pow(..) => latex(expr),
    }
}

fn rational(q: &BigRational) -> String {
    if q.is_integer() {
        q.numer().to_string()
    } else if q.is_negative() {
        format!("- \\frac{{{}}}{{{}}}", q.numer().magnitude(), q.denom())
    } else {
        format!("\\frac{{{}}}{{{}}}", q.numer(), q.denom())
    }
}

/// Symbols with Greek names map to their LaTeX commands.
fn symbol(s: &Symbol) -> String {
    const GREEK: &[&str] = &[
        "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta",
        "iota", "kappa", "lambda", "mu", "nu", "xi", "rho", "sigma", "tau",
        "upsilon", "phi", "chi", "psi", "omega",
    ];
    if GREEK.contains(&s.name()) {
        format!("\\{}", s.name())
    } else {
        s.name().to_owned()
    }
}

/// `f` bare, `f_{rt}` style subscripts for derivative atoms.
fn func_atom(f: &FuncAtom) -> String {
    if f.is_undifferentiated() {
        return symbol(f.name());
    }
    let mut subscript = String::new();
    for (arg, &order) in f.args().iter().zip(f.orders()) {
        for _ in 0..order {
            subscript.push_str(&symbol(arg));
        }
    }
    format!("{}_{{{subscript}}}", symbol(f.name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r() -> Expr {
        Expr::sym(&Symbol::new("r"))
    }

    fn theta() -> Expr {
        Expr::sym(&Symbol::new("theta"))
    }

    fn profile() -> FuncAtom {
        FuncAtom::new(Symbol::new("f"), vec![Symbol::new("r"), Symbol::new("t")])
    }

    #[test]
    fn greek_symbols_get_commands() {
        assert_eq!(latex(&theta()), "\\theta");
        assert_eq!(latex(&r()), "r");
        assert_eq!(latex(&Expr::pi()), "\\pi");
    }

    #[test]
    fn derivative_atoms_use_subscripts() {
        let f = profile();
        assert_eq!(latex(&Expr::func(&f)), "f");
        let f_rt = f
            .differentiate(&Symbol::new("r"))
            .unwrap()
            .differentiate(&Symbol::new("t"))
            .unwrap();
        assert_eq!(latex(&Expr::Func(f_rt)), "f_{rt}");
    }

    #[test]
    fn negative_powers_become_fractions() {
        let e = Expr::func(&profile()) * r().pow(-1);
        assert_eq!(latex(&e), "\\frac{f}{r}");
    }

    #[test]
    fn bare_negative_power_is_a_reciprocal() {
        assert_eq!(latex(&r().pow(-2)), "\\frac{1}{r^{2}}");
    }

    #[test]
    fn rational_coefficients_split_across_the_fraction() {
        // -f_t / (4 r) renders with the 4 in the denominator.
        let f_t = Expr::Func(profile().differentiate(&Symbol::new("t")).unwrap());
        let e = Expr::rational(-1, 4) * f_t * r().pow(-1);
        assert_eq!(latex(&e), "- \\frac{f_{t}}{4 r}");
    }

    #[test]
    fn sums_interleave_signs() {
        let e = r() + Expr::int(-1) * Expr::func(&profile());
        assert_eq!(latex(&e), "r - f");
    }

    #[test]
    fn trig_powers_use_superscripts() {
        let e = r().pow(2) * Expr::sin(theta()).pow(2);
        assert_eq!(latex(&e), "r^{2} \\sin^{2}\\left(\\theta\\right)");
    }

    #[test]
    fn grouped_bases_are_parenthesized() {
        let e = (Expr::func(&profile()) - Expr::one()).pow(2);
        assert_eq!(latex(&e), "\\left(f - 1\\right)^{2}");
    }

    #[test]
    fn sum_numerators_render_bare_inside_fractions() {
        let f = Expr::func(&profile());
        let e = (f - Expr::one()) * r().pow(-1);
        assert_eq!(latex(&e), "\\frac{f - 1}{r}");
    }

    #[test]
    fn zero_renders_as_zero() {
        assert_eq!(latex(&Expr::zero()), "0");
    }
}
