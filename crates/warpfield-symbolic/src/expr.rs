//! Immutable symbolic expression trees.
//!
//! [`Expr`] is the term representation the whole workspace computes with:
//! exact rational constants, symbols, the circle constant pi, opaque function
//! atoms, n-ary sums and products, integer powers, and sine/cosine. The
//! spherically symmetric ansatz and everything derived from it (Christoffel
//! symbols, curvature tensors, the field equations) need nothing beyond this
//! family -- in particular only *integer* exponents ever occur, which keeps
//! the normal form in [`crate::normal`] canonical and total.
//!
//! Construction goes through the smart constructors and the `std::ops`
//! overloads, which perform cheap local cleanups (flattening nested
//! sums/products, dropping zero summands and unit factors, folding constant
//! arithmetic). Full canonicalization is the job of
//! [`simplify`](crate::normal::simplify).
//!
//! Expressions are immutable; all operations build new trees.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::symbol::{FuncAtom, Symbol};

// ---------------------------------------------------------------------------
// Expr
// ---------------------------------------------------------------------------

/// A symbolic expression.
///
/// Ordering and hashing are structural (derived), which makes `Expr` usable
/// as a deterministic map key; *algebraic* equality is decided by the normal
/// form, not by `==`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Expr {
    /// An exact rational constant.
    Num(BigRational),
    /// A symbol.
    Sym(Symbol),
    /// The circle constant, kept exact (never approximated numerically).
    Pi,
    /// An opaque function atom (profile function or one of its derivatives).
    Func(FuncAtom),
    /// An n-ary sum.
    Add(Vec<Expr>),
    /// An n-ary product.
    Mul(Vec<Expr>),
    /// An integer power of a base expression.
    Pow(Box<Expr>, i32),
    /// Sine of an expression.
    Sin(Box<Expr>),
    /// Cosine of an expression.
    Cos(Box<Expr>),
}

impl Expr {
    /// The constant zero.
    pub fn zero() -> Expr {
        Expr::Num(BigRational::zero())
    }

    /// The constant one.
    pub fn one() -> Expr {
        Expr::Num(BigRational::one())
    }

    /// An integer constant.
    pub fn int(n: i64) -> Expr {
        Expr::Num(BigRational::from_integer(BigInt::from(n)))
    }

    /// An exact rational constant `num / den`.
    ///
    /// # Panics
    ///
    /// Panics if `den` is zero.
    pub fn rational(num: i64, den: i64) -> Expr {
        assert!(den != 0, "rational constant with zero denominator");
        Expr::Num(BigRational::new(BigInt::from(num), BigInt::from(den)))
    }

    /// A symbol expression.
    pub fn sym(s: &Symbol) -> Expr {
        Expr::Sym(s.clone())
    }

    /// The circle constant.
    pub fn pi() -> Expr {
        Expr::Pi
    }

    /// An opaque function atom expression.
    pub fn func(f: &FuncAtom) -> Expr {
        Expr::Func(f.clone())
    }

    /// Sine of `arg`.
    pub fn sin(arg: Expr) -> Expr {
        Expr::Sin(Box::new(arg))
    }

    /// Cosine of `arg`.
    pub fn cos(arg: Expr) -> Expr {
        Expr::Cos(Box::new(arg))
    }

    /// Whether this node is the literal constant zero.
    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Num(q) if q.is_zero())
    }

    /// Whether this node is the literal constant one.
    pub fn is_one(&self) -> bool {
        matches!(self, Expr::Num(q) if q.is_one())
    }

    /// Raise to an integer power.
    ///
    /// Local cleanups: `x^0 = 1`, `x^1 = x`, constant folding,
    /// `(x^m)^n = x^(m*n)`, and distribution over products so that
    /// `(a*b)^n = a^n * b^n` -- the last keeps denominator factors separate,
    /// which the normal form relies on for cancellation.
    pub fn pow(self, n: i32) -> Expr {
        if n == 0 {
            return Expr::one();
        }
        if n == 1 {
            return self;
        }
        match self {
            Expr::Num(q) => Expr::Num(rational_pow(&q, n)),
            Expr::Pow(base, m) => base.pow(m.checked_mul(n).expect("power exponent overflow")),
            Expr::Mul(factors) => {
                Expr::mul_all(factors.into_iter().map(|f| f.pow(n)).collect())
            }
            other => Expr::Pow(Box::new(other), n),
        }
    }

    /// Sum a list of expressions, flattening nested sums, dropping zeros,
    /// and folding constants.
    pub fn add_all(terms: Vec<Expr>) -> Expr {
        let mut flat = Vec::with_capacity(terms.len());
        let mut constant = BigRational::zero();
        for term in terms {
            match term {
                Expr::Add(inner) => {
                    for t in inner {
                        match t {
                            Expr::Num(q) => constant += q,
                            other => flat.push(other),
                        }
                    }
                }
                Expr::Num(q) => constant += q,
                other => flat.push(other),
            }
        }
        if !constant.is_zero() {
            flat.push(Expr::Num(constant));
        }
        match flat.len() {
            0 => Expr::zero(),
            1 => flat.pop().unwrap_or_else(Expr::zero),
            _ => Expr::Add(flat),
        }
    }

    /// Multiply a list of expressions, flattening nested products,
    /// short-circuiting on zero, dropping unit factors, and folding
    /// constants.
    pub fn mul_all(factors: Vec<Expr>) -> Expr {
        let mut flat = Vec::with_capacity(factors.len());
        let mut constant = BigRational::one();
        for factor in factors {
            match factor {
                Expr::Mul(inner) => {
                    for f in inner {
                        match f {
                            Expr::Num(q) => constant *= q,
                            other => flat.push(other),
                        }
                    }
                }
                Expr::Num(q) => constant *= q,
                other => flat.push(other),
            }
        }
        if constant.is_zero() {
            return Expr::zero();
        }
        if !constant.is_one() {
            flat.insert(0, Expr::Num(constant));
        }
        match flat.len() {
            0 => Expr::one(),
            1 => flat.pop().unwrap_or_else(Expr::one),
            _ => Expr::Mul(flat),
        }
    }
}

/// Exact integer power of a rational.
fn rational_pow(q: &BigRational, n: i32) -> BigRational {
    assert!(n >= 0 || !q.is_zero(), "zero raised to a negative power");
    q.pow(n)
}

// ---------------------------------------------------------------------------
// Operator overloads
// ---------------------------------------------------------------------------

impl Add for Expr {
    type Output = Expr;
    fn add(self, rhs: Expr) -> Expr {
        Expr::add_all(vec![self, rhs])
    }
}

impl Sub for Expr {
    type Output = Expr;
    fn sub(self, rhs: Expr) -> Expr {
        Expr::add_all(vec![self, -rhs])
    }
}

impl Mul for Expr {
    type Output = Expr;
    fn mul(self, rhs: Expr) -> Expr {
        Expr::mul_all(vec![self, rhs])
    }
}

impl Div for Expr {
    type Output = Expr;
    /// Division builds `lhs * rhs^(-1)`; no check that `rhs` is nonzero as
    /// an *expression* -- division by an identically zero denominator is
    /// caught during normalization.
    fn div(self, rhs: Expr) -> Expr {
        Expr::mul_all(vec![self, rhs.pow(-1)])
    }
}

impl Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::mul_all(vec![Expr::int(-1), self])
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for Expr {
    /// Plain-text rendering for logs and diagnostics. LaTeX output lives in
    /// [`crate::latex`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Num(q) => {
                if q.is_integer() {
                    write!(f, "{}", q.numer())
                } else {
                    write!(f, "{}/{}", q.numer(), q.denom())
                }
            }
            Expr::Sym(s) => write!(f, "{s}"),
            Expr::Pi => f.write_str("pi"),
            Expr::Func(atom) => write!(f, "{atom}"),
            Expr::Add(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" + ")?;
                    }
                    write!(f, "{term}")?;
                }
                Ok(())
            }
            Expr::Mul(factors) => {
                for (i, factor) in factors.iter().enumerate() {
                    if i > 0 {
                        f.write_str("*")?;
                    }
                    if matches!(factor, Expr::Add(_)) {
                        write!(f, "({factor})")?;
                    } else if matches!(factor, Expr::Num(q) if q.is_negative() || !q.is_integer())
                        && i > 0
                    {
                        write!(f, "({factor})")?;
                    } else {
                        write!(f, "{factor}")?;
                    }
                }
                Ok(())
            }
            Expr::Pow(base, n) => {
                if matches!(
                    **base,
                    Expr::Add(_) | Expr::Mul(_) | Expr::Pow(..) | Expr::Num(_)
                ) {
                    write!(f, "({base})^{n}")
                } else {
                    write!(f, "{base}^{n}")
                }
            }
            Expr::Sin(arg) => write!(f, "sin({arg})"),
            Expr::Cos(arg) => write!(f, "cos({arg})"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
