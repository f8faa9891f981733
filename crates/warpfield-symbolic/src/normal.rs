//! Canonical rational normal form and budgeted simplification.
//!
//! Every expression the pipeline simplifies is normalized into
//!
//! ```text
//!     numerator polynomial / product of monic denominator factors
//! ```
//!
//! where the polynomial ring is generated by *atoms*: symbols, pi, opaque
//! function atoms, and sine/cosine applied to canonical arguments.
//! Polynomials are stored as ordered monomial -> exact-rational-coefficient
//! maps under a lexicographic monomial order, so the representation is fully
//! deterministic. Three reductions keep the form canonical:
//!
//! 1. **Trig reduction**: `cos(x)^2` rewrites to `1 - sin(x)^2` whenever a
//!    monomial would carry a cosine power of two or more, so the Pythagorean
//!    identity falls out of plain polynomial arithmetic (this is what makes
//!    the angular Ricci entries collapse).
//! 2. **Monic denominators**: each denominator factor is normalized so its
//!    leading coefficient is one; scalar and monomial content move into the
//!    numerator. Single-atom content (powers of `r`, `sin(theta)`, `pi`)
//!    becomes individual atomic factors.
//! 3. **Cancellation**: atomic denominator factors cancel against the
//!    numerator's monomial content; polynomial factors cancel by exact
//!    multivariate division (attempted only for trig-free factors --
//!    trigonometric denominators only ever arise atomically here).
//!
//! Algebraic equality is decided through the difference: `a == b` iff the
//! numerator of `normalize(a - b)` is the zero polynomial. This is robust
//! even when two equal values carry structurally different denominators,
//! because the cross-multiplied difference expands in the canonical ring.
//!
//! Simplification is bounded by [`SimplifyOptions::max_terms`]: any
//! intermediate polynomial growing past the budget aborts with
//! [`SimplifyError::TermBudgetExceeded`] instead of hanging. The bound is a
//! resource guard, not an accuracy knob -- within the budget all arithmetic
//! is exact.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::expr::Expr;

// ---------------------------------------------------------------------------
// Options and errors
// ---------------------------------------------------------------------------

/// Resource limits for normalization.
#[derive(Debug, Clone)]
pub struct SimplifyOptions {
    /// Maximum number of monomials any intermediate polynomial may hold.
    pub max_terms: usize,
}

impl Default for SimplifyOptions {
    /// Generous default; the full warp-bubble derivation stays well under
    /// a few hundred terms per entry.
    fn default() -> Self {
        SimplifyOptions { max_terms: 10_000 }
    }
}

/// Errors surfaced by the symbolic engine.
#[derive(Debug, thiserror::Error)]
pub enum SimplifyError {
    /// An intermediate polynomial outgrew the term budget. Surfaced, never
    /// swallowed: no caller may claim success for an entry that failed to
    /// simplify.
    #[error("simplification exceeded the term budget: {reached} terms > limit {limit}")]
    TermBudgetExceeded { limit: usize, reached: usize },

    /// Division by an identically zero expression.
    #[error("division by an identically zero expression")]
    DivisionByZero,
}

// ---------------------------------------------------------------------------
// Atoms
// ---------------------------------------------------------------------------

/// A generator of the polynomial ring.
///
/// The derived ordering (variant order, then contents) fixes the variable
/// precedence of the monomial order; any total order works as long as it is
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Atom {
    Sym(crate::symbol::Symbol),
    Pi,
    Func(crate::symbol::FuncAtom),
    /// Sine with a canonicalized argument tree.
    Sin(Expr),
    /// Cosine with a canonicalized argument tree.
    Cos(Expr),
}

impl Atom {
    fn is_trig(&self) -> bool {
        matches!(self, Atom::Sin(_) | Atom::Cos(_))
    }

    fn to_expr(&self) -> Expr {
        match self {
            Atom::Sym(s) => Expr::Sym(s.clone()),
            Atom::Pi => Expr::Pi,
            Atom::Func(f) => Expr::Func(f.clone()),
            Atom::Sin(arg) => Expr::sin(arg.clone()),
            Atom::Cos(arg) => Expr::cos(arg.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// Monomials
// ---------------------------------------------------------------------------

/// A product of atom powers (exponents strictly positive; empty = 1).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Monomial(BTreeMap<Atom, u32>);

impl Monomial {
    fn one() -> Self {
        Monomial(BTreeMap::new())
    }

    fn atom(a: Atom, exp: u32) -> Self {
        let mut m = BTreeMap::new();
        if exp > 0 {
            m.insert(a, exp);
        }
        Monomial(m)
    }

    fn mul(&self, other: &Monomial) -> Monomial {
        let mut out = self.0.clone();
        for (a, &e) in &other.0 {
            *out.entry(a.clone()).or_insert(0) += e;
        }
        Monomial(out)
    }

    /// Exponent-wise division; `None` if any exponent would go negative.
    fn try_div(&self, other: &Monomial) -> Option<Monomial> {
        let mut out = self.0.clone();
        for (a, &e) in &other.0 {
            let have = out.get_mut(a)?;
            if *have < e {
                return None;
            }
            *have -= e;
            if *have == 0 {
                out.remove(a);
            }
        }
        Some(Monomial(out))
    }

    fn exponent_of(&self, a: &Atom) -> u32 {
        self.0.get(a).copied().unwrap_or(0)
    }
}

impl PartialOrd for Monomial {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Monomial {
    /// Lexicographic monomial order with variable precedence given by the
    /// ascending `Atom` order. Lex is multiplicative and a well-order, which
    /// exact division relies on for termination.
    fn cmp(&self, other: &Self) -> Ordering {
        let mut left = self.0.iter();
        let mut right = other.0.iter();
        let mut l = left.next();
        let mut r = right.next();
        loop {
            match (l, r) {
                (None, None) => return Ordering::Equal,
                (Some(_), None) => return Ordering::Greater,
                (None, Some(_)) => return Ordering::Less,
                (Some((la, le)), Some((ra, re))) => match la.cmp(ra) {
                    // The side holding a positive power of the earlier atom
                    // is the greater monomial.
                    Ordering::Less => return Ordering::Greater,
                    Ordering::Greater => return Ordering::Less,
                    Ordering::Equal => match le.cmp(re) {
                        Ordering::Equal => {
                            l = left.next();
                            r = right.next();
                        }
                        ord => return ord,
                    },
                },
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Polynomials
// ---------------------------------------------------------------------------

/// A polynomial over atoms: monomial -> nonzero coefficient, kept reduced
/// (no cosine power above one survives insertion).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
struct Poly(BTreeMap<Monomial, BigRational>);

fn binomial(k: u32, i: u32) -> BigInt {
    let mut acc = BigInt::one();
    for j in 0..i {
        acc = acc * BigInt::from(k - j) / BigInt::from(j + 1);
    }
    acc
}

impl Poly {
    fn zero() -> Self {
        Poly::default()
    }

    fn one() -> Self {
        Poly::constant(BigRational::one())
    }

    fn constant(c: BigRational) -> Self {
        let mut p = Poly::zero();
        p.insert_reduced(Monomial::one(), c);
        p
    }

    fn from_atom(a: Atom) -> Self {
        let mut p = Poly::zero();
        p.insert_reduced(Monomial::atom(a, 1), BigRational::one());
        p
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    fn is_one(&self) -> bool {
        self.as_constant().is_some_and(|c| c.is_one())
    }

    fn as_constant(&self) -> Option<&BigRational> {
        if self.0.len() == 1 {
            let (m, c) = self.0.iter().next()?;
            if m.0.is_empty() {
                return Some(c);
            }
        }
        None
    }

    fn leading(&self) -> Option<(&Monomial, &BigRational)> {
        self.0.iter().next_back()
    }

    /// Insert `coeff * mono`, rewriting `cos^2` powers into `1 - sin^2` so
    /// the stored form never carries a cosine power above one.
    fn insert_reduced(&mut self, mono: Monomial, coeff: BigRational) {
        if coeff.is_zero() {
            return;
        }
        let cos_square = mono.0.iter().find_map(|(a, &e)| {
            if e >= 2 {
                if let Atom::Cos(arg) = a {
                    return Some((a.clone(), arg.clone(), e));
                }
            }
            None
        });
        if let Some((cos_atom, arg, e)) = cos_square {
            let pairs = e / 2;
            let rem = e % 2;
            let sin_atom = Atom::Sin(arg);
            // cos^(2k) = (1 - sin^2)^k, expanded binomially.
            for i in 0..=pairs {
                let mut m = mono.0.clone();
                if rem == 0 {
                    m.remove(&cos_atom);
                } else {
                    m.insert(cos_atom.clone(), rem);
                }
                if i > 0 {
                    *m.entry(sin_atom.clone()).or_insert(0) += 2 * i;
                }
                let sign = if i % 2 == 0 {
                    BigRational::one()
                } else {
                    -BigRational::one()
                };
                let c = &coeff * sign * BigRational::from_integer(binomial(pairs, i));
                self.insert_reduced(Monomial(m), c);
            }
            return;
        }
        let cancelled = {
            let entry = self.0.entry(mono.clone()).or_insert_with(BigRational::zero);
            *entry += coeff;
            entry.is_zero()
        };
        if cancelled {
            self.0.remove(&mono);
        }
    }

    fn add(&self, other: &Poly) -> Poly {
        let mut out = self.clone();
        for (m, c) in &other.0 {
            out.insert_reduced(m.clone(), c.clone());
        }
        out
    }

    fn neg(&self) -> Poly {
        Poly(self.0.iter().map(|(m, c)| (m.clone(), -c)).collect())
    }

    fn sub(&self, other: &Poly) -> Poly {
        self.add(&other.neg())
    }

    fn mul(&self, other: &Poly) -> Poly {
        let mut out = Poly::zero();
        for (ma, ca) in &self.0 {
            for (mb, cb) in &other.0 {
                out.insert_reduced(ma.mul(mb), ca * cb);
            }
        }
        out
    }

    fn mul_monomial(&self, mono: &Monomial, coeff: &BigRational) -> Poly {
        let mut out = Poly::zero();
        for (m, c) in &self.0 {
            out.insert_reduced(m.mul(mono), c * coeff);
        }
        out
    }

    fn contains_trig(&self) -> bool {
        self.0
            .keys()
            .any(|m| m.0.keys().any(Atom::is_trig))
    }

    /// Exact multivariate division under the lex order.
    ///
    /// Returns `None` when `self` is not an exact multiple of `divisor`.
    /// Only attempted for trig-free divisors: dividing by a trigonometric
    /// polynomial could trigger the `cos^2` rewrite mid-division, which
    /// would invalidate the leading-term argument. Trigonometric
    /// denominators only ever arise as atomic factors here, which cancel
    /// through monomial content instead.
    fn exact_div(&self, divisor: &Poly) -> Option<Poly> {
        if divisor.is_zero() || divisor.contains_trig() {
            return None;
        }
        let (dm, dc) = divisor.leading()?;
        let mut remainder = self.clone();
        let mut quotient = Poly::zero();
        while !remainder.is_zero() {
            let (rm, rc) = remainder.leading()?;
            let qm = rm.try_div(dm)?;
            let qc = rc / dc;
            quotient.insert_reduced(qm.clone(), qc.clone());
            remainder = remainder.sub(&divisor.mul_monomial(&qm, &qc));
        }
        Some(quotient)
    }

    /// Decompose into scalar content, monomial content, and a monic core:
    /// `self = content * mono * core` with `core`'s leading coefficient one.
    ///
    /// Precondition: `self` is nonzero.
    fn decompose(&self) -> (BigRational, Monomial, Poly) {
        // Monomial content: per-atom minimum exponent across all monomials.
        let mut gcd: Option<BTreeMap<Atom, u32>> = None;
        for m in self.0.keys() {
            gcd = Some(match gcd {
                None => m.0.clone(),
                Some(acc) => acc
                    .into_iter()
                    .filter_map(|(a, e)| {
                        let other = m.exponent_of(&a);
                        let shared = e.min(other);
                        (shared > 0).then_some((a, shared))
                    })
                    .collect(),
            });
        }
        let content_mono = Monomial(gcd.unwrap_or_default());

        let mut stripped = Poly::zero();
        for (m, c) in &self.0 {
            let reduced = m
                .try_div(&content_mono)
                .unwrap_or_else(|| m.clone());
            stripped.insert_reduced(reduced, c.clone());
        }

        let lc = stripped
            .leading()
            .map(|(_, c)| c.clone())
            .unwrap_or_else(BigRational::one);
        let core = Poly(
            stripped
                .0
                .iter()
                .map(|(m, c)| (m.clone(), c / &lc))
                .collect(),
        );
        (lc, content_mono, core)
    }

    fn to_expr(&self) -> Expr {
        if self.is_zero() {
            return Expr::zero();
        }
        let mut terms = Vec::with_capacity(self.0.len());
        // Leading term first.
        for (m, c) in self.0.iter().rev() {
            let mut factors = Vec::with_capacity(m.0.len() + 1);
            factors.push(Expr::Num(c.clone()));
            for (a, &e) in &m.0 {
                factors.push(a.to_expr().pow(e as i32));
            }
            terms.push(Expr::mul_all(factors));
        }
        Expr::add_all(terms)
    }
}

// ---------------------------------------------------------------------------
// Normal form
// ---------------------------------------------------------------------------

/// A fully reduced fraction of polynomials.
#[derive(Debug, Clone, PartialEq, Eq)]
struct NormalForm {
    num: Poly,
    /// Monic, non-constant denominator factors with multiplicities.
    den: BTreeMap<Poly, u32>,
}

impl NormalForm {
    fn zero() -> Self {
        NormalForm {
            num: Poly::zero(),
            den: BTreeMap::new(),
        }
    }

    fn one() -> Self {
        NormalForm {
            num: Poly::one(),
            den: BTreeMap::new(),
        }
    }

    fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    fn to_expr(&self) -> Expr {
        let num = self.num.to_expr();
        if self.den.is_empty() {
            return num;
        }
        let den_factors: Vec<Expr> = self
            .den
            .iter()
            .map(|(f, &p)| f.to_expr().pow(p as i32))
            .collect();
        let den = Expr::mul_all(den_factors);
        num * den.pow(-1)
    }
}

/// Normalization context carrying the resource budget.
struct Ctx<'a> {
    opts: &'a SimplifyOptions,
}

impl Ctx<'_> {
    fn check(&self, p: &Poly) -> Result<(), SimplifyError> {
        if p.len() > self.opts.max_terms {
            tracing::debug!(
                limit = self.opts.max_terms,
                reached = p.len(),
                "term budget exceeded"
            );
            return Err(SimplifyError::TermBudgetExceeded {
                limit: self.opts.max_terms,
                reached: p.len(),
            });
        }
        Ok(())
    }

    fn mul_poly(&self, a: &Poly, b: &Poly) -> Result<Poly, SimplifyError> {
        let p = a.mul(b);
        self.check(&p)?;
        Ok(p)
    }

    fn from_expr(&self, expr: &Expr) -> Result<NormalForm, SimplifyError> {
        match expr {
            Expr::Num(q) => {
                if q.is_zero() {
                    Ok(NormalForm::zero())
                } else {
                    Ok(NormalForm {
                        num: Poly::constant(q.clone()),
                        den: BTreeMap::new(),
                    })
                }
            }
            Expr::Sym(s) => Ok(NormalForm {
                num: Poly::from_atom(Atom::Sym(s.clone())),
                den: BTreeMap::new(),
            }),
            Expr::Pi => Ok(NormalForm {
                num: Poly::from_atom(Atom::Pi),
                den: BTreeMap::new(),
            }),
            Expr::Func(f) => Ok(NormalForm {
                num: Poly::from_atom(Atom::Func(f.clone())),
                den: BTreeMap::new(),
            }),
            Expr::Sin(arg) => {
                let canon = self.from_expr(arg)?.to_expr();
                Ok(NormalForm {
                    num: Poly::from_atom(Atom::Sin(canon)),
                    den: BTreeMap::new(),
                })
            }
            Expr::Cos(arg) => {
                let canon = self.from_expr(arg)?.to_expr();
                Ok(NormalForm {
                    num: Poly::from_atom(Atom::Cos(canon)),
                    den: BTreeMap::new(),
                })
            }
            Expr::Add(terms) => {
                let mut acc = NormalForm::zero();
                for t in terms {
                    let nf = self.from_expr(t)?;
                    acc = self.add(&acc, &nf)?;
                }
                Ok(acc)
            }
            Expr::Mul(factors) => {
                let mut acc = NormalForm::one();
                for f in factors {
                    let nf = self.from_expr(f)?;
                    acc = self.mul(&acc, &nf)?;
                }
                Ok(acc)
            }
            Expr::Pow(base, n) => {
                let b = self.from_expr(base)?;
                self.pow(&b, *n)
            }
        }
    }

    fn expand_factors<'f>(
        &self,
        factors: impl Iterator<Item = (&'f Poly, u32)>,
    ) -> Result<Poly, SimplifyError> {
        let mut acc = Poly::one();
        for (f, p) in factors {
            for _ in 0..p {
                acc = self.mul_poly(&acc, f)?;
            }
        }
        Ok(acc)
    }

    fn add(&self, a: &NormalForm, b: &NormalForm) -> Result<NormalForm, SimplifyError> {
        if a.is_zero() {
            return Ok(b.clone());
        }
        if b.is_zero() {
            return Ok(a.clone());
        }
        // Common denominator: per-factor maximum multiplicity.
        let mut union: BTreeMap<Poly, u32> = a.den.clone();
        for (f, &p) in &b.den {
            let entry = union.entry(f.clone()).or_insert(0);
            *entry = (*entry).max(p);
        }
        let a_extra = self.expand_factors(union.iter().map(|(f, &p)| {
            let have = a.den.get(f).copied().unwrap_or(0);
            (f, p - have)
        }))?;
        let b_extra = self.expand_factors(union.iter().map(|(f, &p)| {
            let have = b.den.get(f).copied().unwrap_or(0);
            (f, p - have)
        }))?;
        let num = self
            .mul_poly(&a.num, &a_extra)?
            .add(&self.mul_poly(&b.num, &b_extra)?);
        self.check(&num)?;
        self.reduce(num, union)
    }

    fn mul(&self, a: &NormalForm, b: &NormalForm) -> Result<NormalForm, SimplifyError> {
        if a.is_zero() || b.is_zero() {
            return Ok(NormalForm::zero());
        }
        let num = self.mul_poly(&a.num, &b.num)?;
        let mut den = a.den.clone();
        for (f, &p) in &b.den {
            *den.entry(f.clone()).or_insert(0) += p;
        }
        self.reduce(num, den)
    }

    fn inv(&self, a: &NormalForm) -> Result<NormalForm, SimplifyError> {
        if a.is_zero() {
            return Err(SimplifyError::DivisionByZero);
        }
        let num = self.expand_factors(a.den.iter().map(|(f, &p)| (f, p)))?;
        let (content, mono, core) = a.num.decompose();
        let num = num.mul_monomial(&Monomial::one(), &content.recip());
        let mut den: BTreeMap<Poly, u32> = BTreeMap::new();
        for (atom, e) in &mono.0 {
            *den.entry(Poly::from_atom(atom.clone())).or_insert(0) += e;
        }
        if !core.is_one() {
            *den.entry(core).or_insert(0) += 1;
        }
        self.reduce(num, den)
    }

    fn pow(&self, a: &NormalForm, n: i32) -> Result<NormalForm, SimplifyError> {
        if n == 0 {
            return Ok(NormalForm::one());
        }
        let base = if n < 0 { self.inv(a)? } else { a.clone() };
        let mut acc = base.clone();
        for _ in 1..n.unsigned_abs() {
            acc = self.mul(&acc, &base)?;
        }
        Ok(acc)
    }

    /// Cancel numerator content against the denominator and drop exhausted
    /// factors.
    fn reduce(
        &self,
        mut num: Poly,
        den: BTreeMap<Poly, u32>,
    ) -> Result<NormalForm, SimplifyError> {
        if num.is_zero() {
            return Ok(NormalForm::zero());
        }
        let mut reduced: BTreeMap<Poly, u32> = BTreeMap::new();
        // Invariant: den factors are non-constant (atomic factors have unit
        // coefficient; monic cores that collapse to a constant collapse to
        // one and are never inserted).
        for (factor, mut power) in den {
            let single_atom = factor
                .0
                .iter()
                .next()
                .filter(|_| factor.len() == 1)
                .and_then(|(m, c)| {
                    if c.is_one() && m.0.len() == 1 {
                        m.0.iter().next().map(|(a, &e)| (a.clone(), e))
                    } else {
                        None
                    }
                });
            if let Some((atom, exp)) = single_atom {
                // Atomic factor: cancel against the numerator's monomial
                // content for this atom.
                let available = num
                    .0
                    .keys()
                    .map(|m| m.exponent_of(&atom))
                    .min()
                    .unwrap_or(0);
                let cancel = (available / exp).min(power);
                if cancel > 0 {
                    let divisor = Monomial::atom(atom.clone(), exp * cancel);
                    let mut next = Poly::zero();
                    for (m, c) in &num.0 {
                        let reduced_mono = m
                            .try_div(&divisor)
                            .unwrap_or_else(|| m.clone());
                        next.insert_reduced(reduced_mono, c.clone());
                    }
                    num = next;
                    power -= cancel;
                }
            } else {
                // Polynomial factor: repeated exact division.
                while power > 0 {
                    match num.exact_div(&factor) {
                        Some(q) => {
                            num = q;
                            power -= 1;
                        }
                        None => break,
                    }
                }
            }
            if power > 0 {
                *reduced.entry(factor).or_insert(0) += power;
            }
        }
        self.check(&num)?;
        Ok(NormalForm { num, den: reduced })
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Simplify an expression into its canonical rational normal form.
pub fn simplify(expr: &Expr, opts: &SimplifyOptions) -> Result<Expr, SimplifyError> {
    let ctx = Ctx { opts };
    Ok(ctx.from_expr(expr)?.to_expr())
}

/// Whether `expr` is algebraically zero.
pub fn is_identically_zero(expr: &Expr, opts: &SimplifyOptions) -> Result<bool, SimplifyError> {
    let ctx = Ctx { opts };
    Ok(ctx.from_expr(expr)?.is_zero())
}

/// Whether `a` and `b` are algebraically equal (decided via the difference,
/// which is robust to denominator-structure differences).
pub fn algebraically_equal(
    a: &Expr,
    b: &Expr,
    opts: &SimplifyOptions,
) -> Result<bool, SimplifyError> {
    is_identically_zero(&(a.clone() - b.clone()), opts)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::{FuncAtom, Symbol};

    fn opts() -> SimplifyOptions {
        SimplifyOptions::default()
    }

    fn r() -> Expr {
        Expr::sym(&Symbol::new("r"))
    }

    fn theta() -> Expr {
        Expr::sym(&Symbol::new("theta"))
    }

    fn f() -> Expr {
        let f = FuncAtom::new(
            Symbol::new("f"),
            vec![Symbol::new("r"), Symbol::new("t")],
        );
        Expr::func(&f)
    }

    // -- 1. Basic cancellation ----------------------------------------------

    #[test]
    fn like_terms_cancel() {
        let e = r() + f() - r() - f();
        assert!(is_identically_zero(&e, &opts()).unwrap());
    }

    #[test]
    fn fraction_difference_cancels() {
        // f/(1-f) - (1/(1-f) - 1) == 0
        let a = f() / (Expr::one() - f());
        let b = Expr::one() / (Expr::one() - f()) - Expr::one();
        assert!(algebraically_equal(&a, &b, &opts()).unwrap());
    }

    #[test]
    fn monomial_denominator_cancels() {
        // (r^3) / r == r^2
        let e = r().pow(3) / r();
        assert!(algebraically_equal(&e, &r().pow(2), &opts()).unwrap());
    }

    #[test]
    fn polynomial_denominator_cancels() {
        // (1 - f)^2 / (1 - f) == 1 - f
        let a = (Expr::one() - f()).pow(2) / (Expr::one() - f());
        let b = Expr::one() - f();
        assert!(algebraically_equal(&a, &b, &opts()).unwrap());
        // And the simplified tree carries no denominator at all.
        let simplified = simplify(&a, &opts()).unwrap();
        assert_eq!(simplified, simplify(&b, &opts()).unwrap());
    }

    // -- 2. Trig reduction --------------------------------------------------

    #[test]
    fn pythagorean_identity() {
        let e = Expr::sin(theta()).pow(2) + Expr::cos(theta()).pow(2) - Expr::one();
        assert!(is_identically_zero(&e, &opts()).unwrap());
    }

    #[test]
    fn csc_minus_cot_squared_is_one() {
        // 1/sin^2 - cos^2/sin^2 == 1, the cancellation the angular Ricci
        // entries live on.
        let sin2 = Expr::sin(theta()).pow(2);
        let e = Expr::one() / sin2.clone() - Expr::cos(theta()).pow(2) / sin2;
        assert!(algebraically_equal(&e, &Expr::one(), &opts()).unwrap());
    }

    #[test]
    fn odd_cosine_powers_survive() {
        let e = simplify(&Expr::cos(theta()).pow(3), &opts()).unwrap();
        // cos^3 = cos * (1 - sin^2): one cosine factor remains.
        let back = Expr::cos(theta())
            * (Expr::one() - Expr::sin(theta()).pow(2));
        assert!(algebraically_equal(&e, &back, &opts()).unwrap());
    }

    // -- 3. Canonical form determinism --------------------------------------

    #[test]
    fn simplify_is_idempotent() {
        let e = (r() + f()).pow(2) / (r() * (Expr::one() - f()));
        let once = simplify(&e, &opts()).unwrap();
        let twice = simplify(&once, &opts()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn order_of_operations_is_immaterial() {
        let a = (r() + f()) * (r() - f());
        let b = r().pow(2) - f().pow(2);
        assert_eq!(
            simplify(&a, &opts()).unwrap(),
            simplify(&b, &opts()).unwrap()
        );
    }

    // -- 4. Budget ----------------------------------------------------------

    #[test]
    fn term_budget_is_enforced() {
        let tight = SimplifyOptions { max_terms: 3 };
        // (r + f + sin(theta) + pi)^3 has far more than 3 terms.
        let e = (r() + f() + Expr::sin(theta()) + Expr::pi()).pow(3);
        let err = simplify(&e, &tight).unwrap_err();
        assert!(matches!(err, SimplifyError::TermBudgetExceeded { limit: 3, .. }));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        let e = r() / (f() - f());
        let err = simplify(&e, &opts()).unwrap_err();
        assert!(matches!(err, SimplifyError::DivisionByZero));
    }

    // -- 5. Pi stays exact --------------------------------------------------

    #[test]
    fn pi_is_never_evaluated() {
        let e = simplify(&(Expr::int(8) * Expr::pi() / (Expr::int(2) * Expr::pi())), &opts())
            .unwrap();
        assert_eq!(e, Expr::int(4));
    }
}
