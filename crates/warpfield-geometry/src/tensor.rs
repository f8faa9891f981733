//! Rank-2 symbolic tensors.
//!
//! [`Tensor2`] is a 4x4 matrix of expressions with the dimensionality
//! invariant enforced by the type system (`[[Expr; 4]; 4]` cannot be the
//! wrong shape). The invariants the type system cannot see -- symmetry and
//! diagonality -- are runtime checks: symmetry is decided *algebraically*
//! through the normal form, diagonality structurally (off-diagonal entries
//! are built as literal zeros by every constructor in this workspace).

use warpfield_symbolic::prelude::*;

use crate::GeometryError;

/// Spacetime dimension; index order is fixed by
/// [`SymbolContext::coords`](crate::chart::SymbolContext::coords).
pub const DIM: usize = 4;

/// A 4x4 matrix of symbolic expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tensor2 {
    entries: [[Expr; DIM]; DIM],
}

impl Tensor2 {
    /// Build a tensor entry-by-entry.
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> Expr) -> Self {
        Tensor2 {
            entries: std::array::from_fn(|mu| std::array::from_fn(|nu| f(mu, nu))),
        }
    }

    /// Build a tensor entry-by-entry from a fallible constructor, stopping
    /// at the first error.
    pub fn try_from_fn<E>(
        mut f: impl FnMut(usize, usize) -> Result<Expr, E>,
    ) -> Result<Self, E> {
        let mut flat = Vec::with_capacity(DIM * DIM);
        for mu in 0..DIM {
            for nu in 0..DIM {
                flat.push(f(mu, nu)?);
            }
        }
        Ok(Tensor2::from_fn(|mu, nu| flat[mu * DIM + nu].clone()))
    }

    /// A diagonal tensor with literal zero off-diagonal entries.
    pub fn from_diag(diag: [Expr; DIM]) -> Self {
        Tensor2::from_fn(|mu, nu| {
            if mu == nu {
                diag[mu].clone()
            } else {
                Expr::zero()
            }
        })
    }

    /// The all-zero tensor.
    pub fn zeros() -> Self {
        Tensor2::from_fn(|_, _| Expr::zero())
    }

    /// The entry at `[mu][nu]`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn entry(&self, mu: usize, nu: usize) -> &Expr {
        &self.entries[mu][nu]
    }

    /// The diagonal entries in index order.
    pub fn diagonal(&self) -> [&Expr; DIM] {
        std::array::from_fn(|mu| &self.entries[mu][mu])
    }

    /// Apply `f` to every entry.
    pub fn map(&self, mut f: impl FnMut(&Expr) -> Expr) -> Tensor2 {
        Tensor2::from_fn(|mu, nu| f(&self.entries[mu][nu]))
    }

    /// Apply a fallible `f` to every entry.
    pub fn try_map<E>(
        &self,
        mut f: impl FnMut(&Expr) -> Result<Expr, E>,
    ) -> Result<Tensor2, E> {
        Tensor2::try_from_fn(|mu, nu| f(&self.entries[mu][nu]))
    }

    /// Whether every off-diagonal entry is a literal zero.
    pub fn is_diagonal(&self) -> bool {
        (0..DIM).all(|mu| (0..DIM).all(|nu| mu == nu || self.entries[mu][nu].is_zero()))
    }

    /// The first structurally nonzero off-diagonal position, if any.
    pub fn first_off_diagonal(&self) -> Option<(usize, usize)> {
        (0..DIM)
            .flat_map(|mu| (0..DIM).map(move |nu| (mu, nu)))
            .find(|&(mu, nu)| mu != nu && !self.entries[mu][nu].is_zero())
    }

    /// Check the symmetry invariant algebraically: `entry[i][j]` must equal
    /// `entry[j][i]` for every pair.
    ///
    /// Fails with [`GeometryError::AsymmetricTensor`] at the first violating
    /// pair; simplification-budget overruns during the comparison propagate
    /// as [`GeometryError::Simplify`].
    pub fn require_symmetric(&self, opts: &SimplifyOptions) -> Result<(), GeometryError> {
        for mu in 0..DIM {
            for nu in (mu + 1)..DIM {
                if !algebraically_equal(&self.entries[mu][nu], &self.entries[nu][mu], opts)? {
                    return Err(GeometryError::AsymmetricTensor { row: mu, col: nu });
                }
            }
        }
        Ok(())
    }
}
