//! Interned symbols and opaque function atoms.
//!
//! A [`Symbol`] is an immutable, cheaply cloneable identifier. Symbolic
//! equality throughout the workspace depends on symbol identity, so every
//! component of a computation must share the same symbols -- callers thread
//! a single symbol context through the pipeline instead of minting fresh
//! symbols ad hoc.
//!
//! A [`FuncAtom`] is an opaque scalar function of a fixed list of symbols,
//! carrying a derivative multi-index (one order per argument). The warp
//! profile `f(r, t)` and every partial derivative of it (`f_t`, `f_rr`,
//! `f_rt`, ...) are all `FuncAtom`s that differ only in their orders. The
//! atom is opaque: nothing is known about it except how it responds to
//! differentiation and substitution.

use std::fmt;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Symbol
// ---------------------------------------------------------------------------

/// An interned symbolic identifier.
///
/// Equality, ordering, and hashing are by name. Clones share the underlying
/// allocation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(Arc<str>);

impl Symbol {
    /// Create a symbol with the given name.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty.
    pub fn new(name: &str) -> Self {
        assert!(!name.is_empty(), "symbol name must be non-empty");
        Symbol(Arc::from(name))
    }

    /// The symbol's name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// FuncAtom
// ---------------------------------------------------------------------------

/// An opaque scalar function of a fixed argument list, with a derivative
/// multi-index.
///
/// `orders[i]` is the number of times the function has been differentiated
/// with respect to `args[i]`. Two atoms are equal iff name, arguments, and
/// orders all match, so `f`, `f_t`, and `f_rt` are three distinct atoms.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FuncAtom {
    name: Symbol,
    args: Vec<Symbol>,
    orders: Vec<u32>,
}

impl FuncAtom {
    /// Create an undifferentiated function atom of the given arguments.
    ///
    /// # Panics
    ///
    /// Panics if `args` is empty or contains a duplicate symbol.
    pub fn new(name: Symbol, args: Vec<Symbol>) -> Self {
        assert!(!args.is_empty(), "function atom must have at least one argument");
        for (i, a) in args.iter().enumerate() {
            assert!(
                !args[..i].contains(a),
                "duplicate function argument: {a}"
            );
        }
        let orders = vec![0; args.len()];
        FuncAtom { name, args, orders }
    }

    /// The function's name symbol.
    pub fn name(&self) -> &Symbol {
        &self.name
    }

    /// The ordered argument symbols.
    pub fn args(&self) -> &[Symbol] {
        &self.args
    }

    /// The derivative multi-index, parallel to [`args`](Self::args).
    pub fn orders(&self) -> &[u32] {
        &self.orders
    }

    /// The derivative order with respect to `var`, or `None` if `var` is not
    /// an argument.
    pub fn order_of(&self, var: &Symbol) -> Option<u32> {
        self.args
            .iter()
            .position(|a| a == var)
            .map(|i| self.orders[i])
    }

    /// Total derivative order (sum of the multi-index).
    pub fn total_order(&self) -> u32 {
        self.orders.iter().sum()
    }

    /// Whether this atom carries no derivatives at all.
    pub fn is_undifferentiated(&self) -> bool {
        self.orders.iter().all(|&o| o == 0)
    }

    /// The atom obtained by differentiating once with respect to `var`.
    ///
    /// Returns `None` if `var` is not an argument (the derivative of an
    /// opaque function with respect to a foreign symbol is zero, which the
    /// expression layer handles).
    pub fn differentiate(&self, var: &Symbol) -> Option<FuncAtom> {
        let i = self.args.iter().position(|a| a == var)?;
        let mut next = self.clone();
        next.orders[i] += 1;
        Some(next)
    }

    /// The atom with the given derivative multi-index applied on top of an
    /// undifferentiated copy of `self`.
    pub fn with_orders(&self, orders: &[u32]) -> FuncAtom {
        assert_eq!(
            orders.len(),
            self.args.len(),
            "derivative multi-index length must match argument count"
        );
        FuncAtom {
            name: self.name.clone(),
            args: self.args.clone(),
            orders: orders.to_vec(),
        }
    }
}

impl fmt::Display for FuncAtom {
    /// Renders as `f` for the undifferentiated atom, `f_rt` style subscripts
    /// otherwise (each argument name repeated per derivative order).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.is_undifferentiated() {
            f.write_str("_")?;
            for (arg, &order) in self.args.iter().zip(&self.orders) {
                for _ in 0..order {
                    write!(f, "{arg}")?;
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
