//! Floating-point evaluation of expressions.
//!
//! Used by tests and cross-checks only -- the pipeline itself never
//! approximates. Opaque function atoms cannot be evaluated; bind them first
//! with [`substitute_profile`](crate::subs::substitute_profile).

use std::collections::BTreeMap;

use num_traits::ToPrimitive;

use crate::expr::Expr;
use crate::symbol::Symbol;

/// Symbol bindings for numeric evaluation.
#[derive(Debug, Clone, Default)]
pub struct Bindings(BTreeMap<Symbol, f64>);

impl Bindings {
    pub fn new() -> Self {
        Bindings::default()
    }

    /// Bind a symbol, replacing any previous binding.
    pub fn set(mut self, sym: &Symbol, value: f64) -> Self {
        self.0.insert(sym.clone(), value);
        self
    }

    fn get(&self, sym: &Symbol) -> Option<f64> {
        self.0.get(sym).copied()
    }
}

/// Evaluation failures.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("symbol '{name}' has no binding")]
    UnboundSymbol { name: String },

    /// Opaque atoms carry no values; substitute a closed form first.
    #[error("cannot evaluate opaque function atom '{name}'")]
    OpaqueFunction { name: String },
}

/// Evaluate `expr` to an `f64` under the given bindings.
pub fn eval(expr: &Expr, bindings: &Bindings) -> Result<f64, EvalError> {
    match expr {
        Expr::Num(q) => Ok(q.to_f64().unwrap_or(f64::NAN)),
        Expr::Sym(s) => bindings.get(s).ok_or_else(|| EvalError::UnboundSymbol {
            name: s.name().to_owned(),
        }),
        Expr::Pi => Ok(std::f64::consts::PI),
        Expr::Func(atom) => Err(EvalError::OpaqueFunction {
            name: atom.to_string(),
        }),
        Expr::Add(terms) => {
            let mut acc = 0.0;
            for t in terms {
                acc += eval(t, bindings)?;
            }
            Ok(acc)
        }
        Expr::Mul(factors) => {
            let mut acc = 1.0;
            for f in factors {
                acc *= eval(f, bindings)?;
            }
            Ok(acc)
        }
        Expr::Pow(base, n) => Ok(eval(base, bindings)?.powi(*n)),
        Expr::Sin(arg) => Ok(eval(arg, bindings)?.sin()),
        Expr::Cos(arg) => Ok(eval(arg, bindings)?.cos()),
    }
}
