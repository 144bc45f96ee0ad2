use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use crate::ops::Op;

/// Primitive type tag carried by every tree node. Argument signatures are
/// matched on these tags by value, never inferred from the tree shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Str,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Int(i64),
    Str(String),
}

impl Value {
    pub fn ty(&self) -> Type {
        match self {
            Value::Int(_) => Type::Int,
            Value::Str(_) => Type::Str,
        }
    }
}

impl From<i64> for Value {
    fn from(x: i64) -> Self {
        Value::Int(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s}"),
        }
    }
}

/// A local evaluation failure. These never abort a search: the oracle
/// treats an erroring candidate as unsatisfying and unequal to everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("argument x{position} out of range for input of length {len}")]
    ArgOutOfRange { position: usize, len: usize },
    #[error("division by zero")]
    DivisionByZero,
    #[error("arithmetic overflow")]
    Overflow,
    #[error("{op} applied to operands of the wrong type")]
    TypeMismatch { op: Op },
}

/// An immutable expression tree. Compound nodes share their children via
/// `Rc`, so a bank entry can appear as a subtree of many later candidates
/// without copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Const(Value),
    Arg(usize, Type),
    App(Op, Vec<Rc<Expr>>),
}

impl Expr {
    /// Builds a compound node. The child count must match the operator's
    /// arity; the search engine checks signatures before ever calling this.
    // NOTE: this assert failing is 100% an API misuse
    pub fn app(op: Op, args: Vec<Rc<Expr>>) -> Self {
        assert_eq!(
            args.len(),
            op.arity(),
            "operator {op} expects {} operands",
            op.arity(),
        );

        Expr::App(op, args)
    }

    pub fn ty(&self) -> Type {
        match self {
            Expr::Const(v) => v.ty(),
            Expr::Arg(_, ty) => *ty,
            Expr::App(op, _) => op.return_type(),
        }
    }

    /// Unit-cost weight: leaves weigh 1, a compound weighs its children
    /// plus the operator's own cost.
    pub fn weight(&self) -> usize {
        match self {
            Expr::Const(_) | Expr::Arg(..) => 1,
            Expr::App(op, args) => {
                op.weight() + args.iter().map(|a| a.weight()).sum::<usize>()
            },
        }
    }

    /// Evaluates the tree on one example input vector. Children are
    /// evaluated left to right in declared order, then the operator is
    /// applied to the ordered results.
    pub fn evaluate(&self, input: &[Value]) -> Result<Value, EvalError> {
        match self {
            Expr::Const(v) => Ok(v.clone()),
            Expr::Arg(position, _) => {
                input.get(*position).cloned().ok_or(EvalError::ArgOutOfRange {
                    position: *position,
                    len: input.len(),
                })
            },
            Expr::App(op, args) => {
                let mut operands = Vec::with_capacity(args.len());
                for arg in args {
                    operands.push(arg.evaluate(input)?);
                }

                op.apply(&operands)
            },
        }
    }
}

/// The canonical rendering. Two trees with equal renderings are the same
/// program as far as the bank is concerned.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(v) => write!(f, "{v}"),
            Expr::Arg(position, _) => write!(f, "x{position}"),
            Expr::App(op, args) => op.fmt_call(f, args),
        }
    }
}
