use std::fmt;
use std::rc::Rc;

use crate::expr::{EvalError, Expr, Type, Value};

/// The closed operator set. Every variant implements the same contract:
/// arity, ordered argument types, return type, a unit search weight, an
/// evaluation function and a render template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Concat,
    Left,
    Right,
}

/// Catalog for the integer domain.
pub const ARITHMETIC: &[Op] = &[Op::Add, Op::Sub, Op::Mul, Op::Div];

/// Catalog for the string domain.
pub const STRING: &[Op] = &[Op::Concat, Op::Left, Op::Right];

impl Op {
    pub fn arity(&self) -> usize {
        self.arg_types().len()
    }

    pub fn arg_types(&self) -> &'static [Type] {
        match self {
            Op::Add | Op::Sub | Op::Mul | Op::Div => &[Type::Int, Type::Int],
            Op::Concat => &[Type::Str, Type::Str],
            Op::Left | Op::Right => &[Type::Str, Type::Int],
        }
    }

    pub fn return_type(&self) -> Type {
        match self {
            Op::Add | Op::Sub | Op::Mul | Op::Div => Type::Int,
            Op::Concat | Op::Left | Op::Right => Type::Str,
        }
    }

    /// Cost the operator adds on top of its operands. Constant for the
    /// current set, but kept per-operator so future ones can differ.
    pub fn weight(&self) -> usize {
        1
    }

    /// Applies the operator to already-evaluated operands. Undefined
    /// arithmetic comes back as an `EvalError`, not a panic.
    pub fn apply(&self, operands: &[Value]) -> Result<Value, EvalError> {
        match self {
            Op::Add => {
                let (x, y) = self.int_operands(operands)?;
                x.checked_add(y).map(Value::Int).ok_or(EvalError::Overflow)
            },
            Op::Sub => {
                let (x, y) = self.int_operands(operands)?;
                x.checked_sub(y).map(Value::Int).ok_or(EvalError::Overflow)
            },
            Op::Mul => {
                let (x, y) = self.int_operands(operands)?;
                x.checked_mul(y).map(Value::Int).ok_or(EvalError::Overflow)
            },
            Op::Div => {
                let (x, y) = self.int_operands(operands)?;
                if y == 0 {
                    return Err(EvalError::DivisionByZero);
                }

                x.checked_div(y).map(Value::Int).ok_or(EvalError::Overflow)
            },
            Op::Concat => {
                let (x, y) = self.str_operands(operands)?;
                Ok(Value::Str(format!("{x}{y}")))
            },
            Op::Left => {
                let (s, n) = self.slice_operands(operands)?;
                Ok(Value::Str(take_left(s, n)))
            },
            Op::Right => {
                let (s, n) = self.slice_operands(operands)?;
                Ok(Value::Str(take_right(s, n)))
            },
        }
    }

    /// Writes the canonical call form: infix and parenthesized for the
    /// arithmetic symbols, `Name(args)` for the string operators.
    pub fn fmt_call(&self, f: &mut fmt::Formatter<'_>, args: &[Rc<Expr>]) -> fmt::Result {
        match self {
            Op::Add => write!(f, "({} + {})", args[0], args[1]),
            Op::Sub => write!(f, "({} - {})", args[0], args[1]),
            Op::Mul => write!(f, "({} * {})", args[0], args[1]),
            Op::Div => write!(f, "({} / {})", args[0], args[1]),
            Op::Concat => write!(f, "Concat({}, {})", args[0], args[1]),
            Op::Left => write!(f, "Left({}, {})", args[0], args[1]),
            Op::Right => write!(f, "Right({}, {})", args[0], args[1]),
        }
    }

    fn int_operands(&self, operands: &[Value]) -> Result<(i64, i64), EvalError> {
        match operands {
            [Value::Int(x), Value::Int(y)] => Ok((*x, *y)),
            _ => Err(EvalError::TypeMismatch { op: *self }),
        }
    }

    fn str_operands<'a>(&self, operands: &'a [Value]) -> Result<(&'a str, &'a str), EvalError> {
        match operands {
            [Value::Str(x), Value::Str(y)] => Ok((x, y)),
            _ => Err(EvalError::TypeMismatch { op: *self }),
        }
    }

    fn slice_operands<'a>(&self, operands: &'a [Value]) -> Result<(&'a str, i64), EvalError> {
        match operands {
            [Value::Str(s), Value::Int(n)] => Ok((s, *n)),
            _ => Err(EvalError::TypeMismatch { op: *self }),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Op::Add => "Add",
            Op::Sub => "Subtract",
            Op::Mul => "Multiply",
            Op::Div => "Divide",
            Op::Concat => "Concat",
            Op::Left => "Left",
            Op::Right => "Right",
        };

        write!(f, "{name}")
    }
}

// The two slice helpers keep Python's clamping rules, which the operator
// semantics were defined in terms of: counts beyond the string length
// saturate, negative counts index from the opposite end, and `Right(s, 0)`
// is the whole string. Counting is per character, not per byte.

fn take_left(s: &str, n: i64) -> String {
    let len = s.chars().count() as i64;
    let keep = if n < 0 { (len + n).max(0) } else { n.min(len) };

    s.chars().take(keep as usize).collect()
}

fn take_right(s: &str, n: i64) -> String {
    let len = s.chars().count() as i64;
    let skip = if n > 0 { (len - n).max(0) } else { (-n).min(len) };

    s.chars().skip(skip as usize).collect()
}
