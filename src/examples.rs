use thiserror::Error;

use crate::expr::{Type, Value};

/// One input/output pair. The input vector positions are what `Expr::Arg`
/// leaves index into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    pub input: Vec<Value>,
    pub output: Value,
}

/// Arity and per-position argument types shared by every example in a
/// validated set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub arity: usize,
    pub arg_types: Vec<Type>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExampleError {
    #[error("example set is empty")]
    Empty,
    #[error("example {example} has {found} inputs, expected {expected}; all input vectors must have the same length")]
    MismatchedArity {
        example: usize,
        expected: usize,
        found: usize,
    },
    #[error("argument x{position} of example {example} has an inconsistent type")]
    InconsistentTypes { example: usize, position: usize },
}

/// Validates an example set before any search step runs: every input
/// vector must have the same length, and each position must hold the same
/// type across all examples. On success the shared signature is returned;
/// it is what the variable leaves are derived from.
pub fn check_examples(examples: &[Example]) -> Result<Signature, ExampleError> {
    let first = examples.first().ok_or(ExampleError::Empty)?;
    let arg_types = first.input.iter().map(Value::ty).collect::<Vec<_>>();

    for (idx, example) in examples.iter().enumerate().skip(1) {
        if example.input.len() != arg_types.len() {
            return Err(ExampleError::MismatchedArity {
                example: idx,
                expected: arg_types.len(),
                found: example.input.len(),
            });
        }

        for (position, (arg, expected)) in
            example.input.iter().zip(&arg_types).enumerate()
        {
            if arg.ty() != *expected {
                return Err(ExampleError::InconsistentTypes { example: idx, position });
            }
        }
    }

    Ok(Signature { arity: arg_types.len(), arg_types })
}

macro_rules! example {
    ([$($input:expr),* $(,)?] => $output:expr) => {
        Example {
            input: vec![$(Value::from($input)),*],
            output: Value::from($output),
        }
    };
}

/// Names of the built-in example sets, in catalog order.
pub fn builtin_names() -> &'static [&'static str] {
    &[
        "addition",
        "subtraction",
        "multiplication",
        "division",
        "add_5_multiply_2",
        "multiply_add_9",
        "concatenate",
        "right",
        "left",
        "concatenate_3",
    ]
}

/// Looks up a built-in example set by name.
pub fn builtin(name: &str) -> Option<Vec<Example>> {
    let examples = match name {
        "addition" => vec![
            example!([7, 2] => 9),
            example!([8, 1] => 9),
            example!([3, 9] => 12),
            example!([5, 8] => 13),
        ],
        "subtraction" => vec![
            example!([9, 2] => 7),
            example!([6, 1] => 5),
            example!([7, 3] => 4),
            example!([8, 4] => 4),
            example!([10, 2] => 8),
        ],
        "multiplication" => vec![
            example!([2, 3] => 6),
            example!([4, 5] => 20),
            example!([7, 8] => 56),
            example!([9, 2] => 18),
            example!([3, 4] => 12),
        ],
        "division" => vec![
            example!([6, 2] => 3),
            example!([8, 4] => 2),
            example!([9, 3] => 3),
            example!([10, 5] => 2),
            example!([12, 6] => 2),
        ],
        "add_5_multiply_2" => vec![
            example!([1, 2] => 12),
            example!([3, 4] => 22),
            example!([5, 6] => 32),
            example!([7, 8] => 42),
            example!([9, 10] => 52),
        ],
        "multiply_add_9" => vec![
            example!([1, 2] => 11),
            example!([3, 4] => 21),
            example!([5, 6] => 39),
            example!([7, 8] => 65),
            example!([9, 10] => 9),
        ],
        "concatenate" => vec![
            example!(["a", "b"] => "ab"),
            example!(["c", "d"] => "cd"),
            example!(["e", "f"] => "ef"),
        ],
        "right" => vec![
            example!(["hello", 3] => "llo"),
            example!(["world", 4] => "orld"),
            example!(["fox", 1] => "x"),
        ],
        "left" => vec![
            example!(["hello", 2] => "he"),
            example!(["world", 3] => "wor"),
            example!(["fox", 2] => "fo"),
        ],
        "concatenate_3" => vec![
            example!(["a", "b", "c"] => "abc"),
            example!(["d", "e", "f"] => "def"),
            example!(["g", "h", "i"] => "ghi"),
        ],
        _ => return None,
    };

    Some(examples)
}
