//! Bottom-up enumerative synthesis of small typed expression trees from
//! input/output examples. Programs are grown smallest-first from constants
//! and variables mined out of the examples; syntactic and observational
//! dedup keep the bank to one representative per behavior.

pub mod examples;
pub mod expr;
pub mod oracle;
pub mod ops;
pub mod search;

pub use examples::{check_examples, Example, ExampleError, Signature};
pub use expr::{EvalError, Expr, Type, Value};
pub use ops::Op;
pub use search::{synthesize, Outcome, Synthesis, Synthesized};
