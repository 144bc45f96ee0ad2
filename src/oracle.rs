use crate::examples::Example;
use crate::expr::Expr;

/// Answers the two questions the search engine asks about candidate trees:
/// does a tree reproduce the expected outputs, and do two trees behave the
/// same on the example inputs. Both checks are pure; a candidate that fails
/// to evaluate on some input simply fails the check instead of aborting the
/// search.
pub struct Oracle<'a> {
    examples: &'a [Example],
}

impl<'a> Oracle<'a> {
    pub fn new(examples: &'a [Example]) -> Self {
        Self { examples }
    }

    /// True iff the tree's output equals the expected output on every
    /// example, compared with exact equality in example order.
    pub fn satisfies(&self, expr: &Expr) -> bool {
        self.examples.iter().all(|example| {
            match expr.evaluate(&example.input) {
                Ok(value) => value == example.output,
                Err(_) => false,
            }
        })
    }

    /// True iff both trees evaluate successfully on every example input and
    /// agree everywhere. Expected outputs play no part here: two wrong
    /// programs with the same behavior are still equivalent. An evaluation
    /// failure on either side makes the pair uncomparable, so a tree that
    /// errors is not even equivalent to itself.
    pub fn equivalent(&self, a: &Expr, b: &Expr) -> bool {
        self.examples.iter().all(|example| {
            match (a.evaluate(&example.input), b.evaluate(&example.input)) {
                (Ok(va), Ok(vb)) => va == vb,
                _ => false,
            }
        })
    }
}
