use std::collections::HashSet;
use std::rc::Rc;

use log::{debug, info};

use crate::examples::{check_examples, Example, ExampleError, Signature};
use crate::expr::{Expr, Type, Value};
use crate::oracle::Oracle;
use crate::ops::Op;

/// A program the search settled on: the tree itself plus the derived facts
/// a caller usually wants without re-walking it.
#[derive(Debug, Clone)]
pub struct Synthesized {
    pub expr: Rc<Expr>,
    pub rendering: String,
    pub weight: usize,
    pub ty: Type,
}

/// How a search run ended. Exhaustion is a normal negative result, not an
/// error; `levels` is the number of weight bounds that were explored.
#[derive(Debug, Clone)]
pub enum Outcome {
    Found(Synthesized),
    Exhausted { levels: usize },
}

struct BankEntry {
    expr: Rc<Expr>,
    weight: usize,
}

/// The append-only collection of distinct programs discovered so far.
/// Distinctness is by canonical rendering; the rendering set doubles as the
/// O(1) syntactic dedup check.
#[derive(Default)]
pub struct ProgramBank {
    entries: Vec<BankEntry>,
    renderings: HashSet<String>,
}

impl ProgramBank {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn expr(&self, idx: usize) -> &Rc<Expr> {
        &self.entries[idx].expr
    }

    pub fn weight(&self, idx: usize) -> usize {
        self.entries[idx].weight
    }

    pub fn ty(&self, idx: usize) -> Type {
        self.entries[idx].expr.ty()
    }

    pub fn contains(&self, rendering: &str) -> bool {
        self.renderings.contains(rendering)
    }

    /// Appends a program unless its rendering is already present. Returns
    /// whether the bank grew.
    pub fn insert(&mut self, expr: Rc<Expr>, rendering: String, weight: usize) -> bool {
        if self.renderings.contains(&rendering) {
            return false;
        }

        self.renderings.insert(rendering);
        self.entries.push(BankEntry { expr, weight });

        true
    }
}

/// Odometer over the index combinations an operator is applied to:
/// non-decreasing tuples below `bound`, in lexicographic order. Operand
/// order inside a combination therefore follows bank insertion order, and
/// the operator is applied positionally to that order.
pub struct ComboIdx {
    idxs: Vec<usize>,
    bound: usize,
    done: bool,
}

impl ComboIdx {
    pub fn new(arity: usize, bound: usize) -> Self {
        Self {
            idxs: vec![0; arity],
            bound,
            done: arity > 0 && bound == 0,
        }
    }

    pub fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }

        let res = self.idxs.clone();
        self.increment();

        Some(res)
    }

    fn increment(&mut self) {
        for p in (0..self.idxs.len()).rev() {
            if self.idxs[p] + 1 < self.bound {
                let v = self.idxs[p] + 1;
                self.idxs[p..].fill(v);
                return;
            }
        }

        self.done = true;
    }
}

/// Bottom-up enumerative search over one example set and operator catalog.
///
/// The bank is seeded with leaves mined from the examples; each weight
/// level then applies every catalog operator to combinations of existing
/// programs, keeps the syntactically and behaviorally new ones, and returns
/// the first candidate that reproduces every expected output.
pub struct Synthesis<'a> {
    oracle: Oracle<'a>,
    catalog: &'a [Op],
    bank: ProgramBank,
    max_weight: usize,
}

impl<'a> Synthesis<'a> {
    /// Validates the example set and seeds the bank. Seeding order is
    /// fixed: distinct input literals in first-appearance order, the
    /// literal `1` if it was not mined, then one variable per argument
    /// position.
    pub fn new(
        examples: &'a [Example],
        catalog: &'a [Op],
        max_weight: usize,
    ) -> Result<Self, ExampleError> {
        let signature = check_examples(examples)?;
        let bank = Self::seed_bank(examples, &signature);

        info!(
            "seeded bank with {} leaves for {} examples (arity {})",
            bank.len(),
            examples.len(),
            signature.arity,
        );

        Ok(Self {
            oracle: Oracle::new(examples),
            catalog,
            bank,
            max_weight,
        })
    }

    fn seed_bank(examples: &[Example], signature: &Signature) -> ProgramBank {
        let mut bank = ProgramBank::default();
        let mut mined_one = false;

        for example in examples {
            for value in &example.input {
                mined_one |= *value == Value::Int(1);

                let leaf = Rc::new(Expr::Const(value.clone()));
                let rendering = leaf.to_string();
                bank.insert(leaf, rendering, 1);
            }
        }

        if !mined_one {
            let one = Rc::new(Expr::Const(Value::Int(1)));
            let rendering = one.to_string();
            bank.insert(one, rendering, 1);
        }

        for (position, ty) in signature.arg_types.iter().enumerate() {
            let leaf = Rc::new(Expr::Arg(position, *ty));
            let rendering = leaf.to_string();
            bank.insert(leaf, rendering, 1);
        }

        bank
    }

    pub fn bank(&self) -> &ProgramBank {
        &self.bank
    }

    /// Runs level after level until a program satisfies every example or
    /// the weight bound is exhausted.
    pub fn run(mut self) -> Outcome {
        for w in 2..=self.max_weight {
            info!("weight bound {w}: bank holds {} programs", self.bank.len());

            if let Some(found) = self.grow_level(w) {
                info!("found: {} (weight {})", found.rendering, found.weight);
                return Outcome::Found(found);
            }
        }

        let levels = self.max_weight.saturating_sub(1);
        info!(
            "no program found: {levels} weight levels explored, bank holds {} programs",
            self.bank.len(),
        );

        Outcome::Exhausted { levels }
    }

    /// One enumeration pass at weight bound `w`. Every operator ranges over
    /// the bank as it stood when that operator's pass began, so operators
    /// later in the catalog see programs appended by earlier ones within
    /// the same level. Combinations whose summed operand weights exceed `w`
    /// are skipped; anything below the bound was already materialized at an
    /// earlier level and collapses in the dedup filters.
    pub fn grow_level(&mut self, w: usize) -> Option<Synthesized> {
        for &op in self.catalog {
            let snapshot = self.bank.len();
            let mut combos = ComboIdx::new(op.arity(), snapshot);

            while let Some(idxs) = combos.next() {
                if !self.signature_matches(op, &idxs) {
                    continue;
                }

                let operand_weight = idxs.iter().map(|&i| self.bank.weight(i)).sum::<usize>();
                if operand_weight > w {
                    continue;
                }

                let args = idxs.iter().map(|&i| Rc::clone(self.bank.expr(i))).collect();
                let cand = Rc::new(Expr::app(op, args));
                let rendering = cand.to_string();
                let weight = operand_weight + op.weight();

                debug!("try: {rendering}");

                if !self.bank.contains(&rendering) && !self.seen_behavior(&cand) {
                    self.bank.insert(Rc::clone(&cand), rendering.clone(), weight);
                }

                // The satisfaction check runs whether or not the candidate
                // survived dedup: one that collapses into an existing entry
                // can still be the answer.
                if self.oracle.satisfies(&cand) {
                    let ty = cand.ty();
                    return Some(Synthesized { expr: cand, rendering, weight, ty });
                }
            }
        }

        None
    }

    fn signature_matches(&self, op: Op, idxs: &[usize]) -> bool {
        idxs.iter()
            .zip(op.arg_types())
            .all(|(&i, ty)| self.bank.ty(i) == *ty)
    }

    fn seen_behavior(&self, cand: &Expr) -> bool {
        (0..self.bank.len()).any(|i| self.oracle.equivalent(cand, self.bank.expr(i)))
    }
}

/// Searches for the smallest program over `catalog` that reproduces every
/// example, trying weight bounds 2 through `max_weight` inclusive. Fails
/// fast on a malformed example set, before any search step runs.
pub fn synthesize(
    examples: &[Example],
    catalog: &[Op],
    max_weight: usize,
) -> Result<Outcome, ExampleError> {
    Ok(Synthesis::new(examples, catalog, max_weight)?.run())
}
