use crate::term::Term;
use crate::var::VarUse;

/// A quantifier-free (save for the one `Quantified` case the original
/// carries for array havocs) first-order formula over integer terms.
///
/// This is deliberately thin: just enough structure for the footprint
/// analyzer and the `always_enabled` syntactic check (condition C0) to walk.
/// It is not a symbolic-evaluation engine (non-goal).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formula {
    And(Vec<Formula>),
    Not(Box<Formula>),
    Quantified {
        bound: VarUse,
        body: Box<Formula>,
    },
    Atomic(AtomicProposition),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtomicProposition {
    /// `lhs relop rhs`.
    Relation(RelOp, Term, Term),
    /// A bare boolean-valued term used as a proposition (e.g. a boolean
    /// variable reference).
    BooleanTerm(Term),
    /// `var' = havoc()`: the primed variable may take any value.
    Havoc(VarUse),
    /// `arr'[index] = value`, leaving all other slots of `arr` unchanged.
    ArrayWrite {
        array: VarUse,
        index: Term,
        value: Term,
    },
}

impl Formula {
    pub fn and(parts: impl IntoIterator<Item = Formula>) -> Self {
        Formula::And(parts.into_iter().collect())
    }

    /// Top-level conjuncts, treating a non-`And` formula as a singleton
    /// conjunction of itself. Several passes (footprint, C0) only ever care
    /// about what appears at the top of the conjunction.
    pub fn top_level_conjuncts(&self) -> &[Formula] {
        match self {
            Formula::And(parts) => parts,
            other => std::slice::from_ref(other),
        }
    }
}
