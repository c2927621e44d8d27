//! A minimal textual rendering of an [`Nts`], used for `-o`/`--inliner-output`
//! and by `nts-frontend`'s reference loader as its round-trip format.
//!
//! This is not an attempt to match any external NTS tool's syntax —
//! compatibility with a particular wire format is explicitly out of scope —
//! it exists so a user can eyeball a result and so the test suite has a
//! human-readable fixture format to write by hand.

use std::fmt;

use crate::formula::{AtomicProposition, Formula, RelOp};
use crate::nts::Nts;
use crate::state::Annotation;
use crate::term::{ArithOp, Term};
use crate::transition::TransitionRule;
use crate::var::VarKind;

impl fmt::Display for Nts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "nts {} {{", self.name)?;
        for g in self.globals() {
            write!(f, "  global {} : {}", g.name, kind_str(g.kind))?;
            if let Some(origin) = &g.origin {
                write!(f, " @origin(\"{origin}\")")?;
            }
            writeln!(f, ";")?;
        }
        for bnts in self.basic_ntses() {
            writeln!(f, "  basic_nts {} {{", bnts.name)?;
            for v in bnts.locals() {
                write!(f, "    var {} : {}", v.name, kind_str(v.kind))?;
                if let Some(origin) = &v.origin {
                    write!(f, " @origin(\"{origin}\")")?;
                }
                writeln!(f, ";")?;
            }
            for s in bnts.states() {
                write!(f, "    state {}", s.name)?;
                if s.is_initial {
                    write!(f, " init")?;
                }
                if s.is_final {
                    write!(f, " final")?;
                }
                if s.is_error {
                    write!(f, " error")?;
                }
                for a in &s.annotations {
                    match a {
                        Annotation::Origin(o) => write!(f, " @origin(\"{o}\")")?,
                        Annotation::Other { name, value } => write!(f, " @{name}(\"{value}\")")?,
                    }
                }
                writeln!(f, ";")?;
            }
            for t in bnts.transitions() {
                write!(f, "    {} -> {} : ", t.from, t.to)?;
                write_rule(f, &t.rule)?;
                writeln!(f, ";")?;
            }
            writeln!(f, "  }}")?;
        }
        for inst in self.instances() {
            writeln!(f, "  instance {};", inst.basic_nts_name)?;
        }
        writeln!(f, "}}")
    }
}

fn kind_str(kind: VarKind) -> &'static str {
    match kind {
        VarKind::Int => "int",
        VarKind::Array => "array",
    }
}

fn write_rule(f: &mut fmt::Formatter<'_>, rule: &TransitionRule) -> fmt::Result {
    match rule {
        TransitionRule::Formula(formula) => write_formula(f, formula),
        TransitionRule::Call { callee, inputs, outputs } => {
            write!(f, "call {callee}(")?;
            for (i, t) in inputs.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write_term(f, t)?;
            }
            write!(f, ") -> (")?;
            for (i, v) in outputs.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write_var_use(f, v)?;
            }
            write!(f, ")")
        }
    }
}

fn write_formula(f: &mut fmt::Formatter<'_>, formula: &Formula) -> fmt::Result {
    match formula {
        Formula::And(parts) => {
            write!(f, "(")?;
            for (i, p) in parts.iter().enumerate() {
                if i > 0 {
                    write!(f, " && ")?;
                }
                write_formula(f, p)?;
            }
            write!(f, ")")
        }
        Formula::Not(inner) => {
            write!(f, "!(")?;
            write_formula(f, inner)?;
            write!(f, ")")
        }
        Formula::Quantified { bound, body } => {
            write!(f, "forall ")?;
            write_var_use(f, bound)?;
            write!(f, ". ")?;
            write_formula(f, body)
        }
        Formula::Atomic(ap) => write_atomic(f, ap),
    }
}

fn write_atomic(f: &mut fmt::Formatter<'_>, ap: &AtomicProposition) -> fmt::Result {
    match ap {
        AtomicProposition::Relation(op, lhs, rhs) => {
            write_term(f, lhs)?;
            write!(f, " {} ", relop_str(*op))?;
            write_term(f, rhs)
        }
        AtomicProposition::BooleanTerm(t) => write_term(f, t),
        AtomicProposition::Havoc(v) => {
            write_var_use(f, &v.with_primed(true))?;
            write!(f, " = havoc()")
        }
        AtomicProposition::ArrayWrite { array, index, value } => {
            write_var_use(f, &array.with_primed(true))?;
            write!(f, "[")?;
            write_term(f, index)?;
            write!(f, "] = ")?;
            write_term(f, value)
        }
    }
}

fn write_term(f: &mut fmt::Formatter<'_>, term: &Term) -> fmt::Result {
    match term {
        Term::Var(v) => write_var_use(f, v),
        Term::IntConst(n) => write!(f, "{n}"),
        Term::ThreadId => write!(f, "tid"),
        Term::Minus(inner) => {
            write!(f, "-(")?;
            write_term(f, inner)?;
            write!(f, ")")
        }
        Term::Arith(op, lhs, rhs) => {
            write!(f, "(")?;
            write_term(f, lhs)?;
            write!(f, " {} ", arith_str(*op))?;
            write_term(f, rhs)?;
            write!(f, ")")
        }
        Term::Array(v, index) => {
            write_var_use(f, v)?;
            write!(f, "[")?;
            write_term(f, index)?;
            write!(f, "]")
        }
    }
}

fn write_var_use(f: &mut fmt::Formatter<'_>, v: &crate::var::VarUse) -> fmt::Result {
    write!(
        f,
        "{}{}{}",
        if v.global { "g" } else { "l" },
        v.var,
        if v.primed { "'" } else { "" }
    )
}

fn relop_str(op: RelOp) -> &'static str {
    match op {
        RelOp::Eq => "=",
        RelOp::Ne => "!=",
        RelOp::Lt => "<",
        RelOp::Le => "<=",
        RelOp::Gt => ">",
        RelOp::Ge => ">=",
    }
}

fn arith_str(op: ArithOp) -> &'static str {
    match op {
        ArithOp::Add => "+",
        ArithOp::Sub => "-",
        ArithOp::Mul => "*",
        ArithOp::Div => "/",
        ArithOp::Mod => "%",
    }
}
