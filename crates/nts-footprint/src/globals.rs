use ahash::AHashSet;
use nts_ir::VarId;

/// The set of globals a transition (or a task, once footprints are unioned
/// across all of a task's outgoing transitions) may write.
///
/// `everything` is the conservative fallback used when a formula's
/// top-level conjunction contains no `havoc` atom to pin down which
/// variables a wildcard write actually touches (see
/// [`crate::footprint::footprint`]); once set it dominates every other
/// write, matching the C++ original's `GlobalWrites::insert_everything`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalWrites {
    vars: AHashSet<VarId>,
    everything: bool,
}

impl GlobalWrites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn everything() -> Self {
        GlobalWrites {
            vars: AHashSet::default(),
            everything: true,
        }
    }

    pub fn is_everything(&self) -> bool {
        self.everything
    }

    pub fn insert(&mut self, var: VarId) {
        self.vars.insert(var);
    }

    pub fn insert_everything(&mut self) {
        self.everything = true;
    }

    pub fn contains(&self, var: VarId) -> bool {
        self.everything || self.vars.contains(&var)
    }

    pub fn vars(&self) -> impl Iterator<Item = VarId> + '_ {
        self.vars.iter().copied()
    }

    pub fn union_with(&mut self, other: &GlobalWrites) {
        if other.everything {
            self.everything = true;
        }
        for v in &other.vars {
            self.vars.insert(*v);
        }
    }
}

/// The set of globals a transition may read. Unlike writes there is no
/// "everything" sentinel for reads: the original never needed one, since a
/// read of an unmentioned global simply doesn't collide with anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalReads {
    vars: AHashSet<VarId>,
}

impl GlobalReads {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, var: VarId) {
        self.vars.insert(var);
    }

    pub fn contains(&self, var: VarId) -> bool {
        self.vars.contains(&var)
    }

    pub fn vars(&self) -> impl Iterator<Item = VarId> + '_ {
        self.vars.iter().copied()
    }

    pub fn union_with(&mut self, other: &GlobalReads) {
        for v in &other.vars {
            self.vars.insert(*v);
        }
    }
}

/// A transition's (or a task's) global read/write footprint, and the
/// predicate the POR visitor's C1 check uses to decide whether two
/// footprints may interfere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Globals {
    pub reads: GlobalReads,
    pub writes: GlobalWrites,
}

impl Globals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn union_with(&mut self, other: &Globals) {
        self.reads.union_with(&other.reads);
        self.writes.union_with(&other.writes);
    }

    /// True iff `self` and `other` may interfere: either writes everything,
    /// or some variable is written by one side and read-or-written by the
    /// other. Symmetric by construction — grounded directly on the original
    /// `Globals::may_collide_with`.
    pub fn may_collide_with(&self, other: &Globals) -> bool {
        if self.writes.is_everything() || other.writes.is_everything() {
            return true;
        }
        for v in self.writes.vars() {
            if other.reads.contains(v) || other.writes.contains(v) {
                return true;
            }
        }
        for v in other.writes.vars() {
            if self.reads.contains(v) || self.writes.contains(v) {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(n: u32) -> VarId {
        VarId(n)
    }

    #[test]
    fn disjoint_footprints_do_not_collide() {
        let mut a = Globals::new();
        a.writes.insert(v(0));
        let mut b = Globals::new();
        b.writes.insert(v(1));
        assert!(!a.may_collide_with(&b));
        assert!(!b.may_collide_with(&a));
    }

    #[test]
    fn write_read_overlap_collides() {
        let mut a = Globals::new();
        a.writes.insert(v(0));
        let mut b = Globals::new();
        b.reads.insert(v(0));
        assert!(a.may_collide_with(&b));
        assert!(b.may_collide_with(&a));
    }

    #[test]
    fn everything_always_collides() {
        let mut a = Globals::new();
        a.writes.insert_everything();
        let b = Globals::new();
        assert!(a.may_collide_with(&b));
        assert!(b.may_collide_with(&a));
    }

    #[test]
    fn union_propagates_everything() {
        let mut a = GlobalWrites::new();
        let mut b = GlobalWrites::everything();
        a.union_with(&b);
        assert!(a.is_everything());
        b.union_with(&GlobalWrites::new());
        assert!(b.is_everything());
    }
}
