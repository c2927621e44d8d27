use crate::basicnts::BasicNts;
use crate::error::IrError;
use crate::instance::Instance;
use crate::transition::TransitionRule;
use crate::var::{VarKind, Variable};
use crate::ids::{InstanceId, VarId};

/// The top-level container: the global variables shared by every thread,
/// the set of templates, and the instances that run them.
///
/// This is the unit [`crate::footprint`] (in `nts-footprint`) and every
/// later stage takes as input; it is produced by the out-of-scope IR
/// provider (see the workspace's `nts-frontend` crate for the reference
/// loader this repo ships for its own tests) and, on the output side, is
/// what the codegen stage produces as its sequential result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Nts {
    pub name: String,
    globals: Vec<Variable>,
    basic_ntses: Vec<BasicNts>,
    instances: Vec<Instance>,
}

impl Nts {
    pub fn new(name: impl Into<String>) -> Self {
        Nts {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn add_global(&mut self, name: impl Into<String>, kind: VarKind) -> VarId {
        let id = VarId(self.globals.len() as u32);
        self.globals.push(Variable::new(id, name, kind));
        id
    }

    pub fn add_global_with_origin(
        &mut self,
        name: impl Into<String>,
        kind: VarKind,
        origin: impl Into<String>,
    ) -> VarId {
        let id = VarId(self.globals.len() as u32);
        self.globals.push(Variable::new(id, name, kind).with_origin(origin));
        id
    }

    pub fn globals(&self) -> &[Variable] {
        &self.globals
    }

    pub fn is_global(&self, var: VarId) -> bool {
        var.index() < self.globals.len()
    }

    pub fn add_basic_nts(&mut self, bnts: BasicNts) -> usize {
        self.basic_ntses.push(bnts);
        self.basic_ntses.len() - 1
    }

    pub fn basic_ntses(&self) -> &[BasicNts] {
        &self.basic_ntses
    }

    pub fn basic_ntses_mut(&mut self) -> &mut [BasicNts] {
        &mut self.basic_ntses
    }

    pub fn basic_nts_by_name(&self, name: &str) -> Option<&BasicNts> {
        self.basic_ntses.iter().find(|b| b.name == name)
    }

    pub fn add_instance(&mut self, basic_nts_name: impl Into<String>) -> InstanceId {
        let id = InstanceId(self.instances.len() as u32);
        let thread_id = self.instances.len();
        self.instances.push(Instance {
            id,
            basic_nts_name: basic_nts_name.into(),
            thread_id,
        });
        id
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// True iff no reachable transition is a [`TransitionRule::Call`].
    ///
    /// Every stage in this workspace assumes its input already satisfies
    /// this (inlining is the external collaborator's job, see
    /// `nts-frontend::inline`); this is the check that turns a violated
    /// assumption into a diagnosable fact instead of a silent miscompile.
    pub fn is_flat(&self) -> bool {
        self.basic_ntses.iter().all(|b| {
            b.transitions()
                .iter()
                .all(|t| !matches!(t.rule, TransitionRule::Call { .. }))
        })
    }

    /// Checks the structural preconditions every later stage in this
    /// workspace relies on rather than re-checking.
    pub fn validate(&self) -> Result<(), IrError> {
        for inst in &self.instances {
            let Some(bnts) = self.basic_nts_by_name(&inst.basic_nts_name) else {
                return Err(IrError::UnknownBasicNts(inst.basic_nts_name.clone()));
            };
            if bnts.has_ambiguous_initial_state() {
                return Err(IrError::AmbiguousInitialState(bnts.name.clone()));
            }
            if bnts.initial_state().is_none() {
                return Err(IrError::NoInitialState(bnts.name.clone()));
            }
        }
        for bnts in &self.basic_ntses {
            let flat = bnts
                .transitions()
                .iter()
                .all(|t| !matches!(t.rule, TransitionRule::Call { .. }));
            if !flat {
                return Err(IrError::NotFlat(bnts.name.clone()));
            }
        }
        Ok(())
    }
}
