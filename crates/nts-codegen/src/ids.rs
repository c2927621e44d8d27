/// The target `Nts`'s variable ids are ordinary [`nts_ir::VarId`]s scoped to
/// the generated `main` template/its globals; this newtype exists only so
/// [`crate::rebind::VarRebinder`]'s maps can't be confused with maps keyed
/// by an *input*-side [`nts_ir::VarId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetVarId(pub nts_ir::VarId);
