use crate::ids::InstanceId;

/// One running copy of a [`crate::BasicNts`] template. The sequentializer's
/// whole purpose is to replace `N` instances (the concurrent threads) with
/// one: the generated `main` template plus a single instance of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub id: InstanceId,
    pub basic_nts_name: String,
    /// Position in thread order; used only for diagnostics and for the
    /// origin annotations codegen stamps on cloned locals
    /// (`"{template} [ {thread_id} ] :: "`).
    pub thread_id: usize,
}
