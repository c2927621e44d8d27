use crate::ids::StateId;

/// Annotations are an open-ended string/string bag attached to a state.
/// The only one the engine reads for itself is `Origin`, used by the task
/// decomposer to recover which source thread/task a product-state
/// slot's local state came from, and by the codegen stage to stamp
/// new origins on cloned states; everything else round-trips opaquely so a
/// textual loader/printer pair never has to understand every annotation
/// kind a frontend happens to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    Origin(String),
    Other { name: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub id: StateId,
    pub name: String,
    pub is_initial: bool,
    pub is_final: bool,
    pub is_error: bool,
    pub annotations: Vec<Annotation>,
}

impl State {
    pub fn origin(&self) -> Option<&str> {
        self.annotations.iter().find_map(|a| match a {
            Annotation::Origin(s) => Some(s.as_str()),
            Annotation::Other { .. } => None,
        })
    }

    pub fn set_origin(&mut self, origin: impl Into<String>) {
        let origin = origin.into();
        if let Some(Annotation::Origin(existing)) = self
            .annotations
            .iter_mut()
            .find(|a| matches!(a, Annotation::Origin(_)))
        {
            *existing = origin;
        } else {
            self.annotations.push(Annotation::Origin(origin));
        }
    }
}
