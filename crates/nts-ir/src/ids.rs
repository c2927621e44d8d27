//! Arena index types.
//!
//! The original implementation this crate's model is grounded on identifies
//! variables, states and transitions by pointer and leans on pointer
//! identity for hashing and equality. Rust arenas don't get to cheat that
//! way once values move, so every node is addressed by a small `Copy`
//! newtype index into the arena that owns it instead.

use std::fmt;

macro_rules! index_type {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl $name {
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl From<usize> for $name {
            fn from(v: usize) -> Self {
                $name(v as u32)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

index_type!(VarId);
index_type!(StateId);
index_type!(TransitionId);
index_type!(InstanceId);
