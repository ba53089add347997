//! Typed arena indices.
//!
//! Ids are plain slot numbers. The graph never hands out the same slot twice.

use std::fmt;

macro_rules! arena_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub(crate) usize);

        impl $name {
            pub fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

arena_id!(NodeId, "n");
arena_id!(EdgeId, "e");
arena_id!(SubgraphId, "s");

/// Ticket handed out when a change is applied; it must be presented again, innermost first,
/// when that change is reverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChangeToken(pub(crate) u64);

impl fmt::Display for ChangeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "change#{}", self.0)
    }
}
