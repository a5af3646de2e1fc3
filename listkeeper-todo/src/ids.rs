//! Identifier types and allocation
//!
//! Ids are plain integers scoped to a session (lists) or to a list (todos).
//! A new id is always derived from the entities that exist right now, so the
//! allocator stays correct after deletions without a separate counter.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw integer id
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// The raw integer value
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<u64>().map(Self)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

define_id!(
    /// Identifier of a todo list, unique within a session
    ListId
);

define_id!(
    /// Identifier of a todo, unique within its list
    TodoId
);

/// Anything carrying an integer id that [`next_id`] can allocate after
pub trait Identified {
    /// Raw integer id of this entity
    fn raw_id(&self) -> u64;
}

/// Next free id: the largest id in `entities` plus one, or 1 when empty.
///
/// ```rust
/// use listkeeper_todo::{next_id, Identified};
///
/// struct Row(u64);
/// impl Identified for Row {
///     fn raw_id(&self) -> u64 { self.0 }
/// }
///
/// assert_eq!(next_id::<Row>(&[]), 1);
/// assert_eq!(next_id(&[Row(1), Row(3)]), 4);
/// ```
pub fn next_id<T: Identified>(entities: &[T]) -> u64 {
    entities
        .iter()
        .map(Identified::raw_id)
        .max()
        .unwrap_or(0)
        + 1
}

/// Like [`next_id`], but never returns a value at or below `high_water`.
///
/// `high_water` is the largest id ever handed out in this scope, which keeps
/// ids of deleted entities from being reassigned.
pub(crate) fn next_id_above<T: Identified>(entities: &[T], high_water: u64) -> u64 {
    next_id(entities).max(high_water + 1)
}
