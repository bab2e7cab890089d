//! # Channel handles

use crate::{key::Key, registry::Registry};
use std::{any::Any, cmp::Ordering, num::NonZeroU64};

mod state;

#[cfg(test)]
mod test;

pub use state::HandleState;

/// Identity of one slot inside one registry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct SlotId {
    pub(crate) registry: NonZeroU64,
    pub(crate) index: u32,
}

/// A reference to a channel in a [Registry]
///
/// Handles are cheap to copy; every copy refers to the same channel.
/// Equality is channel identity: two handles are equal only when both are
/// valid and refer to the same slot of the same registry. An invalid handle
/// is not even equal to itself, which is why `Handle` is `PartialEq` but not
/// `Eq`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Handle {
    type_key: Key,
    name_key: Key,
    slot: Option<SlotId>,
}

impl Handle {
    /// A handle that refers to no channel
    pub const fn invalid() -> Self {
        Self {
            type_key: Key::INVALID,
            name_key: Key::INVALID,
            slot: None,
        }
    }

    pub(crate) fn new(type_key: Key, name_key: Key, slot: SlotId) -> Self {
        Self {
            type_key,
            name_key,
            slot: Some(slot),
        }
    }

    pub(crate) fn slot(&self) -> Option<SlotId> {
        self.slot
    }

    /// The channel type
    pub fn type_key(&self) -> Key {
        self.type_key
    }

    /// The channel name
    pub fn name_key(&self) -> Key {
        self.name_key
    }

    /// Returns true if both keys are valid and the handle refers to a channel
    pub fn is_valid(&self) -> bool {
        self.type_key.is_valid() && self.name_key.is_valid() && self.slot.is_some()
    }

    /// Returns true if this handle was created for `type_key` and `name_key`
    pub fn is(&self, type_key: impl Into<Key>, name_key: impl Into<Key>) -> bool {
        self.type_key == type_key.into() && self.name_key == name_key.into()
    }

    /// Display order: by name only, ascending
    ///
    /// Handles with the same name but different types compare equal here.
    pub fn cmp_by_name(&self, other: &Self) -> Ordering {
        self.name_key.cmp(&other.name_key)
    }

    /// Returns a copy of the channel value if it holds a `T`
    pub fn data<T: Any + Clone>(&self, registry: &Registry) -> Option<T> {
        registry.channel_data(self)
    }
}

impl PartialEq for Handle {
    fn eq(&self, other: &Self) -> bool {
        match (self.slot, other.slot) {
            (Some(lhs), Some(rhs)) => lhs == rhs,
            _ => false,
        }
    }
}

/// Returns true if `lhs` sorts before `rhs` by name
pub fn less_than(lhs: &Handle, rhs: &Handle) -> bool {
    lhs.cmp_by_name(rhs) == Ordering::Less
}
