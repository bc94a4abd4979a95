use crate::dynamics::BodyHandle;
use std::collections::BTreeMap;

/// Unordered body pair, stored smallest handle first.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    pub body1: BodyHandle,
    pub body2: BodyHandle,
}

impl PairKey {
    #[inline]
    pub fn new(b1: BodyHandle, b2: BodyHandle) -> Self {
        let (body1, body2) = if b1 <= b2 { (b1, b2) } else { (b2, b1) };
        Self { body1, body2 }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ContactState {
    #[default]
    Separated,
    /// Impulse already applied during the current contact episode.
    Resolved,
}

/// Per-pair contact episode bookkeeping. Pairs that were never seen read as `Separated`.
#[derive(Clone, Debug, Default)]
pub struct ContactTable {
    states: BTreeMap<PairKey, ContactState>,
}

impl ContactTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, key: PairKey) -> ContactState {
        self.states.get(&key).copied().unwrap_or_default()
    }

    #[inline]
    pub fn is_resolved(&self, key: PairKey) -> bool {
        self.state(key) == ContactState::Resolved
    }

    /// Returns `true` if this starts a new episode.
    pub fn mark_resolved(&mut self, key: PairKey) -> bool {
        self.states.insert(key, ContactState::Resolved) != Some(ContactState::Resolved)
    }

    /// Ends the episode. Separated pairs are dropped rather than stored.
    pub fn mark_separated(&mut self, key: PairKey) {
        self.states.remove(&key);
    }

    /// Number of pairs currently inside a contact episode.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }
}
