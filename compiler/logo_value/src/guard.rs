//! Cycle guards for graph traversals.
//!
//! Lists can share structure and contain cycles, so every traversal that
//! can meet the same node twice carries one of these guards. Identity is
//! physical (`Handle::id`).

use rustc_hash::{FxHashMap, FxHashSet};

use crate::value::Handle;

/// Set of nodes currently on the traversal path.
///
/// Rendering inserts a node on entry and removes it on exit, so siblings
/// may revisit a node while an ancestor stays guarded until its subtree
/// unwinds.
#[derive(Default)]
pub struct VisitedSet {
    ids: FxHashSet<usize>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the node was already present.
    pub fn insert(&mut self, node: &Handle) -> bool {
        self.ids.insert(node.id())
    }

    pub fn remove(&mut self, node: &Handle) {
        self.ids.remove(&node.id());
    }

    pub fn contains(&self, node: &Handle) -> bool {
        self.ids.contains(&node.id())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Pairwise guard for one equality or containment query.
///
/// Each pair of nodes is compared at most once per query. A pair met
/// again while still being compared is a cycle; a pair met after it
/// finished reuses the recorded result.
#[derive(Default)]
pub struct VisitedMap {
    pairs: FxHashMap<(usize, usize), PairState>,
    visits: FxHashMap<usize, usize>,
}

/// What a [`VisitedMap`] knows about a pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PairState {
    /// First meeting. The pair is now recorded as in progress.
    Fresh,
    InProgress,
    Known(bool),
}

impl VisitedMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the pair, recording it as in progress on first meeting.
    pub fn enter(&mut self, a: &Handle, b: &Handle) -> PairState {
        let key = (a.id(), b.id());
        if let Some(state) = self.pairs.get(&key) {
            return *state;
        }
        self.pairs.insert(key, PairState::InProgress);
        *self.visits.entry(a.id()).or_default() += 1;
        if a.id() != b.id() {
            *self.visits.entry(b.id()).or_default() += 1;
        }
        PairState::Fresh
    }

    /// Record the outcome of comparing a pair.
    pub fn finish(&mut self, a: &Handle, b: &Handle, equal: bool) {
        self.pairs.insert((a.id(), b.id()), PairState::Known(equal));
    }

    /// How many comparisons started at `node` during this query.
    pub fn visit_count(&self, node: &Handle) -> usize {
        self.visits.get(&node.id()).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests;
