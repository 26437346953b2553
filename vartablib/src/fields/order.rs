//! Ordering of Extra column keys.

use std::cmp::Ordering;
use std::collections::HashMap;

/// Rank of each Extra candidate, by position in the candidate list.
///
/// Names not in the index sort after every ranked name. The sentinel rank
/// for them is the candidate count, so it can never collide with a real rank
/// however long the list grows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldOrderIndex {
    ranks: HashMap<String, usize>,
    unranked: usize,
}

impl FieldOrderIndex {
    /// Build from candidates; a repeated name keeps its first position.
    pub fn from_candidates<S: AsRef<str>>(candidates: &[S]) -> Self {
        let mut ranks = HashMap::with_capacity(candidates.len());
        for (rank, name) in candidates.iter().enumerate() {
            ranks.entry(name.as_ref().to_string()).or_insert(rank);
        }
        Self {
            ranks,
            unranked: candidates.len(),
        }
    }

    /// Rank of `name`, if it is a candidate.
    pub fn rank(&self, name: &str) -> Option<usize> {
        self.ranks.get(name).copied()
    }

    /// Rank used for sorting: the real rank, or the sentinel.
    pub fn sort_rank(&self, name: &str) -> usize {
        self.rank(name).unwrap_or(self.unranked)
    }

    /// Total order on names: by rank, then lexicographically.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.sort_rank(a)
            .cmp(&self.sort_rank(b))
            .then_with(|| a.cmp(b))
    }

    /// Sort names in place using [`compare`](Self::compare).
    pub fn sort<S: AsRef<str>>(&self, names: &mut [S]) {
        names.sort_by(|a, b| self.compare(a.as_ref(), b.as_ref()));
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}
