use std::collections::BTreeSet;

/// Marker changes needed to move from one set of ranks to another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerDiff {
    /// Ranks that need a new marker, ascending.
    pub add: Vec<u32>,
    /// Ranks whose marker must go, ascending.
    pub remove: Vec<u32>,
}

impl MarkerDiff {
    pub fn between(
        current: impl IntoIterator<Item = u32>,
        wanted: impl IntoIterator<Item = u32>,
    ) -> Self {
        let current: BTreeSet<u32> = current.into_iter().collect();
        let wanted: BTreeSet<u32> = wanted.into_iter().collect();
        Self {
            add: wanted.difference(&current).copied().collect(),
            remove: current.difference(&wanted).copied().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::MarkerDiff;

    #[test]
    fn empty_to_full_adds_everything() {
        let diff = MarkerDiff::between([], [3, 1, 2]);
        assert_eq!(diff.add, vec![1, 2, 3]);
        assert!(diff.remove.is_empty());
    }

    #[test]
    fn shrinking_view_only_removes() {
        let diff = MarkerDiff::between([1, 2, 3, 4], [1, 2]);
        assert!(diff.add.is_empty());
        assert_eq!(diff.remove, vec![3, 4]);
    }

    #[test]
    fn overlap_is_left_alone() {
        let diff = MarkerDiff::between([1, 2, 5], [2, 5, 7]);
        assert_eq!(diff.add, vec![7]);
        assert_eq!(diff.remove, vec![1]);
    }

    #[test]
    fn identical_sets_produce_no_work() {
        assert!(MarkerDiff::between([4, 9], [9, 4]).is_empty());
    }
}
