//! `MinScored`: a `BinaryHeap` wrapper ordering by ascending score, used by Dijkstra
//! (`std::collections::BinaryHeap` is a max-heap by default).
//!
//! Ported from `examples/petgraph-petgraph/src/scored.rs`.

use std::cmp::Ordering;

/// `MinScored<K, T>` holds a score `K` and a payload `T`; its `Ord` impl is reversed
/// so a max-`BinaryHeap<MinScored<K, T>>` pops the *smallest* `K` first.
#[derive(Copy, Clone, Debug)]
pub struct MinScored<K, T>(pub K, pub T);

impl<K: PartialOrd, T> PartialEq for MinScored<K, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: PartialOrd, T> Eq for MinScored<K, T> {}

impl<K: PartialOrd, T> PartialOrd for MinScored<K, T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: PartialOrd, T> Ord for MinScored<K, T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        // Treat NaN as the largest possible score so it never wins a pop, matching
        // the original's "NaN is never produced by well-formed input, but never
        // panic if it is" posture.
        let a = &self.0;
        let b = &other.0;
        if a == b {
            Ordering::Equal
        } else if a < b {
            Ordering::Greater
        } else if a > b {
            Ordering::Less
        } else if a.ne(a) && b.ne(b) {
            Ordering::Equal
        } else if a.ne(a) {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn pops_smallest_first() {
        let mut heap = BinaryHeap::new();
        heap.push(MinScored(3.0, "c"));
        heap.push(MinScored(1.0, "a"));
        heap.push(MinScored(2.0, "b"));
        assert_eq!(heap.pop().unwrap().1, "a");
        assert_eq!(heap.pop().unwrap().1, "b");
        assert_eq!(heap.pop().unwrap().1, "c");
    }
}
