//! Filtering trait.

/// Pure sentence-level check: the same input always gets the same answer.
///
/// `detect` returns `true` when the item is kept.
pub trait Filter<T>: Default {
    fn detect(&self, item: T) -> bool;

    /// Convenience negation of [Filter::detect].
    #[inline]
    fn rejects(&self, item: T) -> bool {
        !self.detect(item)
    }
}
