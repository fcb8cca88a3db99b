//! Shuffler port - Source of random answer orderings.

/// Produces uniform random permutations.
///
/// The game shuffles answers twice per round (the setter's private
/// selection list and the public ballot); both go through this seam so
/// tests can pin the orderings.
pub trait Shuffler: Send + Sync {
    /// Reorder `indices` in place into a uniformly random permutation.
    fn shuffle(&self, indices: &mut [usize]);
}

/// Returns `0..len` reordered by `shuffler`.
pub fn shuffled_order(shuffler: &dyn Shuffler, len: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    shuffler.shuffle(&mut order);
    order
}
