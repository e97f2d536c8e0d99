//! How the ordered index picks a replacement when it deletes a node that has
//! two children.
//!
//! Always taking the in-order successor keeps shortening right subtrees over
//! a long run of deletions (and always taking the predecessor does the same
//! to left subtrees), which drags an unbalanced tree toward a list faster.
//! [`CoinFlip`] picks a side at random on each deletion so neither side is
//! systematically favoured. This only improves the expected shape; it is not
//! a balancing guarantee, and adversarial insertion orders still produce a
//! tree of linear depth.

use rand::{rngs::SmallRng, SeedableRng};
use rand_core::RngCore;

/// Chooses the replacement side for a two-child deletion.
pub trait DeletionStrategy {
    /// `true` to splice in the in-order successor (minimum of the right
    /// subtree), `false` for the in-order predecessor (maximum of the left
    /// subtree).
    fn use_successor(&mut self) -> bool;
}

/// Picks successor or predecessor with an unbiased coin flip drawn from an
/// injected random source.
///
/// ```rust
/// use linked_hash_tree::CoinFlip;
/// use rand::{rngs::SmallRng, SeedableRng};
///
/// let flip = CoinFlip::new(SmallRng::seed_from_u64(7));
/// # let _ = flip;
/// ```
#[derive(Clone, Debug)]
pub struct CoinFlip<R> {
    rng: R,
}

impl<R> CoinFlip<R>
where
    R: RngCore,
{
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl CoinFlip<SmallRng> {
    /// A coin seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_entropy())
    }

    /// A reproducible coin: the same seed gives the same sequence of sides.
    pub fn seed_from_u64(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl Default for CoinFlip<SmallRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R> DeletionStrategy for CoinFlip<R>
where
    R: RngCore,
{
    fn use_successor(&mut self) -> bool {
        self.rng.next_u32() & 1 == 1
    }
}

/// Always splices in the in-order successor.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysSuccessor;

impl DeletionStrategy for AlwaysSuccessor {
    fn use_successor(&mut self) -> bool {
        true
    }
}

/// Always splices in the in-order predecessor.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysPredecessor;

impl DeletionStrategy for AlwaysPredecessor {
    fn use_successor(&mut self) -> bool {
        false
    }
}

impl<D> DeletionStrategy for &mut D
where
    D: DeletionStrategy + ?Sized,
{
    fn use_successor(&mut self) -> bool {
        (**self).use_successor()
    }
}
