use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::quiz::Question;

/// Draws up to `count` distinct questions in random order.
///
/// Asking for more questions than the bank holds returns the whole bank,
/// shuffled. Uses a partial Fisher-Yates shuffle over a copy of the handles,
/// so the bank itself is untouched.
pub fn sample<R: Rng + ?Sized>(
    bank: &[Arc<Question>],
    count: usize,
    rng: &mut R,
) -> Vec<Arc<Question>> {
    let mut pool = bank.to_vec();
    let amount = count.min(pool.len());
    let (picked, _) = pool.partial_shuffle(rng, amount);
    picked.to_vec()
}
