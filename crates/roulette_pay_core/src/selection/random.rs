//! Wheel-less random payer pick.

use crate::error::{EngineError, EngineResult};
use crate::model::member::Member;
use rand::seq::SliceRandom;
use rand::Rng;

/// Picks `count` distinct members uniformly at random, in random order.
///
/// # Errors
/// - `TargetCountOutOfRange` unless `1 <= count <= members.len()`.
pub fn select_random_members<R: Rng + ?Sized>(
    members: &[Member],
    count: usize,
    rng: &mut R,
) -> EngineResult<Vec<Member>> {
    if count == 0 || count > members.len() {
        return Err(EngineError::TargetCountOutOfRange {
            requested: count,
            participants: members.len(),
        });
    }
    let mut picked = members
        .choose_multiple(rng, count)
        .cloned()
        .collect::<Vec<_>>();
    picked.shuffle(rng);
    Ok(picked)
}
