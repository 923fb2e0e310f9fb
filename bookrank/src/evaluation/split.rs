use std::collections::BTreeMap;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::data::{Interaction, UserId};

/// Users need at least this many interactions to hold one out.
pub const MIN_INTERACTIONS: usize = 2;

/// A leave-one-out partition of the interactions.
///
/// Every user with at least [`MIN_INTERACTIONS`] interactions has exactly one test interaction
/// and all other interactions in the training partition. Other users are in neither partition.
#[derive(Clone, Debug, Default)]
pub struct LeaveOneOutSplit {
    /// Training interactions grouped by ascending user id.
    pub train: Vec<Interaction>,
    /// One held out interaction per user, in ascending user id order.
    pub test: Vec<Interaction>,
}

impl LeaveOneOutSplit {
    /// Holds out one uniformly drawn interaction per user.
    ///
    /// The draw of each user only depends on the `seed` and the user id.
    pub fn new(interactions: &[Interaction], seed: u64) -> Self {
        let groups = interactions.iter().fold(
            BTreeMap::<UserId, Vec<Interaction>>::new(),
            |mut groups, interaction| {
                groups
                    .entry(interaction.user_id)
                    .or_default()
                    .push(*interaction);
                groups
            },
        );

        let mut split = Self::default();
        for (user_id, mut group) in groups {
            if group.len() < MIN_INTERACTIONS {
                continue;
            }

            let held_out = user_rng(seed, user_id).gen_range(0..group.len());
            split.test.push(group.remove(held_out));
            split.train.extend(group);
        }
        log::debug!(
            "split {} interactions into {} training and {} test interactions",
            interactions.len(),
            split.train.len(),
            split.test.len(),
        );

        split
    }
}

/// Seeds a generator for the user, independent of the order in which users are visited.
fn user_rng(seed: u64, user_id: UserId) -> StdRng {
    StdRng::seed_from_u64(seed ^ user_id.0.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}
