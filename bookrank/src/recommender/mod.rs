//! Recommenders ranking the books of the catalog for a user.

mod hybrid;
mod popularity;

use itertools::Itertools;

use crate::{
    data::{BookId, Chapter, Interaction, UserId},
    error::Error,
};

pub use self::{hybrid::ContentHybridRecommender, popularity::PopularityRecommender};

/// Weight of the content similarity in the blended score.
pub const CONTENT_WEIGHT: f32 = 0.6;

/// Weight of the popularity in the blended score.
pub const POPULARITY_WEIGHT: f32 = 0.4;

/// Score of books the user already read, lower than any blended score.
pub const EXCLUDED_SCORE: f32 = -1.;

/// A recommender which is fitted once and then ranks books for any number of users.
pub trait Recommender: Sized {
    /// Fits the recommender on the interactions and the catalog.
    fn fit(interactions: &[Interaction], chapters: &[Chapter]) -> Result<Self, Error>;

    /// Ranks at most `top_k` books for the user in descending order.
    ///
    /// The history is searched for the books the user already read, those are never
    /// recommended. Interactions of other users are ignored.
    fn recommend(&self, user_id: UserId, history: &[Interaction], top_k: usize) -> Vec<BookId>;

    /// The number of books in the fitted catalog.
    fn number_of_books(&self) -> usize;
}

/// Collects the distinct books the user read, in order of their first interaction.
pub fn read_books(user_id: UserId, history: &[Interaction]) -> Vec<BookId> {
    history
        .iter()
        .filter(|interaction| interaction.user_id == user_id)
        .map(|interaction| interaction.book_id)
        .unique()
        .collect()
}
