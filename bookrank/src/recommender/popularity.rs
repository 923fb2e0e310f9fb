use std::collections::{BTreeSet, HashSet};

use crate::{
    content::{count_interactions, BookIndex},
    data::{BookId, Chapter, Interaction, UserId},
    error::Error,
    recommender::{read_books, Recommender},
    utils::top_k_positions,
};

/// Ranks books by their number of interactions, regardless of the user's taste.
#[derive(Clone, Debug)]
pub struct PopularityRecommender {
    /// Books of the catalog and all interacted books, in ascending id order.
    index: BookIndex,
    /// Number of interactions per book, in [`BookIndex`] order.
    counts: Vec<f32>,
}

impl Recommender for PopularityRecommender {
    fn fit(interactions: &[Interaction], chapters: &[Chapter]) -> Result<Self, Error> {
        let book_ids = chapters
            .iter()
            .map(|chapter| chapter.book_id)
            .chain(interactions.iter().map(|interaction| interaction.book_id))
            .collect::<BTreeSet<_>>();
        let index = BookIndex::new(book_ids.into_iter().collect());

        let counts = count_interactions(interactions);
        let counts = index
            .book_ids()
            .iter()
            .map(|book_id| counts.get(book_id).copied().unwrap_or_default() as f32)
            .collect();

        Ok(Self { index, counts })
    }

    fn recommend(&self, user_id: UserId, history: &[Interaction], top_k: usize) -> Vec<BookId> {
        let read = read_books(user_id, history)
            .iter()
            .filter_map(|book_id| self.index.position(book_id))
            .collect::<HashSet<_>>();

        top_k_positions(&self.counts, top_k, |position| read.contains(&position))
            .into_iter()
            .map(|position| self.index.book_id(position))
            .collect()
    }

    fn number_of_books(&self) -> usize {
        self.index.len()
    }
}
