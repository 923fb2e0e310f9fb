use crate::{
    content::ContentProfile,
    data::{BookId, Chapter, Interaction, UserId},
    error::Error,
    recommender::{read_books, Recommender, CONTENT_WEIGHT, EXCLUDED_SCORE, POPULARITY_WEIGHT},
    utils::top_k_positions,
};

/// Blends the content similarity to the user's books with the popularity of the books.
#[derive(Clone, Debug)]
pub struct ContentHybridRecommender {
    profile: ContentProfile,
}

impl ContentHybridRecommender {
    pub fn new(profile: ContentProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &ContentProfile {
        &self.profile
    }

    /// Ranks the books by popularity alone.
    fn most_popular(&self, top_k: usize) -> Vec<BookId> {
        let popularity = self.profile.popularity().to_vec();
        self.to_book_ids(top_k_positions(&popularity, top_k, |_| false))
    }

    fn to_book_ids(&self, positions: Vec<usize>) -> Vec<BookId> {
        let index = self.profile.index();
        positions
            .into_iter()
            .map(|position| index.book_id(position))
            .collect()
    }

    /// Computes the blended score of every book for a user who read the books at the positions.
    ///
    /// Returns `None` if there are no positions. Books at the positions get the
    /// [`EXCLUDED_SCORE`].
    pub fn scores(&self, positions: &[usize]) -> Option<Vec<f32>> {
        let user_profile = self.profile.mean_content(positions)?;
        let similarities = self.profile.similarities(&user_profile);

        let mut scores =
            (CONTENT_WEIGHT * similarities + POPULARITY_WEIGHT * self.profile.popularity())
                .into_raw_vec();
        for &position in positions {
            scores[position] = EXCLUDED_SCORE;
        }

        Some(scores)
    }
}

impl Recommender for ContentHybridRecommender {
    fn fit(interactions: &[Interaction], chapters: &[Chapter]) -> Result<Self, Error> {
        ContentProfile::fit(interactions, chapters)
            .map(Self::new)
            .map_err(Into::into)
    }

    fn recommend(&self, user_id: UserId, history: &[Interaction], top_k: usize) -> Vec<BookId> {
        let index = self.profile.index();
        let positions = read_books(user_id, history)
            .iter()
            .filter_map(|book_id| index.position(book_id))
            .collect::<Vec<_>>();

        match self.scores(&positions) {
            Some(scores) => {
                let top = top_k_positions(&scores, top_k, |position| {
                    scores[position] <= EXCLUDED_SCORE
                });
                self.to_book_ids(top)
            }
            // unknown users and users without indexed books fall back to popularity
            None => self.most_popular(top_k),
        }
    }

    fn number_of_books(&self) -> usize {
        self.profile.index().len()
    }
}

#[cfg(test)]
mod tests {
    use test_utils::assert_approx_eq;

    use super::*;
    use crate::tests::{chapter, interactions};

    /// Books 1 and 2 share tags and author, 3 and 5 share their content, 4 has none.
    fn catalog() -> Vec<Chapter> {
        vec![
            chapter(10, 1, 7, Some("mystery|thriller"), 1),
            chapter(11, 1, 7, Some("mystery"), 2),
            chapter(20, 2, 7, Some("mystery"), 1),
            chapter(30, 3, 2, Some("romance|drama"), 1),
            chapter(40, 4, 9, None, 1),
            chapter(50, 5, 2, Some("romance|drama"), 1),
        ]
    }

    fn recommender(history: &[Interaction]) -> ContentHybridRecommender {
        ContentHybridRecommender::fit(history, &catalog()).unwrap()
    }

    #[test]
    fn test_fit_empty_catalog() {
        assert!(ContentHybridRecommender::fit(&[], &[]).is_err());
    }

    #[test]
    fn test_recommend_excludes_read_books() {
        let history = interactions(&[(1, 1, 10), (1, 1, 11), (1, 3, 30), (2, 2, 20)]);
        let recommender = recommender(&history);

        for top_k in 1..=6 {
            let books = recommender.recommend(UserId(1), &history, top_k);
            assert_eq!(books.len(), top_k.min(3));
            assert!(!books.contains(&BookId(1)));
            assert!(!books.contains(&BookId(3)));
        }
    }

    #[test]
    fn test_recommend_prefers_similar_content() {
        // equal popularity for every book
        let history = interactions(&[(9, 1, 10), (9, 2, 20), (9, 3, 30), (9, 4, 40), (9, 5, 50)]);
        let recommender = recommender(&history);
        let own = interactions(&[(1, 1, 10)]);

        let books = recommender.recommend(UserId(1), &own, 4);
        assert_eq!(books[0], BookId(2));
        // no shared terms, ties keep the index order
        assert_eq!(books[1..], [BookId(3), BookId(4), BookId(5)]);
    }

    #[test]
    fn test_recommend_cold_start_falls_back_to_popularity() {
        let history = interactions(&[(2, 4, 40), (2, 4, 40), (3, 2, 20), (3, 4, 40), (4, 5, 50)]);
        let recommender = recommender(&history);

        // popularity is [0, 1/3, 0, 1, 1/3]
        let expected = [BookId(4), BookId(2), BookId(5), BookId(1)];
        assert_eq!(recommender.recommend(UserId(1), &history, 4), expected);
        assert_eq!(recommender.recommend(UserId(1), &[], 4), expected);

        // only books outside of the catalog
        let unknown = interactions(&[(1, 99, 990)]);
        assert_eq!(recommender.recommend(UserId(1), &unknown, 4), expected);
    }

    #[test]
    fn test_recommend_returns_all_eligible_books() {
        let history = interactions(&[(1, 1, 10), (1, 2, 20)]);
        let recommender = recommender(&history);

        let books = recommender.recommend(UserId(1), &history, 100);
        assert_eq!(books.len(), 3);
        assert!(recommender.recommend(UserId(1), &history, 0).is_empty());
        assert_eq!(recommender.number_of_books(), 5);
    }

    #[test]
    fn test_scores() {
        let recommender = recommender(&[]);
        assert!(recommender.scores(&[]).is_none());

        // books 3 and 5 have the same content
        let scores = recommender.scores(&[2]).unwrap();
        assert_approx_eq!(f32, scores[2], EXCLUDED_SCORE);
        assert_approx_eq!(f32, scores[4], CONTENT_WEIGHT, epsilon = 1e-6);
        assert_approx_eq!(f32, scores[0], 0.);
        assert_approx_eq!(f32, scores[3], 0.);
    }

    #[test]
    fn test_scores_of_books_without_content() {
        let recommender = recommender(&[]);

        // book 4 has no terms left, which degrades to zero similarities
        let scores = recommender.scores(&[3]).unwrap();
        assert_approx_eq!(f32, scores, [0., 0., 0., EXCLUDED_SCORE, 0.]);
    }
}
