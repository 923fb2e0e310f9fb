//! Leave-one-out evaluation of recommenders.

mod metrics;
mod split;

use std::collections::HashMap;

use serde::Serialize;

#[cfg(feature = "multithreaded")]
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::{
    data::{Interaction, UserId},
    recommender::Recommender,
};

pub use self::{
    metrics::{lift, ndcg_at_k, random_recall, recall_at_k},
    split::{LeaveOneOutSplit, MIN_INTERACTIONS},
};

/// The aggregated ranking quality of a recommender.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EvaluationReport {
    /// Number of evaluated users.
    pub users: usize,
    pub top_k: usize,
    pub number_of_books: usize,
    /// Mean recall@k over all evaluated users.
    pub mean_recall: f32,
    /// Mean ndcg@k over all evaluated users.
    pub mean_ndcg: f32,
    /// Recall@k of recommending books at random.
    pub random_recall: f32,
    /// Ratio of the mean recall to the random recall.
    pub lift: f32,
}

/// Evaluates the recommender on the held out interactions of the split.
///
/// The recommender is expected to be fitted on the training partition of the split.
pub fn evaluate<R>(recommender: &R, split: &LeaveOneOutSplit, top_k: usize) -> EvaluationReport
where
    R: Recommender + Sync,
{
    evaluate_with(recommender, split, top_k, || {})
}

/// Evaluates the recommender like [`evaluate`] and calls the hint once per evaluated user.
pub fn evaluate_with<R>(
    recommender: &R,
    split: &LeaveOneOutSplit,
    top_k: usize,
    progress_hint: impl Fn() + Sync + Send,
) -> EvaluationReport
where
    R: Recommender + Sync,
{
    let histories = split.train.iter().fold(
        HashMap::<UserId, Vec<Interaction>>::new(),
        |mut histories, interaction| {
            histories
                .entry(interaction.user_id)
                .or_default()
                .push(*interaction);
            histories
        },
    );

    #[cfg(not(feature = "multithreaded"))]
    let test = split.test.iter();
    #[cfg(feature = "multithreaded")]
    let test = split.test.par_iter();

    let gains = test
        .map(|held_out| {
            let history = histories
                .get(&held_out.user_id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let recommended = recommender.recommend(held_out.user_id, history, top_k);
            progress_hint();

            (
                recall_at_k(&recommended, &held_out.book_id),
                ndcg_at_k(&recommended, &held_out.book_id),
            )
        })
        .collect::<Vec<_>>();

    let users = gains.len();
    let (mean_recall, mean_ndcg) = if users == 0 {
        (0., 0.)
    } else {
        let (recall, ndcg) = gains
            .iter()
            .fold((0f32, 0f32), |(recall, ndcg), &(r, n)| (recall + r, ndcg + n));
        (recall / users as f32, ndcg / users as f32)
    };
    let number_of_books = recommender.number_of_books();
    let random_recall = random_recall(top_k, number_of_books);
    log::info!("evaluated {} users on {} books", users, number_of_books);

    EvaluationReport {
        users,
        top_k,
        number_of_books,
        mean_recall,
        mean_ndcg,
        random_recall,
        lift: lift(mean_recall, random_recall),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use test_utils::assert_approx_eq;

    use super::*;
    use crate::{
        data::{BookId, Chapter},
        error::Error,
        tests::interactions,
    };

    /// Always recommends books `1..=top_k`, regardless of the user.
    struct Fixed {
        books: usize,
    }

    impl Recommender for Fixed {
        fn fit(_: &[Interaction], chapters: &[Chapter]) -> Result<Self, Error> {
            Ok(Self {
                books: chapters.len(),
            })
        }

        fn recommend(&self, _: UserId, _: &[Interaction], top_k: usize) -> Vec<BookId> {
            (1..=top_k.min(self.books) as u64).map(BookId).collect()
        }

        fn number_of_books(&self) -> usize {
            self.books
        }
    }

    fn split(test: &[(u64, u64, u64)]) -> LeaveOneOutSplit {
        LeaveOneOutSplit {
            train: interactions(&[(1, 9, 90), (2, 9, 90), (3, 9, 90), (4, 9, 90)]),
            test: interactions(test),
        }
    }

    #[test]
    fn test_evaluate() {
        let split = split(&[(1, 1, 10), (2, 2, 20), (3, 5, 50), (4, 3, 30)]);
        let report = evaluate(&Fixed { books: 10 }, &split, 3);

        assert_eq!(report.users, 4);
        assert_eq!(report.top_k, 3);
        assert_eq!(report.number_of_books, 10);
        assert_approx_eq!(f32, report.mean_recall, 0.75);
        let ndcg = (1. + 1. / 3f32.log2() + 0.5) / 4.;
        assert_approx_eq!(f32, report.mean_ndcg, ndcg, epsilon = 1e-6);
        assert_approx_eq!(f32, report.random_recall, 0.3, epsilon = 1e-6);
        assert_approx_eq!(f32, report.lift, 2.5, epsilon = 1e-5);
    }

    #[test]
    fn test_evaluate_without_books() {
        let split = split(&[(1, 1, 10)]);
        let report = evaluate(&Fixed { books: 0 }, &split, 3);

        assert_eq!(report.users, 1);
        assert_approx_eq!(f32, report.mean_recall, 0.);
        assert_approx_eq!(f32, report.random_recall, 0.);
        assert_approx_eq!(f32, report.lift, 0.);
    }

    #[test]
    fn test_evaluate_without_users() {
        let report = evaluate(&Fixed { books: 5 }, &LeaveOneOutSplit::default(), 3);

        assert_eq!(report.users, 0);
        assert_approx_eq!(f32, report.mean_recall, 0.);
        assert_approx_eq!(f32, report.mean_ndcg, 0.);
        assert_approx_eq!(f32, report.lift, 0.);
    }

    #[test]
    fn test_evaluate_with_progress() {
        let split = split(&[(1, 1, 10), (2, 2, 20)]);
        let calls = AtomicUsize::new(0);
        let report = evaluate_with(&Fixed { books: 5 }, &split, 1, || {
            calls.fetch_add(1, Ordering::Relaxed);
        });

        assert_eq!(report.users, 2);
        assert_eq!(calls.load(Ordering::Relaxed), 2);
    }
}
