use crate::data::BookId;

/// Whether the relevant book is part of the recommendations, `1` if it is and `0` otherwise.
pub fn recall_at_k(recommended: &[BookId], relevant: &BookId) -> f32 {
    if recommended.contains(relevant) {
        1.
    } else {
        0.
    }
}

/// The discounted gain of the single relevant book.
///
/// A relevant book at the 0-based rank `r` gains `1 / log2(r + 2)`, a missing one gains `0`.
pub fn ndcg_at_k(recommended: &[BookId], relevant: &BookId) -> f32 {
    recommended
        .iter()
        .position(|book_id| book_id == relevant)
        .map(|rank| 1. / (rank as f32 + 2.).log2())
        .unwrap_or_default()
}

/// The expected recall of recommending `top_k` out of `number_of_books` books at random.
pub fn random_recall(top_k: usize, number_of_books: usize) -> f32 {
    if number_of_books == 0 {
        0.
    } else {
        top_k as f32 / number_of_books as f32
    }
}

/// The ratio of the recall to the random recall, `0` if the random recall is `0`.
pub fn lift(recall: f32, random_recall: f32) -> f32 {
    if random_recall > 0. {
        recall / random_recall
    } else {
        0.
    }
}
