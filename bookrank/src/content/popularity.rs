use std::collections::HashMap;

use ndarray::Array1;

use crate::{
    content::BookIndex,
    data::{BookId, Interaction},
};

/// Counts the interactions per book.
pub(crate) fn count_interactions(interactions: &[Interaction]) -> HashMap<BookId, usize> {
    interactions.iter().fold(
        HashMap::with_capacity(interactions.len()),
        |mut counts, interaction| {
            *counts.entry(interaction.book_id).or_default() += 1;
            counts
        },
    )
}

/// Computes the popularity of every book of the index.
///
/// The popularity is the share of all interactions which belong to a book, min-max scaled across
/// the index. Books without interactions have a share of zero. If all books share the same
/// popularity, all of them are scaled to zero.
pub(crate) fn popularity(interactions: &[Interaction], index: &BookIndex) -> Array1<f32> {
    let counts = count_interactions(interactions);
    let total = counts.values().sum::<usize>().max(1) as f32;

    let shares = index
        .book_ids()
        .iter()
        .map(|book_id| counts.get(book_id).copied().unwrap_or_default() as f32 / total)
        .collect::<Array1<f32>>();

    min_max_scale(shares)
}

/// Scales the values to the unit interval.
///
/// A zero range is treated as a range of one, which maps constant values to zero.
pub(crate) fn min_max_scale(values: Array1<f32>) -> Array1<f32> {
    let min = values.iter().copied().fold(f32::INFINITY, f32::min);
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let range = if max > min { max - min } else { 1. };

    values.mapv_into(|value| (value - min) / range)
}
