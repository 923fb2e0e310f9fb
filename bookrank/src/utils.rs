use std::cmp::Ordering;

use ndarray::{ArrayBase, Data, Ix1};

/// Computes the l2 norm (euclidean metric) of a vector.
pub(crate) fn l2_norm<S>(a: ArrayBase<S, Ix1>) -> f32
where
    S: Data<Elem = f32>,
{
    a.dot(&a).sqrt()
}

/// Compares scores in descending order, treating NaN as the smallest value.
pub(crate) fn nan_safe_f32_cmp_desc(a: &f32, b: &f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(a).unwrap(/* neither is nan */),
    }
}

/// Selects the positions of the `k` highest scores in descending order.
///
/// Positions for which `skip` returns `true` are never selected. Equal scores keep their
/// ascending position order.
pub(crate) fn top_k_positions(scores: &[f32], k: usize, skip: impl Fn(usize) -> bool) -> Vec<usize> {
    let mut positions = (0..scores.len())
        .filter(|&position| !skip(position))
        .collect::<Vec<_>>();
    // `sort_by` is stable, so ties stay in ascending position order
    positions.sort_by(|&a, &b| nan_safe_f32_cmp_desc(&scores[a], &scores[b]));
    positions.truncate(k);
    positions
}
