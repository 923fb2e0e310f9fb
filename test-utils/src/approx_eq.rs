use ndarray::{ArrayBase, Data, Dimension, IntoDimension};

/// Asserts that two floats, or containers of floats, are approximately equal.
///
/// ```
/// use test_utils::assert_approx_eq;
/// assert_approx_eq!(f32, 0.15039155, 0.1503916, ulps = 3);
/// assert_approx_eq!(f32, vec![[1., 2.], [3., 4.]], [[1., 2.], [3., 4.]]);
/// assert_approx_eq!(f32, ndarray::arr1(&[0.1, 0.2]), [0.1000001, 0.2], epsilon = 1e-6);
/// ```
///
/// Both sides are flattened in logical order and compared element by element, the shapes must
/// match. Two NaN values are treated as equal. `ulps` defaults to `2` and `epsilon` to `0`.
#[macro_export]
macro_rules! assert_approx_eq {
    ($t:ty, $left:expr, $right:expr $(,)?) => {
        $crate::assert_approx_eq!($t, $left, $right, epsilon = 0., ulps = 2)
    };
    ($t:ty, $left:expr, $right:expr, ulps = $ulps:expr $(,)?) => {
        $crate::assert_approx_eq!($t, $left, $right, epsilon = 0., ulps = $ulps)
    };
    ($t:ty, $left:expr, $right:expr, epsilon = $epsilon:expr $(,)?) => {
        $crate::assert_approx_eq!($t, $left, $right, epsilon = $epsilon, ulps = 2)
    };
    ($t:ty, $left:expr, $right:expr, epsilon = $epsilon:expr, ulps = $ulps:expr $(,)?) => {{
        let (epsilon, ulps) = ($epsilon, $ulps);
        let (mut left, mut right) = (Vec::new(), Vec::new());
        $crate::ApproxEqIter::flatten_indexed(&$left, &[], &mut left);
        $crate::ApproxEqIter::flatten_indexed(&$right, &[], &mut right);
        std::assert_eq!(
            left.len(),
            right.len(),
            "approximated equal assertion failed: {} != {} elements",
            left.len(),
            right.len(),
        );
        for ((lidx, lv), (ridx, rv)) in left.into_iter().zip(right) {
            std::assert_eq!(lidx, ridx, "shape mismatch: {:?} != {:?}", lidx, ridx);
            if !(lv.is_nan() && rv.is_nan()) {
                std::assert!(
                    $crate::approx_eq!($t, lv, rv, ulps = ulps, epsilon = epsilon),
                    "approximated equal assertion failed (ulps={:?}, epsilon={:?}) at index {:?}: {:?} == {:?}",
                    ulps,
                    epsilon,
                    lidx,
                    lv,
                    rv,
                );
            }
        }
    }};
}

/// Flattens floats and containers of floats for [`assert_approx_eq!`].
///
/// Every leaf is pushed together with its multi-dimensional index.
pub trait ApproxEqIter {
    fn flatten_indexed(&self, prefix: &[usize], out: &mut Vec<(Vec<usize>, f32)>);
}

impl ApproxEqIter for f32 {
    fn flatten_indexed(&self, prefix: &[usize], out: &mut Vec<(Vec<usize>, f32)>) {
        out.push((prefix.to_vec(), *self));
    }
}

impl<T> ApproxEqIter for &T
where
    T: ApproxEqIter + ?Sized,
{
    fn flatten_indexed(&self, prefix: &[usize], out: &mut Vec<(Vec<usize>, f32)>) {
        (**self).flatten_indexed(prefix, out)
    }
}

impl<T> ApproxEqIter for [T]
where
    T: ApproxEqIter,
{
    fn flatten_indexed(&self, prefix: &[usize], out: &mut Vec<(Vec<usize>, f32)>) {
        for (idx, element) in self.iter().enumerate() {
            let mut index = prefix.to_vec();
            index.push(idx);
            element.flatten_indexed(&index, out);
        }
    }
}

impl<T, const N: usize> ApproxEqIter for [T; N]
where
    T: ApproxEqIter,
{
    fn flatten_indexed(&self, prefix: &[usize], out: &mut Vec<(Vec<usize>, f32)>) {
        self.as_ref().flatten_indexed(prefix, out)
    }
}

impl<T> ApproxEqIter for Vec<T>
where
    T: ApproxEqIter,
{
    fn flatten_indexed(&self, prefix: &[usize], out: &mut Vec<(Vec<usize>, f32)>) {
        self.as_slice().flatten_indexed(prefix, out)
    }
}

impl<S, D> ApproxEqIter for ArrayBase<S, D>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    fn flatten_indexed(&self, prefix: &[usize], out: &mut Vec<(Vec<usize>, f32)>) {
        for (idx, &element) in self.indexed_iter() {
            let mut index = prefix.to_vec();
            index.extend(idx.into_dimension().as_array_view().iter());
            out.push((index, element));
        }
    }
}
