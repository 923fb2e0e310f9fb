//! Helpers shared by the tests of the workspace.

mod approx_eq;

pub use crate::approx_eq::ApproxEqIter;
#[doc(hidden)]
pub use float_cmp::approx_eq;
