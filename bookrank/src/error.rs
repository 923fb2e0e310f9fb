use displaydoc::Display;
use thiserror::Error;

use crate::content::ContentError;

/// Errors which abort fitting a recommender.
#[derive(Debug, Display, Error)]
pub enum Error {
    /// Failed to fit the content profile: {0}
    Content(#[from] ContentError),
}
