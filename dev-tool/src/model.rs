use std::str::FromStr;

use displaydoc::Display;
use thiserror::Error;

/// The recommender to fit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Model {
    /// Content similarity blended with popularity.
    Hybrid,
    /// Popularity only.
    Popularity,
}

impl Model {
    pub const VARIANTS: [&'static str; 2] = ["hybrid", "popularity"];
}

/// Unknown model `{0}`, expected `hybrid` or `popularity`.
#[derive(Debug, Display, Error)]
pub struct UnknownModel(String);

impl FromStr for Model {
    type Err = UnknownModel;

    fn from_str(model: &str) -> Result<Self, Self::Err> {
        match model {
            "hybrid" => Ok(Model::Hybrid),
            "popularity" => Ok(Model::Popularity),
            _ => Err(UnknownModel(model.to_string())),
        }
    }
}
