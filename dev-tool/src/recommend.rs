use std::path::PathBuf;

use anyhow::{bail, Context, Error};
use structopt::StructOpt;

use bookrank::{
    read_books,
    BookId,
    Chapter,
    ContentHybridRecommender,
    Interaction,
    PopularityRecommender,
    Recommender,
    UserId,
};

use crate::{data::load_data, exit_code::NO_ERROR, model::Model};

/// Fits a recommender on all interactions and recommends books for a single user.
#[derive(StructOpt, Debug)]
pub struct RecommendCmd {
    /// A csv file with the columns `user_id,book_id,chapter_id`.
    #[structopt(long)]
    interactions: PathBuf,

    /// A csv file with the columns `chapter_id,book_id,author_id,tags,chapter_sequence_no`.
    #[structopt(long)]
    chapters: PathBuf,

    /// The user to recommend books for.
    #[structopt(long)]
    user: u64,

    /// The number of books to recommend.
    #[structopt(long, default_value = "10")]
    top_k: usize,

    /// The recommender to use.
    #[structopt(long, default_value = "hybrid", possible_values = &Model::VARIANTS)]
    model: Model,
}

impl RecommendCmd {
    pub fn run(self) -> Result<i32, Error> {
        let Self {
            interactions,
            chapters,
            user,
            top_k,
            model,
        } = self;

        if top_k == 0 {
            bail!("The number of books to recommend must be positive.");
        }

        let (interactions, chapters) = load_data(&interactions, &chapters)?;
        let user_id = UserId(user);
        let books = match model {
            Model::Hybrid => {
                recommend::<ContentHybridRecommender>(&interactions, &chapters, user_id, top_k)
            }
            Model::Popularity => {
                recommend::<PopularityRecommender>(&interactions, &chapters, user_id, top_k)
            }
        }?;

        let read = read_books(user_id, &interactions);
        println!("user {} read {} books", user_id.0, read.len());
        for (rank, book_id) in books.iter().enumerate() {
            println!("{:>3}. {}", rank + 1, book_id.0);
        }

        Ok(NO_ERROR)
    }
}

fn recommend<R>(
    interactions: &[Interaction],
    chapters: &[Chapter],
    user_id: UserId,
    top_k: usize,
) -> Result<Vec<BookId>, Error>
where
    R: Recommender,
{
    let recommender = R::fit(interactions, chapters).context("Fitting the recommender failed.")?;
    Ok(recommender.recommend(user_id, interactions, top_k))
}
