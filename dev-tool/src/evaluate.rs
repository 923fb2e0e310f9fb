use std::path::PathBuf;

use anyhow::{bail, Context, Error};
use log::info;
use serde::Serialize;
use structopt::StructOpt;

use bookrank::{
    evaluate_with,
    next_chapters,
    Chapter,
    ContentHybridRecommender,
    EvaluationReport,
    LeaveOneOutSplit,
    NextChapter,
    PopularityRecommender,
    Recommender,
};

use crate::{
    data::{load_data, sample_users},
    exit_code::{NON_FATAL_ERROR, NO_ERROR},
    model::Model,
    utils::{progress_bar, progress_spin_until_done},
};

/// Runs a leave-one-out evaluation on a sample of users.
#[derive(StructOpt, Debug)]
pub struct EvaluateCmd {
    /// A csv file with the columns `user_id,book_id,chapter_id`.
    #[structopt(long)]
    interactions: PathBuf,

    /// A csv file with the columns `chapter_id,book_id,author_id,tags,chapter_sequence_no`.
    #[structopt(long)]
    chapters: PathBuf,

    /// The number of users to evaluate on, all users are used if there are fewer.
    #[structopt(long, default_value = "5000")]
    sample_users: usize,

    /// The number of books to recommend per user.
    #[structopt(long, default_value = "10")]
    top_k: usize,

    /// Seeds both the user sampling and the held out interactions.
    #[structopt(long, default_value = "42")]
    seed: u64,

    /// The recommender to evaluate.
    #[structopt(long, default_value = "hybrid", possible_values = &Model::VARIANTS)]
    model: Model,

    /// The number of next chapter predictions to print.
    #[structopt(long, default_value = "5")]
    next_chapter_sample: usize,

    /// Prints the results as JSON.
    #[structopt(long)]
    json: bool,
}

#[derive(Serialize)]
struct EvaluateCmdResult {
    report: EvaluationReport,
    next_chapters: Vec<NextChapter>,
}

impl EvaluateCmd {
    pub fn run(self) -> Result<i32, Error> {
        let Self {
            interactions,
            chapters,
            sample_users: sample_size,
            top_k,
            seed,
            model,
            next_chapter_sample,
            json,
        } = self;

        if top_k == 0 {
            bail!("The number of books to recommend must be positive.");
        }

        let (interactions, chapters) = progress_spin_until_done("Loading data", || {
            load_data(&interactions, &chapters)
        })?;
        let interactions = sample_users(interactions, sample_size, seed);
        let split = LeaveOneOutSplit::new(&interactions, seed);
        info!(
            "evaluating on {} training and {} test interactions",
            split.train.len(),
            split.test.len(),
        );

        let report = match model {
            Model::Hybrid => run_evaluation::<ContentHybridRecommender>(&split, &chapters, top_k),
            Model::Popularity => run_evaluation::<PopularityRecommender>(&split, &chapters, top_k),
        }?;

        let mut next_chapters = next_chapters(&split.train, &chapters);
        next_chapters.truncate(next_chapter_sample);

        if json {
            let result = EvaluateCmdResult {
                report,
                next_chapters,
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            print_report(&report, &next_chapters);
        }

        let exit_code = if report.users == 0 {
            NON_FATAL_ERROR
        } else {
            NO_ERROR
        };
        Ok(exit_code)
    }
}

fn run_evaluation<R>(
    split: &LeaveOneOutSplit,
    chapters: &[Chapter],
    top_k: usize,
) -> Result<EvaluationReport, Error>
where
    R: Recommender + Sync,
{
    let recommender = progress_spin_until_done("Fitting model", || R::fit(&split.train, chapters))
        .context("Fitting the recommender failed.")?;

    let progress_bar = progress_bar("Evaluation", split.test.len());
    let report = evaluate_with(&recommender, split, top_k, || progress_bar.inc(1));
    progress_bar.finish();

    Ok(report)
}

fn print_report(report: &EvaluationReport, next_chapters: &[NextChapter]) {
    let EvaluationReport {
        top_k,
        mean_recall,
        mean_ndcg,
        random_recall,
        lift,
        ..
    } = *report;

    println!("\nFinal Results");
    println!("Recall@{}: {:.6}", top_k, mean_recall);
    println!("NDCG@{}: {:.6}", top_k, mean_ndcg);

    println!("\nRandom Baseline");
    println!("Random Recall@{}: {:.6}", top_k, random_recall);

    println!("\nLift Over Random");
    println!("Lift: {:.2}x", lift);
    println!(
        "\nInterpretation: Model performs {:.2}x better than random ranking.",
        lift,
    );

    println!("\nNext Chapter Sample");
    println!("{:>10} {:>10} {:>12}", "user_id", "book_id", "chapter_id");
    for next in next_chapters {
        println!(
            "{:>10} {:>10} {:>12}",
            next.user_id.0, next.book_id.0, next.predicted_next_chapter_id.0,
        );
    }
}
