use std::process::exit;

use anyhow::Error;
use env_logger::Env;
use structopt::StructOpt;

use crate::exit_code::FATAL_ERROR;

mod data;
mod evaluate;
mod exit_code;
mod model;
mod next_chapter;
mod recommend;
mod utils;

/// Tooling to evaluate and inspect the book recommenders.
#[derive(StructOpt, Debug)]
enum CommandArgs {
    Evaluate(evaluate::EvaluateCmd),
    NextChapter(next_chapter::NextChapterCmd),
    Recommend(recommend::RecommendCmd),
}

impl CommandArgs {
    fn run(self) -> Result<i32, Error> {
        match self {
            CommandArgs::Evaluate(cmd) => cmd.run(),
            CommandArgs::NextChapter(cmd) => cmd.run(),
            CommandArgs::Recommend(cmd) => cmd.run(),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let exit_code = match CommandArgs::from_args().run() {
        Ok(exit_code) => exit_code,
        Err(error) => {
            eprintln!("{:?}", error);
            FATAL_ERROR
        }
    };

    exit(exit_code);
}
