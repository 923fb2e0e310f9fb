use std::{io, path::PathBuf};

use anyhow::{Context, Error};
use structopt::StructOpt;

use bookrank::{next_chapters, NextChapter};

use crate::{data::load_data, exit_code::NO_ERROR};

/// Predicts the next chapter of every book each user started and prints them as csv.
#[derive(StructOpt, Debug)]
pub struct NextChapterCmd {
    /// A csv file with the columns `user_id,book_id,chapter_id`.
    #[structopt(long)]
    interactions: PathBuf,

    /// A csv file with the columns `chapter_id,book_id,author_id,tags,chapter_sequence_no`.
    #[structopt(long)]
    chapters: PathBuf,
}

impl NextChapterCmd {
    pub fn run(self) -> Result<i32, Error> {
        let (interactions, chapters) = load_data(&self.interactions, &self.chapters)?;
        let predictions = next_chapters(&interactions, &chapters);

        let stdout = io::stdout();
        write_records(stdout.lock(), &predictions).context("Writing predictions failed.")?;
        Ok(NO_ERROR)
    }
}

fn write_records(writer: impl io::Write, predictions: &[NextChapter]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    for prediction in predictions {
        writer.serialize(prediction)?;
    }
    writer.flush().map_err(Into::into)
}
