#![cfg_attr(doc, forbid(broken_intra_doc_links, private_intra_doc_links))]
//! Offline book recommendations blending tf-idf content similarity with popularity.
//!
//! ```no_run
//! use bookrank::{
//!     evaluate, Chapter, ContentHybridRecommender, Interaction, LeaveOneOutSplit, Recommender,
//! };
//!
//! fn main() -> Result<(), bookrank::Error> {
//!     let interactions = Vec::<Interaction>::new();
//!     let chapters = Vec::<Chapter>::new();
//!
//!     let split = LeaveOneOutSplit::new(&interactions, 42);
//!     let recommender = ContentHybridRecommender::fit(&split.train, &chapters)?;
//!     let report = evaluate(&recommender, &split, 10);
//!     println!("recall@10 = {}", report.mean_recall);
//!
//!     Ok(())
//! }
//! ```

mod content;
mod data;
mod error;
mod evaluation;
mod recommender;
mod sequencer;
mod utils;


pub use crate::{
    content::{
        book_documents,
        BookIndex,
        ContentError,
        ContentProfile,
        TfidfVectorizer,
        MIN_DOCUMENT_FREQUENCY,
    },
    data::{AuthorId, BookId, Chapter, ChapterId, Interaction, UserId, TAG_DELIMITER},
    error::Error,
    evaluation::{
        evaluate,
        evaluate_with,
        lift,
        ndcg_at_k,
        random_recall,
        recall_at_k,
        EvaluationReport,
        LeaveOneOutSplit,
        MIN_INTERACTIONS,
    },
    recommender::{
        read_books,
        ContentHybridRecommender,
        PopularityRecommender,
        Recommender,
        CONTENT_WEIGHT,
        EXCLUDED_SCORE,
        POPULARITY_WEIGHT,
    },
    sequencer::{next_chapters, NextChapter},
};
