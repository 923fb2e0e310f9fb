//! Predicts the next chapter of every book a user started reading.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::data::{BookId, Chapter, ChapterId, Interaction, UserId};

/// The chapter a user is expected to read next in a book.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextChapter {
    pub user_id: UserId,
    pub book_id: BookId,
    pub predicted_next_chapter_id: ChapterId,
}

/// Predicts the chapter following the furthest chapter each user read in each book.
///
/// Interactions with chapters without a known sequence number don't count as progress. Users
/// who finished a book don't get a prediction for it. The predictions are ordered by user and
/// book.
pub fn next_chapters(interactions: &[Interaction], chapters: &[Chapter]) -> Vec<NextChapter> {
    let mut sequence_nos = HashMap::with_capacity(chapters.len());
    let mut by_position = HashMap::with_capacity(chapters.len());
    for chapter in chapters {
        if let Some(sequence_no) = chapter.chapter_sequence_no {
            sequence_nos.insert((chapter.chapter_id, chapter.book_id), sequence_no);
            by_position
                .entry((chapter.book_id, sequence_no))
                .or_insert(chapter.chapter_id);
        }
    }

    let progress = interactions.iter().fold(
        BTreeMap::<(UserId, BookId), u32>::new(),
        |mut progress, interaction| {
            let key = (interaction.chapter_id, interaction.book_id);
            if let Some(&sequence_no) = sequence_nos.get(&key) {
                let furthest = progress
                    .entry((interaction.user_id, interaction.book_id))
                    .or_insert(sequence_no);
                *furthest = (*furthest).max(sequence_no);
            }
            progress
        },
    );

    progress
        .into_iter()
        .filter_map(|((user_id, book_id), furthest)| {
            let next = furthest.checked_add(1)?;
            let &predicted_next_chapter_id = by_position.get(&(book_id, next))?;
            Some(NextChapter {
                user_id,
                book_id,
                predicted_next_chapter_id,
            })
        })
        .collect()
}
