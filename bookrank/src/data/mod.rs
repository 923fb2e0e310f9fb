//! Typed input records shared by the recommenders, the evaluation and the sequencer.

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Unique identifier of a user.
#[derive(
    Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub u64);

/// Unique identifier of a book.
#[derive(
    Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BookId(pub u64);

/// Unique identifier of a chapter.
#[derive(
    Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ChapterId(pub u64);

/// Unique identifier of an author.
#[derive(
    Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AuthorId(pub u64);

/// A user reading one chapter of one book.
///
/// A user usually has several interactions with the same book, one per chapter read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interaction {
    pub user_id: UserId,
    pub book_id: BookId,
    pub chapter_id: ChapterId,
}

impl Interaction {
    pub fn new(user_id: UserId, book_id: BookId, chapter_id: ChapterId) -> Self {
        Self {
            user_id,
            book_id,
            chapter_id,
        }
    }
}

/// Catalog metadata of a single chapter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub chapter_id: ChapterId,
    pub book_id: BookId,
    pub author_id: AuthorId,
    /// Tags separated by [`TAG_DELIMITER`].
    pub tags: Option<String>,
    /// Position of the chapter within its book, if known.
    pub chapter_sequence_no: Option<u32>,
}

/// Delimiter between the tags of a [`Chapter`].
pub const TAG_DELIMITER: char = '|';

impl Chapter {
    /// The tags of this chapter with the delimiters replaced by whitespace.
    ///
    /// Missing tags are treated like an empty tag string.
    pub fn tag_text(&self) -> String {
        self.tags
            .as_deref()
            .unwrap_or_default()
            .replace(TAG_DELIMITER, " ")
    }

    /// The synthetic token identifying the author of this chapter.
    pub fn author_token(&self) -> String {
        format!("author_{}", self.author_id)
    }

    /// The textual content of this chapter, i.e. its tags followed by its author token.
    pub fn content_text(&self) -> String {
        format!("{} {}", self.tag_text(), self.author_token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter(tags: Option<&str>) -> Chapter {
        Chapter {
            chapter_id: ChapterId(1),
            book_id: BookId(10),
            author_id: AuthorId(7),
            tags: tags.map(Into::into),
            chapter_sequence_no: Some(1),
        }
    }

    #[test]
    fn test_content_text_replaces_delimiters() {
        assert_eq!(
            chapter(Some("mystery|thriller")).content_text(),
            "mystery thriller author_7",
        );
    }

    #[test]
    fn test_content_text_without_tags() {
        assert_eq!(chapter(None).content_text(), " author_7");
        assert_eq!(chapter(Some("")).content_text(), " author_7");
    }
}
