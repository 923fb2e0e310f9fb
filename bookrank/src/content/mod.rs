//! Content profiles of the books: a tf-idf vector space over tags and authors plus popularity.

mod popularity;
mod tfidf;

use std::collections::{BTreeMap, HashMap};

use displaydoc::Display;
use ndarray::{Array1, Array2, ArrayView1, Axis};
use thiserror::Error;

use crate::data::{BookId, Chapter, Interaction};

pub(crate) use self::popularity::count_interactions;
pub use self::tfidf::TfidfVectorizer;

/// Terms must occur in at least this many books to be part of the vocabulary.
pub const MIN_DOCUMENT_FREQUENCY: usize = 2;

/// Errors of the content profile builder.
#[derive(Copy, Clone, Debug, Display, Error, PartialEq)]
pub enum ContentError {
    /// The catalog doesn't contain any chapters
    EmptyCatalog,
}

/// A stable bijection between book ids and positions.
///
/// All per-book vectors of a [`ContentProfile`] share this indexing.
#[derive(Clone, Debug, Default)]
pub struct BookIndex {
    book_ids: Vec<BookId>,
    positions: HashMap<BookId, usize>,
}

impl BookIndex {
    /// Creates an index from distinct book ids, positions follow the given order.
    pub fn new(book_ids: Vec<BookId>) -> Self {
        let positions = book_ids
            .iter()
            .enumerate()
            .map(|(position, &book_id)| (book_id, position))
            .collect();

        Self {
            book_ids,
            positions,
        }
    }

    /// The position of the book, if it is indexed.
    pub fn position(&self, book_id: &BookId) -> Option<usize> {
        self.positions.get(book_id).copied()
    }

    /// The book at the position.
    ///
    /// # Panics
    /// Panics if the position is out of bounds.
    pub fn book_id(&self, position: usize) -> BookId {
        self.book_ids[position]
    }

    /// All indexed books in position order.
    pub fn book_ids(&self) -> &[BookId] {
        &self.book_ids
    }

    pub fn len(&self) -> usize {
        self.book_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.book_ids.is_empty()
    }
}

/// Concatenates the content of all chapters of each book into one document per book.
///
/// The documents are ordered by ascending book id.
pub fn book_documents(chapters: &[Chapter]) -> BTreeMap<BookId, String> {
    chapters
        .iter()
        .fold(BTreeMap::<BookId, String>::new(), |mut documents, chapter| {
            let document = documents.entry(chapter.book_id).or_default();
            if !document.is_empty() {
                document.push(' ');
            }
            document.push_str(&chapter.content_text());
            documents
        })
}

/// The fitted content state of the catalog.
///
/// Read-only once fitted.
#[derive(Clone, Debug)]
pub struct ContentProfile {
    vectorizer: TfidfVectorizer,
    /// One l2 normalized row per book, in [`BookIndex`] order.
    matrix: Array2<f32>,
    index: BookIndex,
    /// Min-max scaled popularity per book, in [`BookIndex`] order.
    popularity: Array1<f32>,
}

impl ContentProfile {
    /// Fits the content profile.
    ///
    /// The chapters define the catalog and its content, the interactions are only used for the
    /// popularity of the books.
    ///
    /// # Errors
    /// Fails if there are no chapters.
    pub fn fit(interactions: &[Interaction], chapters: &[Chapter]) -> Result<Self, ContentError> {
        if chapters.is_empty() {
            return Err(ContentError::EmptyCatalog);
        }

        let (book_ids, documents): (Vec<_>, Vec<_>) = book_documents(chapters).into_iter().unzip();
        let (vectorizer, matrix) =
            TfidfVectorizer::fit_transform(&documents, MIN_DOCUMENT_FREQUENCY);
        let index = BookIndex::new(book_ids);
        let popularity = popularity::popularity(interactions, &index);
        log::info!(
            "fitted content profile of {} books with {} terms",
            index.len(),
            vectorizer.vocabulary_len(),
        );

        Ok(Self {
            vectorizer,
            matrix,
            index,
            popularity,
        })
    }

    pub fn index(&self) -> &BookIndex {
        &self.index
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    /// The document-term matrix.
    pub fn matrix(&self) -> &Array2<f32> {
        &self.matrix
    }

    /// The content vector of the book at the position.
    pub fn content(&self, position: usize) -> ArrayView1<f32> {
        self.matrix.row(position)
    }

    pub fn popularity(&self) -> &Array1<f32> {
        &self.popularity
    }

    /// Averages the content vectors of the books at the positions.
    ///
    /// Returns `None` if there are no positions.
    pub fn mean_content(&self, positions: &[usize]) -> Option<Array1<f32>> {
        self.matrix.select(Axis(0), positions).mean_axis(Axis(0))
    }

    /// Computes the cosine similarity of the profile with every book.
    ///
    /// The rows are normalized, hence the dot product equals the cosine similarity for a
    /// normalized profile.
    pub fn similarities(&self, profile: &Array1<f32>) -> Array1<f32> {
        self.matrix.dot(profile)
    }
}
