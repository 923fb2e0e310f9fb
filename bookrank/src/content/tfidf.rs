use std::collections::{BTreeMap, BTreeSet, HashMap};

use lazy_static::lazy_static;
use ndarray::{Array1, Array2, ArrayViewMut1, Axis};
use regex::Regex;

use crate::utils::l2_norm;

lazy_static! {
    /// Tokens consist of at least two word characters.
    static ref TOKEN: Regex = Regex::new(r"\b\w\w+\b").unwrap(/* valid regex */);
}

/// Splits a document into lowercased tokens.
pub(crate) fn tokenize(document: &str) -> impl Iterator<Item = String> + '_ {
    TOKEN
        .find_iter(document)
        .map(|token| token.as_str().to_lowercase())
}

/// A fitted term frequency–inverse document frequency transform.
///
/// The idf is smoothed, i.e. `idf(t) = ln((1 + n) / (1 + df(t))) + 1` for `n` documents, and
/// every transformed document is l2 normalized.
#[derive(Clone, Debug)]
pub struct TfidfVectorizer {
    /// Maps each term to its column, columns are in lexicographic term order.
    vocabulary: BTreeMap<String, usize>,
    idf: Array1<f32>,
}

impl TfidfVectorizer {
    /// Fits the vocabulary and idf weights on the documents and transforms them.
    ///
    /// Terms which occur in fewer than `min_df` documents are discarded. If no term survives,
    /// the vocabulary is empty and every row of the matrix has zero columns.
    pub fn fit_transform(documents: &[String], min_df: usize) -> (Self, Array2<f32>) {
        let counts = documents
            .iter()
            .map(|document| term_counts(document))
            .collect::<Vec<_>>();

        let mut document_frequencies = HashMap::<&str, usize>::new();
        for document in &counts {
            for term in document.keys() {
                *document_frequencies.entry(term.as_str()).or_default() += 1;
            }
        }

        let vocabulary = document_frequencies
            .iter()
            .filter(|(_, &df)| df >= min_df)
            .map(|(&term, _)| term)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .enumerate()
            .map(|(column, term)| (term.to_string(), column))
            .collect::<BTreeMap<_, _>>();

        let nr_documents = documents.len() as f32;
        let mut idf = Array1::zeros(vocabulary.len());
        for (term, &column) in &vocabulary {
            let df = document_frequencies[term.as_str()] as f32;
            idf[column] = ((1. + nr_documents) / (1. + df)).ln() + 1.;
        }
        log::debug!(
            "fitted tf-idf on {} documents with {} of {} terms",
            documents.len(),
            vocabulary.len(),
            document_frequencies.len(),
        );

        let vectorizer = Self { vocabulary, idf };
        let mut matrix = Array2::zeros((documents.len(), vectorizer.vocabulary.len()));
        for (row, counts) in matrix.axis_iter_mut(Axis(0)).zip(&counts) {
            vectorizer.fill_row(row, counts);
        }

        (vectorizer, matrix)
    }

    /// Transforms a single document onto the fitted vocabulary.
    ///
    /// Unknown terms are ignored.
    pub fn transform(&self, document: &str) -> Array1<f32> {
        let mut row = Array1::zeros(self.vocabulary.len());
        self.fill_row(row.view_mut(), &term_counts(document));
        row
    }

    /// The number of terms in the fitted vocabulary.
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// The column of the term, if it is part of the vocabulary.
    pub fn column(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    fn fill_row(&self, mut row: ArrayViewMut1<f32>, counts: &HashMap<String, usize>) {
        for (term, &count) in counts {
            if let Some(&column) = self.vocabulary.get(term) {
                row[column] = count as f32 * self.idf[column];
            }
        }

        let norm = l2_norm(row.view());
        if norm > 0. {
            row /= norm;
        }
    }
}

fn term_counts(document: &str) -> HashMap<String, usize> {
    tokenize(document).fold(HashMap::new(), |mut counts, term| {
        *counts.entry(term).or_default() += 1;
        counts
    })
}

#[cfg(test)]
mod tests {
    use test_utils::assert_approx_eq;

    use super::*;

    fn documents(documents: &[&str]) -> Vec<String> {
        documents.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("Sci-Fi a  author_7 Épique").collect::<Vec<_>>();
        assert_eq!(tokens, ["sci", "fi", "author_7", "épique"]);
    }

    #[test]
    fn test_rare_terms_are_pruned() {
        let docs = documents(&["mystery thriller author_7", "mystery author_7", "romance author_2"]);
        let (vectorizer, matrix) = TfidfVectorizer::fit_transform(&docs, 2);

        assert_eq!(vectorizer.vocabulary_len(), 2);
        assert_eq!(vectorizer.column("author_7"), Some(0));
        assert_eq!(vectorizer.column("mystery"), Some(1));
        assert_eq!(vectorizer.column("thriller"), None);
        assert_eq!(matrix.shape(), [3, 2]);
    }

    #[test]
    fn test_rows_are_normalized() {
        let docs = documents(&["mystery mystery author_7", "mystery author_7", "author_7 romance"]);
        let (_, matrix) = TfidfVectorizer::fit_transform(&docs, 1);

        for row in matrix.rows() {
            assert_approx_eq!(f32, l2_norm(row), 1., epsilon = 1e-6);
        }
    }

    #[test]
    fn test_idf_weights_rare_terms_higher() {
        let docs = documents(&["common rare", "common other", "common other"]);
        let (vectorizer, matrix) = TfidfVectorizer::fit_transform(&docs, 1);

        let common = vectorizer.column("common").unwrap();
        let rare = vectorizer.column("rare").unwrap();
        // idf(common) = ln(4 / 4) + 1, idf(rare) = ln(4 / 2) + 1
        let norm = (1. + (1. + 2f32.ln()).powi(2)).sqrt();
        assert_approx_eq!(f32, matrix[[0, common]], 1. / norm, epsilon = 1e-6);
        assert_approx_eq!(f32, matrix[[0, rare]], (1. + 2f32.ln()) / norm, epsilon = 1e-6);
    }

    #[test]
    fn test_documents_without_vocabulary_are_zero() {
        let docs = documents(&["unique", "words", "only"]);
        let (vectorizer, matrix) = TfidfVectorizer::fit_transform(&docs, 2);

        assert_eq!(vectorizer.vocabulary_len(), 0);
        assert_eq!(matrix.shape(), [3, 0]);
    }

    #[test]
    fn test_transform_matches_fitted_rows() {
        let docs = documents(&["mystery thriller author_7", "mystery author_7 thriller", "romance"]);
        let (vectorizer, matrix) = TfidfVectorizer::fit_transform(&docs, 2);

        assert_approx_eq!(f32, vectorizer.transform(&docs[0]), matrix.row(0));
        assert_approx_eq!(f32, vectorizer.transform("unknown words"), [0., 0., 0.]);
    }
}
