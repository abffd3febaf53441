//! TF-IDF vector space over catalog documents.
//!
//! Vocabulary is capped at `max_features` by total corpus count (ties alphabetical),
//! dimensions are assigned alphabetically, weights are raw count × smoothed IDF,
//! rows are L2-normalised.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::catalog::tokenizer::analyze;
use crate::errors::EngineError;

pub const MAX_FEATURES: usize = 1000;

/// Sparse vector: (dimension, weight) pairs sorted by dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    fn from_counts(counts: BTreeMap<usize, f64>) -> Self {
        let mut entries: Vec<(usize, f64)> = counts.into_iter().collect();
        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in entries.iter_mut() {
                *w /= norm;
            }
        }
        Self { entries }
    }

    #[cfg(test)]
    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|(_, w)| *w == 0.0)
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_w) = self.entries[i];
            let (b_idx, b_w) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Cosine similarity in [0, 1]; 0.0 when either side has zero norm.
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        let denom = self.norm() * other.norm();
        if denom == 0.0 {
            return 0.0;
        }
        (self.dot(other) / denom).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Fits the vocabulary and IDF over `documents` and returns one vector per document.
    pub fn fit_transform<S: AsRef<str>>(
        documents: &[S],
        max_features: usize,
    ) -> Result<(Self, Vec<SparseVector>), EngineError> {
        if documents.is_empty() {
            return Err(EngineError::Vectorization(
                "catalog contains no documents".to_string(),
            ));
        }

        let analyzed: Vec<Vec<String>> = documents.iter().map(|d| analyze(d.as_ref())).collect();

        let mut corpus_counts: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for terms in &analyzed {
            let mut seen = HashSet::new();
            for term in terms {
                *corpus_counts.entry(term.as_str()).or_insert(0) += 1;
                if seen.insert(term.as_str()) {
                    *doc_freq.entry(term.as_str()).or_insert(0) += 1;
                }
            }
        }

        if corpus_counts.is_empty() {
            return Err(EngineError::Vectorization(
                "empty vocabulary; documents contain only stop words".to_string(),
            ));
        }

        let mut ranked: Vec<(&str, usize)> = corpus_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(max_features);

        let mut kept: Vec<&str> = ranked.into_iter().map(|(term, _)| term).collect();
        kept.sort_unstable();

        let n_docs = documents.len() as f64;
        let idf = kept
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();
        let vocabulary = kept
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term.to_string(), idx))
            .collect();

        let vectorizer = Self { vocabulary, idf };
        let vectors = analyzed
            .iter()
            .map(|terms| vectorizer.weigh(terms))
            .collect();

        Ok((vectorizer, vectors))
    }

    /// Projects text into the fitted space; terms outside the vocabulary are dropped.
    pub fn transform(&self, text: &str) -> SparseVector {
        self.weigh(&analyze(text))
    }

    fn weigh(&self, terms: &[String]) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in terms {
            if let Some(&idx) = self.vocabulary.get(term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }
        for (idx, weight) in counts.iter_mut() {
            *weight *= self.idf[*idx];
        }
        SparseVector::from_counts(counts)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    #[cfg(test)]
    pub fn contains(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCS: [&str; 2] = [
        "Backend Engineer python django sql",
        "Data Scientist python pandas numpy",
    ];

    #[test]
    fn test_vocabulary_has_unigrams_and_bigrams() {
        let (vectorizer, vectors) = TfidfVectorizer::fit_transform(&DOCS, MAX_FEATURES).unwrap();
        assert!(vectorizer.contains("python"));
        assert!(vectorizer.contains("python django"));
        assert!(vectorizer.contains("data scientist"));
        assert_eq!(vectors.len(), 2);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let (_, vectors) = TfidfVectorizer::fit_transform(&DOCS, MAX_FEATURES).unwrap();
        for v in &vectors {
            assert!((v.norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let docs = ["rust rust rust go", "rust java"];
        let (vectorizer, _) = TfidfVectorizer::fit_transform(&docs, 1).unwrap();
        assert_eq!(vectorizer.vocabulary_size(), 1);
        assert!(vectorizer.contains("rust"));
    }

    #[test]
    fn test_all_stop_words_is_vectorization_error() {
        let docs = ["the and", "of a"];
        let err = TfidfVectorizer::fit_transform(&docs, MAX_FEATURES).unwrap_err();
        assert!(matches!(err, EngineError::Vectorization(_)));
    }

    #[test]
    fn test_unseen_terms_project_to_zero() {
        let (vectorizer, vectors) = TfidfVectorizer::fit_transform(&DOCS, MAX_FEATURES).unwrap();
        let query = vectorizer.transform("haskell elixir");
        assert!(query.is_zero());
        assert_eq!(query.cosine(&vectors[0]), 0.0);
    }

    #[test]
    fn test_identical_document_has_cosine_one() {
        let (vectorizer, vectors) = TfidfVectorizer::fit_transform(&DOCS, MAX_FEATURES).unwrap();
        let query = vectorizer.transform(DOCS[0]);
        assert!((query.cosine(&vectors[0]) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rare_terms_weigh_more() {
        let (vectorizer, _) = TfidfVectorizer::fit_transform(&DOCS, MAX_FEATURES).unwrap();
        let python = vectorizer.idf[vectorizer.vocabulary["python"]];
        let django = vectorizer.idf[vectorizer.vocabulary["django"]];
        assert!(django > python);
        assert!((python - 1.0).abs() < 1e-12);
    }
}
