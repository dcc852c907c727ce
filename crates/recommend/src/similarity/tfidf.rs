//! TF-IDF text vectorization
//!
//! Builds sparse, L2-normalised term-frequency × inverse-document-frequency
//! vectors over a small in-memory corpus:
//! - tokens are runs of alphanumeric/underscore characters, lower-cased,
//!   at least two characters long
//! - idf is smoothed: `ln((1 + n) / (1 + df)) + 1`
//! - the vocabulary keeps the `max_features` most frequent terms

use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Vectorizer settings
#[derive(Debug, Clone)]
pub struct TfidfConfig {
    /// Vocabulary bound, 0 disables it
    pub max_features: usize,

    /// Shortest token kept, in characters
    pub min_token_len: usize,

    /// Lower-cased terms removed before counting
    pub stop_words: BTreeSet<String>,
}

impl Default for TfidfConfig {
    fn default() -> Self {
        Self {
            max_features: 5000,
            min_token_len: 2,
            stop_words: BTreeSet::new(),
        }
    }
}

impl TfidfConfig {
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        self
    }
}

/// Sparse vector, entries sorted by term index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    fn from_counts(counts: HashMap<usize, f64>) -> Self {
        let mut entries: Vec<(usize, f64)> = counts.into_iter().collect();
        entries.sort_by_key(|&(idx, _)| idx);
        Self { entries }
    }

    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|&(_, w)| w == 0.0)
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt()
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

    /// Cosine similarity clamped to `[0, 1]`; 0.0 when either side is all-zero
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        let denom = self.norm() * other.norm();
        if denom == 0.0 {
            return 0.0;
        }
        (self.dot(other) / denom).clamp(0.0, 1.0)
    }

    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }
}

/// Document-term matrix produced by [`TfidfVectorizer::fit_transform`]
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    vocabulary: BTreeMap<String, usize>,
    rows: Vec<SparseVector>,
}

impl TfidfMatrix {
    pub fn row(&self, index: usize) -> Option<&SparseVector> {
        self.rows.get(index)
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }
}

/// Fits a vocabulary and weights on one corpus. Stateless between calls.
#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    config: TfidfConfig,
}

impl TfidfVectorizer {
    pub fn new(config: TfidfConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TfidfConfig {
        &self.config
    }

    /// Split text into lower-cased terms
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|w| w.chars().count() >= self.config.min_token_len)
            .map(str::to_lowercase)
            .filter(|w| !self.config.stop_words.contains(w))
            .collect()
    }

    /// Learn the vocabulary of `documents` and return one vector per document
    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> TfidfMatrix {
        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| self.tokenize(doc.as_ref()))
            .collect();

        // term -> (corpus frequency, document frequency)
        let mut stats: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for tokens in &tokenized {
            let mut seen: BTreeSet<&str> = BTreeSet::new();
            for token in tokens {
                let entry = stats.entry(token.as_str()).or_insert((0, 0));
                entry.0 += 1;
                if seen.insert(token.as_str()) {
                    entry.1 += 1;
                }
            }
        }

        let mut kept: Vec<(&str, usize, usize)> = stats
            .into_iter()
            .map(|(term, (tf, df))| (term, tf, df))
            .collect();
        if self.config.max_features > 0 && kept.len() > self.config.max_features {
            // Highest corpus frequency first, ties alphabetical
            kept.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            kept.truncate(self.config.max_features);
            kept.sort_by(|a, b| a.0.cmp(b.0));
        }

        let n_docs = documents.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(kept.len());
        for (index, (term, _, df)) in kept.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), index);
            idf.push(((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0);
        }

        let rows = tokenized
            .iter()
            .map(|tokens| {
                let mut counts: HashMap<usize, f64> = HashMap::new();
                for token in tokens {
                    if let Some(&index) = vocabulary.get(token) {
                        *counts.entry(index).or_insert(0.0) += 1.0;
                    }
                }
                for (index, weight) in counts.iter_mut() {
                    *weight *= idf[*index];
                }
                let mut row = SparseVector::from_counts(counts);
                row.normalize();
                row
            })
            .collect();

        TfidfMatrix { vocabulary, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_tokenize() {
        let v = TfidfVectorizer::default();
        assert_eq!(
            v.tokenize("Apple-quality, FRUIT a b_c über"),
            vec!["apple", "quality", "fruit", "b_c", "über"]
        );
    }

    #[test]
    fn test_stop_words_removed() {
        let v = TfidfVectorizer::new(TfidfConfig::default().with_stop_words(["The", "de"]));
        assert_eq!(v.tokenize("the harvest de manzanas"), vec!["harvest", "manzanas"]);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let v = TfidfVectorizer::default();
        let m = v.fit_transform(&["apple fruit fruit", "pear fruit", ""]);
        assert_eq!(m.n_rows(), 3);
        assert!(approx(m.row(0).unwrap().norm(), 1.0));
        assert!(approx(m.row(1).unwrap().norm(), 1.0));
        assert!(m.row(2).unwrap().is_zero());
    }

    #[test]
    fn test_smoothed_idf_weights() {
        // "shared" appears in both docs (idf 1), "only" in one (idf ln(3/2)+1)
        let v = TfidfVectorizer::default();
        let m = v.fit_transform(&["shared only", "shared"]);
        let row = m.row(0).unwrap();
        let idf_only = (3.0f64 / 2.0).ln() + 1.0;
        let norm = (1.0 + idf_only * idf_only).sqrt();
        let only_idx = m.vocabulary["only"];
        let shared_idx = m.vocabulary["shared"];
        let weight = |idx: usize| row.entries.iter().find(|e| e.0 == idx).unwrap().1;
        assert!(approx(weight(only_idx), idf_only / norm));
        assert!(approx(weight(shared_idx), 1.0 / norm));
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let v = TfidfVectorizer::new(TfidfConfig::default().with_max_features(2));
        let m = v.fit_transform(&["alpha alpha beta", "alpha gamma gamma", "delta"]);
        assert_eq!(m.vocabulary_size(), 2);
        assert!(m.contains_term("alpha"));
        assert!(m.contains_term("gamma"));
        assert!(!m.contains_term("beta"));
        // "delta" fell out of the vocabulary, so its row is empty
        assert!(m.row(2).unwrap().is_zero());
    }

    #[test]
    fn test_identical_documents_have_cosine_one() {
        let v = TfidfVectorizer::default();
        let m = v.fit_transform(&["apple quality fruit", "apple quality fruit", "pear"]);
        assert!(approx(m.row(0).unwrap().cosine(m.row(1).unwrap()), 1.0));
        assert_eq!(m.row(0).unwrap().cosine(m.row(2).unwrap()), 0.0);
    }

    #[test]
    fn test_zero_vectors_have_zero_cosine() {
        let v = TfidfVectorizer::default();
        let m = v.fit_transform(&["", " , ", "a"]);
        assert_eq!(m.vocabulary_size(), 0);
        let c = m.row(0).unwrap().cosine(m.row(1).unwrap());
        assert_eq!(c, 0.0);
        assert!(!c.is_nan());
    }

    #[test]
    fn test_dot_skips_disjoint_terms() {
        let a = SparseVector::from_counts(HashMap::from([(0, 1.0), (2, 2.0), (5, 1.0)]));
        let b = SparseVector::from_counts(HashMap::from([(1, 3.0), (2, 4.0), (5, 2.0)]));
        assert!(approx(a.dot(&b), 10.0));
        assert_eq!(a.nnz(), 3);
    }
}
