//! TF-IDF index over short documents
//!
//! Lowercased word tokens (two or more word characters), English stop
//! words removed, unigrams and bigrams, vocabulary capped by corpus
//! frequency. Rows are l2-normalized so cosine similarity reduces to a
//! dot product.

use std::collections::HashMap;

const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself", "him",
    "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "me",
    "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once", "only",
    "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she", "should",
    "so", "some", "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then",
    "there", "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why",
    "will", "with", "you", "your", "yours", "yourself", "yourselves",
];

fn is_stop_word(token: &str) -> bool {
    ENGLISH_STOP_WORDS.binary_search(&token).is_ok()
}

/// Word tokens of at least two word characters, lowercased, stop words
/// removed, followed by bigrams over the surviving tokens.
fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();

    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|t| t.chars().count() >= 2)
        .filter(|t| !is_stop_word(t))
        .collect();

    let mut terms: Vec<String> = words.iter().map(|w| w.to_string()).collect();
    for pair in words.windows(2) {
        terms.push(format!("{} {}", pair[0], pair[1]));
    }
    terms
}

type SparseVector = Vec<(usize, f64)>;

/// Immutable TF-IDF index. Rebuilt from scratch whenever the corpus
/// changes; row i corresponds to document i.
#[derive(Debug, Clone, Default)]
pub struct TfIdfIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    rows: Vec<SparseVector>,
}

impl TfIdfIndex {
    /// Build an index over the given documents
    pub fn build(documents: &[&str], max_features: usize) -> Self {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d)).collect();

        // Corpus-wide term counts decide which terms survive the cap
        let mut corpus_counts: HashMap<&str, usize> = HashMap::new();
        for doc in &tokenized {
            for term in doc {
                *corpus_counts.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(&str, usize)> = corpus_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(max_features);

        let vocabulary: HashMap<String, usize> = ranked
            .iter()
            .enumerate()
            .map(|(i, (term, _))| (term.to_string(), i))
            .collect();

        // Smoothed document frequencies
        let n_docs = documents.len();
        let mut df = vec![0usize; vocabulary.len()];
        for doc in &tokenized {
            let mut seen = vec![false; vocabulary.len()];
            for term in doc {
                if let Some(&idx) = vocabulary.get(term.as_str()) {
                    if !seen[idx] {
                        seen[idx] = true;
                        df[idx] += 1;
                    }
                }
            }
        }

        let idf: Vec<f64> = df
            .iter()
            .map(|&d| ((1 + n_docs) as f64 / (1 + d) as f64).ln() + 1.0)
            .collect();

        let mut index = Self {
            vocabulary,
            idf,
            rows: Vec::with_capacity(n_docs),
        };
        let rows: Vec<SparseVector> = tokenized
            .iter()
            .map(|terms| index.vectorize(terms))
            .collect();
        index.rows = rows;
        index
    }

    /// Cosine similarity of the query against every document row
    pub fn similarities(&self, query: &str) -> Vec<f64> {
        let query_vector = self.vectorize(&tokenize(query));
        self.rows
            .iter()
            .map(|row| dot(&query_vector, row))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    fn vectorize(&self, terms: &[String]) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in terms {
            if let Some(&idx) = self.vocabulary.get(term.as_str()) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();
        vector.sort_by_key(|(idx, _)| *idx);

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut vector {
                *w /= norm;
            }
        }
        vector
    }
}

/// Dot product of two index-sorted sparse vectors
fn dot(a: &SparseVector, b: &SparseVector) -> f64 {
    let (mut i, mut j) = (0, 0);
    let mut sum = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}
