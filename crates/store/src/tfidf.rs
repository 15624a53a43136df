use crate::tokenize::tokenize;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Frozen TF-IDF weighting model.
///
/// Fit once over a corpus's texts; afterwards read-only and shared. The
/// vocabulary maps each known term to its column index in the embedding
/// matrix, and `idf` holds one smoothed inverse-document-frequency weight
/// per column.
///
/// Fitting is deterministic: terms are assigned columns in sorted order, so
/// identical input texts always produce an identical model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfModel {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f32>,
}

impl TfidfModel {
    /// Build the vocabulary and idf weights from the corpus texts.
    ///
    /// idf(t) = ln((1 + n_docs) / (1 + df(t))) + 1, the smoothed form: no
    /// term gets a zero weight, and unseen-document-frequency can never
    /// divide by zero.
    pub fn fit<'a>(texts: impl IntoIterator<Item = &'a str>) -> Self {
        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
        let mut n_docs: usize = 0;

        for text in texts {
            n_docs += 1;
            let distinct: HashSet<String> = tokenize(text).into_iter().collect();
            for term in distinct {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        // BTreeMap iteration is sorted, which fixes the column order.
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(doc_freq.len());
        for (column, (term, df)) in doc_freq.into_iter().enumerate() {
            let weight = ((1.0 + n_docs as f64) / (1.0 + df as f64)).ln() + 1.0;
            vocabulary.insert(term, column);
            idf.push(weight as f32);
        }

        log::debug!(
            "Fit tf-idf model: {} documents, {} terms",
            n_docs,
            vocabulary.len()
        );
        Self { vocabulary, idf }
    }

    /// Transform text into a dense vector in this model's space.
    ///
    /// Each known term contributes count × idf at its column; terms outside
    /// the vocabulary are ignored. A query made only of unknown terms maps
    /// to the zero vector. The vocabulary is never extended here.
    #[must_use]
    pub fn transform(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0_f32; self.idf.len()];
        for token in tokenize(text) {
            if let Some(&column) = self.vocabulary.get(&token) {
                vector[column] += self.idf[column];
            }
        }
        vector
    }

    #[must_use]
    pub fn vocab_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Terms in column order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fit_assigns_columns_in_sorted_term_order() {
        let model = TfidfModel::fit(["walking calms", "calms breathing"]);
        let terms: Vec<&str> = model.terms().collect();
        assert_eq!(terms, vec!["breathing", "calms", "walking"]);
        assert_eq!(model.vocab_size(), 3);
    }

    #[test]
    fn fit_is_deterministic() {
        let texts = ["quiet morning walk", "morning journal entry", "walk after dinner"];
        let first = TfidfModel::fit(texts);
        let second = TfidfModel::fit(texts);
        assert_eq!(first, second);
    }

    #[test]
    fn rarer_terms_weigh_more() {
        // "shared" appears in both documents, "rare" in one.
        let model = TfidfModel::fit(["shared rare", "shared other"]);
        let vector = model.transform("shared rare");
        let shared_idx = model.terms().position(|t| t == "shared").expect("shared");
        let rare_idx = model.terms().position(|t| t == "rare").expect("rare");
        assert!(vector[rare_idx] > vector[shared_idx]);
    }

    #[test]
    fn transform_counts_repeated_terms() {
        let model = TfidfModel::fit(["breathe deeply", "breathe slowly"]);
        let once = model.transform("breathe");
        let twice = model.transform("breathe breathe");
        let idx = model.terms().position(|t| t == "breathe").expect("breathe");
        assert_eq!(twice[idx], once[idx] * 2.0);
    }

    #[test]
    fn transform_ignores_out_of_vocabulary_terms() {
        let model = TfidfModel::fit(["calm evening", "calm morning"]);
        let vector = model.transform("xylophone unknown");
        assert_eq!(vector.len(), model.vocab_size());
        assert!(vector.iter().all(|&w| w == 0.0));
    }
}
