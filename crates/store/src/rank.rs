use crate::error::{Result, StoreError};
use ndarray::{Array2, ArrayView1};
use recall_corpus::CorpusError;

/// Norms this close to zero are treated as zero rather than divided by.
const NORM_EPSILON: f32 = 1e-10;

/// Score every matrix row against the query by cosine similarity.
///
/// Returns one `(row_index, score)` pair per document, ordered by score
/// descending with ties broken by ascending row index, so equal-score
/// results always come back in corpus order. Callers truncate to their own
/// limit.
///
/// A zero-norm vector (an all-out-of-vocabulary query, or a pathological
/// empty document) is treated as the zero vector and scores 0 against
/// everything.
pub fn rank(query: &[f32], embeddings: &Array2<f32>) -> Result<Vec<(usize, f32)>> {
    if embeddings.nrows() == 0 {
        // Build rejects empty corpora, so this only fires on a corrupt
        // loaded store.
        return Err(StoreError::Corpus(CorpusError::Empty));
    }

    let mut scored: Vec<(usize, f32)> = embeddings
        .rows()
        .into_iter()
        .enumerate()
        .map(|(index, row)| (index, cosine(query, row)))
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    Ok(scored)
}

fn cosine(query: &[f32], row: ArrayView1<'_, f32>) -> f32 {
    let query_norm = l2_norm(query.iter().copied());
    let row_norm = l2_norm(row.iter().copied());
    if query_norm < NORM_EPSILON || row_norm < NORM_EPSILON {
        return 0.0;
    }

    let dot: f32 = query.iter().zip(row.iter()).map(|(a, b)| a * b).sum();
    dot / (query_norm * row_norm)
}

fn l2_norm(values: impl Iterator<Item = f32>) -> f32 {
    values.map(|v| v * v).sum::<f32>().sqrt()
}
