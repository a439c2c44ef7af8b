//! Relatedness scoring between one summary sentence and every paragraph.
//!
//! Scores are plain dot products with no norm division, so embedding
//! magnitude leaks into the raw values. Only the ordering survives the
//! min-max rescale that follows, which is all the presentation layer needs.
//! Embeddings are stored as `f32`; scores are accumulated in `f64`, where a
//! product of two finite `f32` values cannot overflow.

use crate::error::{Result, SummaryError};
use crate::models::SummaryData;

pub fn dot(a: &[f32], b: &[f32]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(SummaryError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    Ok(a.iter()
        .zip(b.iter())
        .map(|(x, y)| f64::from(*x) * f64::from(*y))
        .sum())
}

/// Scores `sentence` against each paragraph embedding, preserving order.
pub fn raw_similarities<P>(sentence: &[f32], paragraphs: &[P]) -> Result<Vec<f64>>
where
    P: AsRef<[f32]>,
{
    paragraphs
        .iter()
        .map(|paragraph| dot(sentence, paragraph.as_ref()))
        .collect()
}

/// Min-max rescale into [0, 1]. A constant input carries no ranking
/// information and maps to all 1.0.
pub fn normalize_unit_interval(values: &[f64]) -> Result<Vec<f64>> {
    if values.is_empty() {
        return Err(SummaryError::EmptyInput);
    }
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(SummaryError::NonFinite { index });
    }

    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });

    // Halve both ends when the full spread does not fit in an f64.
    let scale = if (max - min).is_finite() { 1.0 } else { 0.5 };
    let range = max * scale - min * scale;

    if range == 0.0 {
        return Ok(vec![1.0; values.len()]);
    }

    Ok(values
        .iter()
        .map(|v| ((v * scale - min * scale) / range).clamp(0.0, 1.0))
        .collect())
}

/// Normalized similarity of every paragraph in `data` to sentence
/// `sentence_index`, aligned with `data.paragraphs`.
pub fn paragraph_similarities(data: &SummaryData, sentence_index: usize) -> Result<Vec<f64>> {
    let sentence = data
        .sentences
        .get(sentence_index)
        .ok_or(SummaryError::IndexOutOfRange {
            index: sentence_index,
            len: data.sentences.len(),
        })?;

    if data.paragraphs.is_empty() {
        return Ok(Vec::new());
    }

    let embeddings: Vec<&[f32]> = data
        .paragraphs
        .iter()
        .map(|p| p.embedding.as_slice())
        .collect();
    let raw = raw_similarities(&sentence.embedding, &embeddings)?;
    normalize_unit_interval(&raw)
}
