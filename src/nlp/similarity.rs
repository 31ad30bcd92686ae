//! Pairwise cosine similarity and nearest-neighbour document links.

use anyhow::Result;
use ndarray::{Array2, Axis};

/// Row-normalise `vectors` and return the full cosine matrix.
/// Zero vectors have similarity 0 with everything, themselves included.
pub fn cosine_matrix(vectors: &[Vec<f32>]) -> Result<Array2<f32>> {
    let rows = vectors.len();
    let dim = vectors.first().map(Vec::len).unwrap_or(0);
    let flat: Vec<f32> = vectors.iter().flatten().copied().collect();
    let mut matrix = Array2::from_shape_vec((rows, dim), flat)?;
    for mut row in matrix.axis_iter_mut(Axis(0)) {
        let norm = row.dot(&row).sqrt();
        if norm > 0.0 {
            row.mapv_inplace(|v| v / norm);
        }
    }
    Ok(matrix.dot(&matrix.t()))
}

/// The `k` most similar other rows for row `idx`, by descending score.
///
/// Equivalent to taking the `k + 1` best entries and dropping `idx` itself;
/// equal scores order by ascending index and NaN scores rank last.
pub fn nearest(scores: &Array2<f32>, idx: usize, k: usize) -> Vec<usize> {
    let row = scores.row(idx);
    let mut ranked: Vec<(usize, f32)> = row
        .iter()
        .copied()
        .enumerate()
        .filter(|(other, _)| *other != idx)
        .map(|(other, score)| (other, if score.is_nan() { f32::NEG_INFINITY } else { score }))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.into_iter().take(k).map(|(other, _)| other).collect()
}

/// Nearest neighbours for every row, in row order.
pub fn link_all(vectors: &[Vec<f32>], k: usize) -> Result<Vec<Vec<usize>>> {
    if vectors.is_empty() {
        return Ok(Vec::new());
    }
    let scores = cosine_matrix(vectors)?;
    Ok((0..vectors.len()).map(|idx| nearest(&scores, idx, k)).collect())
}
