pub mod serde;

use std::cmp::Ordering;

use num::Float;
use rayon::prelude::*;

use crate::utils::math::vector::SparseVec;

/// Dense, square, row-major similarity matrix
///
/// Row and column `i` both refer to input document `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix<N = f64>
where
    N: Float,
{
    size: usize,
    data: Vec<N>,
}

impl<N> SimilarityMatrix<N>
where
    N: Float,
{
    /// Wrap row-major data; `None` when `data` is not `size * size` long
    pub fn from_raw(size: usize, data: Vec<N>) -> Option<Self> {
        (size.checked_mul(size) == Some(data.len())).then_some(Self { size, data })
    }

    /// Side length
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// (rows, columns)
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.size, self.size)
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<N> {
        if i < self.size && j < self.size {
            Some(self.data[i * self.size + j])
        } else {
            None
        }
    }

    pub fn row(&self, i: usize) -> Option<&[N]> {
        (i < self.size).then(|| &self.data[i * self.size..(i + 1) * self.size])
    }

    pub fn as_slice(&self) -> &[N] {
        &self.data
    }

    /// The `k` rows most similar to `row`, excluding `row` itself
    ///
    /// Sorted by descending score; equal scores keep ascending row order.
    pub fn top_k(&self, row: usize, k: usize) -> Vec<(usize, N)> {
        let Some(scores) = self.row(row) else {
            return Vec::new();
        };
        let mut hits: Vec<(usize, N)> = scores
            .iter()
            .copied()
            .enumerate()
            .filter(|&(j, s)| j != row && !s.is_nan())
            .collect();
        hits.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal).then(a.0.cmp(&b.0)));
        hits.truncate(k);
        hits
    }
}

/// Pairwise dot products of all rows (linear kernel)
///
/// With L2-normalized rows this is the cosine similarity. Rows are computed
/// in parallel; every cell is written by exactly one worker.
pub fn linear_kernel<N>(rows: &[SparseVec<N>]) -> SimilarityMatrix<N>
where
    N: Float + Send + Sync,
{
    let size = rows.len();
    let mut data = vec![N::zero(); size * size];
    if size > 0 {
        data.par_chunks_mut(size).enumerate().for_each(|(i, out)| {
            let a = &rows[i];
            for (cell, b) in out.iter_mut().zip(rows) {
                *cell = a.dot(b);
            }
        });
    }
    SimilarityMatrix { size, data }
}
