pub mod math;

use std::fmt::Debug;

use num::Float;

/// SparseVec は 0 要素を省いた疎ベクトルです
///
/// `indices` は昇順で重複なし、`values` は同じ位置の非ゼロ値を持ちます。
/// `dim` は論理的な長さ (語彙サイズ) です。
#[derive(Clone, PartialEq)]
pub struct SparseVec<N>
where
    N: Float,
{
    indices: Vec<u32>,
    values: Vec<N>,
    dim: usize,
}

impl<N> SparseVec<N>
where
    N: Float,
{
    #[inline]
    pub fn new(dim: usize) -> Self {
        Self {
            indices: Vec::new(),
            values: Vec::new(),
            dim,
        }
    }

    #[inline]
    pub fn with_capacity(dim: usize, nnz: usize) -> Self {
        Self {
            indices: Vec::with_capacity(nnz),
            values: Vec::with_capacity(nnz),
            dim,
        }
    }

    /// Build from `(index, value)` pairs in any order
    ///
    /// Zero values are dropped; repeated indices are summed.
    pub fn from_pairs(dim: usize, mut pairs: Vec<(u32, N)>) -> Self {
        pairs.sort_unstable_by_key(|&(idx, _)| idx);
        let mut vec = Self::with_capacity(dim, pairs.len());
        for (idx, val) in pairs {
            debug_assert!((idx as usize) < dim, "index {idx} out of range for dim {dim}");
            match vec.indices.last() {
                Some(&last) if last == idx => {
                    if let Some(v) = vec.values.last_mut() {
                        *v = *v + val;
                    }
                }
                _ => {
                    vec.indices.push(idx);
                    vec.values.push(val);
                }
            }
        }
        vec.retain_non_zero();
        vec
    }

    pub fn from_dense(values: &[N]) -> Self {
        let pairs = values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as u32, v))
            .collect();
        Self::from_pairs(values.len(), pairs)
    }

    fn retain_non_zero(&mut self) {
        if self.values.iter().all(|v| !v.is_zero()) {
            return;
        }
        let (indices, values): (Vec<u32>, Vec<N>) = self
            .indices
            .iter()
            .zip(self.values.iter())
            .filter(|(_, v)| !v.is_zero())
            .map(|(&i, &v)| (i, v))
            .unzip();
        self.indices = indices;
        self.values = values;
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.indices.is_empty()
    }

    /// Value at `index`, zero when not stored
    pub fn get(&self, index: usize) -> Option<N> {
        if index >= self.dim {
            return None;
        }
        match self.indices.binary_search(&(index as u32)) {
            Ok(pos) => Some(self.values[pos]),
            Err(_) => Some(N::zero()),
        }
    }

    /// Stored `(index, value)` pairs in index order
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, N)> + '_ {
        self.indices
            .iter()
            .zip(self.values.iter())
            .map(|(&i, &v)| (i as usize, v))
    }

    pub fn to_dense(&self) -> Vec<N> {
        let mut out = vec![N::zero(); self.dim];
        for (i, v) in self.raw_iter() {
            out[i] = v;
        }
        out
    }

    #[inline]
    pub fn shrink_to_fit(&mut self) {
        self.indices.shrink_to_fit();
        self.values.shrink_to_fit();
    }
}

impl<N> Debug for SparseVec<N>
where
    N: Float + Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            write!(f, "SparseVec {{ dim: {}, nnz: {}, entries: ", self.dim, self.nnz())?;
            f.debug_map().entries(self.raw_iter()).finish()?;
            write!(f, " }}")
        } else {
            f.debug_list().entries(self.to_dense()).finish()
        }
    }
}
