use std::cmp::Ordering;

use num::Float;

use super::SparseVec;

impl<N> SparseVec<N>
where
    N: Float,
{
    /// ドット積
    /// d(a, b) = Σ(a_i * b_i)
    ///
    /// Products are summed in index order, so `a.dot(b)` and `b.dot(a)` are bitwise equal.
    #[inline]
    pub fn dot(&self, other: &Self) -> N {
        debug_assert_eq!(
            self.dim(),
            other.dim(),
            "Vectors must be of the same length to compute dot product."
        );

        let mut result = N::zero();
        let (a_ind, a_val) = (&self.indices, &self.values);
        let (b_ind, b_val) = (&other.indices, &other.values);
        let mut i = 0;
        let mut j = 0;
        while i < a_ind.len() && j < b_ind.len() {
            match a_ind[i].cmp(&b_ind[j]) {
                Ordering::Equal => {
                    result = result + a_val[i] * b_val[j];
                    i += 1;
                    j += 1;
                }
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
            }
        }
        result
    }

    #[inline]
    pub fn norm_sq(&self) -> N {
        self.values.iter().fold(N::zero(), |acc, &v| acc + v * v)
    }

    /// ||a|| = sqrt(Σ(a_i^2))
    #[inline]
    pub fn norm_l2(&self) -> N {
        self.norm_sq().sqrt()
    }

    /// Scale to unit length; a zero vector stays zero
    pub fn normalize_l2(&mut self) {
        let norm = self.norm_l2();
        if norm.is_zero() {
            return;
        }
        for v in self.values.iter_mut() {
            *v = *v / norm;
        }
    }

    /// 要素ごとの積 (dense な重みとのアダマール積)
    ///
    /// `weights` must cover every stored index.
    pub fn scale_by(&mut self, weights: &[N]) {
        debug_assert!(weights.len() >= self.dim());
        for (idx, v) in self.indices.iter().zip(self.values.iter_mut()) {
            *v = *v * weights[*idx as usize];
        }
        self.retain_non_zero();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_only_counts_shared_indices() {
        let a = SparseVec::<f64>::from_dense(&[1.0, 0.0, 2.0, 3.0]);
        let b = SparseVec::<f64>::from_dense(&[4.0, 5.0, 0.0, 1.0]);
        assert_eq!(a.dot(&b), 7.0);
        assert_eq!(a.dot(&b), b.dot(&a));
        assert_eq!(a.dot(&SparseVec::new(4)), 0.0);
    }

    #[test]
    fn normalize_gives_unit_length() {
        let mut v = SparseVec::<f64>::from_dense(&[3.0, 0.0, 4.0]);
        v.normalize_l2();
        assert!((v.norm_l2() - 1.0).abs() < 1e-12);
        assert_eq!(v.to_dense(), vec![0.6, 0.0, 0.8]);

        let mut zero = SparseVec::<f64>::new(3);
        zero.normalize_l2();
        assert!(zero.is_zero());
    }

    #[test]
    fn scale_by_weights() {
        let mut v = SparseVec::<f32>::from_dense(&[1.0, 2.0, 0.0]);
        v.scale_by(&[2.0, 0.0, 9.0]);
        assert_eq!(v.to_dense(), vec![2.0, 0.0, 0.0]);
        assert_eq!(v.nnz(), 1);
    }
}
