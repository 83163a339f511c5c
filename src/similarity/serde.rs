use num::Float;
use serde::de::Error as DeError;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::SimilarityMatrix;

impl<N> Serialize for SimilarityMatrix<N>
where
    N: Float + Serialize,
{
    /// `size` と row-major の `data` をシリアライズする
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("SimilarityMatrix", 2)?;
        state.serialize_field("size", &(self.size as u64))?;
        state.serialize_field("data", &self.data)?;
        state.end()
    }
}

impl<'de, N> Deserialize<'de> for SimilarityMatrix<N>
where
    N: Float + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct SimilarityMatrixData<N> {
            size: u64,
            data: Vec<N>,
        }

        let raw = SimilarityMatrixData::<N>::deserialize(deserializer)?;
        let size = usize::try_from(raw.size).map_err(DeError::custom)?;
        let len = raw.data.len();
        SimilarityMatrix::from_raw(size, raw.data).ok_or_else(|| {
            DeError::custom(format!(
                "SimilarityMatrix deserialize error: size {size} needs {} values, found {len}",
                size.saturating_mul(size)
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cbor_roundtrip_keeps_layout() {
        let m = SimilarityMatrix::from_raw(2, vec![1.0f64, 0.25, 0.25, 1.0]).unwrap();
        let bytes = serde_cbor::to_vec(&m).unwrap();
        let de: SimilarityMatrix<f64> = serde_cbor::from_slice(&bytes).unwrap();
        assert_eq!(de, m);
    }

    #[test]
    fn rejects_size_mismatch() {
        #[derive(Serialize)]
        struct Bad {
            size: u64,
            data: Vec<f64>,
        }
        let bytes = serde_cbor::to_vec(&Bad { size: 3, data: vec![1.0; 4] }).unwrap();
        let res = serde_cbor::from_slice::<SimilarityMatrix<f64>>(&bytes);
        assert!(res.is_err());
    }
}
