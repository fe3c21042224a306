use std::collections::HashMap;
use std::fmt;

use ndarray::{Array1, ArrayView1, Zip};

/// How per-token vectors are reduced to one vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pooling {
    Mean,
    Max,
    Sum,
    /// Weights each vector by its TF-IDF score, then averages. Despite the
    /// name the reduction is a mean. An empty weight map counts as missing.
    TfIdfSum,
}

impl fmt::Display for Pooling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mean => write!(f, "mean"),
            Self::Max => write!(f, "max"),
            Self::Sum => write!(f, "sum"),
            Self::TfIdfSum => write!(f, "tf-idf-sum"),
        }
    }
}

impl std::str::FromStr for Pooling {
    /// The rejected identifier.
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mean" => Ok(Self::Mean),
            "max" => Ok(Self::Max),
            "sum" => Ok(Self::Sum),
            "tf-idf-sum" => Ok(Self::TfIdfSum),
            _ => Err(s.to_string()),
        }
    }
}

/// Extra inputs some pooling modes need.
#[derive(Debug, Clone, Default)]
pub struct EncodeOptions {
    /// Per-token TF-IDF weights, required by [`Pooling::TfIdfSum`].
    pub tfidf: Option<HashMap<String, f32>>,
}

impl EncodeOptions {
    pub fn with_tfidf(tfidf: HashMap<String, f32>) -> Self {
        Self {
            tfidf: Some(tfidf),
        }
    }
}

/// Elementwise sum. Zero vector when `vectors` is empty.
pub(crate) fn sum<'a>(
    vectors: impl IntoIterator<Item = ArrayView1<'a, f32>>,
    dims: usize,
) -> Array1<f32> {
    let mut acc = Array1::zeros(dims);
    for v in vectors {
        acc += &v;
    }
    acc
}

/// Elementwise arithmetic mean. Zero vector when `vectors` is empty.
pub(crate) fn mean<'a>(
    vectors: impl IntoIterator<Item = ArrayView1<'a, f32>>,
    dims: usize,
) -> Array1<f32> {
    let mut acc = Array1::zeros(dims);
    let mut n = 0usize;
    for v in vectors {
        acc += &v;
        n += 1;
    }
    if n > 0 {
        acc /= n as f32;
    }
    acc
}

/// Elementwise maximum. Zero vector when `vectors` is empty.
pub(crate) fn max<'a>(
    vectors: impl IntoIterator<Item = ArrayView1<'a, f32>>,
    dims: usize,
) -> Array1<f32> {
    let mut iter = vectors.into_iter();
    let Some(first) = iter.next() else {
        return Array1::zeros(dims);
    };
    let mut acc = first.to_owned();
    for v in iter {
        Zip::from(&mut acc).and(&v).for_each(|a, &b| *a = a.max(b));
    }
    acc
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    fn fixture() -> Vec<Array1<f32>> {
        vec![array![1.0, 2.0], array![3.0, 0.0], array![5.0, 4.0]]
    }

    #[test]
    fn test_parse_pooling() {
        assert_eq!("mean".parse::<Pooling>(), Ok(Pooling::Mean));
        assert_eq!("tf-idf-sum".parse::<Pooling>(), Ok(Pooling::TfIdfSum));
        assert_eq!("Mean".parse::<Pooling>(), Err("Mean".to_string()));
        assert_eq!("bogus-mode".parse::<Pooling>(), Err("bogus-mode".to_string()));
    }

    #[test]
    fn test_display_roundtrips_identifier() {
        for mode in [Pooling::Mean, Pooling::Max, Pooling::Sum, Pooling::TfIdfSum] {
            assert_eq!(mode.to_string().parse::<Pooling>(), Ok(mode));
        }
    }

    #[test]
    fn test_reductions() {
        let vs = fixture();
        assert_eq!(mean(vs.iter().map(|v| v.view()), 2), array![3.0, 2.0]);
        assert_eq!(sum(vs.iter().map(|v| v.view()), 2), array![9.0, 6.0]);
        assert_eq!(max(vs.iter().map(|v| v.view()), 2), array![5.0, 4.0]);
    }

    #[test]
    fn test_max_with_negatives() {
        let vs = [array![-3.0, -1.0], array![-2.0, -5.0]];
        assert_eq!(max(vs.iter().map(|v| v.view()), 2), array![-2.0, -1.0]);
    }

    #[test]
    fn test_empty_reductions_are_zero() {
        let empty: Vec<Array1<f32>> = Vec::new();
        assert_eq!(mean(empty.iter().map(|v| v.view()), 3), Array1::<f32>::zeros(3));
        assert_eq!(sum(empty.iter().map(|v| v.view()), 3), Array1::<f32>::zeros(3));
        assert_eq!(max(empty.iter().map(|v| v.view()), 3), Array1::<f32>::zeros(3));
    }
}
