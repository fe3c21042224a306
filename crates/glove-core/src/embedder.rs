use crate::embeddings::Embeddings;
use crate::error::{GloveError, GloveResult};
use crate::pooling::{EncodeOptions, Pooling};

pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> GloveResult<Vec<f32>>;
    fn embed_batch(&self, texts: &[&str]) -> GloveResult<Vec<Vec<f32>>>;
    fn dimensions(&self) -> usize;
}

/// A loaded model with a fixed pooling mode, usable wherever an
/// [`Embedder`] is expected.
pub struct PooledEmbedder {
    embeddings: Embeddings,
    pooling: Pooling,
    options: EncodeOptions,
    dimensions: usize,
}

impl PooledEmbedder {
    /// Fails with [`GloveError::NoModelLoaded`] if `embeddings` is empty, and
    /// with [`GloveError::MissingArgument`] for TF-IDF pooling without weights.
    pub fn new(
        embeddings: Embeddings,
        pooling: Pooling,
        options: EncodeOptions,
    ) -> GloveResult<Self> {
        let dimensions = embeddings.dimensions().ok_or(GloveError::NoModelLoaded)?;
        if pooling == Pooling::TfIdfSum && options.tfidf.as_ref().map_or(true, |w| w.is_empty()) {
            return Err(GloveError::MissingArgument("tfidf"));
        }
        Ok(Self {
            embeddings,
            pooling,
            options,
            dimensions,
        })
    }

    pub fn pooling(&self) -> Pooling {
        self.pooling
    }

    pub fn embeddings(&self) -> &Embeddings {
        &self.embeddings
    }
}

impl Embedder for PooledEmbedder {
    fn embed(&self, text: &str) -> GloveResult<Vec<f32>> {
        self.embeddings.encode_with(text, self.pooling, &self.options)
    }

    fn embed_batch(&self, texts: &[&str]) -> GloveResult<Vec<Vec<f32>>> {
        texts.iter().map(|text| self.embed(text)).collect()
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> (tempfile::TempDir, Embeddings) {
        let dir = tempfile::tempdir().unwrap();
        let mut body = String::new();
        for (token, v) in [("red", 1.0), ("blue", -1.0)] {
            body.push_str(token);
            for _ in 0..25 {
                body.push_str(&format!(" {v}"));
            }
            body.push('\n');
        }
        std::fs::write(dir.path().join("glove.twitter.27B.25d.txt"), body).unwrap();
        let mut emb = Embeddings::new();
        emb.load("twitter_25", dir.path()).unwrap();
        (dir, emb)
    }

    #[test]
    fn test_requires_loaded_model() {
        let err = PooledEmbedder::new(Embeddings::new(), Pooling::Mean, EncodeOptions::default())
            .err()
            .unwrap();
        assert!(matches!(err, GloveError::NoModelLoaded));
    }

    #[test]
    fn test_tfidf_requires_weights_upfront() {
        let (_dir, emb) = loaded();
        let err = PooledEmbedder::new(emb, Pooling::TfIdfSum, EncodeOptions::default())
            .err()
            .unwrap();
        assert!(matches!(err, GloveError::MissingArgument("tfidf")));
    }

    #[test]
    fn test_tfidf_rejects_empty_weights() {
        let (_dir, emb) = loaded();
        let options = EncodeOptions::with_tfidf(std::collections::HashMap::new());
        let err = PooledEmbedder::new(emb, Pooling::TfIdfSum, options).err().unwrap();
        assert!(matches!(err, GloveError::MissingArgument("tfidf")));
    }

    #[test]
    fn test_embed_through_trait() {
        let (_dir, emb) = loaded();
        let embedder = PooledEmbedder::new(emb, Pooling::Sum, EncodeOptions::default()).unwrap();
        let dyn_embedder: &dyn Embedder = &embedder;
        assert_eq!(dyn_embedder.dimensions(), 25);

        let v = dyn_embedder.embed("red red blue").unwrap();
        assert_eq!(v, vec![1.0; 25]);

        let batch = dyn_embedder.embed_batch(&["red", "unknown"]).unwrap();
        assert_eq!(batch, vec![vec![1.0; 25], vec![0.0; 25]]);
        assert!(dyn_embedder.embed_batch(&[]).unwrap().is_empty());
    }
}
