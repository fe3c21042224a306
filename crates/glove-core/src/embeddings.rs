use std::path::Path;

use ndarray::{Array1, ArrayView1};

use crate::catalog::{self, ModelDescriptor};
use crate::error::{GloveError, GloveResult};
use crate::pooling::{self, EncodeOptions, Pooling};
use crate::table::{self, VectorTable};
use crate::tokenizer::{SimpleTokenizer, Tokenizer};

struct Loaded {
    model: &'static ModelDescriptor,
    table: VectorTable,
}

/// A loaded GloVe model and the text encoder built on top of it.
///
/// Each instance owns its own table, so several models can be held at once.
pub struct Embeddings {
    tokenizer: Box<dyn Tokenizer>,
    loaded: Option<Loaded>,
}

impl Embeddings {
    pub fn new() -> Self {
        Self::with_tokenizer(SimpleTokenizer)
    }

    pub fn with_tokenizer(tokenizer: impl Tokenizer + 'static) -> Self {
        Self {
            tokenizer: Box::new(tokenizer),
            loaded: None,
        }
    }

    /// Read the embedding file for `model` from `path` (the file itself, or
    /// a directory holding only that file).
    ///
    /// The previous model stays active if anything goes wrong.
    pub fn load(&mut self, model: &str, path: impl AsRef<Path>) -> GloveResult<&mut Self> {
        let descriptor = catalog::resolve(model)?;
        let file = table::locate_model_file(path.as_ref())?;
        tracing::debug!(model, path = %file.display(), "loading embeddings");

        let table = VectorTable::open(&file, descriptor.dimensions)?;
        tracing::info!(
            model,
            tokens = table.len(),
            dimensions = descriptor.dimensions,
            "model loaded"
        );

        self.loaded = Some(Loaded {
            model: descriptor,
            table,
        });
        Ok(self)
    }

    /// Active model, if any.
    pub fn model(&self) -> Option<&'static ModelDescriptor> {
        self.loaded.as_ref().map(|l| l.model)
    }

    pub fn table(&self) -> Option<&VectorTable> {
        self.loaded.as_ref().map(|l| &l.table)
    }

    pub fn dimensions(&self) -> Option<usize> {
        self.model().map(|m| m.dimensions)
    }

    fn active(&self) -> GloveResult<&Loaded> {
        self.loaded.as_ref().ok_or(GloveError::NoModelLoaded)
    }

    /// Tokenize with the active model's language.
    pub fn tokens(&self, text: &str) -> GloveResult<Vec<String>> {
        let loaded = self.active()?;
        Ok(self.tokenizer.tokenize(text, loaded.model.language))
    }

    pub fn vector(&self, token: &str) -> Option<Vec<f32>> {
        self.table()?.get(token).map(|v| v.to_vec())
    }

    /// Encode `text` with a pooling identifier (`mean`, `max`, `sum` or
    /// `tf-idf-sum`).
    pub fn encode(
        &self,
        text: &str,
        pooling: &str,
        options: &EncodeOptions,
    ) -> GloveResult<Vec<f32>> {
        let loaded = self.active()?;
        let mode = pooling
            .parse::<Pooling>()
            .map_err(|mode| GloveError::UnsupportedPoolingMode {
                mode,
                model: loaded.model.name.to_string(),
            })?;
        self.encode_with(text, mode, options)
    }

    /// Encode `text` into one vector of the model's dimensionality.
    ///
    /// Out-of-vocabulary tokens are dropped. When nothing matches the result
    /// is all zeros.
    pub fn encode_with(
        &self,
        text: &str,
        pooling: Pooling,
        options: &EncodeOptions,
    ) -> GloveResult<Vec<f32>> {
        let loaded = self.active()?;
        let dims = loaded.model.dimensions;
        let tokens = self.tokenizer.tokenize(text, loaded.model.language);
        let found = || tokens.iter().filter_map(|t| loaded.table.get(t));

        if found().next().is_none() {
            tracing::debug!(
                model = loaded.model.name,
                tokens = tokens.len(),
                "no token found in vocabulary"
            );
        }

        let pooled: Array1<f32> = match pooling {
            Pooling::Mean => pooling::mean(found(), dims),
            Pooling::Max => pooling::max(found(), dims),
            Pooling::Sum => pooling::sum(found(), dims),
            Pooling::TfIdfSum => {
                let weights = options
                    .tfidf
                    .as_ref()
                    .filter(|w| !w.is_empty())
                    .ok_or(GloveError::MissingArgument("tfidf"))?;
                let weighted: Vec<Array1<f32>> = tokens
                    .iter()
                    .filter_map(|t| Some(&loaded.table.get(t)? * *weights.get(t)?))
                    .collect();
                pooling::mean(weighted.iter().map(|v| v.view()), dims)
            }
        };

        Ok(pooled.to_vec())
    }

    pub fn encode_batch(
        &self,
        texts: &[&str],
        pooling: &str,
        options: &EncodeOptions,
    ) -> GloveResult<Vec<Vec<f32>>> {
        texts
            .iter()
            .map(|text| self.encode(text, pooling, options))
            .collect()
    }
}

impl Default for Embeddings {
    fn default() -> Self {
        Self::new()
    }
}

/// Cosine similarity of two equal-length vectors. Zero when either is a
/// zero vector.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let a = ArrayView1::from(a);
    let b = ArrayView1::from(b);
    let norm = a.dot(&a).sqrt() * b.dot(&b).sqrt();
    if norm == 0.0 {
        return 0.0;
    }
    a.dot(&b) / norm
}
