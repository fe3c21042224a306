pub mod catalog;
pub mod embedder;
pub mod embeddings;
pub mod error;
pub mod pooling;
pub mod table;
pub mod tokenizer;

pub use catalog::{models, resolve, ModelDescriptor};
pub use embedder::{Embedder, PooledEmbedder};
pub use embeddings::{cosine_similarity, Embeddings};
pub use error::{GloveError, GloveResult, LoadError};
pub use pooling::{EncodeOptions, Pooling};
pub use table::VectorTable;
pub use tokenizer::{SimpleTokenizer, Tokenizer};
