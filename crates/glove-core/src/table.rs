//! Token to vector table parsed from a GloVe text file.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use ndarray::{Array2, ArrayView1};

use crate::error::LoadError;

const PROGRESS_EVERY: usize = 100_000;

/// Dense vectors for a vocabulary, one matrix row per token.
#[derive(Debug, Clone)]
pub struct VectorTable {
    index: HashMap<String, usize>,
    vectors: Array2<f32>,
}

impl VectorTable {
    /// Open and parse the embedding file at `path`.
    pub fn open(path: &Path, dims: usize) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::read(BufReader::new(file), dims, path)
    }

    /// Parse `<token> <f1> ... <fd>` lines. Every line must carry exactly
    /// `dims` components; blank lines are skipped and a repeated token keeps
    /// its last vector. `path` is only used for error context.
    pub fn read<R: BufRead>(mut reader: R, dims: usize, path: &Path) -> Result<Self, LoadError> {
        let parse_err = |line: usize, reason: String| LoadError::Parse {
            path: path.to_path_buf(),
            line,
            reason,
        };

        let mut index = HashMap::new();
        let mut data: Vec<f32> = Vec::new();
        let mut buf = Vec::new();
        let mut lineno = 0usize;

        loop {
            buf.clear();
            let n = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| LoadError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
            if n == 0 {
                break;
            }
            lineno += 1;
            let line = std::str::from_utf8(&buf)
                .map_err(|e| parse_err(lineno, format!("invalid UTF-8: {e}")))?;

            let mut fields = line.split_whitespace();
            let Some(token) = fields.next() else {
                continue;
            };

            let mut row = Vec::with_capacity(dims);
            for field in fields {
                let value: f32 = field.parse().map_err(|e| {
                    parse_err(
                        lineno,
                        format!("invalid component {field:?} for {token:?}: {e}"),
                    )
                })?;
                row.push(value);
            }
            if row.len() != dims {
                return Err(parse_err(
                    lineno,
                    format!("expected {dims} components for {token:?}, found {}", row.len()),
                ));
            }

            match index.get(token).copied() {
                Some(slot) => {
                    let start = slot * dims;
                    data[start..start + dims].copy_from_slice(&row);
                }
                None => {
                    index.insert(token.to_string(), index.len());
                    data.extend_from_slice(&row);
                }
            }

            if lineno % PROGRESS_EVERY == 0 {
                tracing::debug!(lines = lineno, path = %path.display(), "reading embeddings");
            }
        }

        let vectors = Array2::from_shape_vec((index.len(), dims), data)
            .map_err(|e| parse_err(lineno, e.to_string()))?;

        Ok(Self { index, vectors })
    }

    pub fn get(&self, token: &str) -> Option<ArrayView1<'_, f32>> {
        self.index.get(token).map(|&row| self.vectors.row(row))
    }

    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn dimensions(&self) -> usize {
        self.vectors.ncols()
    }
}

/// Pick the embedding file to read from `path`.
///
/// A regular file is used as is. A directory must hold exactly one regular,
/// non-hidden file.
pub fn locate_model_file(path: &Path) -> Result<PathBuf, LoadError> {
    let io_err = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let meta = std::fs::metadata(path).map_err(io_err)?;
    if meta.is_file() {
        return Ok(path.to_path_buf());
    }

    let mut candidates = Vec::new();
    for entry in std::fs::read_dir(path).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let candidate = entry.path();
        if candidate.is_file() {
            candidates.push(candidate);
        }
    }
    candidates.sort();

    match candidates.len() {
        0 => Err(LoadError::NoModelFile(path.to_path_buf())),
        1 => Ok(candidates.remove(0)),
        _ => Err(LoadError::AmbiguousModelDir {
            path: path.to_path_buf(),
            candidates,
        }),
    }
}
