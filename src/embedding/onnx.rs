//! ONNX Runtime wrapper for the all-MiniLM-L6-v2 sentence transformer
//!
//! The model is loaded once at startup and shared by every request. Encoding
//! follows the sentence-transformers pipeline for this model: BERT
//! tokenization, token embeddings from the ONNX graph, attention-masked mean
//! pooling, then L2 normalization.

use super::EmbeddingProvider;
use crate::config::EmbeddingConfig;
use crate::error::{EmbeddingError, Result};
use async_trait::async_trait;
use ndarray::{Array2, ArrayView2, Axis, Ix2};
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokenizers::{Tokenizer, TruncationParams};
use tracing::{debug, info};

/// ONNX graph inside the model repository
pub const ONNX_MODEL_FILE: &str = "onnx/model.onnx";

/// Tokenizer definition inside the model repository
pub const TOKENIZER_FILE: &str = "tokenizer.json";

/// Local paths of the files needed to run the model
#[derive(Debug, Clone)]
pub struct ModelFiles {
    pub model: PathBuf,
    pub tokenizer: PathBuf,
}

impl ModelFiles {
    /// Use `model_dir` when configured, otherwise fetch from the Hugging Face hub
    pub fn resolve(config: &EmbeddingConfig) -> std::result::Result<Self, EmbeddingError> {
        match &config.model_dir {
            Some(dir) => Self::from_dir(dir),
            None => Self::download(&config.model_id),
        }
    }

    /// Locate the model files in a local directory.
    ///
    /// Accepts both the hub layout (`onnx/model.onnx`) and a flat `model.onnx`.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> std::result::Result<Self, EmbeddingError> {
        let dir = dir.as_ref();
        let model = [dir.join(ONNX_MODEL_FILE), dir.join("model.onnx")]
            .into_iter()
            .find(|p| p.exists())
            .ok_or_else(|| EmbeddingError::ModelNotFound(dir.join(ONNX_MODEL_FILE).display().to_string()))?;

        let tokenizer = dir.join(TOKENIZER_FILE);
        if !tokenizer.exists() {
            return Err(EmbeddingError::ModelNotFound(tokenizer.display().to_string()));
        }

        Ok(Self { model, tokenizer })
    }

    /// Download (or reuse the local hub cache of) the model files
    pub fn download(model_id: &str) -> std::result::Result<Self, EmbeddingError> {
        info!("Resolving {} from the Hugging Face hub", model_id);
        let api = hf_hub::api::sync::Api::new()
            .map_err(|e| EmbeddingError::Download(e.to_string()))?;
        let repo = api.model(model_id.to_string());

        let model = repo
            .get(ONNX_MODEL_FILE)
            .map_err(|e| EmbeddingError::Download(format!("{}: {}", ONNX_MODEL_FILE, e)))?;
        let tokenizer = repo
            .get(TOKENIZER_FILE)
            .map_err(|e| EmbeddingError::Download(format!("{}: {}", TOKENIZER_FILE, e)))?;

        Ok(Self { model, tokenizer })
    }
}

/// Sentence-embedding model backed by ONNX Runtime.
///
/// Cloning is cheap; the session and tokenizer are shared. The session is
/// behind a mutex because ONNX Runtime needs exclusive access per run.
#[derive(Clone)]
pub struct SentenceEmbedder {
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
    model_name: String,
    dimension: usize,
}

impl std::fmt::Debug for SentenceEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceEmbedder")
            .field("model_name", &self.model_name)
            .field("dimension", &self.dimension)
            .finish_non_exhaustive()
    }
}

impl SentenceEmbedder {
    /// Resolve the model files and load the model off the async runtime
    pub async fn load(config: EmbeddingConfig) -> Result<Self> {
        let embedder = tokio::task::spawn_blocking(move || Self::load_blocking(&config))
            .await
            .map_err(|e| EmbeddingError::Task(e.to_string()))??;
        Ok(embedder)
    }

    fn load_blocking(config: &EmbeddingConfig) -> std::result::Result<Self, EmbeddingError> {
        let files = ModelFiles::resolve(config)?;
        Self::from_files(config, &files)
    }

    /// Build the embedder from files already on disk
    pub fn from_files(
        config: &EmbeddingConfig,
        files: &ModelFiles,
    ) -> std::result::Result<Self, EmbeddingError> {
        info!("Loading embedding model from {}", files.model.display());

        let session = Session::builder()
            .map_err(load_error(&files.model))?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .map_err(load_error(&files.model))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(load_error(&files.model))?
            .with_intra_threads(config.intra_threads)
            .map_err(load_error(&files.model))?
            .commit_from_file(&files.model)
            .map_err(load_error(&files.model))?;

        let mut tokenizer = Tokenizer::from_file(&files.tokenizer)
            .map_err(|e| EmbeddingError::Tokenizer(e.to_string()))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: config.max_length,
                ..Default::default()
            }))
            .map_err(|e| EmbeddingError::Tokenizer(e.to_string()))?;
        tokenizer.with_padding(None);

        let embedder = Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
            model_name: config.model_id.clone(),
            dimension: config.dimension,
        };

        // A model with a different hidden size must not start serving
        embedder.encode("validation test")?;
        info!(
            "Embedding model {} ready ({} dimensions)",
            embedder.model_name, embedder.dimension
        );

        Ok(embedder)
    }

    /// Encode one text synchronously
    pub fn encode(&self, text: &str) -> std::result::Result<Vec<f32>, EmbeddingError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| EmbeddingError::Tokenizer(e.to_string()))?;

        let mask: Vec<i64> = encoding.get_attention_mask().iter().map(|&m| m as i64).collect();
        let ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let seq_len = ids.len();
        debug!("Encoding {} tokens", seq_len);

        let input_ids = Array2::from_shape_vec((1, seq_len), ids)?;
        let attention_mask = Array2::from_shape_vec((1, seq_len), mask.clone())?;
        let token_type_ids = Array2::<i64>::zeros((1, seq_len));

        let mut session = self
            .session
            .lock()
            .map_err(|_| EmbeddingError::Task("ONNX session lock poisoned".to_string()))?;
        let outputs = session.run(ort::inputs![
            "input_ids" => Value::from_array(input_ids)?,
            "attention_mask" => Value::from_array(attention_mask)?,
            "token_type_ids" => Value::from_array(token_type_ids)?
        ])?;

        // [batch, seq_len, hidden]
        let hidden = outputs[0].try_extract_array::<f32>()?;
        let shape = hidden.shape().to_vec();
        if shape.len() != 3 || shape[0] != 1 || shape[1] != seq_len {
            return Err(EmbeddingError::UnexpectedOutput(shape));
        }
        let tokens = hidden.index_axis(Axis(0), 0).into_dimensionality::<Ix2>()?;

        let mut embedding = mean_pool(tokens, &mask);
        l2_normalize(&mut embedding);

        if embedding.len() != self.dimension {
            return Err(EmbeddingError::InvalidDimension {
                expected: self.dimension,
                actual: embedding.len(),
            });
        }

        Ok(embedding)
    }
}

#[async_trait]
impl EmbeddingProvider for SentenceEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let embedder = self.clone();
        let text = text.to_string();
        let embedding = tokio::task::spawn_blocking(move || embedder.encode(&text))
            .await
            .map_err(|e| EmbeddingError::Task(e.to_string()))??;
        Ok(embedding)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

fn load_error<E: std::fmt::Display>(model: &Path) -> impl Fn(E) -> EmbeddingError + '_ {
    move |e| EmbeddingError::ModelLoad(format!("{}: {}", model.display(), e))
}

/// Average token embeddings, weighting each token by its attention mask
pub fn mean_pool(tokens: ArrayView2<f32>, mask: &[i64]) -> Vec<f32> {
    let mut pooled = vec![0.0f32; tokens.ncols()];
    let mut mask_sum = 0.0f32;

    for (row, &m) in tokens.axis_iter(Axis(0)).zip(mask) {
        let weight = m as f32;
        mask_sum += weight;
        for (acc, value) in pooled.iter_mut().zip(row.iter()) {
            *acc += value * weight;
        }
    }

    let denom = mask_sum.max(1e-9);
    for value in &mut pooled {
        *value /= denom;
    }
    pooled
}

/// Scale a vector to unit length; near-zero vectors are left as they are
pub fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt().max(1e-12);
    for value in vector.iter_mut() {
        *value /= norm;
    }
}
