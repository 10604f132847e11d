//! Wire records for the two embedding endpoints

use serde::{Deserialize, Serialize};

/// Body of `POST /embeddings` on the embedding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingsRequest {
    pub text: String,
}

/// Response of `POST /embeddings`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingsResponse {
    pub embeddings: Vec<f32>,
}

/// Body of `POST /embedding` on the fix service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    pub inp: String,
}

/// Response of `POST /embedding`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    pub embedding: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_names() {
        let req: EmbeddingsRequest = serde_json::from_value(json!({"text": "open port 22"})).unwrap();
        assert_eq!(req.text, "open port 22");

        let req: EmbeddingRequest = serde_json::from_value(json!({"inp": "public bucket"})).unwrap();
        assert_eq!(req.inp, "public bucket");

        let body = serde_json::to_value(EmbeddingsResponse { embeddings: vec![0.5] }).unwrap();
        assert_eq!(body, json!({"embeddings": [0.5]}));

        let body = serde_json::to_value(EmbeddingResponse { embedding: vec![0.5] }).unwrap();
        assert_eq!(body, json!({"embedding": [0.5]}));
    }
}
