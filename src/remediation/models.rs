//! Wire records for the fix endpoint

use serde::{Deserialize, Serialize};

/// Body of `POST /fix`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixRequest {
    pub context: String,
}

/// Response of `POST /fix`; `fix` is empty when generation failed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FixResponse {
    pub fix: String,
}
