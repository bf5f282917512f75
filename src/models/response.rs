use serde::{Deserialize, Serialize};

/// Envelope shared by every list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub page: usize,
    pub total_pages: usize,
    pub count: usize,
    pub total_count: usize,
    pub data: Vec<T>,
}

impl<T> PageResponse<T> {
    /// First and only page of an empty listing.
    pub fn empty(count: usize) -> Self {
        Self {
            page: 1,
            total_pages: 1,
            count,
            total_count: 0,
            data: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexResponse {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
