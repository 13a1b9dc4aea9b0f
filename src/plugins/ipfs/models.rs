use serde::{Serialize, Deserialize};

/// Draft story data collected from the write form. Only title and content are
/// required; everything else the author supplied (tags, cover, language,
/// target age, premium flag, ...) rides along in `extra` and is pinned
/// verbatim so a later fetch returns the payload unchanged.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StorySubmission {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub cid: String,
    pub pinata_url: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FetchResponse {
    pub success: bool,
    pub data: serde_json::Value,
    pub cid: String,
    pub fetched_at: chrono::DateTime<chrono::Utc>,
}
