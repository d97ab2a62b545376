//! Request and response shapes of the text completion endpoint.
//!
//! # Example request
//! ```json
//! {
//!   "prompt": "Object: the moon\nSimile: ...",
//!   "temperature": 0.7,
//!   "candidateCount": 8,
//!   "maxOutputTokens": 200,
//!   "safetySettings": [{"category": "HARM_CATEGORY_TOXICITY", "threshold": "BLOCK_ONLY_HIGH"}]
//! }
//! ```

use serde::{Deserialize, Serialize};

pub const DEFAULT_CANDIDATE_COUNT: u32 = 8;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 200;

/// Code reported when no HTTP response was received or it could not be decoded.
pub const TRANSPORT_ERROR_CODE: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmCategory {
    HarmCategoryDerogatory,
    HarmCategoryToxicity,
    HarmCategoryViolence,
    HarmCategorySexual,
    HarmCategoryMedical,
    HarmCategoryDangerous,
}

impl HarmCategory {
    pub const ALL: [HarmCategory; 6] = [
        HarmCategory::HarmCategoryDerogatory,
        HarmCategory::HarmCategoryToxicity,
        HarmCategory::HarmCategoryViolence,
        HarmCategory::HarmCategorySexual,
        HarmCategory::HarmCategoryMedical,
        HarmCategory::HarmCategoryDangerous,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmThreshold {
    BlockNone,
    BlockLowAndAbove,
    BlockMediumAndAbove,
    #[default]
    BlockOnlyHigh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmThreshold,
}

impl SafetySetting {
    /// One setting per harm category, all at `threshold`.
    pub fn uniform(threshold: HarmThreshold) -> Vec<SafetySetting> {
        HarmCategory::ALL
            .iter()
            .map(|&category| SafetySetting {
                category,
                threshold,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequest {
    pub prompt: String,
    pub temperature: f32,
    pub candidate_count: u32,
    pub max_output_tokens: u32,
    pub safety_settings: Vec<SafetySetting>,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, temperature: f32) -> Self {
        Self {
            prompt: prompt.into(),
            temperature,
            candidate_count: DEFAULT_CANDIDATE_COUNT,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            safety_settings: SafetySetting::uniform(HarmThreshold::default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_status_code: Option<u16>,
}

impl ApiError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            code: TRANSPORT_ERROR_CODE,
            message: message.into(),
            http_status_code: None,
        }
    }
}

/// Outcome of one predict call. Callers branch on the variant before
/// touching candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionResponse {
    Candidates(Vec<Candidate>),
    Error(ApiError),
}

impl CompletionResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, CompletionResponse::Error(_))
    }

    /// Interprets a JSON body returned by the endpoint.
    ///
    /// Understands `{"candidates": [...]}`, the Google error envelope
    /// `{"error": {"code", "message"}}` and a bare `{"code", "message"}`.
    /// A body with neither candidates nor an error (every candidate blocked
    /// by a safety filter) is an empty candidate list.
    pub fn from_body(body: &serde_json::Value, http_status: Option<u16>) -> Self {
        let envelope = body.get("error").unwrap_or(body);
        if let Some(error) = ErrorBody::from_value(envelope) {
            return CompletionResponse::Error(ApiError {
                code: error.code.unwrap_or_else(|| http_status.map_or(TRANSPORT_ERROR_CODE, i32::from)),
                message: error.message,
                http_status_code: http_status,
            });
        }

        match body.get("candidates") {
            Some(value) => match serde_json::from_value::<Vec<Candidate>>(value.clone()) {
                Ok(candidates) => CompletionResponse::Candidates(candidates),
                Err(e) => CompletionResponse::Error(ApiError {
                    code: TRANSPORT_ERROR_CODE,
                    message: format!("Malformed candidates: {}", e),
                    http_status_code: http_status,
                }),
            },
            None => CompletionResponse::Candidates(Vec::new()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<i32>,
    message: String,
}

impl ErrorBody {
    fn from_value(value: &serde_json::Value) -> Option<Self> {
        if value.get("message").is_none() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }
}
