//! Crop Vision Client
//!
//! Client for the hosted image-understanding service that inspects crop
//! photographs and suggests corrective actions.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::{PhotoAnalysis, StressType, SuggestedAction, Urgency};

use crate::error::{AppError, AppResult};

/// Client for the crop photo analysis service
#[derive(Clone)]
pub struct CropVisionClient {
    api_endpoint: String,
    api_key: String,
    http_client: Client,
}

/// Request to analyze a set of crop photographs
#[derive(Debug, Serialize)]
pub struct AnalyzePhotosRequest {
    /// Base64-encoded images
    pub images: Vec<String>,
}

/// Response from the crop analysis API
#[derive(Debug, Deserialize)]
pub struct AnalyzePhotosResponse {
    pub health_score: i32,
    pub stress_type: StressType,
    pub confidence: f32,
    pub key_findings: Vec<String>,
    pub urgency: Urgency,
    pub advice: String,
    pub suggested_actions: Option<Vec<SuggestedAction>>,
}

impl From<AnalyzePhotosResponse> for PhotoAnalysis {
    fn from(r: AnalyzePhotosResponse) -> Self {
        PhotoAnalysis {
            health_score: r.health_score,
            stress_type: r.stress_type,
            confidence: r.confidence,
            key_findings: r.key_findings,
            urgency: r.urgency,
            advice: r.advice,
            suggested_actions: r.suggested_actions,
        }
    }
}

impl CropVisionClient {
    /// Create a new crop vision client
    pub fn new(api_endpoint: String, api_key: String) -> Self {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_endpoint,
            api_key,
            http_client,
        }
    }

    /// Send images for crop health analysis
    pub async fn analyze_photos(&self, request: AnalyzePhotosRequest) -> AppResult<PhotoAnalysis> {
        if request.images.is_empty() {
            return Err(AppError::ValidationError(
                "At least one image is required".to_string(),
            ));
        }

        let response = self
            .http_client
            .post(&self.api_endpoint)
            .header("x-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::CropAnalysisError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::CropAnalysisError(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let result: AnalyzePhotosResponse = response
            .json()
            .await
            .map_err(|e| AppError::CropAnalysisError(format!("Failed to parse response: {}", e)))?;

        // Reject implausible payloads before they reach storage
        shared::validate_health_score(result.health_score)
            .and_then(|_| shared::validate_confidence(result.confidence))
            .map_err(|e| AppError::CropAnalysisError(e.to_string()))?;

        Ok(result.into())
    }
}
