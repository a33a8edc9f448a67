//! Remote emotion classification over HTTP

use crate::error::PipelineError;
use async_trait::async_trait;
use emolens_core::{EmotionReading, FacePayload, PipelineConfig};
use reqwest::multipart;
use serde::Deserialize;
use tracing::{debug, warn};

/// Emotion classification capability
///
/// This is the one boundary that never propagates errors: any transport or
/// protocol failure degrades to the unknown sentinel so a bad request can
/// only ever cost one update cycle.
#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    async fn classify(&self, payload: FacePayload) -> EmotionReading;
}

#[async_trait]
impl<T: EmotionClassifier + ?Sized> EmotionClassifier for std::sync::Arc<T> {
    async fn classify(&self, payload: FacePayload) -> EmotionReading {
        (**self).classify(payload).await
    }
}

/// Classifier backed by a remote inference service
///
/// Sends the payload as a multipart POST with a single `file` field and
/// expects a JSON body of the form
/// `{ "status": "success", "result": { "emotion": "...", "logits": [...] } }`.
pub struct HttpEmotionClient {
    client: reqwest::Client,
    endpoint: String,
    file_name: String,
}

impl HttpEmotionClient {
    pub fn new(endpoint: impl Into<String>, config: &PipelineConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            file_name: config.upload_file_name.clone(),
        }
    }

    /// Use a pre-built reqwest client (shared pools, custom timeouts)
    pub fn with_client(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        config: &PipelineConfig,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            file_name: config.upload_file_name.clone(),
        }
    }

    async fn send(&self, payload: FacePayload) -> Result<EmotionReading, PipelineError> {
        let file_name = format!("{}.{}", self.file_name, payload.format.extension());
        let content_type = payload.format.content_type();

        let part = multipart::Part::bytes(payload.bytes.to_vec())
            .file_name(file_name)
            .mime_str(content_type)?;
        let form = multipart::Form::new().part("file", part);

        debug!(
            "Posting {}x{} {} payload to {}",
            payload.width, payload.height, content_type, self.endpoint
        );

        let response = self.client.post(&self.endpoint).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Emotion service returned HTTP {}", status);
            return Ok(EmotionReading::unknown());
        }

        let body = response.text().await?;
        Ok(reading_from_body(&body))
    }
}

#[async_trait]
impl EmotionClassifier for HttpEmotionClient {
    async fn classify(&self, payload: FacePayload) -> EmotionReading {
        match self.send(payload).await {
            Ok(reading) => reading,
            Err(e) => {
                warn!("Emotion request failed: {}", e);
                EmotionReading::unknown()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    status: Option<String>,
    result: Option<ClassifyResult>,
}

#[derive(Debug, Deserialize)]
struct ClassifyResult {
    emotion: Option<String>,
    logits: Option<Vec<f32>>,
}

/// Parse a service response body into a reading
///
/// Malformed JSON, a non-success status field, or a missing emotion label
/// all yield the unknown sentinel.
pub fn reading_from_body(body: &str) -> EmotionReading {
    let parsed: ClassifyResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Malformed emotion response: {}", e);
            return EmotionReading::unknown();
        }
    };

    if parsed.status.as_deref() != Some("success") {
        warn!(
            "Emotion service status was {:?}",
            parsed.status.as_deref().unwrap_or("missing")
        );
        return EmotionReading::unknown();
    }

    let label = parsed
        .result
        .and_then(|r| r.emotion.map(|emotion| (emotion, r.logits)));

    match label {
        Some((emotion, logits)) if !emotion.trim().is_empty() => {
            EmotionReading::new(emotion, logits)
        }
        _ => EmotionReading::unknown(),
    }
}
