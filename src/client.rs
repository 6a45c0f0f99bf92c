//! HTTP client for OpenAI-compatible image generation and editing.

use crate::endpoint::{join_endpoint, OPENAI_BASE_URL};
use crate::error::{ImgenError, Result};
use crate::types::{encode_png, EditRequest, GenerationRequest, ImageResult, Quality};
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Environment variable consulted for the bearer token when no key is set
/// explicitly.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Builder for ImagesClient.
#[derive(Debug, Clone, Default)]
pub struct ImagesClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
}

impl ImagesClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key. Falls back to `OPENAI_API_KEY` env var.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the base URL requests are posted to. Defaults to the OpenAI
    /// endpoint; [`EndpointChoice::resolve`](crate::EndpointChoice::resolve)
    /// maps the named choices to their URLs.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Builds the client, resolving the API key.
    pub fn build(self) -> Result<ImagesClient> {
        let api_key = self
            .api_key
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .ok_or_else(|| {
                ImgenError::Auth("OPENAI_API_KEY not set and no API key provided".into())
            })?;

        Ok(ImagesClient {
            http: reqwest::Client::new(),
            api_key,
            base_url: self.base_url.unwrap_or_else(|| OPENAI_BASE_URL.to_string()),
        })
    }
}

/// Client for OpenAI-compatible image generation and edit endpoints.
pub struct ImagesClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl ImagesClient {
    /// Creates a new `ImagesClientBuilder`.
    pub fn builder() -> ImagesClientBuilder {
        ImagesClientBuilder::new()
    }

    /// Returns the base URL requests are posted to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generates images from a text prompt.
    ///
    /// Posts the request to the `generations` endpoint and returns every
    /// image the endpoint produced. Remote URLs come back as-is; base64
    /// payloads come back decoded.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<Vec<ImageResult>> {
        let url = join_endpoint(&self.base_url, "generations");
        let body = GenerationBody::from_request(request);

        tracing::debug!(model = %request.model, url = %url, "posting generation request");

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ImgenError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let images: ImagesResponse = response.json().await?;
        normalize(images)
    }

    /// Edits an image according to a text prompt.
    ///
    /// The image, and the mask when present, is re-encoded as PNG and sent
    /// as multipart form data to the `edits` endpoint. Only the first
    /// returned image is kept. A request without an image fails before any
    /// network I/O.
    pub async fn edit(&self, request: &EditRequest) -> Result<ImageResult> {
        let image = request.image.as_deref().ok_or(ImgenError::MissingImage)?;

        let mut form = reqwest::multipart::Form::new()
            .part("image", png_part(image, "image.png")?)
            .text("prompt", request.prompt.clone());

        if let Some(mask) = request.mask.as_deref() {
            form = form.part("mask", png_part(mask, "mask.png")?);
        }
        if let Some(model) = &request.model {
            form = form.text("model", model.clone());
        }
        if let Some(quality) = request.quality {
            form = form.text("quality", quality.as_str());
        }

        let url = join_endpoint(&self.base_url, "edits");
        tracing::debug!(url = %url, "posting edit request");

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ImgenError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let images: ImagesResponse = response.json().await?;
        normalize(images)?
            .into_iter()
            .next()
            .ok_or(ImgenError::NoOutput)
    }
}

fn png_part(data: &[u8], file_name: &'static str) -> Result<reqwest::multipart::Part> {
    let png = encode_png(data)?;
    let part = reqwest::multipart::Part::bytes(png)
        .file_name(file_name)
        .mime_str("image/png")?;
    Ok(part)
}

/// Turns a response body into image results.
///
/// The first data item decides the form of the whole batch: a `url` key
/// collects every URL, a `b64_json` key decodes every payload. An empty or
/// absent `data` array, or a first item carrying neither key, is treated as
/// no output.
fn normalize(response: ImagesResponse) -> Result<Vec<ImageResult>> {
    let first = response.data.first().ok_or(ImgenError::NoOutput)?;

    if first.url.is_some() {
        Ok(response
            .data
            .into_iter()
            .filter_map(|item| item.url)
            .map(ImageResult::Url)
            .collect())
    } else if first.b64_json.is_some() {
        response
            .data
            .into_iter()
            .filter_map(|item| item.b64_json)
            .map(|b64| {
                base64::engine::general_purpose::STANDARD
                    .decode(&b64)
                    .map(ImageResult::Inline)
                    .map_err(|e| ImgenError::Decode(e.to_string()))
            })
            .collect()
    } else {
        Err(ImgenError::NoOutput)
    }
}

#[derive(Debug, Serialize)]
struct GenerationBody {
    prompt: String,
    model: String,
    n: u32,
    quality: Quality,
}

impl GenerationBody {
    fn from_request(request: &GenerationRequest) -> Self {
        Self {
            prompt: request.prompt.clone(),
            model: request.model.clone(),
            n: 1,
            quality: request.quality,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    b64_json: Option<String>,
    #[serde(default)]
    #[allow(dead_code)]
    revised_prompt: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_with_explicit_key() {
        let client = ImagesClient::builder().api_key("sk-test").build();
        assert!(client.is_ok());
    }

    #[test]
    fn test_builder_without_key_fails() {
        // Clear env var to ensure the fallback has nothing to find
        std::env::remove_var(API_KEY_ENV);
        let client = ImagesClient::builder().build();
        assert!(matches!(client, Err(ImgenError::Auth(_))));
    }

    #[test]
    fn test_builder_defaults_to_openai_base() {
        let client = ImagesClient::builder().api_key("sk-test").build().unwrap();
        assert_eq!(client.base_url(), OPENAI_BASE_URL);
    }

    #[test]
    fn test_builder_accepts_custom_base() {
        let client = ImagesClient::builder()
            .api_key("sk-test")
            .base_url("https://edge.example/v1/images")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://edge.example/v1/images");
    }

    #[test]
    fn test_generation_body_pins_n_to_one() {
        let request = GenerationRequest::new("A sunset", "gpt-image-1").with_quality(Quality::High);
        let body = GenerationBody::from_request(&request);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "prompt": "A sunset",
                "model": "gpt-image-1",
                "n": 1,
                "quality": "high",
            })
        );
    }

    #[test]
    fn test_response_deserialization_url() {
        let json = r#"{"data": [{"url": "https://example.com/img.png", "revised_prompt": "A beautiful sunset"}]}"#;
        let response: ImagesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.data.len(), 1);
        assert_eq!(
            response.data[0].url.as_deref(),
            Some("https://example.com/img.png")
        );
        assert!(response.data[0].b64_json.is_none());
    }

    #[test]
    fn test_response_missing_data_defaults_to_empty() {
        let response: ImagesResponse = serde_json::from_str("{}").unwrap();
        assert!(response.data.is_empty());
    }

    #[test]
    fn test_normalize_collects_every_url() {
        let response: ImagesResponse =
            serde_json::from_str(r#"{"data":[{"url":"http://x"},{"url":"http://y"}]}"#).unwrap();
        let results = normalize(response).unwrap();
        assert_eq!(
            results,
            vec![
                ImageResult::Url("http://x".into()),
                ImageResult::Url("http://y".into()),
            ]
        );
    }

    #[test]
    fn test_normalize_decodes_b64_payloads() {
        let b64 = base64::engine::general_purpose::STANDARD.encode(b"fake png bytes");
        let raw = format!(r#"{{"data":[{{"b64_json":"{}"}}]}}"#, b64);
        let response: ImagesResponse = serde_json::from_str(&raw).unwrap();
        let results = normalize(response).unwrap();
        assert_eq!(
            results,
            vec![ImageResult::Inline(b"fake png bytes".to_vec())]
        );
    }

    #[test]
    fn test_normalize_empty_data_is_no_output() {
        let response: ImagesResponse = serde_json::from_str(r#"{"data":[]}"#).unwrap();
        let err = normalize(response).unwrap_err();
        assert!(matches!(err, ImgenError::NoOutput));
        assert_eq!(err.to_string(), "No output received");
    }

    #[test]
    fn test_normalize_missing_data_is_no_output() {
        let response: ImagesResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(normalize(response), Err(ImgenError::NoOutput)));
    }

    #[test]
    fn test_normalize_unknown_shape_is_no_output() {
        let response: ImagesResponse =
            serde_json::from_str(r#"{"data":[{"revised_prompt":"something"}]}"#).unwrap();
        assert!(matches!(normalize(response), Err(ImgenError::NoOutput)));
    }

    #[test]
    fn test_normalize_rejects_invalid_base64() {
        let response: ImagesResponse =
            serde_json::from_str(r#"{"data":[{"b64_json":"%%not-base64%%"}]}"#).unwrap();
        assert!(matches!(normalize(response), Err(ImgenError::Decode(_))));
    }

    #[test]
    fn test_normalize_prefers_url_when_both_present() {
        let response: ImagesResponse =
            serde_json::from_str(r#"{"data":[{"url":"http://x","b64_json":"AQID"}]}"#).unwrap();
        let results = normalize(response).unwrap();
        assert_eq!(results, vec![ImageResult::Url("http://x".into())]);
    }

    #[tokio::test]
    async fn test_edit_without_image_fails_before_any_request() {
        // The base URL is unroutable, so reaching the network would surface
        // a transport error instead of the expected validation error.
        let client = ImagesClient::builder()
            .api_key("sk-test")
            .base_url("http://127.0.0.1:0/v1/images/")
            .build()
            .unwrap();

        let err = client
            .edit(&EditRequest::new("Repaint the sky"))
            .await
            .unwrap_err();

        assert!(matches!(err, ImgenError::MissingImage));
        assert_eq!(err.to_string(), "Please upload an image to edit");
    }
}
