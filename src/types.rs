//! Core types for image generation and editing.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// Quality hint forwarded verbatim to the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// Let the endpoint pick.
    #[default]
    Auto,
    /// Fastest, cheapest rendering.
    Low,
    /// Balanced rendering.
    Medium,
    /// Best rendering the model offers.
    High,
}

impl Quality {
    /// Returns the wire identifier for this quality level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A request to generate images from a text prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The text prompt describing the desired image.
    pub prompt: String,
    /// Model identifier, as advertised by model discovery or typed freely.
    pub model: String,
    /// Quality hint.
    pub quality: Quality,
}

impl GenerationRequest {
    /// Creates a new request with the given prompt and model.
    pub fn new(prompt: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: model.into(),
            quality: Quality::default(),
        }
    }

    /// Sets the quality hint.
    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }
}

/// A request to edit an existing image, optionally constrained by a mask.
#[derive(Debug, Clone, Default)]
pub struct EditRequest {
    /// Raw bytes of the image to edit, in any raster format the `image`
    /// crate reads. Uploads are re-encoded as PNG. A request without an
    /// image is rejected before any network call.
    pub image: Option<Vec<u8>>,
    /// Raw bytes of an optional mask; re-encoded as PNG like the image.
    pub mask: Option<Vec<u8>>,
    /// The text prompt describing the edit.
    pub prompt: String,
    /// Optional model identifier.
    pub model: Option<String>,
    /// Optional quality hint.
    pub quality: Option<Quality>,
}

impl EditRequest {
    /// Creates a new edit request with the given prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    /// Sets the image to edit.
    pub fn with_image(mut self, image: Vec<u8>) -> Self {
        self.image = Some(image);
        self
    }

    /// Sets the mask constraining the edit.
    pub fn with_mask(mut self, mask: Vec<u8>) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Sets the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the quality hint.
    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = Some(quality);
        self
    }
}

/// A single image produced by a generation or edit call.
///
/// Endpoints answer either with remote URLs or with inline base64 payloads;
/// the variant records which form this result arrived in. Remote URLs are
/// handed back untouched; displaying or downloading them is the caller's
/// business.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "image results should be saved or displayed"]
pub enum ImageResult {
    /// A remote URL to the produced image.
    Url(String),
    /// The produced image itself, base64-decoded.
    Inline(Vec<u8>),
}

impl ImageResult {
    /// Returns the remote URL, if the image came back as one.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Url(url) => Some(url),
            Self::Inline(_) => None,
        }
    }

    /// Returns the decoded bytes, if the image came back inline.
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Url(_) => None,
            Self::Inline(data) => Some(data),
        }
    }

    /// Consumes the result, returning the decoded bytes if present.
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Self::Url(_) => None,
            Self::Inline(data) => Some(data),
        }
    }

    /// Returns true when the image arrived inline.
    pub fn is_inline(&self) -> bool {
        matches!(self, Self::Inline(_))
    }
}

/// Re-encodes arbitrary raster bytes as PNG.
///
/// Uploads always go out as PNG parts (`image.png`, `mask.png`) whatever
/// format the caller handed in.
pub(crate) fn encode_png(data: &[u8]) -> Result<Vec<u8>> {
    let raster = image::load_from_memory(data)?;
    let mut out = Cursor::new(Vec::new());
    raster.write_to(&mut out, image::ImageFormat::Png)?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;

    fn sample_raster() -> image::RgbaImage {
        let mut raster = image::RgbaImage::new(2, 2);
        raster.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        raster.put_pixel(1, 0, image::Rgba([0, 255, 0, 255]));
        raster.put_pixel(0, 1, image::Rgba([0, 0, 255, 255]));
        raster.put_pixel(1, 1, image::Rgba([255, 255, 255, 128]));
        raster
    }

    fn sample_png() -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(sample_raster())
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_quality_as_str() {
        assert_eq!(Quality::Auto.as_str(), "auto");
        assert_eq!(Quality::Low.as_str(), "low");
        assert_eq!(Quality::Medium.as_str(), "medium");
        assert_eq!(Quality::High.as_str(), "high");
    }

    #[test]
    fn test_quality_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Quality::High).unwrap(), r#""high""#);
        let parsed: Quality = serde_json::from_str(r#""auto""#).unwrap();
        assert_eq!(parsed, Quality::Auto);
    }

    #[test]
    fn test_generation_request_defaults_to_auto() {
        let request = GenerationRequest::new("A sunset", "gpt-image-1");
        assert_eq!(request.prompt, "A sunset");
        assert_eq!(request.model, "gpt-image-1");
        assert_eq!(request.quality, Quality::Auto);
    }

    #[test]
    fn test_generation_request_with_quality() {
        let request = GenerationRequest::new("A sunset", "gpt-image-1").with_quality(Quality::High);
        assert_eq!(request.quality, Quality::High);
    }

    #[test]
    fn test_edit_request_builders() {
        let request = EditRequest::new("Remove the fence")
            .with_image(vec![1, 2, 3])
            .with_mask(vec![4, 5])
            .with_model("gpt-image-1")
            .with_quality(Quality::Medium);

        assert_eq!(request.prompt, "Remove the fence");
        assert_eq!(request.image.as_deref(), Some(&[1u8, 2, 3][..]));
        assert_eq!(request.mask.as_deref(), Some(&[4u8, 5][..]));
        assert_eq!(request.model.as_deref(), Some("gpt-image-1"));
        assert_eq!(request.quality, Some(Quality::Medium));
    }

    #[test]
    fn test_edit_request_starts_without_image() {
        let request = EditRequest::new("Remove the fence");
        assert!(request.image.is_none());
        assert!(request.mask.is_none());
        assert!(request.model.is_none());
        assert!(request.quality.is_none());
    }

    #[test]
    fn test_image_result_accessors() {
        let url = ImageResult::Url("http://x".into());
        assert_eq!(url.url(), Some("http://x"));
        assert_eq!(url.bytes(), None);
        assert!(!url.is_inline());

        let inline = ImageResult::Inline(vec![9, 9]);
        assert_eq!(inline.url(), None);
        assert_eq!(inline.bytes(), Some(&[9u8, 9][..]));
        assert!(inline.is_inline());
        assert_eq!(inline.into_bytes(), Some(vec![9, 9]));
    }

    #[test]
    fn test_encode_png_rejects_non_raster_bytes() {
        assert!(encode_png(b"not an image").is_err());
    }

    #[test]
    fn test_png_round_trip_is_pixel_identical() {
        // Upload-side re-encode followed by a b64_json response of the same
        // content must reproduce the source pixels exactly.
        let uploaded = encode_png(&sample_png()).unwrap();

        let b64 = base64::engine::general_purpose::STANDARD.encode(&uploaded);
        let returned = base64::engine::general_purpose::STANDARD
            .decode(b64.as_bytes())
            .unwrap();

        let round_tripped = image::load_from_memory(&returned).unwrap().to_rgba8();
        assert_eq!(round_tripped, sample_raster());
    }
}
