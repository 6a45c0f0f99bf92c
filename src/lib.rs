#![warn(missing_docs)]
//! imgen - client for OpenAI-compatible image generation and editing.
//!
//! This crate talks to any endpoint that speaks the OpenAI images protocol:
//! text-to-image through `generations`, prompt-driven edits of an uploaded
//! image (with an optional mask) through `edits`, plus discovery of the
//! available model identifiers.
//!
//! # Quick Start - Generation
//!
//! ```no_run
//! use imgen::{GenerationRequest, ImageResult, ImagesClient, Quality};
//!
//! #[tokio::main]
//! async fn main() -> imgen::Result<()> {
//!     let client = ImagesClient::builder().build()?;
//!     let request = GenerationRequest::new("A lighthouse at dusk", "gpt-image-1")
//!         .with_quality(Quality::High);
//!     for image in client.generate(&request).await? {
//!         match image {
//!             ImageResult::Url(url) => println!("{}", url),
//!             ImageResult::Inline(bytes) => std::fs::write("lighthouse.png", bytes)?,
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Quick Start - Editing
//!
//! ```no_run
//! use imgen::{EditRequest, EndpointChoice, ImagesClient};
//!
//! #[tokio::main]
//! async fn main() -> imgen::Result<()> {
//!     let client = ImagesClient::builder()
//!         .base_url(EndpointChoice::ImageRouter.resolve(""))
//!         .build()?;
//!     let request = EditRequest::new("Replace the sky with an aurora")
//!         .with_image(std::fs::read("photo.png")?)
//!         .with_model("openai/gpt-image-1");
//!     let edited = client.edit(&request).await?;
//!     if let Some(bytes) = edited.into_bytes() {
//!         std::fs::write("edited.png", bytes)?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Endpoints
//!
//! - OpenAI: `https://api.openai.com/v1/images/` (keys at platform.openai.com)
//! - ImageRouter: `https://ir-api.myqa.cc/v1/openai/images/` (keys at ir.myqa.cc)
//! - Custom: any other OpenAI-compatible images base URL
//!
//! The bearer token comes from the builder or the `OPENAI_API_KEY`
//! environment variable. Model discovery ([`models::list_models`]) needs no
//! key at all.

mod client;
mod endpoint;
mod error;
pub mod models;
mod types;

// Re-export error types at crate root
pub use error::{ImgenError, Result};

// Re-export the client and the commonly used request/response types
pub use client::{ImagesClient, ImagesClientBuilder, API_KEY_ENV};
pub use endpoint::{EndpointChoice, IMAGEROUTER_BASE_URL, OPENAI_BASE_URL};
pub use types::{EditRequest, GenerationRequest, ImageResult, Quality};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::client::{ImagesClient, ImagesClientBuilder};
    pub use crate::endpoint::EndpointChoice;
    pub use crate::error::{ImgenError, Result};
    pub use crate::models::list_models;
    pub use crate::types::{EditRequest, GenerationRequest, ImageResult, Quality};
}
