//! Basic image generation example.
//!
//! Run with: `cargo run --example generate`
//!
//! Requires `OPENAI_API_KEY` environment variable.

use imgen::{GenerationRequest, ImageResult, ImagesClient, Quality};

#[tokio::main]
async fn main() -> imgen::Result<()> {
    let client = ImagesClient::builder().build()?;

    let request = GenerationRequest::new("A golden retriever puppy playing in snow", "gpt-image-1")
        .with_quality(Quality::Medium);

    for (index, result) in client.generate(&request).await?.into_iter().enumerate() {
        match result {
            ImageResult::Url(url) => println!("Image URL: {}", url),
            ImageResult::Inline(bytes) => {
                let path = format!("output-{}.png", index);
                std::fs::write(&path, &bytes)?;
                println!("Saved {} ({} bytes)", path, bytes.len());
            }
        }
    }

    Ok(())
}
