//! Image editing example - modifies an existing image with a text prompt.
//!
//! Run with: `cargo run --example edit -- <input_image.png>`
//!
//! Requires `OPENAI_API_KEY` environment variable.

use imgen::{EditRequest, EndpointChoice, ImageResult, ImagesClient};

#[tokio::main]
async fn main() -> imgen::Result<()> {
    let input_path = std::env::args()
        .nth(1)
        .expect("Usage: edit <input_image.png>");

    let input_bytes = std::fs::read(&input_path)?;

    let client = ImagesClient::builder()
        .base_url(EndpointChoice::ImageRouter.resolve(""))
        .build()?;

    let request = EditRequest::new("Make the colors more vibrant and add a warm sunset glow")
        .with_image(input_bytes)
        .with_model("openai/gpt-image-1");

    match client.edit(&request).await? {
        ImageResult::Url(url) => println!("Edited image URL: {}", url),
        ImageResult::Inline(bytes) => {
            std::fs::write("edited.png", &bytes)?;
            println!("Edited image saved to edited.png ({} bytes)", bytes.len());
        }
    }

    Ok(())
}
