//! Lists the model identifiers each endpoint accepts.
//!
//! Run with: `cargo run --example models`
//!
//! Discovery is unauthenticated, so no API key is needed.

use imgen::models::list_models;
use imgen::EndpointChoice;

#[tokio::main]
async fn main() {
    for choice in [EndpointChoice::OpenAI, EndpointChoice::ImageRouter] {
        let base_url = choice.resolve("");
        let models = list_models(&base_url).await;

        println!("{} ({} models):", choice, models.len());
        for model in models {
            println!("  {}", model);
        }
    }
}
