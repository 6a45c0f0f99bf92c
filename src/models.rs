//! Model discovery against the public routing catalog.

use crate::endpoint::OPENAI_BASE_URL;
use crate::error::{ImgenError, Result};
use indexmap::IndexMap;

/// Catalog listing every image model the routing service can reach.
pub const DISCOVERY_URL: &str = "https://ir-api.myqa.cc/v1/openai/images/models";

type Catalog = IndexMap<String, serde_json::Value>;

/// Fetches the model catalog and filters it for the given endpoint.
///
/// The catalog advertises models as `vendor/name` keys. When `base_url` is
/// the OpenAI endpoint only `openai/` entries apply and the vendor prefix
/// is stripped off; every other endpoint sees the full catalog in document
/// order. Discovery needs no key and is best-effort: any failure yields an
/// empty list.
pub async fn list_models(base_url: &str) -> Vec<String> {
    match fetch_catalog().await {
        Ok(catalog) => filter_catalog(&catalog, base_url),
        Err(err) => {
            tracing::warn!("model discovery failed: {err}");
            Vec::new()
        }
    }
}

async fn fetch_catalog() -> Result<Catalog> {
    let response = reqwest::get(DISCOVERY_URL).await?;
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ImgenError::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response.json().await?)
}

fn filter_catalog(catalog: &Catalog, base_url: &str) -> Vec<String> {
    if base_url == OPENAI_BASE_URL {
        catalog
            .keys()
            .filter_map(|key| key.strip_prefix("openai/"))
            .map(str::to_owned)
            .collect()
    } else {
        catalog.keys().cloned().collect()
    }
}
