//! Endpoint selection and base-URL resolution.

use serde::{Deserialize, Serialize};

/// Base URL of the OpenAI images API.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1/images/";

/// Base URL of the ImageRouter images API.
pub const IMAGEROUTER_BASE_URL: &str = "https://ir-api.myqa.cc/v1/openai/images/";

/// Named endpoint choice, as presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointChoice {
    /// The OpenAI images API.
    #[default]
    OpenAI,
    /// The ImageRouter images API.
    ImageRouter,
    /// A user-supplied base URL.
    Custom,
}

impl EndpointChoice {
    /// Resolves the choice to a base URL.
    ///
    /// `custom_url` is only consulted for [`EndpointChoice::Custom`]; the
    /// fixed choices ignore it. A `Custom` choice echoes the string back
    /// verbatim, including the empty string: an unusable custom URL is a
    /// user-input condition the request path reports, not a resolver error.
    pub fn resolve(&self, custom_url: &str) -> String {
        match self {
            Self::OpenAI => OPENAI_BASE_URL.to_string(),
            Self::ImageRouter => IMAGEROUTER_BASE_URL.to_string(),
            Self::Custom => custom_url.to_string(),
        }
    }
}

impl std::fmt::Display for EndpointChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenAI => write!(f, "openai"),
            Self::ImageRouter => write!(f, "imagerouter"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

/// Joins a base URL and a path segment with exactly one slash.
///
/// The fixed base URLs carry a trailing slash while custom ones often do
/// not; both forms must reach `{base}/generations` and `{base}/edits`.
pub(crate) fn join_endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}
