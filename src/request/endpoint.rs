//! Body-mode detection from the request URL.
//!
//! The rules mirror the API families the formatter targets: a versioned
//! JSON API under `/2/`, a dedicated upload host, and a legacy REST API
//! that takes url-encoded form bodies except for a handful of JSON
//! endpoints.

use url::Url;

use super::BodyMode;

/// Path root of the versioned JSON API.
const JSON_API_ROOT: &str = "/2/";

/// The one endpoint under the versioned root that takes a form body.
const TOKEN_ENDPOINT: &str = "/2/oauth2/token";

/// Hosts with this prefix serve the upload API.
const UPLOAD_HOST_PREFIX: &str = "upload.";

/// The upload command endpoint, served with multipart bodies. Everything
/// else on the upload host (e.g. `media/metadata/create`) takes JSON.
const UPLOAD_ENDPOINT: &str = "media/upload";

/// Legacy endpoints that take JSON bodies. Every other legacy endpoint
/// defaults to a url-encoded form body.
const LEGACY_JSON_ENDPOINTS: &[&str] = &[
    "collections/entries/curate",
    "direct_messages/events/new",
    "direct_messages/welcome_messages/new",
    "direct_messages/welcome_messages/rules/new",
    "media/metadata/create",
];

/// Picks the body mode for `url` from its host and path.
pub(crate) fn detect_body_mode(url: &Url) -> BodyMode {
    let host = url.host_str().unwrap_or("");
    let path = url.path();

    if host.starts_with(UPLOAD_HOST_PREFIX) {
        return if endpoint_name(path) == UPLOAD_ENDPOINT {
            BodyMode::FormData
        } else {
            BodyMode::Json
        };
    }
    if path.starts_with(JSON_API_ROOT) {
        return if path.trim_end_matches('/') == TOKEN_ENDPOINT {
            BodyMode::UrlEncoded
        } else {
            BodyMode::Json
        };
    }
    if LEGACY_JSON_ENDPOINTS.contains(&endpoint_name(path)) {
        BodyMode::Json
    } else {
        BodyMode::UrlEncoded
    }
}

/// Reduces a legacy path to its endpoint name: the leading version segment
/// (digits and dots) and a trailing `.json` are stripped, so
/// `/1.1/statuses/update.json` becomes `statuses/update`.
fn endpoint_name(path: &str) -> &str {
    let mut name = path.trim_start_matches('/');
    if let Some((first, rest)) = name.split_once('/') {
        if !first.is_empty() && first.chars().all(|c| c.is_ascii_digit() || c == '.') {
            name = rest;
        }
    }
    name.strip_suffix(".json").unwrap_or(name)
}
