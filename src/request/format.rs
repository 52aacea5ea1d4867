//! The formatting pipeline: URL normalization, parameter assembly,
//! authorization and body serialization.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::Write;

use tracing::debug;
use url::Url;

use crate::authorization::OAuthParams;
use crate::credentials::Credentials;
use crate::error::Error;
use crate::params::{self, ParamMap, ParamValue};
use crate::signature_method::{HmacSha1, SignatureMethod};
use crate::util;

use super::body::{self, BodyMode};
use super::endpoint;
use super::{Body, FormattedRequest, Request};

/// Formats and authorizes requests for one pair of client credentials.
///
/// A formatter is plain immutable data: it borrows the credentials, holds
/// the per-client options and can be shared and reused for any number of
/// requests. Signing never caches anything between calls, so two formatters
/// built from the same credentials are interchangeable.
#[derive(Clone, Debug)]
pub struct Formatter<'a, SM = HmacSha1> {
    consumer: Credentials<&'a str>,
    token: Option<Credentials<&'a str>>,
    signature_method: SM,
    realm: Option<&'a str>,
    nonce: Option<&'a str>,
    timestamp: Option<u64>,
}

impl<'a> Formatter<'a> {
    /// Creates a formatter signing with HMAC-SHA1.
    pub fn new(consumer: Credentials<&'a str>) -> Self {
        Formatter::with_signature_method(HmacSha1, consumer)
    }
}

impl<'a, SM: SignatureMethod> Formatter<'a, SM> {
    /// Creates a formatter with a custom signature method.
    pub fn with_signature_method(signature_method: SM, consumer: Credentials<&'a str>) -> Self {
        Formatter {
            consumer,
            token: None,
            signature_method,
            realm: None,
            nonce: None,
            timestamp: None,
        }
    }

    /// Attaches token (access) credentials.
    pub fn token(mut self, token: Credentials<&'a str>) -> Self {
        self.token = Some(token);
        self
    }

    /// Emits `realm` first in the `Authorization` header. It is never
    /// signed.
    pub fn realm(mut self, realm: &'a str) -> Self {
        self.realm = Some(realm);
        self
    }

    /// Overrides the generated nonce. With [`timestamp`][Self::timestamp]
    /// this makes the whole output reproducible.
    pub fn nonce(mut self, nonce: &'a str) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// Overrides the generated timestamp (Unix seconds).
    pub fn timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Runs the pipeline: normalizes the URL, substitutes path parameters,
    /// assembles the query, picks the body mode, signs unless authorization
    /// is disabled, serializes the body and reassembles the final URL.
    pub fn format(&self, request: Request) -> Result<FormattedRequest, Error> {
        debug!("formatting {} {}", request.method, request.url);
        let Request {
            method,
            url,
            query,
            body,
            mut headers,
            path_params,
            body_mode,
            auth,
        } = request;

        let mut url = parse_url(&url)?;
        substitute_path_params(&mut url, &path_params);

        let mut query_params = params::url_query_params(&url);
        params::merge(&mut query_params, &query);

        let method = method.to_ascii_uppercase();
        let mode = body_mode.unwrap_or_else(|| endpoint::detect_body_mode(&url));
        debug!("body mode: {}", mode);

        if auth {
            let header = self.authorize(&method, &url, &query_params, body.as_ref(), mode);
            headers.insert("Authorization".to_owned(), header);
        }

        let body = match body {
            Some(body) => {
                let (bytes, content_type) = body::serialize(body, mode)?;
                if let Some(content_type) = content_type {
                    set_default_content_type(&mut headers, content_type);
                }
                Some(bytes)
            }
            None => None,
        };

        write_query(&mut url, &query_params);
        url.set_fragment(None);

        Ok(FormattedRequest {
            url,
            method,
            headers,
            body,
        })
    }

    fn authorize(
        &self,
        method: &str,
        url: &Url,
        query: &ParamMap,
        body: Option<&Body>,
        mode: BodyMode,
    ) -> String {
        let nonce = match self.nonce {
            Some(nonce) => Cow::Borrowed(nonce),
            None => Cow::Owned(util::nonce()),
        };
        let timestamp = self.timestamp.unwrap_or_else(util::unix_timestamp);
        let oauth = OAuthParams {
            consumer_key: self.consumer.key,
            token: self.token.map(|token| token.key),
            signature_method: self.signature_method.name(),
            timestamp,
            nonce,
        };

        let mut signed = query.clone();
        if body_in_signature(method, mode) {
            if let Some(Body::Params(body_params)) = body {
                params::merge(&mut signed, body_params);
            }
        }
        // The protocol parameters are written last and win any collision
        // with caller-supplied `oauth_*` keys.
        for (key, value) in oauth.pairs() {
            signed.insert(key.to_owned(), ParamValue::One(value.into_owned()));
        }

        let pairs = params::canonical_pairs(&signed);
        let base_string = params::base_string(
            method,
            &params::base_url(url),
            &params::parameter_string(&pairs),
        );
        debug!("signature base string: {}", base_string);

        let signature = self
            .signature_method
            .sign(
                self.consumer.secret,
                self.token.map(|token| token.secret),
                &base_string,
            )
            .to_string();
        let header = oauth.into_signed(signature).to_header(self.realm);
        debug!("authorization header ready ({} bytes)", header.len());
        header
    }
}

/// Whether body parameters fold into the signature: write methods with
/// url-encoded bodies only.
fn body_in_signature(method: &str, mode: BodyMode) -> bool {
    let write_method = matches!(method, "POST" | "PUT" | "PATCH" | "DELETE");
    write_method && mode == BodyMode::UrlEncoded
}

/// Parses the request URL, assuming `https` when the scheme is missing.
fn parse_url(url: &str) -> Result<Url, Error> {
    if url.contains("://") {
        Ok(Url::parse(url)?)
    } else {
        Ok(Url::parse(&format!("https://{}", url))?)
    }
}

/// Replaces `:name` placeholders in the URL path. Unknown names stay
/// literal; substituted values are percent-encoded with the strict set.
fn substitute_path_params(url: &mut Url, path_params: &BTreeMap<String, String>) {
    if path_params.is_empty() || !url.path().contains(':') {
        return;
    }
    let path = url.path().to_owned();
    let mut out = String::with_capacity(path.len());
    let mut rest = path.as_str();
    while let Some(start) = rest.find(':') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let end = tail
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(tail.len());
        let name = &tail[..end];
        match path_params.get(name) {
            Some(value) => write!(out, "{}", util::percent_encode(value)).unwrap(),
            None => {
                out.push(':');
                out.push_str(name);
            }
        }
        rest = &tail[end..];
    }
    out.push_str(rest);
    url.set_path(&out);
}

/// Sets `Content-Type` unless the caller already supplied one under any
/// capitalization.
fn set_default_content_type(headers: &mut BTreeMap<String, String>, content_type: String) {
    let already_set = headers
        .keys()
        .any(|name| name.eq_ignore_ascii_case("content-type"));
    if !already_set {
        headers.insert("Content-Type".to_owned(), content_type);
    }
}

/// Writes the merged query back onto the URL in canonical encoded order, or
/// removes it when no parameters remain.
fn write_query(url: &mut Url, query: &ParamMap) {
    let pairs = params::canonical_pairs(query);
    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.set_query(Some(&params::parameter_string(&pairs)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_scheme_defaults_to_https() {
        let url = parse_url("api.example.com/2/tweets").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/2/tweets");
    }

    #[test]
    fn path_params_are_substituted_and_encoded() {
        let mut url = Url::parse("https://api.example.com/1.1/users/:id/lists/:slug.json").unwrap();
        let substitutions = BTreeMap::from([
            ("id".to_owned(), "12 34".to_owned()),
            ("slug".to_owned(), "dev".to_owned()),
        ]);
        substitute_path_params(&mut url, &substitutions);
        assert_eq!(url.path(), "/1.1/users/12%2034/lists/dev.json");
    }

    #[test]
    fn unknown_path_params_stay_literal() {
        let mut url = Url::parse("https://api.example.com/users/:id").unwrap();
        let substitutions = BTreeMap::from([("other".to_owned(), "x".to_owned())]);
        substitute_path_params(&mut url, &substitutions);
        assert_eq!(url.path(), "/users/:id");
    }

    #[test]
    fn signature_inclusion_requires_write_method_and_form_mode() {
        assert!(body_in_signature("POST", BodyMode::UrlEncoded));
        assert!(body_in_signature("DELETE", BodyMode::UrlEncoded));
        assert!(!body_in_signature("GET", BodyMode::UrlEncoded));
        assert!(!body_in_signature("POST", BodyMode::Json));
        assert!(!body_in_signature("POST", BodyMode::FormData));
        assert!(!body_in_signature("POST", BodyMode::Raw));
    }
}
