//! Request descriptors and the formatting pipeline.

mod body;
mod endpoint;
mod format;

pub use self::body::BodyMode;
pub use self::format::Formatter;

use std::collections::BTreeMap;

use serde_json::Value;
use url::Url;

use crate::params::{ParamMap, ParamValue};

/// A description of an outgoing request, before authorization and
/// serialization.
///
/// A descriptor carries everything [`Formatter::format`] needs: the method
/// and URL, query and body parameters, extra headers and the per-request
/// switches (forced body mode, disabled authorization, path substitutions).
#[derive(Clone, Debug)]
pub struct Request {
    pub(crate) method: String,
    pub(crate) url: String,
    pub(crate) query: ParamMap,
    pub(crate) body: Option<Body>,
    pub(crate) headers: BTreeMap<String, String>,
    pub(crate) path_params: BTreeMap<String, String>,
    pub(crate) body_mode: Option<BodyMode>,
    pub(crate) auth: bool,
}

impl Request {
    /// Creates a request descriptor. Authorization is on by default.
    ///
    /// The URL may omit the scheme, in which case `https` is assumed, and
    /// its path may contain `:name` placeholders for
    /// [`path_param`][Request::path_param].
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Request {
            method: method.into(),
            url: url.into(),
            query: ParamMap::new(),
            body: None,
            headers: BTreeMap::new(),
            path_params: BTreeMap::new(),
            body_mode: None,
            auth: true,
        }
    }

    /// Shorthand for [`new`][Request::new] with the `GET` method.
    pub fn get(url: impl Into<String>) -> Self {
        Request::new("GET", url)
    }

    /// Shorthand for [`new`][Request::new] with the `POST` method.
    pub fn post(url: impl Into<String>) -> Self {
        Request::new("POST", url)
    }

    /// Shorthand for [`new`][Request::new] with the `PUT` method.
    pub fn put(url: impl Into<String>) -> Self {
        Request::new("PUT", url)
    }

    /// Shorthand for [`new`][Request::new] with the `PATCH` method.
    pub fn patch(url: impl Into<String>) -> Self {
        Request::new("PATCH", url)
    }

    /// Shorthand for [`new`][Request::new] with the `DELETE` method.
    pub fn delete(url: impl Into<String>) -> Self {
        Request::new("DELETE", url)
    }

    /// Sets a query parameter. Later writes win, also over parameters
    /// embedded in the URL; writing [`ParamValue::Absent`] removes the key.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Sets a body parameter, replacing any non-parameter body set before.
    pub fn body_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        if !matches!(self.body, Some(Body::Params(_))) {
            self.body = Some(Body::Params(ParamMap::new()));
        }
        if let Some(Body::Params(params)) = &mut self.body {
            params.insert(key.into(), value.into());
        }
        self
    }

    /// Sets the body to an arbitrary JSON document. Only valid under the
    /// JSON body mode.
    pub fn json_body(mut self, value: Value) -> Self {
        self.body = Some(Body::Json(value));
        self
    }

    /// Sets the body to pre-encoded bytes, passed through untouched. Only
    /// valid under [`BodyMode::Raw`].
    pub fn raw_body(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.body = Some(Body::Raw(bytes.into()));
        self
    }

    /// Sets an outgoing header. A caller-set `Content-Type` (any
    /// capitalization) suppresses the one the body serializer would add.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Substitutes `value` for the `:name` placeholder in the URL path. The
    /// value is percent-encoded with the strict set.
    pub fn path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.insert(name.into(), value.into());
        self
    }

    /// Forces the body mode instead of detecting it from the URL.
    pub fn body_mode(mut self, mode: BodyMode) -> Self {
        self.body_mode = Some(mode);
        self
    }

    /// Enables or disables the `Authorization` header for this request.
    pub fn auth(mut self, auth: bool) -> Self {
        self.auth = auth;
        self
    }
}

/// A request body in one of the shapes the pipeline can serialize.
#[derive(Clone, Debug)]
pub enum Body {
    /// Key/value parameters; the effective body mode decides the encoding.
    Params(ParamMap),
    /// An arbitrary JSON document. Only valid under the JSON body mode.
    Json(Value),
    /// Pre-encoded bytes. Only valid under the raw body mode.
    Raw(Vec<u8>),
}

/// The transmit-ready form of a request.
///
/// All fields are plain data; handing them to any HTTP client reproduces
/// the authorized request exactly.
#[derive(Clone, Debug)]
pub struct FormattedRequest {
    /// The final URL with the canonical query string attached.
    pub url: Url,
    /// The uppercased HTTP method.
    pub method: String,
    /// Outgoing headers: the caller's, plus `Authorization` unless disabled
    /// and `Content-Type` when a body was serialized.
    pub headers: BTreeMap<String, String>,
    /// The serialized body, if the request carries one.
    pub body: Option<Vec<u8>>,
}
