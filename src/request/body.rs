//! Body serialization under the four body modes.

use std::fmt::{self, Display, Formatter, Write};

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde_json::{Map, Value};

use crate::error::Error;
use crate::params::{self, ParamMap, ParamValue};
use crate::util;

use super::Body;

/// How a request body is serialized.
///
/// The mode also decides signature participation: only `UrlEncoded` bodies
/// are ever folded into the signature.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BodyMode {
    /// A JSON document (`application/json`).
    Json,
    /// An `application/x-www-form-urlencoded` body.
    UrlEncoded,
    /// A `multipart/form-data` body with one text part per parameter.
    FormData,
    /// Caller-encoded bytes, passed through untouched and given no
    /// `Content-Type`.
    Raw,
}

impl Display for BodyMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BodyMode::Json => "json",
            BodyMode::UrlEncoded => "url-encoded",
            BodyMode::FormData => "form-data",
            BodyMode::Raw => "raw",
        })
    }
}

pub(crate) const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";
pub(crate) const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=UTF-8";

/// Serializes `body` under `mode`, returning the bytes and the
/// `Content-Type` to apply when the caller has not set one.
pub(crate) fn serialize(body: Body, mode: BodyMode) -> Result<(Vec<u8>, Option<String>), Error> {
    match (mode, body) {
        (BodyMode::Raw, Body::Raw(bytes)) => Ok((bytes, None)),
        (BodyMode::Raw, _) | (_, Body::Raw(_)) => Err(Error::InvalidBody { mode }),
        (BodyMode::Json, Body::Json(value)) => Ok((
            serde_json::to_vec(&value)?,
            Some(JSON_CONTENT_TYPE.to_owned()),
        )),
        (BodyMode::Json, Body::Params(body_params)) => Ok((
            serde_json::to_vec(&json_object(&body_params))?,
            Some(JSON_CONTENT_TYPE.to_owned()),
        )),
        (BodyMode::UrlEncoded, Body::Params(body_params)) => Ok((
            urlencoded(&body_params),
            Some(FORM_CONTENT_TYPE.to_owned()),
        )),
        (BodyMode::FormData, Body::Params(body_params)) => {
            let (bytes, boundary) = multipart(&body_params);
            let content_type = format!("multipart/form-data; boundary={}", boundary);
            Ok((bytes, Some(content_type)))
        }
        (BodyMode::UrlEncoded | BodyMode::FormData, Body::Json(_)) => {
            Err(Error::InvalidBody { mode })
        }
    }
}

/// Builds a JSON object from parameters: `One` becomes a string, `Many` an
/// array of strings in element order, `Absent` is skipped.
fn json_object(params: &ParamMap) -> Value {
    let mut object = Map::new();
    for (key, value) in params {
        match value {
            ParamValue::One(v) => {
                object.insert(key.clone(), Value::String(v.clone()));
            }
            ParamValue::Many(values) => {
                object.insert(
                    key.clone(),
                    Value::Array(values.iter().cloned().map(Value::String).collect()),
                );
            }
            ParamValue::Absent => {}
        }
    }
    Value::Object(object)
}

/// Serializes parameters as a form body with the form encode set, which
/// escapes `*` and keeps `!`, `'`, `(` and `)` raw.
fn urlencoded(params: &ParamMap) -> Vec<u8> {
    let mut out = String::new();
    for (key, value) in params::flat_pairs(params) {
        if !out.is_empty() {
            out.push('&');
        }
        write!(out, "{}={}", util::form_encode(key), util::form_encode(value)).unwrap();
    }
    out.into_bytes()
}

/// Serializes parameters as `multipart/form-data` text parts, returning the
/// body together with its boundary.
fn multipart(params: &ParamMap) -> (Vec<u8>, String) {
    let boundary = boundary();
    let mut out = String::new();
    for (key, value) in params::flat_pairs(params) {
        write!(
            out,
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
            boundary, key, value,
        )
        .unwrap();
    }
    write!(out, "--{}--\r\n", boundary).unwrap();
    (out.into_bytes(), boundary)
}

/// Returns a fresh random boundary, never reused across bodies.
fn boundary() -> String {
    let tail: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(24)
        .map(char::from)
        .collect();
    format!("----------------------------{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(entries: &[(&str, ParamValue)]) -> ParamMap {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect()
    }

    #[test]
    fn urlencoded_uses_the_form_set() {
        let body = params(&[(
            "status",
            ParamValue::One("Hello Ladies + Gentlemen, a signed OAuth request!".to_owned()),
        )]);
        assert_eq!(
            urlencoded(&body),
            b"status=Hello%20Ladies%20%2B%20Gentlemen%2C%20a%20signed%20OAuth%20request!",
        );

        let body = params(&[("q", ParamValue::One("a*b!".to_owned()))]);
        assert_eq!(urlencoded(&body), b"q=a%2Ab!");
    }

    #[test]
    fn urlencoded_expands_repeated_keys() {
        let body = params(&[
            ("id", ParamValue::Many(vec!["1".to_owned(), "2".to_owned()])),
            ("gone", ParamValue::Absent),
        ]);
        assert_eq!(urlencoded(&body), b"id=1&id=2");
    }

    #[test]
    fn json_object_shapes() {
        let body = params(&[
            ("one", ParamValue::One("v".to_owned())),
            (
                "many",
                ParamValue::Many(vec!["a".to_owned(), "b".to_owned()]),
            ),
            ("gone", ParamValue::Absent),
        ]);
        assert_eq!(
            json_object(&body),
            serde_json::json!({"one": "v", "many": ["a", "b"]}),
        );
    }

    #[test]
    fn multipart_wraps_each_parameter_in_a_part() {
        let body = params(&[("command", ParamValue::One("INIT".to_owned()))]);
        let (bytes, boundary) = multipart(&body);
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with(&format!("--{}\r\n", boundary)));
        assert!(text.contains("Content-Disposition: form-data; name=\"command\"\r\n\r\nINIT\r\n"));
        assert!(text.ends_with(&format!("--{}--\r\n", boundary)));
    }

    #[test]
    fn raw_bytes_pass_through_without_content_type() {
        let (bytes, content_type) =
            serialize(Body::Raw(vec![0, 159, 146, 150]), BodyMode::Raw).unwrap();
        assert_eq!(bytes, vec![0, 159, 146, 150]);
        assert_eq!(content_type, None);
    }

    #[test]
    fn mismatched_shapes_are_rejected() {
        let json = Body::Json(serde_json::json!({"a": 1}));
        assert!(matches!(
            serialize(json, BodyMode::UrlEncoded),
            Err(Error::InvalidBody {
                mode: BodyMode::UrlEncoded,
            }),
        ));
        assert!(matches!(
            serialize(Body::Params(ParamMap::new()), BodyMode::Raw),
            Err(Error::InvalidBody {
                mode: BodyMode::Raw,
            }),
        ));
        assert!(matches!(
            serialize(Body::Raw(Vec::new()), BodyMode::Json),
            Err(Error::InvalidBody {
                mode: BodyMode::Json,
            }),
        ));
    }
}
