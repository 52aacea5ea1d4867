//! Request parameters and their canonical form ([RFC 5849 section 3.4.1.3.2.][rfc]).
//!
//! [rfc]: https://tools.ietf.org/html/rfc5849#section-3.4.1.3.2
//!
//! Everything signing-related runs over the canonical pair list produced
//! here: percent-encoded with the strict set, expanded one pair per value
//! and sorted bytewise on the encoded forms.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt::Write;
use std::mem;

use url::Url;

use crate::util::percent_encode;

/// A single request parameter value.
///
/// Repeated keys are modelled explicitly as [`Many`][ParamValue::Many]
/// rather than inferred from the shape of the value at serialization time,
/// and [`Absent`][ParamValue::Absent] entries are skipped by every
/// serializer (signature, query string and body alike).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamValue {
    /// A single value.
    One(String),
    /// All values of a repeated key, in occurrence order.
    Many(Vec<String>),
    /// An explicitly absent value; shadows earlier writes of the same key.
    Absent,
}

/// An ordered map of request parameters.
pub type ParamMap = BTreeMap<String, ParamValue>;

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::One(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::One(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::One(if value { "true" } else { "false" }.to_owned())
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::One(value.to_string())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::One(value.to_string())
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        ParamValue::One(value.to_string())
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        ParamValue::Many(values)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(values: Vec<&str>) -> Self {
        ParamValue::Many(values.into_iter().map(str::to_owned).collect())
    }
}

impl From<&[&str]> for ParamValue {
    fn from(values: &[&str]) -> Self {
        ParamValue::Many(values.iter().map(|v| (*v).to_owned()).collect())
    }
}

impl<V: Into<ParamValue>> From<Option<V>> for ParamValue {
    fn from(value: Option<V>) -> Self {
        value.map_or(ParamValue::Absent, Into::into)
    }
}

/// Extracts the query pairs embedded in `url`, folding repeated keys into
/// `Many` values in occurrence order.
pub(crate) fn url_query_params(url: &Url) -> ParamMap {
    let mut params = ParamMap::new();
    for (key, value) in url.query_pairs() {
        push_value(&mut params, key.into_owned(), value.into_owned());
    }
    params
}

fn push_value(params: &mut ParamMap, key: String, value: String) {
    match params.entry(key) {
        Entry::Vacant(entry) => {
            entry.insert(ParamValue::One(value));
        }
        Entry::Occupied(mut entry) => {
            let slot = entry.get_mut();
            match slot {
                ParamValue::One(first) => {
                    *slot = ParamValue::Many(vec![mem::take(first), value]);
                }
                ParamValue::Many(values) => values.push(value),
                ParamValue::Absent => *slot = ParamValue::One(value),
            }
        }
    }
}

/// Merges `overlay` into `base`. Later writers win per key; an `Absent`
/// write shadows an earlier value.
pub(crate) fn merge(base: &mut ParamMap, overlay: &ParamMap) {
    for (key, value) in overlay {
        base.insert(key.clone(), value.clone());
    }
}

/// Expands `params` into raw `(key, value)` pairs, `Many` values in element
/// order and `Absent` entries skipped.
pub(crate) fn flat_pairs(params: &ParamMap) -> impl Iterator<Item = (&str, &str)> {
    params.iter().flat_map(|(key, value)| {
        let values: Vec<&str> = match value {
            ParamValue::One(v) => vec![v.as_str()],
            ParamValue::Many(vs) => vs.iter().map(String::as_str).collect(),
            ParamValue::Absent => Vec::new(),
        };
        values.into_iter().map(move |v| (key.as_str(), v))
    })
}

/// Produces the canonical parameter list: every entry percent-encoded with
/// the strict set, `Many` values expanded one pair per element, the whole
/// list sorted bytewise by encoded key with ties broken by encoded value.
pub fn canonical_pairs(params: &ParamMap) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params {
        let encoded_key = percent_encode(key).to_string();
        match value {
            ParamValue::One(v) => {
                pairs.push((encoded_key, percent_encode(v).to_string()));
            }
            ParamValue::Many(values) => {
                pairs.extend(
                    values
                        .iter()
                        .map(|v| (encoded_key.clone(), percent_encode(v).to_string())),
                );
            }
            ParamValue::Absent => {}
        }
    }
    pairs.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    pairs
}

/// Joins canonical pairs as `key=value` with `&` between pairs only. An
/// empty list yields the empty string.
pub fn parameter_string(pairs: &[(String, String)]) -> String {
    let mut out = String::new();
    for (i, (key, value)) in pairs.iter().enumerate() {
        if i > 0 {
            out.push('&');
        }
        out.push_str(key);
        out.push('=');
        out.push_str(value);
    }
    out
}

/// Returns the signature base URL of `url`: scheme, host, any non-default
/// port and path, with query and fragment dropped.
pub fn base_url(url: &Url) -> String {
    let mut out = format!("{}://", url.scheme());
    if let Some(host) = url.host_str() {
        out.push_str(host);
    }
    if let Some(port) = url.port() {
        write!(out, ":{}", port).unwrap();
    }
    out.push_str(url.path());
    out
}

/// Assembles the signature base string
/// `METHOD&percent_encode(base_url)&percent_encode(parameter_string)`,
/// uppercasing the method.
pub fn base_string(method: &str, base_url: &str, parameter_string: &str) -> String {
    let mut out =
        String::with_capacity(method.len() + 3 * (base_url.len() + parameter_string.len()) + 2);
    out.push_str(&method.to_ascii_uppercase());
    out.push('&');
    write!(out, "{}", percent_encode(base_url)).unwrap();
    out.push('&');
    write!(out, "{}", percent_encode(parameter_string)).unwrap();
    out
}
