//! The OAuth protocol parameter set and the `Authorization` header
//! ([RFC 5849 section 3.5.1.][rfc]).
//!
//! [rfc]: https://tools.ietf.org/html/rfc5849#section-3.5.1

use std::borrow::Cow;
use std::fmt::Write;

use crate::util::percent_encode;

const VERSION: &str = "1.0";

/// The protocol parameter set of one request, before signing.
///
/// There is no `oauth_signature` at this stage: signing consumes the set
/// through [`into_signed`][OAuthParams::into_signed], and only the resulting
/// [`SignedParams`] can serialize a header.
#[derive(Clone, Debug)]
pub(crate) struct OAuthParams<'a> {
    pub consumer_key: &'a str,
    pub token: Option<&'a str>,
    pub signature_method: &'static str,
    pub timestamp: u64,
    pub nonce: Cow<'a, str>,
}

impl<'a> OAuthParams<'a> {
    /// Returns the `(key, value)` entries of the set, `oauth_version`
    /// included, for the canonicalizer to fold in.
    pub fn pairs(&self) -> Vec<(&'static str, Cow<'_, str>)> {
        let mut pairs = vec![
            ("oauth_consumer_key", Cow::Borrowed(self.consumer_key)),
            ("oauth_nonce", Cow::Borrowed(&*self.nonce)),
            (
                "oauth_signature_method",
                Cow::Borrowed(self.signature_method),
            ),
            ("oauth_timestamp", Cow::Owned(self.timestamp.to_string())),
            ("oauth_version", Cow::Borrowed(VERSION)),
        ];
        if let Some(token) = self.token {
            pairs.push(("oauth_token", Cow::Borrowed(token)));
        }
        pairs
    }

    /// Attaches the computed signature, consuming the unsigned set.
    pub fn into_signed(self, signature: String) -> SignedParams<'a> {
        SignedParams {
            params: self,
            signature,
        }
    }
}

/// The signed protocol parameter set.
#[derive(Clone, Debug)]
pub(crate) struct SignedParams<'a> {
    params: OAuthParams<'a>,
    signature: String,
}

impl SignedParams<'_> {
    /// Serializes the `OAuth` `Authorization` header value: entries sorted
    /// by key, keys and values percent-encoded, written as `key="value"`
    /// joined by `", "` with no trailing separator. `realm`, when given,
    /// leads the list and is not signed.
    pub fn to_header(&self, realm: Option<&str>) -> String {
        let pairs = self.params.pairs();
        let mut entries: Vec<(&str, &str)> = pairs
            .iter()
            .map(|(key, value)| (*key, value.as_ref()))
            .collect();
        entries.push(("oauth_signature", &self.signature));
        entries.sort_unstable();
        debug_assert!(entries.iter().all(|(key, _)| key.starts_with("oauth_")));

        let mut header = String::with_capacity(256);
        header.push_str("OAuth ");
        if let Some(realm) = realm {
            write!(header, "realm=\"{}\", ", realm).unwrap();
        }
        for (i, (key, value)) in entries.iter().enumerate() {
            if i > 0 {
                header.push_str(", ");
            }
            write!(
                header,
                "{}=\"{}\"",
                percent_encode(key),
                percent_encode(value)
            )
            .unwrap();
        }
        header
    }
}
