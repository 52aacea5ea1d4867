//! Signature methods ([RFC 5849 section 3.4.][rfc]).
//!
//! [rfc]: https://tools.ietf.org/html/rfc5849#section-3.4
//!
//! The OAuth standard allows for servers to implement their own custom
//! signature methods. So the signing step is kept behind a trait, and users
//! can implement those custom methods by themselves.

pub mod hmac_sha1;
pub mod plaintext;

pub use self::hmac_sha1::HmacSha1;
pub use self::plaintext::Plaintext;

use std::fmt::{Display, Write};

use crate::util::percent_encode;

/// Types that represent a signature method.
pub trait SignatureMethod {
    /// The representation of the `oauth_signature` value the method
    /// produces.
    ///
    /// The `Display` output is the *raw* signature value; percent-encoding
    /// for the header or the query string happens at serialization time.
    type Signature: Display;

    /// Returns the `oauth_signature_method` string for the signature method.
    fn name(&self) -> &'static str;

    /// Signs the signature base string with the key derived from
    /// `consumer_secret` and `token_secret`.
    fn sign(
        &self,
        consumer_secret: &str,
        token_secret: Option<&str>,
        base_string: &str,
    ) -> Self::Signature;
}

impl<SM: SignatureMethod> SignatureMethod for &SM {
    type Signature = SM::Signature;

    fn name(&self) -> &'static str {
        SM::name(*self)
    }

    fn sign(
        &self,
        consumer_secret: &str,
        token_secret: Option<&str>,
        base_string: &str,
    ) -> SM::Signature {
        SM::sign(*self, consumer_secret, token_secret, base_string)
    }
}

/// The signing key shared by the standard methods:
/// `percent_encode(consumer_secret) "&" percent_encode(token_secret or "")`.
fn signing_key(consumer_secret: &str, token_secret: Option<&str>) -> String {
    let mut key = String::with_capacity(128);
    write!(key, "{}&", percent_encode(consumer_secret)).unwrap();
    if let Some(token_secret) = token_secret {
        write!(key, "{}", percent_encode(token_secret)).unwrap();
    }
    key
}
