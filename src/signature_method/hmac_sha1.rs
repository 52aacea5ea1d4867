//! The `HMAC-SHA1` signature method ([RFC 5849 section 3.4.2.][rfc]).
//!
//! [rfc]: https://tools.ietf.org/html/rfc5849#section-3.4.2

use std::fmt::{self, Display, Formatter};

use base64::display::Base64Display;
use base64::engine::general_purpose::STANDARD;
use hmac::digest::Output;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use super::{signing_key, SignatureMethod};

/// The `HMAC-SHA1` signature method. This is the default method of the
/// crate.
#[derive(Copy, Clone, Debug, Default)]
pub struct HmacSha1;

/// A signature produced by `HmacSha1`. Displays as standard padded base64.
pub struct HmacSha1Signature {
    signature: Output<Hmac<Sha1>>,
}

impl SignatureMethod for HmacSha1 {
    type Signature = HmacSha1Signature;

    fn name(&self) -> &'static str {
        "HMAC-SHA1"
    }

    fn sign(
        &self,
        consumer_secret: &str,
        token_secret: Option<&str>,
        base_string: &str,
    ) -> HmacSha1Signature {
        let key = signing_key(consumer_secret, token_secret);
        let mut mac =
            Hmac::<Sha1>::new_from_slice(key.as_bytes()).expect("HMAC accepts any key length");
        mac.update(base_string.as_bytes());
        HmacSha1Signature {
            signature: mac.finalize().into_bytes(),
        }
    }
}

impl Display for HmacSha1Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&Base64Display::new(self.signature.as_slice(), &STANDARD), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signs_a_reference_base_string() {
        let base = "POST&https%3A%2F%2Fapi.example.com%2F1%2Fstatuses%2Fupdate.json&\
                    oauth_consumer_key%3Dck%26oauth_nonce%3Dabc%26\
                    oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1700000000%26\
                    oauth_version%3D1.0%26status%3Dhello";
        let signature = HmacSha1.sign("cs", None, base);
        assert_eq!(signature.to_string(), "P4KwcuWMIdoHj/S2CYxkO9MbiP8=");
    }

    #[test]
    fn token_secret_changes_the_key() {
        let with = HmacSha1.sign("cs", Some("ts"), "POST&a&b").to_string();
        let without = HmacSha1.sign("cs", None, "POST&a&b").to_string();
        assert_ne!(with, without);
    }
}
