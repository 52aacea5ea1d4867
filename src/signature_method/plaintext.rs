//! The `PLAINTEXT` signature method ([RFC 5849 section 3.4.4.][rfc]).
//!
//! [rfc]: https://tools.ietf.org/html/rfc5849#section-3.4.4

use super::{signing_key, SignatureMethod};

/// The `PLAINTEXT` signature method.
///
/// The signature is the signing key itself and the base string is ignored,
/// so this method only makes sense over a channel that already provides
/// confidentiality.
#[derive(Copy, Clone, Debug, Default)]
pub struct Plaintext;

impl SignatureMethod for Plaintext {
    type Signature = String;

    fn name(&self) -> &'static str {
        "PLAINTEXT"
    }

    fn sign(
        &self,
        consumer_secret: &str,
        token_secret: Option<&str>,
        _base_string: &str,
    ) -> String {
        signing_key(consumer_secret, token_secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_is_the_signing_key() {
        assert_eq!(Plaintext.sign("cs", Some("ts"), "ignored"), "cs&ts");
        assert_eq!(Plaintext.sign("c%s", None, "ignored"), "c%25s&");
    }
}
