//! Percent-encoding, nonce and timestamp helpers.

use std::time::{SystemTime, UNIX_EPOCH};

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::distributions::Alphanumeric;
use rand::Rng;

/// The strict form of percent-encoding ([RFC 3986 section 2.1.][rfc]) used
/// for every signing-related string.
///
/// [rfc]: https://tools.ietf.org/html/rfc3986#section-2.1
///
/// Everything outside the unreserved set (`ALPHA / DIGIT / "-" / "." / "_" /
/// "~"`) is escaped, including `*`, `!`, `'`, `(`, `)` and space, which
/// looser URL encoders leave alone.
const STRICT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// The set used for `application/x-www-form-urlencoded` bodies: like the
/// common URL query encoding, except that `*` is escaped as well. `!`, `'`,
/// `(` and `)` stay raw.
const FORM: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes `s` with the strict signing set.
pub fn percent_encode(s: &str) -> percent_encoding::PercentEncode<'_> {
    utf8_percent_encode(s, STRICT)
}

/// Percent-encodes `s` with the form-body set.
pub(crate) fn form_encode(s: &str) -> percent_encoding::PercentEncode<'_> {
    utf8_percent_encode(s, FORM)
}

const NONCE_LEN: usize = 32;

/// Returns a fresh 32-character alphanumeric nonce.
pub(crate) fn nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}

/// Returns the current Unix time in whole seconds, or `0` if the system
/// clock reads earlier than the epoch.
pub(crate) fn unix_timestamp() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs(),
        Err(_) => 0,
    }
}
