//! The key/secret pairs used to authorize a request.

use std::borrow::Borrow;
use std::fmt::{self, Debug, Formatter};

/// An OAuth key/secret pair: either the client (consumer) credentials or the
/// token (access) credentials.
///
/// The key is transmitted with every authorized request; the secret only
/// ever contributes to the signing key.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Credentials<T = String> {
    /// The key part (`oauth_consumer_key` / `oauth_token` value).
    pub key: T,
    /// The secret part.
    pub secret: T,
}

impl<T: Borrow<str>> Credentials<T> {
    /// Creates a credential pair.
    pub fn new(key: T, secret: T) -> Self {
        Credentials { key, secret }
    }

    /// Returns the key as a string slice.
    pub fn key(&self) -> &str {
        self.key.borrow()
    }

    /// Returns the secret as a string slice.
    pub fn secret(&self) -> &str {
        self.secret.borrow()
    }

    /// Borrows the pair as `Credentials<&str>`.
    pub fn as_ref(&self) -> Credentials<&str> {
        Credentials {
            key: self.key.borrow(),
            secret: self.secret.borrow(),
        }
    }
}

// `Debug` elides the secret.
impl<T: Borrow<str>> Debug for Credentials<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key.borrow())
            .field("secret", &"<elided>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_ref_borrows_both_parts() {
        let owned = Credentials::new("k".to_owned(), "s".to_owned());
        let borrowed = owned.as_ref();
        assert_eq!(borrowed.key(), "k");
        assert_eq!(borrowed.secret(), "s");
    }

    #[test]
    fn debug_does_not_print_the_secret() {
        let credentials = Credentials::new("public", "very-secret");
        let rendered = format!("{:?}", credentials);
        assert!(rendered.contains("public"));
        assert!(!rendered.contains("very-secret"));
    }
}
