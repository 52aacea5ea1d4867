//! OAuth 1.0a ([RFC 5849][rfc]) request signing and formatting.
//!
//! [rfc]: https://tools.ietf.org/html/rfc5849
//!
//! The crate turns a request description (method, URL, parameters, body)
//! into a transmit-ready request: the URL is normalized, the parameters are
//! canonicalized and signed, the `Authorization` header is serialized and
//! the body is encoded under the content type the endpoint expects. The
//! output is plain data and no I/O is ever performed, so the crate pairs
//! with any HTTP client.
//!
//! ## Example
//!
//! ```
//! use oauth1_sign::{Credentials, Formatter, Request};
//!
//! # fn main() -> Result<(), oauth1_sign::Error> {
//! let client = Credentials::new("consumer-key", "consumer-secret");
//! let token = Credentials::new("token", "token-secret");
//!
//! let formatter = Formatter::new(client).token(token);
//! let request = Request::post("https://api.example.com/1.1/statuses/update.json")
//!     .body_param("status", "hello world");
//!
//! let formatted = formatter.format(request)?;
//! assert!(formatted.headers["Authorization"].starts_with("OAuth oauth_consumer_key="));
//! assert_eq!(
//!     formatted.headers["Content-Type"],
//!     "application/x-www-form-urlencoded;charset=UTF-8",
//! );
//! assert_eq!(formatted.body.as_deref(), Some(&b"status=hello%20world"[..]));
//! # Ok(())
//! # }
//! ```
//!
//! ## Determinism
//!
//! Signing reads no ambient state besides the system clock and the random
//! nonce, and both have overrides ([`Formatter::nonce`] and
//! [`Formatter::timestamp`]). With the two fixed, byte-identical output
//! comes out for the same input, which is also how the crate tests itself
//! against reference vectors.

#![doc(html_root_url = "https://docs.rs/oauth1-sign/0.1.0")]
#![warn(missing_docs, rust_2018_idioms)]

mod authorization;
mod credentials;
mod error;
pub mod params;
mod request;
pub mod signature_method;
mod util;

pub use credentials::Credentials;
pub use error::Error;
pub use params::{ParamMap, ParamValue};
pub use request::{Body, BodyMode, FormattedRequest, Formatter, Request};
pub use signature_method::{HmacSha1, Plaintext, SignatureMethod};
pub use util::percent_encode;
