//! HMAC signers and the constant-time comparator shared by both value versions.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;
use subtle::{Choice, ConstantTimeEq};

use crate::{Error, Result};

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;

/// Lowercase hex HMAC-SHA1 over the concatenation of `parts`, with no separators.
pub(crate) fn sign_v1(secret: &[u8], parts: &[&[u8]]) -> Result<String> {
    let mut mac =
        HmacSha1::new_from_slice(secret).map_err(|_| Error::Malformed("invalid hmac key"))?;
    for part in parts {
        mac.update(part);
    }
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Lowercase hex HMAC-SHA256 over `message`.
pub(crate) fn sign_v2(secret: &[u8], message: &[u8]) -> Result<String> {
    let mut mac =
        HmacSha256::new_from_slice(secret).map_err(|_| Error::Malformed("invalid hmac key"))?;
    mac.update(message);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[derive(Debug, Clone, Copy)]
struct Comparison {
    equal: Choice,
    visited: usize,
}

// Visits every position of the shorter input, whatever the contents.
fn compare(a: &[u8], b: &[u8]) -> Comparison {
    let visited = a.len().min(b.len());
    let prefix_equal = a[..visited].ct_eq(&b[..visited]);
    let length_equal = a.len().ct_eq(&b.len());
    Comparison {
        equal: prefix_equal & length_equal,
        visited,
    }
}

/// Compares two strings without exiting early on the first differing byte.
///
/// Inputs of different lengths compare unequal, but the shorter length is still walked in full.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    compare(a.as_bytes(), b.as_bytes()).equal.into()
}
