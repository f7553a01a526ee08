//! The signed value wire format.
//!
//! Two versions exist and both are readable by Tornado's `get_secure_cookie`:
//!
//! - V1: `base64(value) "|" timestamp "|" hex(HMAC-SHA1(secret, name || base64(value) || timestamp))`
//! - V2: `"2|" F(key_version) F(timestamp) F(name) F(base64(value)) hex(HMAC-SHA256(secret, prefix))`
//!   where `F(s) = len(s) ":" s "|"` and `prefix` is everything before the signature.
//!
//! The functions here take `now` explicitly; [`crate::SecureCookie`] supplies it from its clock.

mod v1;
mod v2;

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::{Error, Result, config::SecureCookieConfig};

const MAX_DETECTED_VERSION: u32 = 999;

/// Sign `value` for the cookie `name` at time `now`.
pub fn create_signed_value(
    config: &SecureCookieConfig,
    name: &str,
    value: &[u8],
    version: u32,
    now: i64,
) -> Result<String> {
    let timestamp = now.to_string();
    let b64_value = STANDARD.encode(value);
    let secret = config.secret.expose();

    match version {
        1 => v1::encode(secret, name, &b64_value, &timestamp),
        2 => v2::encode(secret, name, &b64_value, &timestamp),
        other => Err(Error::UnsupportedVersion(other)),
    }
}

/// Works out which version produced `value`.
///
/// The version is the run of digits at the start of the value when that run starts with a
/// non-zero digit, is followed by `|` and is at most 999. Anything else is a V1 value, which
/// carries no prefix of its own.
pub fn detect_version(value: &str) -> u32 {
    let digits = value.bytes().take_while(u8::is_ascii_digit).count();
    let bytes = value.as_bytes();

    if digits == 0 || bytes[0] == b'0' || bytes.get(digits) != Some(&b'|') {
        return 1;
    }

    match value[..digits].parse::<u32>() {
        Ok(version) if version <= MAX_DETECTED_VERSION => version,
        _ => 1,
    }
}

/// Verify `value` for the cookie `name` at time `now` and return the original payload.
pub fn decode_signed_value(
    config: &SecureCookieConfig,
    name: &str,
    value: &str,
    now: i64,
) -> Result<Vec<u8>> {
    config.check_min_version()?;

    let version = detect_version(value);
    if version < config.min_version {
        return Err(Error::VersionTooOld {
            version,
            min_version: config.min_version,
        });
    }

    let secret = config.secret.expose();
    let max_age_seconds = config.max_age_seconds();
    match version {
        1 => v1::decode(secret, name, value, max_age_seconds, now),
        2 => v2::decode(secret, name, value, max_age_seconds, now),
        other => Err(Error::UnsupportedVersion(other)),
    }
}

fn check_not_expired(timestamp: i64, now: i64, max_age_seconds: i64) -> Result<()> {
    if timestamp < now.saturating_sub(max_age_seconds) {
        return Err(Error::Expired);
    }
    Ok(())
}

fn decode_payload(b64_value: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(b64_value)
        .map_err(|_| Error::Malformed("payload is not valid base64"))
}
