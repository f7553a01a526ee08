use super::{check_not_expired, decode_payload};
use crate::{Error, Result, signer};

// Tolerated clock skew for timestamps from the future.
const MAX_FUTURE_SECONDS: i64 = 31 * 86_400;

pub(super) fn encode(secret: &[u8], name: &str, b64_value: &str, timestamp: &str) -> Result<String> {
    let signature = signer::sign_v1(
        secret,
        &[name.as_bytes(), b64_value.as_bytes(), timestamp.as_bytes()],
    )?;
    Ok(format!("{b64_value}|{timestamp}|{signature}"))
}

pub(super) fn decode(
    secret: &[u8],
    name: &str,
    value: &str,
    max_age_seconds: i64,
    now: i64,
) -> Result<Vec<u8>> {
    let mut parts = value.split('|');
    let (Some(b64_value), Some(timestamp), Some(signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(Error::Malformed("expected three fields"));
    };

    let expected = signer::sign_v1(
        secret,
        &[name.as_bytes(), b64_value.as_bytes(), timestamp.as_bytes()],
    )?;
    if !signer::constant_time_eq(signature, &expected) {
        return Err(Error::BadSignature);
    }

    let timestamp: i64 = timestamp
        .parse()
        .map_err(|_| Error::Malformed("timestamp is not a number"))?;
    check_not_expired(timestamp, now, max_age_seconds)?;
    if timestamp > now.saturating_add(MAX_FUTURE_SECONDS) {
        return Err(Error::FutureTimestamp);
    }

    decode_payload(b64_value)
}
