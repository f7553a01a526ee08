use super::{check_not_expired, decode_payload};
use crate::{Error, Result, signer};

const PREFIX: &str = "2|";

// Key rotation is not implemented; every value is issued under key version 0.
const KEY_VERSION: &str = "0";

/// The framed fields of a V2 value, borrowed from the input.
#[derive(Debug, PartialEq, Eq)]
struct Fields<'a> {
    key_version: &'a str,
    timestamp: &'a str,
    name: &'a str,
    b64_value: &'a str,
    /// Everything before the signature; this is what the signature covers.
    signed: &'a str,
    signature: &'a str,
}

impl<'a> Fields<'a> {
    fn parse(value: &'a str) -> Result<Self> {
        let rest = value
            .strip_prefix(PREFIX)
            .ok_or(Error::Malformed("missing version prefix"))?;

        let (key_version, rest) = consume_field(rest)?;
        let (timestamp, rest) = consume_field(rest)?;
        let (name, rest) = consume_field(rest)?;
        let (b64_value, signature) = consume_field(rest)?;

        let signed = value
            .get(..value.len() - signature.len())
            .ok_or(Error::Malformed("truncated value"))?;

        Ok(Self {
            key_version,
            timestamp,
            name,
            b64_value,
            signed,
            signature,
        })
    }
}

/// Reads one `len ":" field "|"` frame off the front of `input`.
fn consume_field(input: &str) -> Result<(&str, &str)> {
    let (length, rest) = input
        .split_once(':')
        .ok_or(Error::Malformed("missing length delimiter"))?;

    let canonical = !length.is_empty()
        && length.bytes().all(|b| b.is_ascii_digit())
        && (length.len() == 1 || !length.starts_with('0'));
    if !canonical {
        return Err(Error::Malformed("invalid field length"));
    }
    let length: usize = length
        .parse()
        .map_err(|_| Error::Malformed("invalid field length"))?;

    let field = rest
        .get(..length)
        .ok_or(Error::Malformed("field runs past end of value"))?;
    if rest.as_bytes().get(length) != Some(&b'|') {
        return Err(Error::Malformed("missing field delimiter"));
    }
    let rest = rest
        .get(length + 1..)
        .ok_or(Error::Malformed("field runs past end of value"))?;

    Ok((field, rest))
}

fn format_field(out: &mut String, field: &str) {
    out.push_str(&field.len().to_string());
    out.push(':');
    out.push_str(field);
    out.push('|');
}

pub(super) fn encode(secret: &[u8], name: &str, b64_value: &str, timestamp: &str) -> Result<String> {
    let mut value = String::from(PREFIX);
    format_field(&mut value, KEY_VERSION);
    format_field(&mut value, timestamp);
    format_field(&mut value, name);
    format_field(&mut value, b64_value);

    let signature = signer::sign_v2(secret, value.as_bytes())?;
    value.push_str(&signature);
    Ok(value)
}

pub(super) fn decode(
    secret: &[u8],
    name: &str,
    value: &str,
    max_age_seconds: i64,
    now: i64,
) -> Result<Vec<u8>> {
    let fields = Fields::parse(value)?;

    let expected = signer::sign_v2(secret, fields.signed.as_bytes())?;
    if !signer::constant_time_eq(fields.signature, &expected) {
        return Err(Error::BadSignature);
    }

    fields
        .key_version
        .parse::<u64>()
        .map_err(|_| Error::Malformed("key version is not a number"))?;
    let timestamp: i64 = fields
        .timestamp
        .parse()
        .map_err(|_| Error::Malformed("timestamp is not a number"))?;

    if fields.name != name {
        return Err(Error::NameMismatch);
    }
    check_not_expired(timestamp, now, max_age_seconds)?;

    decode_payload(fields.b64_value)
}
