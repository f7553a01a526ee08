#![allow(dead_code)]

// Shared helpers for integration tests.
use secure_cookie::{ManualClock, SecureCookie, split_cookie};

pub const SECRET: &str = "123456789";
pub const MAX_AGE_DAYS: u32 = 31;
pub const DAY: i64 = 86_400;
pub const T: i64 = 1_700_000_000;

pub fn codec_at(now: i64) -> SecureCookie<ManualClock> {
    SecureCookie::new(SECRET, MAX_AGE_DAYS).with_clock(ManualClock::new(now))
}

pub fn signed_part(cookie: &str) -> (String, String) {
    // Split an encoded cookie back into the inputs of `decode`.
    let (name, signed_value) = split_cookie(cookie).expect("cookie has a name");
    (name.to_string(), signed_value.to_string())
}

pub fn flip_byte(value: &str, index: usize) -> String {
    // Replace one byte with a different printable ASCII byte.
    let mut bytes = value.as_bytes().to_vec();
    bytes[index] = if bytes[index] == b'A' { b'B' } else { b'A' };
    String::from_utf8(bytes).expect("tampered value is valid utf-8")
}

pub fn v2_signature(prefix: &str) -> String {
    // Independent HMAC-SHA256 over a hand-built V2 prefix.
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    let mut mac =
        Hmac::<Sha256>::new_from_slice(SECRET.as_bytes()).expect("hmac accepts any key length");
    mac.update(prefix.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
