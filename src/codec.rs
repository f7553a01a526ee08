use serde::{Serialize, de::DeserializeOwned};

use crate::{
    Error, Result,
    clock::{Clock, SystemClock},
    config::SecureCookieConfig,
    format,
};

/// Splits a `name=signed_value` cookie on its first `=`.
pub fn split_cookie(cookie: &str) -> Option<(&str, &str)> {
    cookie.split_once('=')
}

fn validate_name(name: &str) -> Result<()> {
    if !name.is_ascii() || name.contains('=') {
        return Err(Error::InvalidName);
    }
    Ok(())
}

/// Produces and verifies signed cookie values.
///
/// The handle is immutable after construction and can be shared freely between threads.
///
/// ```
/// use secure_cookie::SecureCookie;
///
/// let codec = SecureCookie::new("123456789", 31);
/// let cookie = codec.encode("c2", b"hello world too", 2)?;
/// let (name, signed_value) = secure_cookie::split_cookie(&cookie).expect("cookie has a name");
/// assert_eq!(codec.decode(name, signed_value)?, b"hello world too");
/// # Ok::<(), secure_cookie::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct SecureCookie<K: Clock = SystemClock> {
    config: SecureCookieConfig,
    clock: K,
}

impl SecureCookie<SystemClock> {
    pub fn new<S: AsRef<[u8]>>(secret: S, max_age_days: u32) -> Self {
        Self::from_config(SecureCookieConfig::new(secret, max_age_days))
    }

    pub fn from_config(config: SecureCookieConfig) -> Self {
        Self {
            config,
            clock: SystemClock,
        }
    }
}

impl<K: Clock> SecureCookie<K> {
    /// Replace the time source, typically with a [`crate::ManualClock`] in tests.
    #[must_use]
    pub fn with_clock<K2: Clock>(self, clock: K2) -> SecureCookie<K2> {
        SecureCookie {
            config: self.config,
            clock,
        }
    }

    pub fn config(&self) -> &SecureCookieConfig {
        &self.config
    }

    pub fn clock(&self) -> &K {
        &self.clock
    }

    /// The signed value alone, without the `name=` prefix.
    pub fn sign(&self, name: &str, value: &[u8], version: u32) -> Result<String> {
        validate_name(name)?;
        format::create_signed_value(&self.config, name, value, version, self.clock.now())
    }

    /// `name + "=" + signed_value`, timestamped with the current time.
    pub fn encode(&self, name: &str, value: &[u8], version: u32) -> Result<String> {
        let signed_value = self.sign(name, value, version)?;
        Ok(format!("{name}={signed_value}"))
    }

    /// Verify `signed_value` (the part after `=`) against `name` and return the original bytes.
    pub fn decode(&self, name: &str, signed_value: &str) -> Result<Vec<u8>> {
        format::decode_signed_value(&self.config, name, signed_value, self.clock.now())
    }

    /// Decode a whole `name=signed_value` cookie, returning its name with the payload.
    pub fn decode_cookie<'c>(&self, cookie: &'c str) -> Result<(&'c str, Vec<u8>)> {
        let (name, signed_value) =
            split_cookie(cookie).ok_or(Error::Malformed("cookie has no '=' separator"))?;
        let value = self.decode(name, signed_value)?;
        Ok((name, value))
    }

    /// Encode `value` as JSON and sign it.
    pub fn encode_json<T: Serialize>(&self, name: &str, value: &T, version: u32) -> Result<String> {
        let bytes =
            serde_json::to_vec(value).map_err(|err| Error::Serialization(err.to_string()))?;
        self.encode(name, &bytes, version)
    }

    /// Verify `signed_value` and parse its payload as JSON.
    pub fn decode_json<T: DeserializeOwned>(&self, name: &str, signed_value: &str) -> Result<T> {
        let bytes = self.decode(name, signed_value)?;
        serde_json::from_slice(&bytes).map_err(|err| Error::Serialization(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use time::Duration;

    use super::*;
    use crate::ManualClock;

    const T: i64 = 1_700_000_000;

    fn codec() -> SecureCookie<ManualClock> {
        SecureCookie::new("123456789", 31).with_clock(ManualClock::new(T))
    }

    #[test]
    fn encode_prefixes_name() {
        let codec = codec();
        let cookie = codec.encode("c1", b"hello world", 1).expect("encode succeeds");
        assert_eq!(
            cookie,
            "c1=aGVsbG8gd29ybGQ=|1700000000|218fb5550deec888387992d6614cd46f696c6053"
        );
    }

    #[test]
    fn encode_rejects_bad_names() {
        let codec = codec();
        assert_eq!(codec.encode("a=b", b"v", 2), Err(Error::InvalidName));
        assert_eq!(codec.encode("caf\u{e9}", b"v", 2), Err(Error::InvalidName));
        assert_eq!(codec.encode("c", b"v", 3), Err(Error::UnsupportedVersion(3)));
    }

    #[test]
    fn decode_cookie_splits_on_first_equals() {
        let codec = codec();
        let cookie = codec.encode("c1", b"hello world", 1).expect("encode succeeds");
        let (name, value) = codec.decode_cookie(&cookie).expect("decode succeeds");
        assert_eq!(name, "c1");
        assert_eq!(value, b"hello world");

        assert!(matches!(
            codec.decode_cookie("no-separator"),
            Err(Error::Malformed(_))
        ));
    }

    #[test]
    fn decode_uses_injected_clock() {
        let codec = codec();
        let cookie = codec.encode("c2", b"v", 2).expect("encode succeeds");
        let (name, signed_value) = split_cookie(&cookie).expect("cookie has a name");

        codec.clock().advance(Duration::days(31));
        assert_eq!(codec.decode(name, signed_value), Ok(b"v".to_vec()));

        codec.clock().advance(Duration::seconds(1));
        assert_eq!(codec.decode(name, signed_value), Err(Error::Expired));
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Visit {
        user: String,
        count: u32,
    }

    #[test]
    fn json_payloads() {
        let codec = codec();
        let visit = Visit {
            user: "alice".into(),
            count: 3,
        };
        let cookie = codec
            .encode_json("visit", &visit, 2)
            .expect("encode succeeds");
        let (name, signed_value) = split_cookie(&cookie).expect("cookie has a name");
        assert_eq!(codec.decode_json::<Visit>(name, signed_value), Ok(visit));

        let cookie = codec.encode("visit", b"not json", 2).expect("encode succeeds");
        let (name, signed_value) = split_cookie(&cookie).expect("cookie has a name");
        assert!(matches!(
            codec.decode_json::<Visit>(name, signed_value),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn codec_is_shareable_across_threads() {
        let codec = codec();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let codec = codec.clone();
                std::thread::spawn(move || {
                    let name = format!("c{i}");
                    let value = vec![i as u8; 16];
                    let cookie = codec.encode(&name, &value, 1 + i % 2).expect("encode succeeds");
                    let (name, signed_value) = split_cookie(&cookie).expect("cookie has a name");
                    codec.decode(name, signed_value).expect("decode succeeds") == value
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().expect("thread completes"));
        }
    }
}
