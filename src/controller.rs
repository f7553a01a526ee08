use tower_cookies::{Cookie, Cookies};

use crate::{
    Error, Result,
    clock::{Clock, SystemClock},
    codec::SecureCookie,
    config::CookieJarConfig,
};

// RFC 6265 cookie-name token: printable ASCII minus separators.
fn validate_cookie_name(name: &str) -> Result<()> {
    const SEPARATORS: &[u8] = b"()<>@,;:\\\"/[]?={}";
    let is_token = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_graphic() && !SEPARATORS.contains(&b));
    if is_token {
        Ok(())
    } else {
        Err(Error::InvalidName)
    }
}

/// Reads and writes signed values through a [`tower_cookies::Cookies`] jar.
///
/// Install `tower_cookies::CookieManagerLayer` on the router; handlers then extract `Cookies`
/// and pass it to the jar.
#[derive(Debug, Clone)]
pub struct SecureCookieJar<K: Clock = SystemClock> {
    codec: SecureCookie<K>,
    config: CookieJarConfig,
}

impl<K: Clock> SecureCookieJar<K> {
    pub fn new(codec: SecureCookie<K>) -> Self {
        Self {
            codec,
            config: CookieJarConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: CookieJarConfig) -> Self {
        self.config = config;
        self
    }

    pub fn codec(&self) -> &SecureCookie<K> {
        &self.codec
    }

    /// The verified payload of cookie `name`, or `None` when it is absent or fails verification.
    ///
    /// A cookie that fails verification is removed from the client when
    /// `clear_on_decode_error` is set.
    pub fn get(&self, cookies: &Cookies, name: &str) -> Option<Vec<u8>> {
        match self.try_get(cookies, name) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(err = %err, cookie = name, "secure cookie rejected");
                if self.config.clear_on_decode_error {
                    self.remove(cookies, name);
                }
                None
            }
        }
    }

    /// Like [`Self::get`], but reports why a present cookie was rejected.
    pub fn try_get(&self, cookies: &Cookies, name: &str) -> Result<Option<Vec<u8>>> {
        let Some(cookie) = cookies.get(name) else {
            return Ok(None);
        };
        self.codec.decode(name, cookie.value()).map(Some)
    }

    /// Sign `value` and queue it as a `Set-Cookie` on the response.
    ///
    /// `name` must be a valid cookie-name token; anything else is [`Error::InvalidName`].
    pub fn add(&self, cookies: &Cookies, name: &str, value: &[u8]) -> Result<()> {
        validate_cookie_name(name)?;
        let signed_value = self.codec.sign(name, value, self.config.version)?;
        if signed_value.len() > self.config.max_cookie_bytes {
            tracing::warn!(
                cookie = name,
                len = signed_value.len(),
                max = self.config.max_cookie_bytes,
                "secure cookie exceeds max_cookie_bytes"
            );
            return Err(Error::CookieTooLarge {
                len: signed_value.len(),
                max: self.config.max_cookie_bytes,
            });
        }

        let cookie = self.config.build_cookie(
            name.to_owned(),
            signed_value,
            self.codec.config().max_age_days(),
        );
        cookies.add(cookie);
        tracing::debug!(cookie = name, "secure cookie written");
        Ok(())
    }

    pub fn remove(&self, cookies: &Cookies, name: &str) {
        let mut cookie = Cookie::new(name.to_owned(), "");
        self.config.apply_removal_attributes(&mut cookie);
        cookies.remove(cookie);
    }
}
