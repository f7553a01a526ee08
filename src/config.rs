use std::fmt;

use zeroize::Zeroizing;

use crate::{Error, Result};

/// Lowest version accepted by [`crate::SecureCookie::decode`] unless configured otherwise.
pub const DEFAULT_MIN_VERSION: u32 = 1;

/// Highest version this crate can read or write.
pub const MAX_SUPPORTED_VERSION: u32 = 2;

/// The HMAC key. Zeroed on drop and never printed.
#[derive(Clone)]
pub struct Secret(Zeroizing<Vec<u8>>);

impl Secret {
    pub fn new<S: AsRef<[u8]>>(secret: S) -> Self {
        Self(Zeroizing::new(secret.as_ref().to_vec()))
    }

    pub(crate) fn expose(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Immutable settings of a [`crate::SecureCookie`].
#[derive(Debug, Clone)]
pub struct SecureCookieConfig {
    pub(crate) secret: Secret,
    pub(crate) max_age_days: u32,
    pub(crate) min_version: u32,
}

impl SecureCookieConfig {
    /// `max_age_days` is the freshness window in whole days.
    pub fn new<S: AsRef<[u8]>>(secret: S, max_age_days: u32) -> Self {
        Self {
            secret: Secret::new(secret),
            max_age_days,
            min_version: DEFAULT_MIN_VERSION,
        }
    }

    #[must_use]
    pub fn with_max_age_days(mut self, max_age_days: u32) -> Self {
        self.max_age_days = max_age_days;
        self
    }

    /// Values whose detected version is below `min_version` are rejected on decode.
    #[must_use]
    pub fn with_min_version(mut self, min_version: u32) -> Self {
        self.min_version = min_version;
        self
    }

    pub fn max_age_days(&self) -> u32 {
        self.max_age_days
    }

    pub fn min_version(&self) -> u32 {
        self.min_version
    }

    pub(crate) fn max_age_seconds(&self) -> i64 {
        i64::from(self.max_age_days) * 86_400
    }

    pub(crate) fn check_min_version(&self) -> Result<()> {
        if self.min_version > MAX_SUPPORTED_VERSION {
            return Err(Error::UnsupportedVersion(self.min_version));
        }
        Ok(())
    }
}

#[cfg(feature = "tower")]
pub use self::jar::CookieJarConfig;

#[cfg(feature = "tower")]
mod jar {
    use std::borrow::Cow;

    use time::Duration;
    use tower_cookies::{Cookie, cookie::SameSite};

    /// Attributes of the cookies written by [`crate::SecureCookieJar`].
    #[derive(Debug, Clone)]
    pub struct CookieJarConfig {
        pub(crate) http_only: bool,
        pub(crate) same_site: SameSite,
        pub(crate) secure: bool,
        pub(crate) path: Cow<'static, str>,
        pub(crate) domain: Option<Cow<'static, str>>,
        pub(crate) version: u32,
        pub(crate) max_cookie_bytes: usize,
        pub(crate) clear_on_decode_error: bool,
    }

    impl Default for CookieJarConfig {
        fn default() -> Self {
            Self {
                http_only: true,
                same_site: SameSite::Strict,
                secure: true,
                path: "/".into(),
                domain: None,
                version: 2,
                max_cookie_bytes: 4096,
                clear_on_decode_error: true,
            }
        }
    }

    impl CookieJarConfig {
        #[must_use]
        pub fn with_http_only(mut self, http_only: bool) -> Self {
            self.http_only = http_only;
            self
        }

        #[must_use]
        pub fn with_same_site(mut self, same_site: SameSite) -> Self {
            self.same_site = same_site;
            self
        }

        #[must_use]
        pub fn with_secure(mut self, secure: bool) -> Self {
            self.secure = secure;
            self
        }

        #[must_use]
        pub fn with_path<P: Into<Cow<'static, str>>>(mut self, path: P) -> Self {
            self.path = path.into();
            self
        }

        #[must_use]
        pub fn with_domain<D: Into<Cow<'static, str>>>(mut self, domain: D) -> Self {
            self.domain = Some(domain.into());
            self
        }

        #[must_use]
        pub fn without_domain(mut self) -> Self {
            self.domain = None;
            self
        }

        /// Signed value version used when writing cookies.
        #[must_use]
        pub fn with_version(mut self, version: u32) -> Self {
            self.version = version;
            self
        }

        #[must_use]
        pub fn with_max_cookie_bytes(mut self, max_cookie_bytes: usize) -> Self {
            self.max_cookie_bytes = max_cookie_bytes;
            self
        }

        #[must_use]
        pub fn with_clear_on_decode_error(mut self, clear_on_decode_error: bool) -> Self {
            self.clear_on_decode_error = clear_on_decode_error;
            self
        }

        pub(crate) fn build_cookie(
            &self,
            name: String,
            signed_value: String,
            max_age_days: u32,
        ) -> Cookie<'static> {
            let mut cookie_builder = Cookie::build((name, signed_value))
                .http_only(self.http_only)
                .same_site(self.same_site)
                .secure(self.secure)
                .path(self.path.clone())
                .max_age(Duration::days(i64::from(max_age_days)));

            if let Some(domain) = self.domain.clone() {
                cookie_builder = cookie_builder.domain(domain);
            }

            cookie_builder.build()
        }

        pub(crate) fn apply_removal_attributes(&self, cookie: &mut Cookie<'static>) {
            cookie.set_path(self.path.clone());
            if let Some(domain) = self.domain.clone() {
                cookie.set_domain(domain);
            }
        }
    }
}
