//! Signed, tamper-evident cookie values.
//!
//! A [`SecureCookie`] signs a `(name, value)` pair together with a timestamp and later verifies
//! it, rejecting forgeries, expired values and values presented under a different cookie name.
//! The wire format is the one Tornado uses for `set_secure_cookie`, in both of its versions, so
//! values minted by either side verify on the other given the same secret.
//!
//! # Security
//! Values are signed, not encrypted: the payload is only Base64-encoded and anyone holding the
//! cookie can read it. A value can be replayed freely until it expires.
//!
//! # Features
//! `tower` (default) adds [`SecureCookieJar`], which reads and writes signed values through a
//! `tower_cookies::Cookies` jar.

mod clock;
mod codec;
mod config;
mod error;
pub mod format;
mod signer;

#[cfg(feature = "tower")]
mod controller;

pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::codec::{SecureCookie, split_cookie};
pub use crate::config::{DEFAULT_MIN_VERSION, MAX_SUPPORTED_VERSION, Secret, SecureCookieConfig};
pub use crate::error::{Error, Result};
pub use crate::signer::constant_time_eq;

#[cfg(feature = "tower")]
pub use tower_cookies::cookie::SameSite;

#[cfg(feature = "tower")]
pub use crate::config::CookieJarConfig;

#[cfg(feature = "tower")]
pub use crate::controller::SecureCookieJar;
