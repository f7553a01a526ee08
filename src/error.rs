use thiserror::Error;

/// Result type alias for secure cookie operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Reasons a signed value could not be produced or accepted.
///
/// None of the variants carry the secret or the offending token. Callers that want the token in
/// their diagnostics have it at hand already.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The requested or detected version is outside `{1, 2}`, or the configured minimum version
    /// exceeds 2.
    #[error("unsupported signed value version {0}")]
    UnsupportedVersion(u32),

    /// The detected version is below the configured minimum.
    #[error("signed value version {version} is older than the minimum version {min_version}")]
    VersionTooOld { version: u32, min_version: u32 },

    /// Structural failure: field count, framing, timestamp or Base64.
    #[error("malformed signed value: {0}")]
    Malformed(&'static str),

    #[error("invalid signed value signature")]
    BadSignature,

    /// The V2 name field does not match the name the caller asked for.
    #[error("signed value was issued for a different cookie name")]
    NameMismatch,

    #[error("signed value has expired")]
    Expired,

    /// V1 only: the timestamp is further in the future than clock skew explains.
    #[error("signed value timestamp is in the future; possible tampering")]
    FutureTimestamp,

    /// Cookie names must be ASCII without `=`; the jar also requires an RFC 6265 token.
    #[error("invalid cookie name")]
    InvalidName,

    /// The signed value is longer than the jar's `max_cookie_bytes`.
    #[error("cookie value exceeds max_cookie_bytes ({len} > {max})")]
    CookieTooLarge { len: usize, max: usize },

    #[error("payload serialization failed: {0}")]
    Serialization(String),
}
