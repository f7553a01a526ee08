use secure_cookie::{SecureCookie, split_cookie};
use tracing_subscriber::EnvFilter;

fn round_trip(codec: &SecureCookie, name: &str, value: &str, version: u32) {
    let cookie = codec
        .encode(name, value.as_bytes(), version)
        .expect("cookie encodes");
    tracing::info!(version, %cookie, "encoded");

    let (name, signed_value) = split_cookie(&cookie).expect("cookie has a name");
    match codec.decode(name, signed_value) {
        Ok(value) => tracing::info!(version, value = %String::from_utf8_lossy(&value), "decoded"),
        Err(err) => tracing::error!(version, err = %err, "decode failed"),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let codec = SecureCookie::new("123456789", 31);
    round_trip(&codec, "c1", "hello world", 1);
    round_trip(&codec, "c2", "hello world too", 2);
}
