use std::net::SocketAddr;

use axum::{Router, extract::State, routing::get};
use secure_cookie::{CookieJarConfig, SameSite, SecureCookie, SecureCookieJar};
use tower_cookies::{CookieManagerLayer, Cookies};
use tracing_subscriber::EnvFilter;

async fn index(State(jar): State<SecureCookieJar>, cookies: Cookies) -> String {
    let n: usize = jar
        .get(&cookies, "n")
        .and_then(|value| String::from_utf8(value).ok())
        .and_then(|value| value.parse().ok())
        .unwrap_or(0);
    if let Err(err) = jar.add(&cookies, "n", (n + 1).to_string().as_bytes()) {
        tracing::error!(err = %err, "counter cookie not written");
    }
    format!("n={n}")
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let codec = SecureCookie::new("change me", 31);
    let jar_config = CookieJarConfig::default()
        // Default: true
        .with_http_only(true)
        // Default: SameSite::Strict
        .with_same_site(SameSite::Strict)
        // Default: true (set to false for local HTTP development)
        .with_secure(false)
        // Default: "/"
        .with_path("/")
        // Default: None
        .without_domain()
        // Default: 2
        .with_version(2)
        // Default: 4096
        .with_max_cookie_bytes(4096)
        // Default: true
        .with_clear_on_decode_error(true);
    let jar = SecureCookieJar::new(codec).with_config(jar_config);

    let app = Router::new()
        .route("/", get(index))
        .layer(CookieManagerLayer::new())
        .with_state(jar);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("tcp listener binds successfully");
    let local_addr = listener.local_addr().expect("local address is available");
    tracing::info!("listening at http://{local_addr}");

    axum::serve(listener, app)
        .await
        .expect("server runs successfully");
}
