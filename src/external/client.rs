use std::sync::LazyLock;
use std::time::Duration;

/// User-Agent sent with every request, e.g. `line-notify/0.1.0`
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client used by notifiers that are not given their own
///
/// Initialized lazily on first access and reused for the life of the process,
/// so every notifier shares one connection pool.
///
/// # Features
/// - **Timeouts**: 30s request timeout, 10s connect timeout
/// - **Connection pooling**: idle connections are kept for 90s
/// - **Security**: Rustls for TLS (no OpenSSL dependency)
///
/// # Example
/// ```ignore
/// use line_notify::external::client::HTTP_CLIENT;
///
/// let response = HTTP_CLIENT
///     .post("https://notify-api.line.me/api/notify")
///     .bearer_auth("token")
///     .form(&[("message", "hello")])
///     .send()
///     .await?;
/// ```
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    build_client(Duration::from_secs(30)).unwrap_or_else(|_| reqwest::Client::new())
});

/// Builds a client with the shared pool settings and the given request timeout
pub fn build_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        // Timeouts
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .gzip(true)
        .user_agent(USER_AGENT)
        .build()
}
