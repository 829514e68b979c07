use std::time::Duration;

/// Build a reqwest client with sane defaults. Built once at startup and
/// shared; per-call behavior is a single attempt, no retries.
pub fn make_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(2))
        .timeout(Duration::from_secs(10))
        .build()
        .expect("reqwest client")
}
