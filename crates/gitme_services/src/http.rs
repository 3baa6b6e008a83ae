use gitme_domain::HttpConfig;

const USER_AGENT: &str = concat!("gitme/", env!("CARGO_PKG_VERSION"));

/// Shared outbound client; GitHub rejects requests without a user agent.
pub fn build_client(config: &HttpConfig) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(config.request_timeout())
        .build()
}
