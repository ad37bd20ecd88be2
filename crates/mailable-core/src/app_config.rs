/// Runtime configuration shared by the CLI and the API client.
#[derive(Clone)]
pub struct AppConfig {
    /// Google Maps Platform API key. Optional at load time; commands that
    /// reach the network fail with a clear message when it is absent.
    pub google_api_key: Option<String>,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Fixed sleep after each address. The validation API allows roughly
    /// 100 requests per minute, so the default keeps a sequential run at
    /// or under that ceiling.
    pub inter_request_delay_ms: u64,
    pub geocode_base_url: String,
    pub validation_base_url: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "google_api_key",
                &self.google_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .field("geocode_base_url", &self.geocode_base_url)
            .field("validation_base_url", &self.validation_base_url)
            .finish()
    }
}
