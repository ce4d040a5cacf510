use std::time::Duration;

use secrecy::Secret;
use serde::Deserialize;

/// Immutable connection settings for the remote Supabase project.
///
/// Adapters receive this by value at construction and never read ambient
/// process state afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseConfig {
    /// Project base URL without a trailing slash, e.g. `https://x.supabase.co`.
    pub base_url: String,
    /// Privileged key used for the auth endpoints.
    pub service_role_key: Secret<String>,
    /// Public key used for the REST data endpoints.
    pub anon_key: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpClientConfig {
    pub timeout_in_millis: u64,
}

impl HttpClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

/// Process configuration, loaded once at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub supabase: SupabaseConfig,
    pub http_client: HttpClientConfig,
}

impl Settings {
    /// Loads settings from `APP__`-prefixed environment variables, e.g.
    /// `APP__SUPABASE__BASE_URL` or `APP__SERVER__PORT`.
    pub fn load() -> Result<Self, config::ConfigError> {
        let trimmed_base_url = |url: String| url.trim_end_matches('/').to_string();

        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("http_client.timeout_in_millis", 10_000)?
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let mut settings: Settings = settings.try_deserialize()?;
        settings.supabase.base_url = trimmed_base_url(settings.supabase.base_url);
        Ok(settings)
    }
}
