pub mod settings;

pub use settings::{HttpClientConfig, ServerConfig, Settings, SupabaseConfig};
