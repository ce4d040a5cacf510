pub mod config;
pub mod http;
pub mod supabase;

pub use config::{Settings, SupabaseConfig};
pub use supabase::{SupabaseIdentityRepository, SupabaseProfileRepository};
