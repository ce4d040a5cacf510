pub mod identity;
pub mod profile;

pub use identity::SupabaseIdentityRepository;
pub use profile::SupabaseProfileRepository;
