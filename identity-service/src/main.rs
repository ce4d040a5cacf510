use axum::{
    Router,
    routing::{get, post},
};
use color_eyre::eyre::Result;
use reqwest::Client as HttpClient;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use identity_adapters::{
    Settings, SupabaseIdentityRepository, SupabaseProfileRepository,
    http::routes::{create_profile, get_profile, login, logout, me, signup, update_profile},
};
use identity_application::{AuthUsecase, ProfileUsecase};
use identity_core::AuthService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");

    // Load configuration
    dotenvy::dotenv().ok();
    let settings = Settings::load()?;

    // Shared HTTP client; the timeout is the deadline for every remote call.
    let http_client = HttpClient::builder()
        .timeout(settings.http_client.timeout())
        .build()?;

    // Wire adapters, domain service, and use cases (outside in)
    let identity_repo =
        SupabaseIdentityRepository::new(settings.supabase.clone(), http_client.clone());
    let auth_service = AuthService::new(identity_repo);
    let auth_usecase = Arc::new(AuthUsecase::new(auth_service));

    let profile_repo = SupabaseProfileRepository::new(settings.supabase.clone(), http_client);
    let profile_usecase = Arc::new(ProfileUsecase::new(profile_repo));

    // Build router
    let auth_routes = Router::new()
        .route("/signup", post(signup::<SupabaseIdentityRepository>))
        .route("/login", post(login::<SupabaseIdentityRepository>))
        .route("/logout", post(logout::<SupabaseIdentityRepository>))
        .route("/me", get(me::<SupabaseIdentityRepository>))
        .with_state(auth_usecase);

    let profile_routes = Router::new()
        .route("/profiles", post(create_profile::<SupabaseProfileRepository>))
        .route(
            "/profiles/{id}",
            get(get_profile::<SupabaseProfileRepository>)
                .put(update_profile::<SupabaseProfileRepository>),
        )
        .with_state(profile_usecase);

    let app = auth_routes
        .merge(profile_routes)
        .layer(TraceLayer::new_for_http());

    // Start server
    let address = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(())
}
