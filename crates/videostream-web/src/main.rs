use videostream_core::AppConfig;
use videostream_web::{setup, state::AppState, telemetry};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    telemetry::init_telemetry();

    // Load configuration; invalid backend credentials run the site in
    // degraded mode rather than aborting startup.
    let config = AppConfig::from_env();
    if !config.supabase.is_valid() {
        tracing::warn!(
            "Supabase environment variables are not set or invalid. \
             Set SUPABASE_URL and SUPABASE_ANON_KEY to enable uploads, auth, and browsing."
        );
    }

    let state = AppState::new(config.clone());
    let router = setup::routes::build_router(state);

    setup::server::start_server(&config, router).await?;

    Ok(())
}
