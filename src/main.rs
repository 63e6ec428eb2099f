use std::sync::Arc;

use axum::Router;
use time::Duration;
use tokio::net::TcpListener;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use chinochau::config::Config;
use chinochau::data::db::{self, DbPool};
use chinochau::data::repositories::UserRepository;
use chinochau::enrich::{Cedict, CedictDefinitions, DefinitionProvider, Enricher, GoogleTranslate};
use chinochau::generate::{DeepSeekClient, ExampleGenerator};
use chinochau::handlers::auth::{login, register};
use chinochau::handlers::examples::example_router;
use chinochau::handlers::flashcards::flashcard_router;
use chinochau::handlers::lists::list_router;
use chinochau::handlers::translation::translation_router;
use chinochau::services::{ExampleService, FlashcardService, ListService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Database configuration
    dotenv::dotenv().ok();
    let config = Config::from_env();

    let pool = db::build_pool(&config.database_url)?;
    db::init_schema(&pool)?;
    bootstrap_admin(&pool, &config)?;

    // Dictionary data loading
    let cedict = Arc::new(Cedict::load(&config.cedict_path)?);

    let providers: Vec<Box<dyn DefinitionProvider>> = vec![
        Box::new(CedictDefinitions(cedict.clone())),
        Box::new(GoogleTranslate::new(config.http_timeout)?),
    ];
    let enricher = Arc::new(Enricher::new(cedict, providers));

    if config.deepseek_api_key.is_none() {
        log::warn!("DEEPSEEK_API_KEY not set; example generation will be unavailable");
    }
    let generator: Arc<dyn ExampleGenerator> = Arc::new(DeepSeekClient::new(
        config.deepseek_base_url.clone(),
        config.deepseek_api_key.clone(),
        config.http_timeout,
    )?);

    let flashcard_service = FlashcardService::new(pool.clone(), enricher.clone());
    let example_service = ExampleService::new(pool.clone(), generator);
    let list_service = ListService::new(pool.clone());

    // Sessions configuration
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_expiry(Expiry::OnInactivity(Duration::days(1)))
        .with_secure(false);

    // Auth router
    let auth_router = Router::new()
        .merge(login::auth_router(pool.clone()))
        .merge(register::auth_router(pool.clone()));

    // Combined API router
    let api_router = Router::new()
        .nest("/flashcards", flashcard_router(flashcard_service))
        .nest("/lists", list_router(list_service))
        .merge(example_router(example_service))
        .merge(translation_router(enricher));

    // Main application router
    let app = Router::new()
        .nest("/auth", auth_router)
        .nest("/api", api_router)
        .layer(session_layer);

    // Start server
    let listener = TcpListener::bind(&config.bind_addr).await?;
    println!("Server running on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Creates the admin account from ADMIN_EMAIL/ADMIN_PASSWORD on first
/// start; a no-op when unset or already present.
fn bootstrap_admin(pool: &DbPool, config: &Config) -> anyhow::Result<()> {
    let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) else {
        return Ok(());
    };

    let mut conn = pool.get()?;
    if UserRepository::email_exists(&mut conn, email)? {
        return Ok(());
    }

    UserRepository::create_user(&mut conn, email, password, Some("Default Admin User"))?;
    log::info!("Bootstrapped admin user {}", email);
    Ok(())
}
