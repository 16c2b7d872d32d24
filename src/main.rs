use actix_web::{App, HttpServer, middleware::Logger, web};
use redis::aio::ConnectionManager;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use invoicer::{
  adapters::http::{
    InvoiceRouteDependencies, RequestIdMiddleware, configure_auth_routes,
    configure_invoice_routes,
  },
  application::auth::{AuthenticateUseCase, LogoutUseCase},
  application::invoice::{
    CreateInvoiceUseCase, DeleteInvoiceUseCase, ListInvoicesUseCase, UpdateInvoiceUseCase,
  },
  domain::auth::{PasswordCredentialsProvider, SessionStore},
  domain::invoice::PageCache,
  infrastructure::{
    cache::{InMemoryPageCache, RedisPageCache},
    config::{Config, DatabaseConfig, RedisConfig},
    persistence::postgres::{PostgresInvoiceRepository, PostgresUserRepository},
    security::Argon2PasswordHasher,
    session::{InMemorySessionStore, RedisSessionStore},
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "invoicer=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting invoicer");

  let config = Config::load().map_err(|e| {
    tracing::error!("Failed to load configuration: {}", e);
    std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
  })?;
  tracing::info!("Configuration loaded successfully");

  let db_pool = connect_database(&config.database).await?;

  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to run database migrations: {}", e);
      std::io::Error::other(format!("Migration error: {}", e))
    })?;
  tracing::info!("Database migrations completed");

  let (session_store, page_cache): (Arc<dyn SessionStore>, Arc<dyn PageCache>) =
    if config.redis.enabled {
      let redis_conn = connect_redis(&config.redis).await?;
      (
        Arc::new(RedisSessionStore::new(redis_conn.clone())),
        Arc::new(RedisPageCache::new(redis_conn, config.cache.page_ttl_seconds)),
      )
    } else {
      tracing::warn!("Redis disabled; sessions and cached pages are kept in process memory");
      (
        Arc::new(InMemorySessionStore::new()),
        Arc::new(InMemoryPageCache::new(config.cache.page_ttl_seconds)),
      )
    };

  let user_repo = Arc::new(PostgresUserRepository::new(db_pool.clone()));
  let invoice_repo = Arc::new(PostgresInvoiceRepository::new(db_pool.clone()));

  let password_hasher = Arc::new(Argon2PasswordHasher::new().map_err(|e| {
    tracing::error!("Failed to create password hasher: {}", e);
    std::io::Error::other(e.to_string())
  })?);

  let session_ttl = config.security.session_ttl().ok_or_else(|| {
    std::io::Error::new(
      std::io::ErrorKind::InvalidInput,
      "security.session_ttl_seconds is out of range",
    )
  })?;
  let credentials_provider = Arc::new(PasswordCredentialsProvider::new(
    user_repo,
    password_hasher,
    session_store.clone(),
    session_ttl,
  ));

  let authenticate_use_case = Arc::new(AuthenticateUseCase::new(credentials_provider));
  let logout_use_case = Arc::new(LogoutUseCase::new(session_store.clone()));

  let invoice_deps = InvoiceRouteDependencies {
    session_store,
    create_invoice: Arc::new(CreateInvoiceUseCase::new(
      invoice_repo.clone(),
      page_cache.clone(),
    )),
    update_invoice: Arc::new(UpdateInvoiceUseCase::new(
      invoice_repo.clone(),
      page_cache.clone(),
    )),
    delete_invoice: Arc::new(DeleteInvoiceUseCase::new(
      invoice_repo.clone(),
      page_cache.clone(),
    )),
    list_invoices: Arc::new(ListInvoicesUseCase::new(
      invoice_repo,
      page_cache,
      config.invoices.listing_page_size,
    )),
  };

  let server_host = config.server.host.clone();
  let server_port = config.server.port;
  tracing::info!("Listening on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    let authenticate_use_case = authenticate_use_case.clone();
    let logout_use_case = logout_use_case.clone();
    let invoice_deps = invoice_deps.clone();

    App::new()
      .wrap(Logger::default())
      .wrap(RequestIdMiddleware::new())
      .configure(|cfg| configure_auth_routes(cfg, authenticate_use_case, logout_use_case))
      .configure(|cfg| configure_invoice_routes(cfg, invoice_deps))
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}

async fn connect_database(config: &DatabaseConfig) -> std::io::Result<PgPool> {
  tracing::info!("Connecting to database");

  let pool = tokio::time::timeout(
    Duration::from_secs(config.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.max_connections)
      .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
      .connect(&config.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        config.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    match e {
      sqlx::Error::Io(_) => std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "Could not connect to database. Is PostgreSQL running?",
      ),
      _ => std::io::Error::other(format!("Database error: {}", e)),
    }
  })?;

  tracing::info!("Database connection pool created");
  Ok(pool)
}

async fn connect_redis(config: &RedisConfig) -> std::io::Result<ConnectionManager> {
  tracing::info!("Connecting to Redis: {}", config.url);

  let client = redis::Client::open(config.url.clone()).map_err(|e| {
    tracing::error!("Failed to create Redis client: {}", e);
    std::io::Error::new(
      std::io::ErrorKind::InvalidInput,
      format!("Invalid Redis URL: {}", e),
    )
  })?;

  let conn = tokio::time::timeout(
    Duration::from_secs(config.connect_timeout_seconds),
    client.get_connection_manager(),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Redis connection timed out after {} seconds. Is Redis running?",
      config.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Redis connection timed out after {} seconds",
        config.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to Redis: {}", e);
    std::io::Error::new(
      std::io::ErrorKind::ConnectionRefused,
      format!("Could not connect to Redis. Is Redis running at {}?", config.url),
    )
  })?;

  tracing::info!("Redis connection established");
  Ok(conn)
}

async fn health_check() -> &'static str {
  "OK"
}
