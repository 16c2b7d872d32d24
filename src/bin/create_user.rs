//! Seeds a user that can sign in.
//!
//! Usage: `create-user <name> <email> <password>`

use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use invoicer::{
  domain::auth::{Email, Password, PasswordHasher, User, UserRepository},
  infrastructure::{
    config::Config, persistence::postgres::PostgresUserRepository,
    security::Argon2PasswordHasher,
  },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "invoicer=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let args: Vec<String> = std::env::args().skip(1).collect();
  let [name, email, password] = args.as_slice() else {
    anyhow::bail!("usage: create-user <name> <email> <password>");
  };

  let email = Email::new(email.as_str())?;
  let password = Password::new(password.as_str())?;

  let config = Config::load()?;
  let pool = PgPoolOptions::new()
    .max_connections(1)
    .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
    .connect(&config.database.url)
    .await?;
  sqlx::migrate!("./migrations").run(&pool).await?;

  let hasher = Argon2PasswordHasher::new()?;
  let password_hash = hasher.hash(&password).await?;

  let repo = PostgresUserRepository::new(pool);
  let user = repo
    .create(User::new(name.clone(), email.into_inner(), password_hash))
    .await?;

  tracing::info!("Created user {} <{}>", user.id, user.email);
  Ok(())
}
