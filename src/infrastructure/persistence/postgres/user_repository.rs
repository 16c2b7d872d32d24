use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::{Email, RepositoryError, User, UserRepository};

/// PostgreSQL implementation of the UserRepository trait
pub struct PostgresUserRepository {
  pool: PgPool,
}

impl PostgresUserRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Database row structure for users table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: Uuid,
  name: String,
  email: String,
  password: String,
}

impl From<UserRow> for User {
  fn from(row: UserRow) -> Self {
    User {
      id: row.id,
      name: row.name,
      email: row.email,
      password_hash: row.password,
    }
  }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
  async fn create(&self, user: User) -> Result<User, RepositoryError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            INSERT INTO users (id, name, email, password)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password
            "#,
    )
    .bind(user.id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.password_hash)
    .fetch_one(&self.pool)
    .await?;

    Ok(row.into())
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, name, email, password
            FROM users
            WHERE email = $1
            "#,
    )
    .bind(email.as_str())
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(User::from))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::infrastructure::persistence::postgres::test_db::setup_test_db;

  fn user(email: &str) -> User {
    User::new(
      "Test User".to_string(),
      email.to_string(),
      "hashed_password".to_string(),
    )
  }

  #[tokio::test]
  #[ignore = "requires a Docker daemon"]
  async fn test_create_and_find_by_email() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);

    let created = repo.create(user("find@example.com")).await.unwrap();

    let email = Email::new("find@example.com").unwrap();
    let found = repo.find_by_email(&email).await.unwrap();
    assert_eq!(found, Some(created));

    let other = Email::new("missing@example.com").unwrap();
    assert_eq!(repo.find_by_email(&other).await.unwrap(), None);
  }

  #[tokio::test]
  #[ignore = "requires a Docker daemon"]
  async fn test_duplicate_email() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);

    repo.create(user("duplicate@example.com")).await.unwrap();
    let result = repo.create(user("duplicate@example.com")).await;

    assert!(matches!(result, Err(RepositoryError::DuplicateKey(_))));
  }
}
