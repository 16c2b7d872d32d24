use argon2::password_hash::SaltString;
use argon2::{
  Algorithm, Argon2, Params, Version,
  password_hash::{
    PasswordHash as Argon2PasswordHash, PasswordHasher as Argon2PasswordHasherTrait,
    PasswordVerifier,
  },
};
use async_trait::async_trait;

use crate::domain::auth::{HashError, Password, PasswordHasher};

/// Argon2id password hasher
///
/// - Memory cost: 19 MiB (19456 KiB)
/// - Time cost: 2 iterations
/// - Parallelism: 1 thread
pub struct Argon2PasswordHasher {
  argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
  pub fn new() -> Result<Self, HashError> {
    let params = Params::new(19456, 2, 1, Some(32))
      .map_err(|e| HashError::HashingFailed(format!("Failed to create Argon2 params: {}", e)))?;

    Ok(Self {
      argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
    })
  }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
  async fn hash(&self, password: &Password) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut rand::rngs::OsRng);

    let hash = self
      .argon2
      .hash_password(password.as_str().as_bytes(), &salt)
      .map_err(|e| HashError::HashingFailed(e.to_string()))?;

    Ok(hash.to_string())
  }

  /// Constant-time check of `password` against a stored PHC string
  async fn verify(&self, password: &Password, password_hash: &str) -> Result<bool, HashError> {
    let parsed_hash = Argon2PasswordHash::new(password_hash).map_err(|_| HashError::InvalidFormat)?;

    match self
      .argon2
      .verify_password(password.as_str().as_bytes(), &parsed_hash)
    {
      Ok(_) => Ok(true),
      Err(argon2::password_hash::Error::Password) => Ok(false),
      Err(e) => Err(HashError::HashingFailed(e.to_string())),
    }
  }
}
