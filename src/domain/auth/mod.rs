pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::{AuthenticatedUser, Session, User};
pub use errors::{AuthErrorKind, HashError, RepositoryError, SessionError, SignInError};
pub use ports::{Credentials, CredentialsProvider, PasswordHasher, SessionStore, UserRepository};
pub use services::PasswordCredentialsProvider;
pub use value_objects::{Email, Password, SessionToken, TokenDigest};
