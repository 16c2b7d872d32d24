//! Authentication use cases
//!
//! Sign-in through a credentials provider and sign-out of the current session.

mod authenticate;
mod logout;

pub use authenticate::{AuthenticateOutcome, AuthenticateUseCase};
pub use logout::LogoutUseCase;
