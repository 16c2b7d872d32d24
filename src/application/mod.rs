//! Application layer
//!
//! Use cases that orchestrate the domain ports: the invoice form actions, the
//! cached invoice listing and sign-in/sign-out.

pub mod auth;
pub mod invoice;
