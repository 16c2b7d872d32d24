pub mod cache;
pub mod config;
pub mod persistence;
pub mod security;
pub mod session;
