pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use dtos::{ErrorResponse, LoginFormData, MessageResponse};
pub use errors::ApiError;
pub use middleware::{RequestId, RequestIdExt, RequestIdMiddleware, WebAuthMiddleware};
pub use routes::{InvoiceRouteDependencies, configure_auth_routes, configure_invoice_routes};
