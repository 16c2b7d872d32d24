pub mod request_id;
pub mod web_auth;

pub use request_id::{RequestId, RequestIdExt, RequestIdMiddleware};
pub use web_auth::WebAuthMiddleware;
