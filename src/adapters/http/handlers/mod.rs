pub mod auth;
pub mod invoices;

use actix_web::{HttpResponse, http::header};

/// 303 to `location`, mirrored in `HX-Redirect` for htmx-driven forms
pub fn see_other(location: &str) -> HttpResponse {
  HttpResponse::SeeOther()
    .insert_header((header::LOCATION, location))
    .insert_header(("HX-Redirect", location))
    .finish()
}
