use actix_web::web;
use std::sync::Arc;

use crate::application::auth::{AuthenticateUseCase, LogoutUseCase};
use crate::application::invoice::{
  CreateInvoiceUseCase, DeleteInvoiceUseCase, ListInvoicesUseCase, UpdateInvoiceUseCase,
};
use crate::domain::auth::SessionStore;

use super::handlers::{auth, invoices};
use super::middleware::WebAuthMiddleware;

/// Configure sign-in routes
///
/// # Routes
///
/// - POST /login - Authenticate and set the session cookie
/// - POST /logout - Revoke the session and clear the cookie
pub fn configure_auth_routes(
  cfg: &mut web::ServiceConfig,
  authenticate_use_case: Arc<AuthenticateUseCase>,
  logout_use_case: Arc<LogoutUseCase>,
) {
  cfg
    .app_data(web::Data::new(authenticate_use_case))
    .app_data(web::Data::new(logout_use_case))
    .route("/login", web::post().to(auth::login_submit))
    .route("/logout", web::post().to(auth::logout));
}

/// Use cases behind the invoice routes
#[derive(Clone)]
pub struct InvoiceRouteDependencies {
  pub session_store: Arc<dyn SessionStore>,
  pub create_invoice: Arc<CreateInvoiceUseCase>,
  pub update_invoice: Arc<UpdateInvoiceUseCase>,
  pub delete_invoice: Arc<DeleteInvoiceUseCase>,
  pub list_invoices: Arc<ListInvoicesUseCase>,
}

/// Configure the session-protected dashboard routes
///
/// # Routes
///
/// - GET /dashboard - Redirect to the invoice listing
/// - GET /dashboard/invoices - List invoices
/// - POST /dashboard/invoices - Create an invoice
/// - POST /dashboard/invoices/{id}/edit - Update an invoice
/// - POST /dashboard/invoices/{id}/delete - Delete an invoice
pub fn configure_invoice_routes(cfg: &mut web::ServiceConfig, deps: InvoiceRouteDependencies) {
  cfg.service(
    web::scope("/dashboard")
      .wrap(WebAuthMiddleware::new(deps.session_store))
      .app_data(web::Data::new(deps.create_invoice))
      .app_data(web::Data::new(deps.update_invoice))
      .app_data(web::Data::new(deps.delete_invoice))
      .app_data(web::Data::new(deps.list_invoices))
      .route("", web::get().to(invoices::dashboard_home))
      .route("/invoices", web::get().to(invoices::list_invoices))
      .route("/invoices", web::post().to(invoices::create_invoice))
      .route("/invoices/{id}/edit", web::post().to(invoices::update_invoice))
      .route(
        "/invoices/{id}/delete",
        web::post().to(invoices::delete_invoice),
      ),
  );
}
