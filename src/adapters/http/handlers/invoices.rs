use actix_web::{HttpResponse, http::header::ContentType, web};
use std::sync::Arc;
use uuid::Uuid;

use super::see_other;
use crate::adapters::http::errors::ApiError;
use crate::application::invoice::{
  ActionOutcome, CreateInvoiceUseCase, DeleteInvoiceCommand, DeleteInvoiceUseCase, INVOICES_PATH,
  InvoiceForm, ListInvoicesUseCase, UpdateInvoiceCommand, UpdateInvoiceUseCase,
};

fn outcome_response(outcome: ActionOutcome) -> HttpResponse {
  match outcome {
    ActionOutcome::Redirect(path) => see_other(&path),
    ActionOutcome::Revalidated(_) => HttpResponse::NoContent().finish(),
    ActionOutcome::Rejected(state) => HttpResponse::UnprocessableEntity().json(state),
  }
}

// GET /dashboard - Land on the invoice listing
pub async fn dashboard_home() -> HttpResponse {
  see_other(INVOICES_PATH)
}

// GET /dashboard/invoices - Cached invoice listing
pub async fn list_invoices(
  use_case: web::Data<Arc<ListInvoicesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let body = use_case.execute(INVOICES_PATH).await?;

  Ok(
    HttpResponse::Ok()
      .content_type(ContentType::json())
      .body(body),
  )
}

// POST /dashboard/invoices - Create an invoice
pub async fn create_invoice(
  form: web::Form<InvoiceForm>,
  use_case: web::Data<Arc<CreateInvoiceUseCase>>,
) -> HttpResponse {
  outcome_response(use_case.execute(form.into_inner()).await)
}

// POST /dashboard/invoices/{id}/edit - Update an invoice
pub async fn update_invoice(
  path: web::Path<Uuid>,
  form: web::Form<InvoiceForm>,
  use_case: web::Data<Arc<UpdateInvoiceUseCase>>,
) -> HttpResponse {
  let command = UpdateInvoiceCommand {
    invoice_id: path.into_inner(),
    form: form.into_inner(),
  };

  outcome_response(use_case.execute(command).await)
}

// POST /dashboard/invoices/{id}/delete - Delete an invoice
pub async fn delete_invoice(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteInvoiceUseCase>>,
) -> HttpResponse {
  let command = DeleteInvoiceCommand {
    invoice_id: path.into_inner(),
  };

  outcome_response(use_case.execute(command).await)
}
