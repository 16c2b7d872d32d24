pub mod create_invoice;
pub mod delete_invoice;
pub mod form;
pub mod list_invoices;
pub mod state;
pub mod update_invoice;

#[cfg(test)]
pub(crate) mod test_support;

pub use create_invoice::CreateInvoiceUseCase;
pub use delete_invoice::{DeleteInvoiceCommand, DeleteInvoiceUseCase};
pub use form::{FieldErrors, InvoiceForm, ValidInvoice};
pub use list_invoices::{InvoiceListItemDto, ListInvoicesResponse, ListInvoicesUseCase};
pub use state::{ActionOutcome, FormState, INVOICES_PATH};
pub use update_invoice::{UpdateInvoiceCommand, UpdateInvoiceUseCase};
