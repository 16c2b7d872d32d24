pub mod entities;
pub mod errors;
pub mod ports;
pub mod value_objects;

pub use entities::{Invoice, InvoiceChanges, NewInvoice};
pub use errors::InvoiceError;
pub use ports::{InvoiceRepository, PageCache};
pub use value_objects::{Amount, CustomerId, InvoiceStatus, ValueObjectError};
