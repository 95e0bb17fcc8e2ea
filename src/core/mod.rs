pub mod coerce;
pub mod cookies;
pub mod datetime;
pub mod delete;
pub mod form;
pub mod pending;

pub use crate::domain::model::{DomEvent, FieldMap, FieldValue, FormData, HttpRequest, HttpResponse};
pub use crate::domain::ports::{ConfirmDialog, CookieStore, Document, HasValue, HttpTransport, Navigator};
pub use crate::utils::error::Result;
