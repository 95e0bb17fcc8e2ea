use crate::domain::model::{FormData, HttpRequest, HttpResponse};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Element lookup and form serialization for the current page.
pub trait Document: Send + Sync {
    fn has_element(&self, id: &str) -> bool;

    /// Serializes the form with the given id, or `None` when no such form exists.
    fn form(&self, id: &str) -> Option<FormData>;
}

/// Blocking yes/no prompt.
pub trait ConfirmDialog: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

/// The `document.cookie` accessor pair: reads yield the visible `name=value; ...`
/// header, writes take one `Set-Cookie`-style assignment.
pub trait CookieStore {
    fn cookie_header(&self) -> String;
    fn set_cookie(&self, assignment: &str);
}

pub trait Navigator {
    fn assign(&self, location: &str);
}

/// Anything whose `value` can be assigned, such as an input element.
pub trait HasValue {
    fn set_value(&mut self, value: &str);
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Resolves once the request reaches a terminal state, whatever its status.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}
