use crate::core::pending::PendingResponse;
use crate::domain::model::{DomEvent, EventKind, HttpRequest};
use crate::domain::ports::{ConfirmDialog, Document, HttpTransport};
use crate::utils::error::{FormwireError, Result};
use std::sync::Arc;

pub const DEFAULT_CONFIRM_MESSAGE: &str = "Delete!?";

type DeleteCallback = Arc<dyn Fn(bool, Option<&str>) + Send + Sync>;

/// What a click on a bound delete button led to.
#[derive(Debug)]
pub enum ClickOutcome {
    /// The user said no. Nothing was sent.
    Declined,
    Dispatched(PendingResponse),
}

/// A button that asks for confirmation, then sends a single `DELETE`.
pub struct DeleteBinding {
    button_id: String,
    url: String,
    transport: Arc<dyn HttpTransport>,
    dialog: Arc<dyn ConfirmDialog>,
    confirm_message: String,
    prevent_default_on_decline: bool,
    on_complete: DeleteCallback,
}

impl DeleteBinding {
    /// Binds to the button with `button_id`, failing with
    /// [`FormwireError::ElementNotFound`] if the page has no such element.
    pub fn bind(
        document: &dyn Document,
        button_id: &str,
        url: &str,
        transport: Arc<dyn HttpTransport>,
        dialog: Arc<dyn ConfirmDialog>,
    ) -> Result<Self> {
        if !document.has_element(button_id) {
            return Err(FormwireError::ElementNotFound {
                id: button_id.to_string(),
            });
        }

        tracing::debug!("Bound delete handler on #{} -> {}", button_id, url);

        Ok(Self {
            button_id: button_id.to_string(),
            url: url.to_string(),
            transport,
            dialog,
            confirm_message: DEFAULT_CONFIRM_MESSAGE.to_string(),
            prevent_default_on_decline: false,
            on_complete: Arc::new(|_: bool, _: Option<&str>| {}),
        })
    }

    pub fn with_confirm_message(mut self, message: impl Into<String>) -> Self {
        self.confirm_message = message.into();
        self
    }

    /// By default a declined click still runs its native action (following a link, say).
    pub fn prevent_default_on_decline(mut self, prevent: bool) -> Self {
        self.prevent_default_on_decline = prevent;
        self
    }

    /// Called with `(false, None)` on decline or transport failure and with
    /// `(true, Some(body))` once the request completes.
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn(bool, Option<&str>) + Send + Sync + 'static,
    {
        self.on_complete = Arc::new(callback);
        self
    }

    pub fn button_id(&self) -> &str {
        &self.button_id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Handles one click. The request, if any, runs on a spawned tokio task.
    ///
    /// Fails with [`FormwireError::UnexpectedEvent`] for a non-click event and
    /// with [`FormwireError::NoRuntime`] when a confirmed click happens outside a
    /// tokio runtime; in both cases nothing is sent and the event is untouched.
    pub fn click(&self, event: &mut DomEvent) -> Result<ClickOutcome> {
        if event.kind() != EventKind::Click {
            return Err(FormwireError::UnexpectedEvent {
                expected: EventKind::Click,
                actual: event.kind(),
            });
        }

        if !self.dialog.confirm(&self.confirm_message) {
            tracing::debug!("Delete on #{} declined", self.button_id);
            if self.prevent_default_on_decline {
                event.prevent_default();
            }
            (self.on_complete)(false, None);
            return Ok(ClickOutcome::Declined);
        }

        let request = HttpRequest::delete(&self.url);
        let transport = Arc::clone(&self.transport);
        let callback = Arc::clone(&self.on_complete);
        let url = self.url.clone();

        let pending = PendingResponse::spawn(self.url.clone(), async move {
            let result = transport.send(request).await;
            match &result {
                Ok(response) => {
                    tracing::info!("DELETE {} finished with status {}", url, response.status);
                    callback(true, Some(&response.body));
                }
                Err(e) => {
                    tracing::warn!("DELETE {} failed: {}", url, e);
                    callback(false, None);
                }
            }
            result
        })?;

        event.prevent_default();
        Ok(ClickOutcome::Dispatched(pending))
    }
}
