use crate::core::pending::PendingResponse;
use crate::domain::model::{DomEvent, EventKind, FieldMap, HttpRequest};
use crate::domain::ports::{Document, HttpTransport};
use crate::utils::error::{FormwireError, Result};
use std::sync::Arc;

pub const DEFAULT_CONTENT_TYPE: &str = "application/json";
const URL_ENCODED: &str = "application/x-www-form-urlencoded";

type Validation = Arc<dyn Fn(FieldMap) -> Option<FieldMap> + Send + Sync>;
type SubmitCallback = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Debug)]
pub enum SubmitOutcome {
    /// The validation step rejected the fields. Nothing was sent.
    Aborted,
    Dispatched(PendingResponse),
}

/// A form whose submission is replaced by a single `POST` of its fields.
pub struct FormBinding {
    form_id: String,
    url: String,
    document: Arc<dyn Document>,
    transport: Arc<dyn HttpTransport>,
    validation: Validation,
    on_complete: SubmitCallback,
}

/// Picks the `Content-Type` header and body for `fields`.
///
/// The declared enctype is sent as-is. A url-encoded form gets a url-encoded
/// body; every other type, and the no-enctype default, gets JSON.
pub fn encode_body(fields: &FieldMap, enctype: Option<&str>) -> Result<(String, String)> {
    let content_type = enctype
        .map(str::trim)
        .filter(|declared| !declared.is_empty())
        .unwrap_or(DEFAULT_CONTENT_TYPE);

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    let body = if essence == URL_ENCODED {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields.iter().map(|(name, value)| (name, value.as_str())))
            .finish()
    } else {
        serde_json::to_string(fields)?
    };

    Ok((content_type.to_string(), body))
}

impl FormBinding {
    /// Binds to the form with `form_id`, failing with
    /// [`FormwireError::ElementNotFound`] if there is no such form.
    pub fn bind(
        document: Arc<dyn Document>,
        form_id: &str,
        url: &str,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self> {
        if document.form(form_id).is_none() {
            return Err(FormwireError::ElementNotFound {
                id: form_id.to_string(),
            });
        }

        tracing::debug!("Bound submit handler on #{} -> {}", form_id, url);

        Ok(Self {
            form_id: form_id.to_string(),
            url: url.to_string(),
            document,
            transport,
            validation: Arc::new(|fields: FieldMap| Some(fields)),
            on_complete: Arc::new(|_: &str| {}),
        })
    }

    /// Inspects or rewrites the fields before sending. Returning `None` cancels
    /// the submission without a request or a callback.
    pub fn validation<F>(mut self, validation: F) -> Self
    where
        F: Fn(FieldMap) -> Option<FieldMap> + Send + Sync + 'static,
    {
        self.validation = Arc::new(validation);
        self
    }

    /// Receives the raw response text of each completed submission.
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_complete = Arc::new(callback);
        self
    }

    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Handles one submit event. Fields are read from the page at this moment.
    ///
    /// Any submit event has its default suppressed, even when the submission
    /// then fails with [`FormwireError::NoRuntime`] for lack of a tokio runtime.
    pub fn submit(&self, event: &mut DomEvent) -> Result<SubmitOutcome> {
        if event.kind() != EventKind::Submit {
            return Err(FormwireError::UnexpectedEvent {
                expected: EventKind::Submit,
                actual: event.kind(),
            });
        }
        event.prevent_default();

        let form = self
            .document
            .form(&self.form_id)
            .ok_or_else(|| FormwireError::ElementNotFound {
                id: self.form_id.clone(),
            })?;

        let Some(fields) = (self.validation)(form.fields) else {
            tracing::debug!("Submission of #{} rejected by validation", self.form_id);
            return Ok(SubmitOutcome::Aborted);
        };

        let (content_type, body) = encode_body(&fields, form.enctype.as_deref())?;
        tracing::debug!(
            "Posting {} field(s) from #{} as {}",
            fields.len(),
            self.form_id,
            content_type
        );

        let request = HttpRequest::post(&self.url, &content_type, body);
        let transport = Arc::clone(&self.transport);
        let callback = Arc::clone(&self.on_complete);
        let url = self.url.clone();

        let pending = PendingResponse::spawn(self.url.clone(), async move {
            let result = transport.send(request).await;
            match &result {
                Ok(response) => {
                    tracing::info!("POST {} finished with status {}", url, response.status);
                    callback(&response.body);
                }
                Err(e) => tracing::warn!("POST {} failed: {}", url, e),
            }
            result
        })?;

        Ok(SubmitOutcome::Dispatched(pending))
    }
}
