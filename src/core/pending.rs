use crate::domain::model::HttpResponse;
use crate::utils::error::{FormwireError, Result};
use std::future::Future;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// A dispatched request that resolves exactly once, with the response or an error.
#[derive(Debug)]
pub struct PendingResponse {
    url: String,
    handle: JoinHandle<Result<HttpResponse>>,
}

impl PendingResponse {
    /// Runs `request` on its own task in the current tokio runtime. Fails with
    /// [`FormwireError::NoRuntime`] when called outside one.
    pub(crate) fn spawn<F>(url: impl Into<String>, request: F) -> Result<Self>
    where
        F: Future<Output = Result<HttpResponse>> + Send + 'static,
    {
        let runtime = Handle::try_current().map_err(|_| FormwireError::NoRuntime)?;
        Ok(Self {
            url: url.into(),
            handle: runtime.spawn(request),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub async fn wait(self) -> Result<HttpResponse> {
        self.handle
            .await
            .map_err(|e| FormwireError::TaskFailed(e.to_string()))?
    }
}
