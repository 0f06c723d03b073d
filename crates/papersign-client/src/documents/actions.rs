//! Per-document sign and delete actions.

use std::sync::Arc;

use tracing::{error, info};

use crate::http::remote_error;
use crate::messages::documents as msg;
use crate::{ApiClient, ClientError, Navigator, Route};

/// Host confirmation dialog.
pub trait Confirm: Send + Sync {
    /// Ask the user `prompt`; true means go ahead.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Sign and delete buttons of the document page.
pub struct DocumentActions {
    api: ApiClient,
    navigator: Arc<dyn Navigator>,
}

impl DocumentActions {
    /// Wire the actions to `api` and `navigator`.
    #[must_use]
    pub fn new(api: ApiClient, navigator: Arc<dyn Navigator>) -> Self {
        Self { api, navigator }
    }

    /// Open the signing page for `id`.
    pub fn on_sign(&self, id: &str) {
        self.navigator.push(Route::SignDocument(id.to_owned()));
    }

    /// Delete `id` once the user confirms, then return to the list.
    ///
    /// Returns `Ok(false)` when the user declines.
    ///
    /// # Errors
    /// The transport or server error, after it has been logged.
    pub async fn on_delete(&self, id: &str, confirm: &dyn Confirm) -> Result<bool, ClientError> {
        if !confirm.confirm(msg::DELETE_PROMPT) {
            return Ok(false);
        }
        self.delete(id).await.inspect_err(|err| {
            error!(document_id = id, error = %err, "failed to delete document");
        })?;
        info!(document_id = id, "document deleted");
        self.navigator.push(Route::Documents);
        Ok(true)
    }

    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let response = self.api.delete(&["api", "documents", id]).await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(remote_error(response, msg::DELETE_FAILED).await)
        }
    }
}
