//! Document list controller.
//!
//! The view starts in [`ListState::Loading`]. A call to
//! [`DocumentListView::load`] fetches `GET /api/documents` and moves the
//! view to `Loaded` or `Errored`. Cancelling the token passed to `load`
//! drops the request and leaves the view in `Loading`.

use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use super::{ApiDocument, DocumentRow, StatusPresentation, format_file_size_in_mb};
use crate::busy::InFlight;
use crate::http::{decode_json, remote_error};
use crate::messages::documents as msg;
use crate::{ApiClient, ClientError, Notification, Notifier, Route, ToastStyle};

/// Load state of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    /// Fetch pending or in flight.
    Loading,
    /// Rows in server order.
    Loaded(Vec<DocumentRow>),
    /// Fetch failed with this message.
    Errored(String),
}

/// Action offered by the error screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryAction {
    /// Call [`DocumentListView::retry`] and load again.
    Reload,
}

/// One table row, ready to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    /// Document identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// `"2.00 MB"`, or `"-"` when the size is unknown or zero.
    pub size_text: String,
    /// Status label, icon and colour.
    pub status: StatusPresentation,
    /// Link to the document page.
    pub view_link: Route,
}

/// What the host should draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListScreen {
    /// Loading indicator.
    Loading {
        /// Indicator text.
        text: &'static str,
    },
    /// Error message with a retry control.
    Error {
        /// Message to show.
        message: String,
        /// Retry control.
        retry: RetryAction,
    },
    /// Document table.
    Table {
        /// Rows in server order.
        rows: Vec<RenderedRow>,
    },
}

/// Loads and renders the signed-in user's documents.
pub struct DocumentListView {
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
    state: Mutex<ListState>,
    in_flight: AtomicBool,
}

impl DocumentListView {
    /// New view in the `Loading` state.
    #[must_use]
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            state: Mutex::new(ListState::Loading),
            in_flight: AtomicBool::new(false),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ListState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> ListState {
        self.lock().clone()
    }

    /// Fetch the list, racing the request against `token`.
    ///
    /// # Errors
    /// - [`ClientError::Busy`] while another load runs.
    /// - [`ClientError::Cancelled`] when `token` fires first; the view stays
    ///   in `Loading`.
    /// - The fetch error otherwise, after it has been stored and notified.
    pub async fn load(&self, token: &CancellationToken) -> Result<(), ClientError> {
        let _guard = InFlight::acquire(&self.in_flight)?;
        *self.lock() = ListState::Loading;

        let fetched = tokio::select! {
            biased;
            () = token.cancelled() => {
                debug!("document load cancelled");
                return Err(ClientError::Cancelled);
            }
            result = self.fetch() => result,
        };

        match fetched {
            Ok(rows) => {
                debug!(count = rows.len(), "documents loaded");
                *self.lock() = ListState::Loaded(rows);
                Ok(())
            }
            Err(err) => {
                let message = match &err {
                    ClientError::Remote { message, .. } => message.clone(),
                    _ => msg::FETCH_ERROR.to_owned(),
                };
                error!(error = %err, "failed to load documents");
                *self.lock() = ListState::Errored(message);
                self.notifier.notify(Notification::error(
                    msg::LOAD_FAILED,
                    ToastStyle::host_default(),
                ));
                Err(err)
            }
        }
    }

    async fn fetch(&self) -> Result<Vec<DocumentRow>, ClientError> {
        let response = self.api.get("/api/documents").await?;
        if !response.status().is_success() {
            return Err(remote_error(response, msg::FETCH_FAILED).await);
        }
        let documents: Vec<ApiDocument> = decode_json(response).await?;
        Ok(documents.into_iter().map(DocumentRow::from).collect())
    }

    /// Reset to `Loading` so the host can call [`Self::load`] again.
    pub fn retry(&self) {
        *self.lock() = ListState::Loading;
    }

    /// Screen for the current state.
    #[must_use]
    pub fn render(&self) -> ListScreen {
        match &*self.lock() {
            ListState::Loading => ListScreen::Loading { text: msg::LOADING },
            ListState::Errored(message) => ListScreen::Error {
                message: message.clone(),
                retry: RetryAction::Reload,
            },
            ListState::Loaded(rows) => ListScreen::Table {
                rows: rows.iter().map(render_row).collect(),
            },
        }
    }
}

fn render_row(row: &DocumentRow) -> RenderedRow {
    let size_text = match row.size {
        Some(bytes) if bytes > 0 => format_file_size_in_mb(bytes),
        _ => "-".to_owned(),
    };
    RenderedRow {
        id: row.id.clone(),
        name: row.name.clone(),
        size_text,
        status: row.status.presentation(),
        view_link: Route::Document(row.id.clone()),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::DocumentStatus;
    use crate::test_support::RecordingNotifier;
    use rstest::rstest;
    use serde_json::{Value, json};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn document(id: &str, name: &str, size: Value, status: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "size": size,
            "mimeType": "application/pdf",
            "fileKey": format!("k{id}"),
            "status": status,
            "createdAt": "2024-03-01T10:00:00Z",
            "updatedAt": "2024-03-01T10:00:00Z"
        })
    }

    async fn serve(template: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/documents"))
            .respond_with(template)
            .mount(&server)
            .await;
        server
    }

    fn view(base_url: &str) -> (DocumentListView, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let view = DocumentListView::new(
            ApiClient::new(base_url).expect("client"),
            notifier.clone(),
        );
        (view, notifier)
    }

    #[rstest]
    fn starts_loading() {
        let (view, _) = view("http://localhost:1");
        assert_eq!(view.state(), ListState::Loading);
        assert_eq!(
            view.render(),
            ListScreen::Loading {
                text: "Carregando documentos..."
            }
        );
    }

    #[tokio::test]
    async fn renders_loaded_rows_in_server_order() {
        let server = serve(ResponseTemplate::new(200).set_body_json(json!([
            document("1", "a.pdf", json!(2_097_152), "PENDING"),
            document("2", "b.pdf", Value::Null, "SIGNED"),
            document("3", "c.pdf", json!(0), "REJECTED"),
        ])))
        .await;
        let (view, notifier) = view(&server.uri());

        view.load(&CancellationToken::new()).await.expect("load");

        let ListScreen::Table { rows } = view.render() else {
            panic!("expected table, got {:?}", view.render());
        };
        let summary: Vec<_> = rows
            .iter()
            .map(|row| (row.name.as_str(), row.size_text.as_str(), row.status.label))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("a.pdf", "2.00 MB", "Pendente"),
                ("b.pdf", "-", "Assinado"),
                ("c.pdf", "-", "Rejeitado"),
            ]
        );
        assert_eq!(rows[0].view_link, Route::Document("1".to_owned()));
        assert_eq!(rows[0].status, DocumentStatus::Pending.presentation());
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn empty_list_renders_empty_table() {
        let server = serve(ResponseTemplate::new(200).set_body_json(json!([]))).await;
        let (view, _) = view(&server.uri());

        view.load(&CancellationToken::new()).await.expect("load");

        assert_eq!(view.render(), ListScreen::Table { rows: Vec::new() });
    }

    #[rstest]
    #[case(ResponseTemplate::new(500).set_body_json(json!({"message": "db down"})), "db down")]
    #[case(ResponseTemplate::new(502), "Failed to fetch documents")]
    #[tokio::test]
    async fn server_error_shows_retry(#[case] template: ResponseTemplate, #[case] expected: &str) {
        let server = serve(template).await;
        let (view, notifier) = view(&server.uri());

        let err = view
            .load(&CancellationToken::new())
            .await
            .expect_err("server error");

        assert!(matches!(err, ClientError::Remote { .. }));
        assert_eq!(
            view.render(),
            ListScreen::Error {
                message: expected.to_owned(),
                retry: RetryAction::Reload,
            }
        );
        assert_eq!(
            notifier.messages(),
            vec!["Failed to load documents. Please try again later.".to_owned()]
        );
        assert_eq!(notifier.notifications()[0].style, ToastStyle::host_default());
    }

    #[tokio::test]
    async fn network_fault_uses_generic_message() {
        let (view, _) = view("http://127.0.0.1:1");

        let err = view
            .load(&CancellationToken::new())
            .await
            .expect_err("unreachable");

        assert!(matches!(err, ClientError::Transport { .. }));
        assert_eq!(
            view.state(),
            ListState::Errored("Error fetching documents".to_owned())
        );
    }

    #[tokio::test]
    async fn unknown_status_is_an_error() {
        let server = serve(
            ResponseTemplate::new(200)
                .set_body_json(json!([document("1", "a.pdf", json!(1), "ARCHIVED")])),
        )
        .await;
        let (view, _) = view(&server.uri());

        let err = view
            .load(&CancellationToken::new())
            .await
            .expect_err("decode");

        assert!(matches!(err, ClientError::Decode { .. }));
        assert!(matches!(view.state(), ListState::Errored(_)));
    }

    #[tokio::test]
    async fn cancelled_before_start_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/documents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;
        let (view, notifier) = view(&server.uri());
        let token = CancellationToken::new();
        token.cancel();

        let err = view.load(&token).await.expect_err("cancelled");

        assert_eq!(err, ClientError::Cancelled);
        assert_eq!(view.state(), ListState::Loading);
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn cancelling_mid_flight_abandons_request() {
        let server = serve(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(30)),
        )
        .await;
        let (view, _) = view(&server.uri());
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            canceller.cancel();
        });

        let err = tokio::time::timeout(Duration::from_secs(5), view.load(&token))
            .await
            .expect("load returns promptly")
            .expect_err("cancelled");

        assert_eq!(err, ClientError::Cancelled);
        assert_eq!(view.render(), ListScreen::Loading { text: "Carregando documentos..." });
        assert!(!view.in_flight.load(std::sync::atomic::Ordering::Acquire));
    }

    #[tokio::test]
    async fn retry_resets_and_reloads() {
        let server = serve(ResponseTemplate::new(500).set_body_json(json!({"message": "db down"})))
            .await;
        let (view, _) = view(&server.uri());
        let token = CancellationToken::new();
        view.load(&token).await.expect_err("first load fails");

        view.retry();
        assert_eq!(view.state(), ListState::Loading);

        server.reset().await;
        Mock::given(method("GET"))
            .and(path("/api/documents"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([document("1", "a.pdf", json!(2_097_152), "PENDING")])),
            )
            .mount(&server)
            .await;
        view.load(&token).await.expect("second load");

        assert!(matches!(view.state(), ListState::Loaded(rows) if rows.len() == 1));
    }
}
