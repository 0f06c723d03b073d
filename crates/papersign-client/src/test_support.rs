//! Recording doubles for the navigator, notifier and session seams.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::documents::Confirm;
use crate::{
    ClientError, Credentials, Navigator, Notification, Notifier, Route, SessionProvider,
    SignInOutcome,
};

#[derive(Default)]
pub(crate) struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub(crate) fn routes(&self) -> Vec<Route> {
        self.routes.lock().expect("navigator lock").clone()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, route: Route) {
        self.routes.lock().expect("navigator lock").push(route);
    }
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub(crate) fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().expect("notifier lock").clone()
    }

    pub(crate) fn messages(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .map(|notification| notification.message)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications
            .lock()
            .expect("notifier lock")
            .push(notification);
    }
}

/// Session provider with canned answers that counts its calls.
pub(crate) struct StubSessionProvider {
    sign_in: SignInOutcome,
    sign_out: Result<Route, ClientError>,
    sign_in_calls: AtomicUsize,
    sign_out_calls: AtomicUsize,
}

impl StubSessionProvider {
    pub(crate) fn accepting() -> Self {
        Self::with(SignInOutcome::Success, Ok(Route::Login))
    }

    pub(crate) fn rejecting(message: &str) -> Self {
        Self::with(SignInOutcome::Error(message.to_owned()), Ok(Route::Login))
    }

    pub(crate) fn failing_sign_out() -> Self {
        Self::with(
            SignInOutcome::Success,
            Err(ClientError::Transport {
                message: "connection reset".to_owned(),
            }),
        )
    }

    fn with(sign_in: SignInOutcome, sign_out: Result<Route, ClientError>) -> Self {
        Self {
            sign_in,
            sign_out,
            sign_in_calls: AtomicUsize::new(0),
            sign_out_calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn sign_in_calls(&self) -> usize {
        self.sign_in_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionProvider for StubSessionProvider {
    async fn sign_in(&self, _credentials: &Credentials) -> SignInOutcome {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        self.sign_in.clone()
    }

    async fn sign_out(&self, callback: Route) -> Result<Route, ClientError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        self.sign_out.clone().map(|_| callback)
    }
}

pub(crate) struct FixedConfirm(pub(crate) bool);

impl Confirm for FixedConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}
