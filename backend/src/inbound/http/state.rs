//! Shared HTTP adapter state.
//!
//! Handlers receive this state via `actix_web::web::Data` so they depend only
//! on domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    DocumentCommand, DocumentQuery, DocumentRepository, LoginService, RegistrationService,
    UserRepository,
};
use crate::domain::{AccountService, DocumentService};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub documents: Arc<dyn DocumentQuery>,
    pub document_commands: Arc<dyn DocumentCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub documents: Arc<dyn DocumentQuery>,
    pub document_commands: Arc<dyn DocumentCommand>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            registration,
            documents,
            document_commands,
        } = ports;
        Self {
            login,
            registration,
            documents,
            document_commands,
        }
    }

    /// Wire the domain services over a pair of repositories.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use papersign::domain::ports::{FixtureDocumentRepository, FixtureUserRepository};
    /// use papersign::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::from_repositories(
    ///     Arc::new(FixtureUserRepository::default()),
    ///     Arc::new(FixtureDocumentRepository::default()),
    /// );
    /// let _documents = state.documents.clone();
    /// ```
    pub fn from_repositories<U, D>(users: Arc<U>, documents: Arc<D>) -> Self
    where
        U: UserRepository + 'static,
        D: DocumentRepository + 'static,
    {
        let accounts = Arc::new(AccountService::new(users));
        let document_service = Arc::new(DocumentService::new(documents));
        Self::new(HttpStatePorts {
            login: accounts.clone(),
            registration: accounts,
            documents: document_service.clone(),
            document_commands: document_service,
        })
    }
}
