//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_ports;
mod document_command;
mod document_query;
mod document_repository;
mod user_repository;

#[cfg(test)]
pub use account_ports::{MockLoginService, MockRegistrationService};
pub use account_ports::{LoginService, RegistrationService};
#[cfg(test)]
pub use document_command::MockDocumentCommand;
pub use document_command::DocumentCommand;
#[cfg(test)]
pub use document_query::MockDocumentQuery;
pub use document_query::DocumentQuery;
#[cfg(test)]
pub use document_repository::MockDocumentRepository;
pub use document_repository::{
    DocumentRepository, DocumentRepositoryError, FixtureDocumentRepository, NewSignature,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{
    FixtureUserRepository, UserAccount, UserPersistenceError, UserRepository,
};
