//! Tests for account registration and login.

use std::io;
use std::sync::{Arc, Mutex};

use rstest::{fixture, rstest};
use tracing_subscriber::fmt::MakeWriter;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{FixtureUserRepository, MockUserRepository};

#[fixture]
fn service() -> AccountService<FixtureUserRepository> {
    AccountService::new(Arc::new(FixtureUserRepository::default()))
}

fn registration(email: &str, password: &str) -> Registration {
    Registration::try_from_parts("Ada Lovelace", email, password).expect("valid registration")
}

fn credentials(email: &str, password: &str) -> LoginCredentials {
    LoginCredentials::try_from_parts(email, password).expect("valid credentials")
}

#[rstest]
#[tokio::test]
async fn registered_user_can_log_in(service: AccountService<FixtureUserRepository>) {
    let user = service
        .register(&registration("ada@example.com", "analytical"))
        .await
        .expect("registration succeeds");
    assert_eq!(user.email().as_ref(), "ada@example.com");
    assert_eq!(user.display_name().as_ref(), "Ada Lovelace");

    let id = service
        .authenticate(&credentials("ADA@example.com", "analytical"))
        .await
        .expect("login succeeds");
    assert_eq!(&id, user.id());
}

#[rstest]
#[tokio::test]
async fn duplicate_registration_conflicts(service: AccountService<FixtureUserRepository>) {
    service
        .register(&registration("ada@example.com", "analytical"))
        .await
        .expect("first registration");

    let err = service
        .register(&registration("ada@example.com", "different"))
        .await
        .expect_err("duplicate email");
    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), "an account with this email already exists");
}

#[rstest]
#[case("ada@example.com", "wrong-password")]
#[case("nobody@example.com", "analytical")]
#[tokio::test]
async fn bad_credentials_share_one_message(
    service: AccountService<FixtureUserRepository>,
    #[case] email: &str,
    #[case] password: &str,
) {
    service
        .register(&registration("ada@example.com", "analytical"))
        .await
        .expect("registration");

    let err = service
        .authenticate(&credentials(email, password))
        .await
        .expect_err("login rejected");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), "invalid credentials");
}

#[rstest]
#[tokio::test]
async fn insert_race_on_email_maps_to_conflict() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().times(1).return_once(|_| Ok(None));
    repo.expect_insert()
        .times(1)
        .return_once(|account| Err(UserPersistenceError::duplicate_email(account.user.email().as_ref())));
    let service = AccountService::new(Arc::new(repo));

    let err = service
        .register(&registration("ada@example.com", "analytical"))
        .await
        .expect_err("constraint violation");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[case(UserPersistenceError::connection("down"), ErrorCode::ServiceUnavailable)]
#[case(UserPersistenceError::query("broken"), ErrorCode::InternalError)]
#[tokio::test]
async fn lookup_faults_map_to_domain_codes(
    #[case] failure: UserPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(move |_| Err(failure));
    let service = AccountService::new(Arc::new(repo));

    let err = service
        .authenticate(&credentials("ada@example.com", "analytical"))
        .await
        .expect_err("fault surfaces");
    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn unknown_email_still_runs_a_verification(service: AccountService<FixtureUserRepository>) {
    let err = service
        .authenticate(&credentials("ghost@example.com", "analytical"))
        .await
        .expect_err("unknown account");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
    let dummy = DUMMY_HASH.get().expect("throwaway hash initialised");
    assert!(dummy.starts_with("$argon2id$"));
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        let bytes = self.0.lock().expect("log buffer").clone();
        String::from_utf8(bytes).expect("utf8 logs")
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[rstest]
#[case::login(true)]
#[case::registration(false)]
#[tokio::test]
async fn store_faults_are_logged_with_their_cause(#[case] login: bool) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(|_| Err(UserPersistenceError::query("disk on fire")));
    let service = AccountService::new(Arc::new(repo));

    let err = if login {
        service
            .authenticate(&credentials("ada@example.com", "analytical"))
            .await
            .expect_err("fault surfaces")
    } else {
        service
            .register(&registration("ada@example.com", "analytical"))
            .await
            .expect_err("fault surfaces")
    };
    assert_eq!(err.code(), ErrorCode::InternalError);

    let output = logs.contents();
    assert!(output.contains("account operation failed"), "logs: {output}");
    assert!(output.contains("disk on fire"), "logs: {output}");
    let operation = if login { "authenticate" } else { "register" };
    assert!(output.contains(operation), "logs: {output}");
}
