//! Server construction and middleware wiring.

mod config;
pub mod settings;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::Method;
use actix_web::middleware::DefaultHeaders;
use actix_web::{App, HttpResponse, HttpServer, web};
use tracing::info;

use papersign::Trace;
#[cfg(debug_assertions)]
use papersign::doc::ApiDoc;
use papersign::domain::ports::{FixtureDocumentRepository, FixtureUserRepository};
use papersign::inbound::http::accounts::{current_session, login, logout, register};
use papersign::inbound::http::documents::{
    delete_document, get_document, list_documents, sign_document, update_document,
};
use papersign::inbound::http::health::{HealthState, live, ready};
use papersign::inbound::http::state::HttpState;
use papersign::inbound::http::validation::{json_config, path_config};
use papersign::outbound::persistence::{DieselDocumentRepository, DieselUserRepository};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

const CORS_METHODS: &str = "GET,POST,PUT,PATCH,DELETE,OPTIONS";
const CORS_HEADERS: &str = "content-type";

/// Build handler state over Diesel repositories when a pool is configured,
/// otherwise over in-memory fixtures.
fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => HttpState::from_repositories(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselDocumentRepository::new(pool.clone())),
        ),
        None => {
            info!("no database configured; using in-memory repositories");
            HttpState::from_repositories(
                Arc::new(FixtureUserRepository::default()),
                Arc::new(FixtureDocumentRepository::default()),
            )
        }
    }
}

/// Response headers allowing credentialed requests from `origin`.
fn cors_headers(origin: &str) -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", origin.to_owned()))
        .add(("Access-Control-Allow-Credentials", "true"))
        .add(("Access-Control-Allow-Methods", CORS_METHODS))
        .add(("Access-Control-Allow-Headers", CORS_HEADERS))
        .add(("Vary", "Origin"))
}

async fn preflight() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
    cors_origin: String,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
        cors_origin,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api")
        .wrap(session)
        .wrap(cors_headers(&cors_origin))
        .service(register)
        .service(login)
        .service(logout)
        .service(current_session)
        .service(list_documents)
        .service(get_document)
        .service(update_document)
        .service(delete_document)
        .service(sign_document)
        .route("/{tail:.*}", web::method(Method::OPTIONS).to(preflight));

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .app_data(path_config())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config));
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        cors_origin,
        db_pool: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
            cors_origin: cors_origin.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "listening");
    health_state.mark_ready();
    Ok(server)
}
