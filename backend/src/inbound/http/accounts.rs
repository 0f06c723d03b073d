//! Account API handlers: sign-up, login, logout and session lookup.
//!
//! ```text
//! POST /api/register {"name":"Ada","email":"ada@example.com","password":"secret"}
//! POST /api/auth/login {"email":"ada@example.com","password":"secret"}
//! POST /api/auth/logout
//! GET /api/auth/session
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{LoginCredentials, Registration};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::login_validation_error;

/// Sign-up request body for `POST /api/register`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "analytical")]
    pub password: String,
}

/// Login request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "analytical")]
    pub password: String,
}

/// Authenticated session summary.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub user_id: String,
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 503, description = "Account store unavailable", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        name,
        email,
        password,
    } = payload.into_inner();
    let registration =
        Registration::try_from_parts(&name, &email, &password).map_err(login_validation_error)?;
    let user = state.registration.register(&registration).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Authenticate and establish a session cookie.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = SessionResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Account store unavailable", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(&email, &password).map_err(login_validation_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.sign_in(&user_id)?;
    Ok(HttpResponse::Ok().json(SessionResponse {
        user_id: user_id.to_string(),
    }))
}

/// End the current session. Always succeeds.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["accounts"],
    operation_id = "logout"
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.sign_out();
    HttpResponse::NoContent().finish()
}

/// Report the signed-in user.
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Signed in", body = SessionResponse),
        (status = 401, description = "No session", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "currentSession"
)]
#[get("/auth/session")]
pub async fn current_session(session: SessionContext) -> ApiResult<web::Json<SessionResponse>> {
    let user_id = session.require_user_id()?;
    Ok(web::Json(SessionResponse {
        user_id: user_id.to_string(),
    }))
}

#[cfg(test)]
mod tests;
